use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::Serialize;

use crate::config::{ActionConfig, USER_AGENT as ACTION_USER_AGENT};
use crate::domains::message::{ChatPostPayload, DirectMessagePayload};
use crate::error::{RoamActionError, Result};
use crate::interfaces::transport::{ApiResponse, RoamTransport};

const SEND_MESSAGE_PATH: &str = "v1/chat.sendMessage";
const CHAT_POST_PATH: &str = "v0/chat.post";

pub struct HttpTransport {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(api_key: &str, base_url: String, timeout: Duration) -> Result<Self> {
        let headers = Self::build_headers(api_key)?;
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| RoamActionError::Config(e.to_string()))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn from_config(config: &ActionConfig) -> Result<Self> {
        Self::new(
            &config.api_key,
            config.base_url(),
            Duration::from_secs(config.timeout_seconds()),
        )
    }

    fn build_headers(api_key: &str) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(ACTION_USER_AGENT));
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key.trim()))
            .map_err(|_| RoamActionError::Config("api key is not a valid header value".to_string()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        Ok(headers)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn post<T: Serialize + Sync>(&self, path: &str, payload: &T) -> Result<ApiResponse> {
        let body = serde_json::to_vec(payload)
            .map_err(|e| RoamActionError::Serialization(e.to_string()))?;
        let url = self.url(path);
        tracing::debug!(%url, "posting to Roam API");
        let response = self
            .client
            .post(&url)
            .body(body)
            .send()
            .await
            .map_err(|e| RoamActionError::Transport(describe(&e)))?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| RoamActionError::Transport(describe(&e)))?;
        ApiResponse::from_body(status, text).error_for_status()
    }
}

fn describe(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        format!("request timed out: {err}")
    } else {
        err.to_string()
    }
}

#[async_trait]
impl RoamTransport for HttpTransport {
    async fn send_message(&self, payload: &DirectMessagePayload) -> Result<ApiResponse> {
        self.post(SEND_MESSAGE_PATH, payload).await
    }

    async fn post_chat(&self, payload: &ChatPostPayload) -> Result<ApiResponse> {
        self.post(CHAT_POST_PATH, payload).await
    }
}
