use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;

use crate::domains::message::{ChatPostPayload, DirectMessagePayload};
use crate::error::{RoamActionError, Result};

/// Response field carrying the identifier of a delivered message.
pub const MESSAGE_ID_FIELD: &str = "chatId";

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
    pub json: Option<Value>,
}

impl ApiResponse {
    /// Builds a response from a raw body. A body that is not JSON is kept as
    /// text only; it does not fail the call on its own.
    pub fn from_body(status: u16, body: String) -> Self {
        let json = if body.trim().is_empty() {
            None
        } else {
            match serde_json::from_str::<Value>(&body) {
                Ok(value) => Some(value),
                Err(err) => {
                    tracing::warn!(status, error = %err, "Failed to parse response as JSON: {body}");
                    None
                }
            }
        };
        Self { status, body, json }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn message_id(&self) -> Option<String> {
        match self.json.as_ref()?.get(MESSAGE_ID_FIELD)? {
            Value::String(id) if !id.is_empty() => Some(id.clone()),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        }
    }

    /// Best available error text: the JSON `error` field, then the raw body,
    /// then the status reason phrase.
    pub fn error_message(&self) -> String {
        if let Some(error) = self.json.as_ref().and_then(|v| v.get("error")) {
            match error {
                Value::String(text) if !text.is_empty() => return text.clone(),
                Value::Null | Value::String(_) => {}
                other => return other.to_string(),
            }
        }
        if !self.body.trim().is_empty() {
            return self.body.clone();
        }
        StatusCode::from_u16(self.status)
            .ok()
            .and_then(|code| code.canonical_reason())
            .unwrap_or("unknown status")
            .to_string()
    }

    /// Turns a non-2xx response into `RoamActionError::Api`.
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(RoamActionError::Api {
                status: self.status,
                message: self.error_message(),
            })
        }
    }
}

#[async_trait]
pub trait RoamTransport: Send + Sync {
    /// `POST /v1/chat.sendMessage`
    async fn send_message(&self, payload: &DirectMessagePayload) -> Result<ApiResponse>;

    /// `POST /v0/chat.post`
    async fn post_chat(&self, payload: &ChatPostPayload) -> Result<ApiResponse>;
}
