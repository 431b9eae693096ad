use async_trait::async_trait;
use serde_json::json;
use tokio::sync::Mutex;

use crate::domains::message::{ChatPostPayload, DirectMessagePayload};
use crate::error::Result;
use crate::interfaces::transport::{ApiResponse, RoamTransport};

pub const MOCK_MESSAGE_ID: &str = "mock-message-id";

#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    SendMessage(DirectMessagePayload),
    PostChat(ChatPostPayload),
}

/// Answers every call with a canned 200 and never touches the network.
#[derive(Default)]
pub struct MockTransport {
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().await.clone()
    }

    fn canned() -> ApiResponse {
        let body = json!({ "chatId": MOCK_MESSAGE_ID, "status": "sent" });
        ApiResponse {
            status: 200,
            body: body.to_string(),
            json: Some(body),
        }
    }
}

#[async_trait]
impl RoamTransport for MockTransport {
    async fn send_message(&self, payload: &DirectMessagePayload) -> Result<ApiResponse> {
        tracing::info!("mock mode: skipping chat.sendMessage");
        self.calls
            .lock()
            .await
            .push(RecordedCall::SendMessage(payload.clone()));
        Ok(Self::canned())
    }

    async fn post_chat(&self, payload: &ChatPostPayload) -> Result<ApiResponse> {
        tracing::info!("mock mode: skipping chat.post");
        self.calls
            .lock()
            .await
            .push(RecordedCall::PostChat(payload.clone()));
        Ok(Self::canned())
    }
}
