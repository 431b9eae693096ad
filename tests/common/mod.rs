#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::Path;

use async_trait::async_trait;
use tempfile::NamedTempFile;
use tokio::sync::Mutex;

use roam_message_sender::domains::message::{ChatPostPayload, DirectMessagePayload};
use roam_message_sender::error::Result;
use roam_message_sender::interfaces::transport::{ApiResponse, RoamTransport};
use roam_message_sender::ActionReporter;

pub const CHAT_ID: &str = "B-1a2b3c4d-1234-5678-9abc-1234567890ab";

/// Pops one scripted outcome per call, in call order.
pub struct ScriptedTransport {
    outcomes: Mutex<VecDeque<Result<ApiResponse>>>,
    pub calls: Mutex<Vec<&'static str>>,
}

impl ScriptedTransport {
    pub fn new(outcomes: Vec<Result<ApiResponse>>) -> Self {
        Self {
            outcomes: Mutex::new(VecDeque::from(outcomes)),
            calls: Mutex::new(Vec::new()),
        }
    }

    async fn next(&self, endpoint: &'static str) -> Result<ApiResponse> {
        self.calls.lock().await.push(endpoint);
        self.outcomes
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok(ApiResponse::from_body(200, String::new())))
    }
}

#[async_trait]
impl RoamTransport for ScriptedTransport {
    async fn send_message(&self, _payload: &DirectMessagePayload) -> Result<ApiResponse> {
        self.next("chat.sendMessage").await
    }

    async fn post_chat(&self, _payload: &ChatPostPayload) -> Result<ApiResponse> {
        self.next("chat.post").await
    }
}

pub struct RunnerFiles {
    pub output: NamedTempFile,
    pub summary: NamedTempFile,
}

impl RunnerFiles {
    pub fn new() -> Self {
        Self {
            output: NamedTempFile::new().unwrap(),
            summary: NamedTempFile::new().unwrap(),
        }
    }

    pub fn reporter(&self) -> ActionReporter {
        ActionReporter::new(
            Some(self.output.path().to_path_buf()),
            Some(self.summary.path().to_path_buf()),
        )
    }

    pub fn output(&self) -> String {
        read(self.output.path())
    }

    pub fn summary(&self) -> String {
        read(self.summary.path())
    }
}

fn read(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap()
}
