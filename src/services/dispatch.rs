use std::sync::Arc;

use crate::config::SenderConfig;
use crate::domains::message::{ChatPostPayload, DirectMessagePayload, Sender};
use crate::domains::recipient::classify;
use crate::error::{RoamActionError, Result};
use crate::interfaces::transport::{ApiResponse, RoamTransport};

/// Requests to issue for one run. Building a plan performs every validation,
/// so nothing reaches the network when it fails.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchPlan {
    pub direct: Option<DirectMessagePayload>,
    pub chat: Option<ChatPostPayload>,
    pub recipient_count: usize,
}

impl DispatchPlan {
    pub fn build(recipients: &str, text: &str, sender: &SenderConfig) -> Result<Self> {
        let partition = classify(recipients)?;
        let recipient_count = partition.len();

        let direct = match partition.direct.len() {
            0 => None,
            1 => {
                let recipient = partition.direct.into_iter().next();
                recipient.map(|id| DirectMessagePayload::new(id, text, Sender::from_config(sender)))
            }
            n => {
                return Err(RoamActionError::Validation(format!(
                    "Only one recipient is allowed for direct messages, got {n}: {}",
                    partition
                        .direct
                        .iter()
                        .map(|id| id.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                )))
            }
        };

        let chat = if partition.chat.is_empty() {
            None
        } else {
            Some(ChatPostPayload::new(partition.chat, text))
        };

        Ok(Self {
            direct,
            chat,
            recipient_count,
        })
    }
}

#[derive(Debug)]
pub struct DispatchReport {
    pub direct: Option<Result<ApiResponse>>,
    pub chat: Option<Result<ApiResponse>>,
    pub recipient_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchSummary {
    pub message_id: Option<String>,
    pub recipient_count: usize,
}

impl DispatchReport {
    /// Identifier from the direct send, falling back to the chat post.
    pub fn message_id(&self) -> Option<String> {
        let from = |outcome: &Option<Result<ApiResponse>>| match outcome {
            Some(Ok(response)) => response.message_id(),
            _ => None,
        };
        from(&self.direct).or_else(|| from(&self.chat))
    }

    pub fn attempted(&self) -> usize {
        usize::from(self.direct.is_some()) + usize::from(self.chat.is_some())
    }

    pub fn into_result(self) -> Result<DispatchSummary> {
        let message_id = self.message_id();
        let attempted = self.attempted();
        let mut failures = Vec::new();
        if let Some(Err(err)) = self.direct {
            failures.push(("direct message", err));
        }
        if let Some(Err(err)) = self.chat {
            failures.push(("chat post", err));
        }

        if failures.is_empty() {
            return Ok(DispatchSummary {
                message_id,
                recipient_count: self.recipient_count,
            });
        }
        if attempted == 1 && failures.len() == 1 {
            if let Some((_, err)) = failures.pop() {
                return Err(err);
            }
        }
        let detail = failures
            .iter()
            .map(|(branch, err)| format!("{branch} failed: {err}"))
            .collect::<Vec<_>>()
            .join("; ");
        let prefix = if failures.len() < attempted {
            "partial failure"
        } else {
            "all sends failed"
        };
        Err(RoamActionError::PartialFailure(format!("{prefix}: {detail}")))
    }
}

pub struct Dispatcher {
    transport: Arc<dyn RoamTransport>,
}

impl Dispatcher {
    pub fn new(transport: Arc<dyn RoamTransport>) -> Self {
        Self { transport }
    }

    /// Runs both branches in turn. A failed direct send never prevents the
    /// chat post.
    pub async fn dispatch(&self, plan: &DispatchPlan) -> DispatchReport {
        let direct = match &plan.direct {
            Some(payload) => {
                tracing::debug!(recipient = ?payload.recipients.first(), "dispatching direct message");
                let outcome = self.transport.send_message(payload).await;
                if let Err(err) = &outcome {
                    tracing::warn!(error = %err, "direct message failed");
                }
                Some(outcome)
            }
            None => None,
        };

        let chat = match &plan.chat {
            Some(payload) => {
                tracing::debug!(chats = payload.chat.len(), "dispatching chat post");
                let outcome = self.transport.post_chat(payload).await;
                if let Err(err) = &outcome {
                    tracing::warn!(error = %err, "chat post failed");
                }
                Some(outcome)
            }
            None => None,
        };

        DispatchReport {
            direct,
            chat,
            recipient_count: plan.recipient_count,
        }
    }
}
