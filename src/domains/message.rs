use serde::{Deserialize, Serialize};

use crate::config::SenderConfig;
use crate::domains::recipient::RecipientId;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sender {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

fn present(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.trim().is_empty()).cloned()
}

impl Sender {
    /// Keeps only non-empty fields; `None` when nothing is left.
    pub fn from_config(config: &SenderConfig) -> Option<Self> {
        let sender = Self {
            id: present(&config.id),
            name: present(&config.name),
            image_url: present(&config.image_url),
        };
        if sender == Self::default() {
            None
        } else {
            Some(sender)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectMessagePayload {
    pub recipients: Vec<RecipientId>,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<Sender>,
}

impl DirectMessagePayload {
    pub fn new(recipient: RecipientId, text: impl Into<String>, sender: Option<Sender>) -> Self {
        Self {
            recipients: vec![recipient],
            text: text.into(),
            sender,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatPostPayload {
    pub chat: Vec<RecipientId>,
    pub text: String,
    pub sync: bool,
}

impl ChatPostPayload {
    pub fn new(chat: Vec<RecipientId>, text: impl Into<String>) -> Self {
        Self {
            chat,
            text: text.into(),
            sync: true,
        }
    }
}
