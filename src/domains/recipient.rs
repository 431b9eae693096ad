use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{RoamActionError, Result};

static CHAT_ID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^[BUVGMDPC]-[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$",
    )
    .expect("chat id pattern compiles")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipientKind {
    Direct,
    Chat,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipientId(String);

impl RecipientId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn kind(&self) -> RecipientKind {
        if CHAT_ID_RE.is_match(&self.0) {
            RecipientKind::Chat
        } else {
            RecipientKind::Direct
        }
    }
}

impl fmt::Display for RecipientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipientPartition {
    pub direct: Vec<RecipientId>,
    pub chat: Vec<RecipientId>,
}

impl RecipientPartition {
    pub fn len(&self) -> usize {
        self.direct.len() + self.chat.len()
    }

    pub fn is_empty(&self) -> bool {
        self.direct.is_empty() && self.chat.is_empty()
    }
}

/// Splits a comma-separated recipient list into direct and chat recipients.
///
/// Tokens are trimmed and blank tokens dropped; input order is preserved
/// within each partition.
pub fn classify(raw: &str) -> Result<RecipientPartition> {
    let mut partition = RecipientPartition::default();
    for token in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let id = RecipientId::new(token);
        match id.kind() {
            RecipientKind::Chat => partition.chat.push(id),
            RecipientKind::Direct => partition.direct.push(id),
        }
    }
    if partition.is_empty() {
        return Err(RoamActionError::Validation(
            "at least one recipient required".to_string(),
        ));
    }
    Ok(partition)
}
