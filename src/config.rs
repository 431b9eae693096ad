use std::fmt;

use crate::error::{RoamActionError, Result};

pub const DEFAULT_API_BASE_URL: &str = "https://api.ro.am";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const USER_AGENT: &str = "GitHub-Action-Roam-Message-Sender";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SenderConfig {
    pub id: Option<String>,
    pub name: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Clone)]
pub struct ActionConfig {
    pub api_key: String,
    pub message: String,
    pub recipients: String,
    pub sender: SenderConfig,
    pub api_base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub mock: bool,
}

impl fmt::Debug for ActionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionConfig")
            .field("api_key", &"[REDACTED]")
            .field("message", &self.message)
            .field("recipients", &self.recipients)
            .field("sender", &self.sender)
            .field("api_base_url", &self.api_base_url)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("mock", &self.mock)
            .finish()
    }
}

/// Reads a boolean switch the way workflow env values arrive: unset or blank
/// means off.
pub fn parse_switch(name: &str, value: Option<&str>) -> Result<bool> {
    let value = match value.map(str::trim) {
        None | Some("") => return Ok(false),
        Some(value) => value,
    };
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" | "y" => Ok(true),
        "false" | "0" | "no" | "off" | "n" => Ok(false),
        _ => Err(RoamActionError::Config(format!(
            "invalid value '{value}' for {name}: expected true or false"
        ))),
    }
}

/// Unset or blank means "use the default".
pub fn parse_seconds(name: &str, value: Option<&str>) -> Result<Option<u64>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse::<u64>().map(Some).map_err(|e| {
            RoamActionError::Config(format!("invalid value '{value}' for {name}: {e}"))
        }),
    }
}

impl ActionConfig {
    pub fn new(
        api_key: impl Into<String>,
        message: impl Into<String>,
        recipients: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            message: message.into(),
            recipients: recipients.into(),
            sender: SenderConfig::default(),
            api_base_url: None,
            timeout_seconds: None,
            mock: false,
        }
    }

    pub fn base_url(&self) -> String {
        self.api_base_url
            .as_deref()
            .map(|v| v.trim().trim_end_matches('/'))
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL)
            .to_string()
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    /// Checks the inputs GitHub marks as required. Recipient parsing is left
    /// to the classifier so its error wording stays in one place.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(RoamActionError::Config(
                "Input required and not supplied: roam-api-key".to_string(),
            ));
        }
        if self.message.is_empty() {
            return Err(RoamActionError::Config(
                "Input required and not supplied: message".to_string(),
            ));
        }
        let base = self.base_url();
        if !base.starts_with("http://") && !base.starts_with("https://") {
            return Err(RoamActionError::Config(format!(
                "api base url must be http(s): {base}"
            )));
        }
        if self.timeout_seconds == Some(0) {
            return Err(RoamActionError::Config(
                "timeout must be at least one second".to_string(),
            ));
        }
        Ok(())
    }
}
