use std::env;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{RoamActionError, Result};

pub const OUTPUT_ENV: &str = "GITHUB_OUTPUT";
pub const STEP_SUMMARY_ENV: &str = "GITHUB_STEP_SUMMARY";
pub const MESSAGE_ID_OUTPUT: &str = "message-id";

const OUTPUT_DELIMITER: &str = "ghadelimiter_roam_message_sender";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSummary {
    pub heading: String,
    pub recipient_count: usize,
    pub message: String,
}

impl JobSummary {
    pub fn sent(recipient_count: usize, message: impl Into<String>) -> Self {
        Self {
            heading: "Roam Message Sent Successfully".to_string(),
            recipient_count,
            message: message.into(),
        }
    }

    pub fn render(&self) -> String {
        // Widen the fence when the message itself contains backticks.
        let mut fence = "```".to_string();
        while self.message.contains(fence.as_str()) {
            fence.push('`');
        }
        format!(
            "# {}\n\nMessage was sent to {} recipient(s)\n\n{fence}text\n{}\n{fence}\n",
            self.heading, self.recipient_count, self.message
        )
    }
}

/// Writes outputs, summaries and failures the way the GitHub runner expects.
#[derive(Debug, Clone, Default)]
pub struct ActionReporter {
    output_path: Option<PathBuf>,
    summary_path: Option<PathBuf>,
}

impl ActionReporter {
    pub fn new(output_path: Option<PathBuf>, summary_path: Option<PathBuf>) -> Self {
        Self {
            output_path,
            summary_path,
        }
    }

    pub fn from_env() -> Self {
        let path = |key: &str| {
            env::var_os(key)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        };
        Self::new(path(OUTPUT_ENV), path(STEP_SUMMARY_ENV))
    }

    pub fn set_output(&self, name: &str, value: &str) -> Result<()> {
        match &self.output_path {
            Some(path) => {
                let entry = if value.contains('\n') || value.contains('\r') {
                    if value.contains(OUTPUT_DELIMITER) {
                        return Err(RoamActionError::Runtime(format!(
                            "output {name} contains the reserved delimiter"
                        )));
                    }
                    format!("{name}<<{OUTPUT_DELIMITER}\n{value}\n{OUTPUT_DELIMITER}\n")
                } else {
                    format!("{name}={value}\n")
                };
                append(path, &entry)
            }
            None => {
                println!("::set-output name={name}::{}", escape_data(value));
                Ok(())
            }
        }
    }

    /// Appends the summary; a no-op outside a runner.
    pub fn write_summary(&self, summary: &JobSummary) -> Result<()> {
        match &self.summary_path {
            Some(path) => append(path, &summary.render()),
            None => {
                tracing::debug!("{STEP_SUMMARY_ENV} not set, skipping job summary");
                Ok(())
            }
        }
    }

    /// Emits the failure annotation and returns the rendered failure text.
    pub fn fail(&self, err: &RoamActionError) -> String {
        let message = failure_message(err);
        println!("::error::{}", escape_data(&message));
        message
    }
}

pub fn failure_message(err: &RoamActionError) -> String {
    format!("Action failed with error: {err}")
}

fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn append(path: &Path, content: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| RoamActionError::Runtime(format!("{}: {e}", path.display())))?;
    file.write_all(content.as_bytes())
        .map_err(|e| RoamActionError::Runtime(format!("{}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_renders_heading_count_and_code_block() {
        let rendered = JobSummary::sent(2, "Hello from GitHub Actions!").render();
        assert_eq!(
            rendered,
            "# Roam Message Sent Successfully\n\nMessage was sent to 2 recipient(s)\n\n```text\nHello from GitHub Actions!\n```\n"
        );
    }

    #[test]
    fn summary_fence_outgrows_message_backticks() {
        let rendered = JobSummary::sent(1, "run ```cargo test```").render();
        assert!(rendered.contains("````text\nrun ```cargo test```\n````\n"));
    }

    #[test]
    fn outputs_and_summary_append_to_files() {
        let output = tempfile::NamedTempFile::new().unwrap();
        let summary = tempfile::NamedTempFile::new().unwrap();
        let reporter = ActionReporter::new(
            Some(output.path().to_path_buf()),
            Some(summary.path().to_path_buf()),
        );

        reporter.set_output(MESSAGE_ID_OUTPUT, "msg_123456").unwrap();
        reporter.set_output("notes", "line one\nline two").unwrap();
        reporter.write_summary(&JobSummary::sent(1, "hi")).unwrap();

        let written = std::fs::read_to_string(output.path()).unwrap();
        assert!(written.starts_with("message-id=msg_123456\n"));
        assert!(written.contains(&format!(
            "notes<<{OUTPUT_DELIMITER}\nline one\nline two\n{OUTPUT_DELIMITER}\n"
        )));
        let written = std::fs::read_to_string(summary.path()).unwrap();
        assert!(written.contains("Message was sent to 1 recipient(s)"));
    }

    #[test]
    fn missing_paths_are_tolerated() {
        let reporter = ActionReporter::default();
        reporter.write_summary(&JobSummary::sent(1, "hi")).unwrap();
        reporter.set_output(MESSAGE_ID_OUTPUT, "id").unwrap();
    }

    #[test]
    fn failure_text_and_escaping() {
        let err = RoamActionError::Validation("at least one recipient required".to_string());
        let message = ActionReporter::default().fail(&err);
        assert_eq!(
            message,
            "Action failed with error: at least one recipient required"
        );
        assert_eq!(escape_data("50%\r\nnext"), "50%25%0D%0Anext");
    }
}
