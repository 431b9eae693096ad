use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use roam_message_sender::config::{parse_seconds, parse_switch, ActionConfig, SenderConfig};
use roam_message_sender::{ActionReporter, Result, RoamAction};

#[derive(Parser, Debug)]
#[command(name = "roam-message-sender")]
#[command(about = "Send a Roam message from a GitHub workflow")]
struct Cli {
    #[arg(long, env = "INPUT_ROAM-API-KEY", default_value = "", hide_env_values = true)]
    roam_api_key: String,

    #[arg(long, env = "INPUT_MESSAGE", default_value = "")]
    message: String,

    #[arg(long, env = "INPUT_RECIPIENTS", default_value = "")]
    recipients: String,

    #[arg(long, env = "INPUT_SENDER-ID")]
    sender_id: Option<String>,

    #[arg(long, env = "INPUT_SENDER-NAME")]
    sender_name: Option<String>,

    #[arg(long, env = "INPUT_SENDER-IMAGE")]
    sender_image: Option<String>,

    #[arg(long, env = "ROAM_API_BASE_URL")]
    api_base_url: Option<String>,

    #[arg(long, env = "ROAM_API_TIMEOUT_SECONDS")]
    timeout_seconds: Option<String>,

    #[arg(
        long,
        env = "MOCK_ROAM_API",
        num_args = 0..=1,
        default_missing_value = "true",
        help = "Answer every call with a canned response instead of calling Roam"
    )]
    mock: Option<String>,
}

impl Cli {
    /// Blank env values count as unset; malformed ones become config errors so
    /// they are reported like any other failure.
    fn into_config(self) -> Result<ActionConfig> {
        let timeout_seconds =
            parse_seconds("ROAM_API_TIMEOUT_SECONDS", self.timeout_seconds.as_deref())?;
        let mock = parse_switch("MOCK_ROAM_API", self.mock.as_deref())?;
        Ok(ActionConfig {
            api_key: self.roam_api_key,
            message: self.message,
            recipients: self.recipients,
            sender: SenderConfig {
                id: self.sender_id,
                name: self.sender_name,
                image_url: self.sender_image,
            },
            api_base_url: self.api_base_url,
            timeout_seconds,
            mock,
        })
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,roam_message_sender=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let reporter = ActionReporter::from_env();
    let result = match cli
        .into_config()
        .and_then(|config| RoamAction::from_config(config, reporter.clone()))
    {
        Ok(action) => action.run().await,
        Err(err) => Err(err),
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            let message = reporter.fail(&err);
            tracing::error!("{message}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use roam_message_sender::RoamActionError;

    use super::*;

    const ENV_KEYS: [&str; 9] = [
        "INPUT_ROAM-API-KEY",
        "INPUT_MESSAGE",
        "INPUT_RECIPIENTS",
        "INPUT_SENDER-ID",
        "INPUT_SENDER-NAME",
        "INPUT_SENDER-IMAGE",
        "ROAM_API_BASE_URL",
        "ROAM_API_TIMEOUT_SECONDS",
        "MOCK_ROAM_API",
    ];

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// Parses `args` with exactly `vars` set among the inputs the binary reads.
    fn parse_with_env(vars: &[(&str, &str)], args: &[&str]) -> Result<ActionConfig> {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        for key in ENV_KEYS {
            std::env::remove_var(key);
        }
        for (key, value) in vars {
            std::env::set_var(key, value);
        }
        let argv = std::iter::once("roam-message-sender").chain(args.iter().copied());
        let parsed = Cli::try_parse_from(argv).unwrap();
        for key in ENV_KEYS {
            std::env::remove_var(key);
        }
        parsed.into_config()
    }

    #[test]
    fn reads_hyphenated_action_inputs() {
        let config = parse_with_env(
            &[
                ("INPUT_ROAM-API-KEY", "test-api-key"),
                ("INPUT_MESSAGE", "Hello from GitHub Actions!"),
                ("INPUT_RECIPIENTS", "user123"),
                ("INPUT_SENDER-ID", ""),
                ("INPUT_SENDER-NAME", "GitHub Bot"),
                ("INPUT_SENDER-IMAGE", ""),
            ],
            &[],
        )
        .unwrap();

        assert_eq!(config.api_key, "test-api-key");
        assert_eq!(config.message, "Hello from GitHub Actions!");
        assert_eq!(config.recipients, "user123");
        assert_eq!(config.sender.name.as_deref(), Some("GitHub Bot"));
        assert!(!config.mock);
        assert_eq!(config.timeout_seconds, None);
        config.validate().unwrap();
    }

    #[test]
    fn flags_override_environment() {
        let config = parse_with_env(
            &[("INPUT_RECIPIENTS", "user123"), ("INPUT_MESSAGE", "from env")],
            &["--recipients", "group456", "--roam-api-key", "k", "--timeout-seconds", "7"],
        )
        .unwrap();
        assert_eq!(config.recipients, "group456");
        assert_eq!(config.message, "from env");
        assert_eq!(config.api_key, "k");
        assert_eq!(config.timeout_seconds, Some(7));
    }

    #[test]
    fn mock_switch_accepts_common_spellings() {
        for value in ["true", "1", "yes"] {
            let config = parse_with_env(&[("MOCK_ROAM_API", value)], &[]).unwrap();
            assert!(config.mock, "{value}");
        }
        let config = parse_with_env(&[("MOCK_ROAM_API", "false")], &[]).unwrap();
        assert!(!config.mock);
        let config = parse_with_env(&[], &["--mock"]).unwrap();
        assert!(config.mock);
    }

    #[test]
    fn blank_env_values_count_as_unset() {
        let config = parse_with_env(
            &[
                ("INPUT_ROAM-API-KEY", "k"),
                ("MOCK_ROAM_API", ""),
                ("ROAM_API_TIMEOUT_SECONDS", ""),
                ("ROAM_API_BASE_URL", ""),
            ],
            &[],
        )
        .unwrap();
        assert!(!config.mock);
        assert_eq!(config.timeout_seconds, None);
        assert_eq!(config.base_url(), "https://api.ro.am");
    }

    #[test]
    fn malformed_env_values_are_config_errors() {
        let err = parse_with_env(&[("MOCK_ROAM_API", "sometimes")], &[]).unwrap_err();
        assert!(matches!(err, RoamActionError::Config(_)));
        let err = parse_with_env(&[("ROAM_API_TIMEOUT_SECONDS", "soon")], &[]).unwrap_err();
        assert!(matches!(err, RoamActionError::Config(_)));
        assert!(err.to_string().contains("ROAM_API_TIMEOUT_SECONDS"));
    }
}
