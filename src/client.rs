use std::sync::Arc;

use crate::config::ActionConfig;
use crate::error::Result;
use crate::interfaces::transport::RoamTransport;
use crate::providers::http::HttpTransport;
use crate::providers::mock::MockTransport;
use crate::services::dispatch::{DispatchPlan, Dispatcher};
use crate::services::reporter::{ActionReporter, JobSummary, MESSAGE_ID_OUTPUT};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub message_id: Option<String>,
    pub recipient_count: usize,
}

/// One invocation of the action: resolved inputs, the chosen transport and
/// the reporter that talks back to the runner.
pub struct RoamAction {
    config: ActionConfig,
    dispatcher: Dispatcher,
    reporter: ActionReporter,
}

impl RoamAction {
    pub fn from_config(config: ActionConfig, reporter: ActionReporter) -> Result<Self> {
        config.validate()?;
        let transport: Arc<dyn RoamTransport> = if config.mock {
            tracing::info!("mock mode enabled, no requests will be sent");
            Arc::new(MockTransport::new())
        } else {
            Arc::new(HttpTransport::from_config(&config)?)
        };
        Ok(Self::with_transport(config, transport, reporter))
    }

    pub fn with_transport(
        config: ActionConfig,
        transport: Arc<dyn RoamTransport>,
        reporter: ActionReporter,
    ) -> Self {
        Self {
            config,
            dispatcher: Dispatcher::new(transport),
            reporter,
        }
    }

    pub fn reporter(&self) -> &ActionReporter {
        &self.reporter
    }

    pub async fn run(&self) -> Result<RunOutcome> {
        let plan = DispatchPlan::build(
            &self.config.recipients,
            &self.config.message,
            &self.config.sender,
        )?;
        tracing::info!("Sending message to {} recipient(s)", plan.recipient_count);

        let report = self.dispatcher.dispatch(&plan).await;
        let message_id = report.message_id();
        let output = match &message_id {
            Some(id) => {
                tracing::info!("Message ID: {id}");
                self.reporter.set_output(MESSAGE_ID_OUTPUT, id)
            }
            None => Ok(()),
        };
        let summary = report.into_result()?;
        output?;

        tracing::info!("Message sent successfully to Roam!");
        self.reporter
            .write_summary(&JobSummary::sent(summary.recipient_count, &self.config.message))?;

        Ok(RunOutcome {
            message_id: summary.message_id,
            recipient_count: summary.recipient_count,
        })
    }
}
