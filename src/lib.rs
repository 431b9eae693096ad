pub mod client;
pub mod config;
pub mod domains;
pub mod error;
pub mod interfaces;
pub mod providers;
pub mod services;

pub use crate::client::{RoamAction, RunOutcome};
pub use crate::config::{ActionConfig, SenderConfig};
pub use crate::error::{Result, RoamActionError};
pub use crate::services::dispatch::{DispatchPlan, DispatchReport, Dispatcher};
pub use crate::services::reporter::ActionReporter;
