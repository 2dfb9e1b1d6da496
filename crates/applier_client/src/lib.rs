//! Applier client: automation submission and status polling.
mod api;
mod auth;
mod engine;
mod poller;
mod settings;
mod types;

pub use api::{submit, AutomationApi, HttpAutomationApi};
pub use auth::{
    directive_for, AccessDirective, CredentialProvider, EnvCredentials, StaticCredentials,
};
pub use engine::{ClientEvent, ClientHandle};
pub use poller::{
    PollEvent, PollerHandle, StatusPoller, StatusSink, StopReason, DEFAULT_POLL_INTERVAL,
};
pub use settings::{ClientSettings, SettingsError, BASE_URL_ENV, DEFAULT_BASE_URL};
pub use types::{ClientError, SubmitOutcome, TaskHandle};
