use applier_core::ValidationError;
use serde::Deserialize;
use thiserror::Error;

/// Identifies one tracked automation run.
///
/// Constructed only from a submit response that carried a task id; the
/// poller consumes it and drops it when polling stops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskHandle {
    task_id: String,
}

impl TaskHandle {
    /// Returns `None` for an empty id, so a handle always points at a task.
    pub fn new(task_id: impl Into<String>) -> Option<Self> {
        let task_id = task_id.into();
        if task_id.is_empty() {
            None
        } else {
            Some(Self { task_id })
        }
    }

    pub fn task_id(&self) -> &str {
        &self.task_id
    }
}

/// What a successful submission means for the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The backend returned a task id; the run can be polled.
    Tracked {
        handle: TaskHandle,
        message: Option<String>,
    },
    /// Accepted without a task id; there is nothing to poll.
    Untracked { message: Option<String> },
}

impl SubmitOutcome {
    pub fn handle(&self) -> Option<&TaskHandle> {
        match self {
            SubmitOutcome::Tracked { handle, .. } => Some(handle),
            SubmitOutcome::Untracked { .. } => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            SubmitOutcome::Tracked { message, .. } | SubmitOutcome::Untracked { message } => {
                message.as_deref()
            }
        }
    }
}

/// 2xx body of the submission endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct SubmitResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub task_id: Option<String>,
}

/// 2xx body of the status endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct StatusEnvelope {
    pub task: applier_core::TaskStatus,
}

/// Non-2xx bodies carry an optional message.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Everything that can go wrong talking to the backend.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Local pre-submission validation failed; no call was issued.
    #[error("{0}")]
    Validation(#[from] ValidationError),
    /// No credential available, or the backend answered 401.
    #[error("authentication required")]
    Unauthorized,
    /// The backend answered 403.
    #[error("access denied")]
    Forbidden,
    /// Any other non-2xx answer.
    #[error("server error (status {status})")]
    Server { status: u16, message: Option<String> },
    /// The request did not complete.
    #[error("network error: {0}")]
    Network(String),
    /// A 2xx body that is not in the contract shape.
    #[error("malformed response: {0}")]
    Decode(String),
}

impl ClientError {
    /// The text shown to the user: server messages verbatim, everything
    /// else a generic recoverable message.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Validation(err) => err.to_string(),
            ClientError::Unauthorized => "Your session has expired. Please log in again.".into(),
            ClientError::Forbidden => "You do not have access to this feature.".into(),
            ClientError::Server {
                message: Some(message),
                ..
            } => message.clone(),
            ClientError::Server { message: None, .. } => {
                "Failed to start automation. Please try again.".into()
            }
            ClientError::Network(_) | ClientError::Decode(_) => {
                "An error occurred while starting automation. Please try again.".into()
            }
        }
    }
}
