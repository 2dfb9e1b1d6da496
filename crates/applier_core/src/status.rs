use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Task-level run state as reported by the status endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskState {
    Pending,
    Running,
    Completed,
    Failed,
}

impl TaskState {
    /// Terminal states end the poll sequence.
    pub fn is_terminal(self) -> bool {
        matches!(self, TaskState::Completed | TaskState::Failed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TaskState::Pending => "pending",
            TaskState::Running => "running",
            TaskState::Completed => "completed",
            TaskState::Failed => "failed",
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one platform within a run.
///
/// `status` stays a free string: the backend emits values ("error" among
/// them) beyond the task-level state set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformResult {
    pub status: String,
    #[serde(default)]
    pub total_applied: Option<u64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Snapshot of a run, replaced wholesale on every successful poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStatus {
    pub status: TaskState,
    #[serde(default)]
    pub platforms: BTreeMap<String, PlatformResult>,
}

impl TaskStatus {
    /// Applications submitted across all platforms; absent counts are zero.
    pub fn total_applied(&self) -> u64 {
        self.platforms
            .values()
            .filter_map(|result| result.total_applied)
            .sum()
    }
}
