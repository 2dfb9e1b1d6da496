use crate::{RunPhase, TaskState};

/// Display tone for a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Muted,
    Active,
    Success,
    Danger,
}

/// Maps a task state to its badge tone.
pub(crate) fn tone_for_task(state: TaskState) -> StatusTone {
    match state {
        TaskState::Pending => StatusTone::Muted,
        TaskState::Running => StatusTone::Active,
        TaskState::Completed => StatusTone::Success,
        TaskState::Failed => StatusTone::Danger,
    }
}

/// Maps a per-platform status string to a badge tone.
///
/// Unknown strings (the backend emits "error" and friends) render as danger.
pub(crate) fn tone_for_platform(status: &str) -> StatusTone {
    match status {
        "pending" => StatusTone::Muted,
        "running" => StatusTone::Active,
        "completed" => StatusTone::Success,
        _ => StatusTone::Danger,
    }
}

/// One-line user-visible outcome of the latest action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

impl Notice {
    pub(crate) fn info(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            text: text.into(),
        }
    }

    pub(crate) fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    pub(crate) fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

/// Pure projection of the dashboard state, re-derived on every update.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DashboardViewModel {
    pub phase: RunPhase,
    pub keywords: String,
    pub max_applications: u32,
    pub max_pages: u32,
    pub enabled_platforms: Vec<String>,
    pub task: Option<TaskView>,
    pub notice: Option<Notice>,
    pub updates_delivered: u64,
    pub dirty: bool,
}

/// The latest known run status, shaped for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskView {
    pub task_id: String,
    pub state: TaskState,
    pub tone: StatusTone,
    pub total_applied: u64,
    pub platforms: Vec<PlatformResultView>,
}

/// One platform row of the run status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformResultView {
    pub platform: String,
    pub status: String,
    pub tone: StatusTone,
    pub applied: Option<u64>,
    pub message: Option<String>,
    pub error: Option<String>,
}
