#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked a keywords preset.
    KeywordsSelected(String),
    /// User changed the application cap.
    MaxApplicationsChanged(u32),
    /// User changed the page cap.
    MaxPagesChanged(u32),
    /// User edited one platform's enablement or credentials.
    PlatformConfigured {
        platform: String,
        config: crate::PlatformConfig,
    },
    /// User clicked Automate.
    AutomateClicked,
    /// Submitter finished; a task id means the run can be tracked.
    SubmitSucceeded {
        task_id: Option<String>,
        message: Option<String>,
    },
    /// Submitter failed with a user-facing message.
    SubmitFailed { message: String },
    /// Poller delivered a fresh task status.
    StatusUpdated(crate::TaskStatus),
    /// User clicked Stop, or the owning view is being torn down.
    StopClicked,
}
