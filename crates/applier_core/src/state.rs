use std::collections::BTreeMap;

use crate::view_model::{tone_for_platform, tone_for_task};
use crate::{
    AutomationRequest, DashboardViewModel, Notice, PlatformConfig, PlatformResultView, TaskStatus,
    TaskView, DEFAULT_KEYWORDS, DEFAULT_MAX_APPLICATIONS, DEFAULT_MAX_PAGES,
};

/// Where the dashboard is in one submit-and-poll run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunPhase {
    /// No run active; the form is editable and submittable.
    #[default]
    Idle,
    /// Submission request in flight.
    Submitting,
    /// Tracked run active; status updates arrive until a terminal state.
    Polling,
    /// Run over (terminal status, untracked submit, or user stop).
    Stopped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardState {
    keywords: String,
    max_applications: u32,
    max_pages: u32,
    platforms: BTreeMap<String, PlatformConfig>,
    phase: RunPhase,
    task_id: Option<String>,
    last_status: Option<TaskStatus>,
    updates_delivered: u64,
    notice: Option<Notice>,
    dirty: bool,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            keywords: DEFAULT_KEYWORDS.to_string(),
            max_applications: DEFAULT_MAX_APPLICATIONS,
            max_pages: DEFAULT_MAX_PAGES,
            platforms: BTreeMap::new(),
            phase: RunPhase::Idle,
            task_id: None,
            last_status: None,
            updates_delivered: 0,
            notice: None,
            dirty: false,
        }
    }
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the form from persisted preferences.
    pub fn with_preferences(
        keywords: String,
        max_applications: u32,
        max_pages: u32,
        platforms: BTreeMap<String, PlatformConfig>,
    ) -> Self {
        Self {
            keywords,
            max_applications,
            max_pages,
            platforms,
            ..Self::default()
        }
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn task_id(&self) -> Option<&str> {
        self.task_id.as_deref()
    }

    /// How many status updates this run has applied, in tick order.
    pub fn updates_delivered(&self) -> u64 {
        self.updates_delivered
    }

    pub fn keywords(&self) -> &str {
        &self.keywords
    }

    pub fn max_applications(&self) -> u32 {
        self.max_applications
    }

    pub fn max_pages(&self) -> u32 {
        self.max_pages
    }

    pub fn platforms(&self) -> &BTreeMap<String, PlatformConfig> {
        &self.platforms
    }

    pub fn view(&self) -> DashboardViewModel {
        DashboardViewModel {
            phase: self.phase,
            keywords: self.keywords.clone(),
            max_applications: self.max_applications,
            max_pages: self.max_pages,
            enabled_platforms: self
                .platforms
                .iter()
                .filter(|(_, config)| config.enabled)
                .map(|(platform, _)| platform.clone())
                .collect(),
            task: self.last_status.as_ref().map(|status| self.task_view(status)),
            notice: self.notice.clone(),
            updates_delivered: self.updates_delivered,
            dirty: self.dirty,
        }
    }

    fn task_view(&self, status: &TaskStatus) -> TaskView {
        TaskView {
            task_id: self.task_id.clone().unwrap_or_default(),
            state: status.status,
            tone: tone_for_task(status.status),
            total_applied: status.total_applied(),
            platforms: status
                .platforms
                .iter()
                .map(|(platform, result)| PlatformResultView {
                    platform: platform.clone(),
                    status: result.status.clone(),
                    tone: tone_for_platform(&result.status),
                    applied: result.total_applied,
                    message: result.message.clone(),
                    error: result.error.clone(),
                })
                .collect(),
        }
    }

    /// Returns and clears the dirty flag; the shell renders when it was set.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_keywords(&mut self, keywords: String) {
        self.keywords = keywords;
        self.dirty = true;
    }

    pub(crate) fn set_max_applications(&mut self, value: u32) {
        self.max_applications = value;
        self.dirty = true;
    }

    pub(crate) fn set_max_pages(&mut self, value: u32) {
        self.max_pages = value;
        self.dirty = true;
    }

    pub(crate) fn configure_platform(&mut self, platform: String, config: PlatformConfig) {
        self.platforms.insert(platform, config);
        self.dirty = true;
    }

    /// Snapshot of the form as one submission request.
    pub(crate) fn build_request(&self) -> AutomationRequest {
        AutomationRequest {
            keywords: self.keywords.clone(),
            max_applications: self.max_applications,
            max_pages: self.max_pages,
            platforms: self.platforms.clone(),
        }
    }

    pub(crate) fn begin_submit(&mut self) {
        self.phase = RunPhase::Submitting;
        self.task_id = None;
        self.last_status = None;
        self.updates_delivered = 0;
        self.notice = None;
        self.dirty = true;
    }

    pub(crate) fn begin_polling(&mut self, task_id: String) {
        self.phase = RunPhase::Polling;
        self.task_id = Some(task_id);
        self.dirty = true;
    }

    pub(crate) fn apply_status(&mut self, status: TaskStatus) {
        self.last_status = Some(status);
        self.updates_delivered += 1;
        self.dirty = true;
    }

    pub(crate) fn stop(&mut self) {
        self.phase = RunPhase::Stopped;
        self.dirty = true;
    }

    pub(crate) fn return_to_idle(&mut self) {
        self.phase = RunPhase::Idle;
        self.dirty = true;
    }

    pub(crate) fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
        self.dirty = true;
    }
}
