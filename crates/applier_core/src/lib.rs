//! Applier core: pure state machine and view-model helpers.
mod effect;
mod msg;
mod request;
mod state;
mod status;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use request::{
    AutomationRequest, LoginMethod, PlatformConfig, ValidationError, DEFAULT_KEYWORDS,
    DEFAULT_MAX_APPLICATIONS, DEFAULT_MAX_PAGES, KEYWORD_OPTIONS, MAX_APPLICATIONS_LIMIT,
    MAX_PAGES_LIMIT,
};
pub use state::{DashboardState, RunPhase};
pub use status::{PlatformResult, TaskState, TaskStatus};
pub use update::update;
pub use view_model::{
    DashboardViewModel, Notice, NoticeKind, PlatformResultView, StatusTone, TaskView,
};
