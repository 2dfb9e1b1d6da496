use crate::view_model::Notice;
use crate::{DashboardState, Effect, Msg, RunPhase, TaskState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: DashboardState, msg: Msg) -> (DashboardState, Vec<Effect>) {
    let effects = match msg {
        Msg::KeywordsSelected(keywords) => {
            state.set_keywords(keywords);
            Vec::new()
        }
        Msg::MaxApplicationsChanged(value) => {
            state.set_max_applications(value);
            Vec::new()
        }
        Msg::MaxPagesChanged(value) => {
            state.set_max_pages(value);
            Vec::new()
        }
        Msg::PlatformConfigured { platform, config } => {
            state.configure_platform(platform, config);
            Vec::new()
        }
        Msg::AutomateClicked => {
            match state.phase() {
                // A run is already in flight; ignore repeat clicks.
                RunPhase::Submitting | RunPhase::Polling => return (state, Vec::new()),
                RunPhase::Idle | RunPhase::Stopped => {}
            }
            let request = state.build_request();
            match request.validate() {
                Ok(()) => {
                    state.begin_submit();
                    vec![Effect::Submit { request }]
                }
                Err(err) => {
                    state.set_notice(Notice::error(err.to_string()));
                    Vec::new()
                }
            }
        }
        Msg::SubmitSucceeded { task_id, message } => {
            if state.phase() != RunPhase::Submitting {
                return (state, Vec::new());
            }
            match task_id {
                Some(task_id) => {
                    state.begin_polling(task_id.clone());
                    if let Some(text) = message {
                        state.set_notice(Notice::info(text));
                    }
                    vec![Effect::StartPolling { task_id }]
                }
                None => {
                    // Accepted but untracked: the run ends here, no poller.
                    state.stop();
                    let text = message.unwrap_or_else(|| {
                        "Automation submitted; status tracking is unavailable.".to_string()
                    });
                    state.set_notice(Notice::info(text));
                    Vec::new()
                }
            }
        }
        Msg::SubmitFailed { message } => {
            if state.phase() != RunPhase::Submitting {
                return (state, Vec::new());
            }
            state.return_to_idle();
            state.set_notice(Notice::error(message));
            Vec::new()
        }
        Msg::StatusUpdated(status) => {
            if state.phase() != RunPhase::Polling {
                // Late delivery after a stop; the poller is already done.
                return (state, Vec::new());
            }
            let task_state = status.status;
            let total_applied = status.total_applied();
            state.apply_status(status);
            if !task_state.is_terminal() {
                return (state, Vec::new());
            }
            state.stop();
            let notice = match task_state {
                TaskState::Completed => Notice::success(format!(
                    "Automation completed: {total_applied} application(s) submitted"
                )),
                _ => Notice::error("Automation failed. Please try again."),
            };
            state.set_notice(notice);
            vec![Effect::StopPolling]
        }
        Msg::StopClicked => {
            if state.phase() != RunPhase::Polling {
                return (state, Vec::new());
            }
            state.stop();
            state.set_notice(Notice::info("Automation monitoring stopped."));
            vec![Effect::StopPolling]
        }
    };

    (state, effects)
}
