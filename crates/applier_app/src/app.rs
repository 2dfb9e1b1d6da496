use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use applier_client::{
    directive_for, AccessDirective, ClientEvent, ClientHandle, ClientSettings, CredentialProvider,
    EnvCredentials, HttpAutomationApi, DEFAULT_POLL_INTERVAL,
};
use applier_core::{update, DashboardState, Effect, Msg, RunPhase, KEYWORD_OPTIONS};
use applier_logging::{applier_info, applier_warn};

use crate::persistence::{self, Preferences};
use crate::{logging, render};

/// Environment variable carrying the bearer token.
const TOKEN_ENV: &str = "APPLIER_API_TOKEN";

pub(crate) fn run() -> anyhow::Result<()> {
    logging::initialize(logging::LogDestination::Both);

    let settings = ClientSettings::from_env().context("resolving backend settings")?;
    applier_info!("Using backend at {}", settings.base_url);

    let credentials = Arc::new(EnvCredentials::new(TOKEN_ENV));
    if credentials.bearer_token().is_none() {
        anyhow::bail!("not logged in: set {TOKEN_ENV} to your API token");
    }

    let api = Arc::new(HttpAutomationApi::new(settings).context("building HTTP client")?);
    let client = ClientHandle::new(api, credentials, DEFAULT_POLL_INTERVAL);

    let prefs_dir = std::env::current_dir().context("resolving working directory")?;
    let preferences = persistence::load_preferences(&prefs_dir);
    if !KEYWORD_OPTIONS.contains(&preferences.keywords.as_str()) {
        applier_warn!(
            "Keywords '{}' is not one of the known presets",
            preferences.keywords
        );
    }
    let mut state = DashboardState::with_preferences(
        preferences.keywords.clone(),
        preferences.max_applications,
        preferences.max_pages,
        preferences.platforms.clone(),
    );

    dispatch(&mut state, Msg::AutomateClicked, &client);
    if state.phase() == RunPhase::Idle {
        // Validation rejected the form; the notice is already on screen.
        return Ok(());
    }

    drive(&mut state, &client);

    persistence::save_preferences(&prefs_dir, &preferences_from(&state));
    Ok(())
}

/// Pumps client events through the pure update function until the run ends.
fn drive(state: &mut DashboardState, client: &ClientHandle) {
    loop {
        let Some(event) = client.recv_timeout(Duration::from_secs(1)) else {
            continue;
        };
        let msg = match event {
            ClientEvent::SubmitFinished { result } => match result {
                Ok(outcome) => Msg::SubmitSucceeded {
                    task_id: outcome.handle().map(|handle| handle.task_id().to_string()),
                    message: outcome.message().map(str::to_string),
                },
                Err(err) => {
                    match directive_for(&err) {
                        AccessDirective::Relogin => {
                            applier_warn!("credential rejected; log in again")
                        }
                        AccessDirective::LeaveRestrictedArea => {
                            applier_warn!("access denied by the backend")
                        }
                        AccessDirective::ShowMessage(_) => {}
                    }
                    Msg::SubmitFailed {
                        message: err.user_message(),
                    }
                }
            },
            ClientEvent::Status(status) => Msg::StatusUpdated(status),
            ClientEvent::PollingFinished(reason) => {
                applier_info!("Polling finished: {:?}", reason);
                if state.phase() != RunPhase::Polling {
                    // A terminal status already stopped the run.
                    break;
                }
                Msg::StopClicked
            }
        };

        dispatch(state, msg, client);
        match state.phase() {
            RunPhase::Stopped | RunPhase::Idle => break,
            RunPhase::Submitting | RunPhase::Polling => {}
        }
    }
}

/// Applies one message and executes the resulting effects.
fn dispatch(state: &mut DashboardState, msg: Msg, client: &ClientHandle) {
    let (next, effects) = update(std::mem::take(state), msg);
    *state = next;
    for effect in effects {
        match effect {
            Effect::Submit { request } => client.submit(request),
            Effect::StartPolling { task_id } => client.start_polling(task_id),
            Effect::StopPolling => client.stop_polling(),
        }
    }
    if state.consume_dirty() {
        render::render(&state.view());
    }
}

fn preferences_from(state: &DashboardState) -> Preferences {
    Preferences {
        keywords: state.keywords().to_string(),
        max_applications: state.max_applications(),
        max_pages: state.max_pages(),
        platforms: state.platforms().clone(),
    }
}
