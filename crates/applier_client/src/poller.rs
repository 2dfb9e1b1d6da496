use std::sync::Arc;
use std::time::Duration;

use applier_core::TaskStatus;
use applier_logging::{applier_info, applier_warn};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::{AutomationApi, CredentialProvider, TaskHandle};

/// Wall-clock spacing between status requests.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Events emitted by the poll loop, strictly in tick order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollEvent {
    /// A fresh status snapshot; at most one per tick.
    Status(TaskStatus),
    /// The loop stopped and will emit nothing further.
    Finished(StopReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// A terminal status was observed.
    Terminal,
    /// The handle was cancelled or dropped.
    Cancelled,
}

/// Receives poll events; the poller never aggregates or messages, it only
/// delivers status.
pub trait StatusSink: Send + Sync {
    fn emit(&self, event: PollEvent);
}

/// Cancels the poll loop on request, or when dropped (view teardown).
#[derive(Debug)]
pub struct PollerHandle {
    token: CancellationToken,
}

impl PollerHandle {
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Status Poller: repeats one status request per interval tick until a
/// terminal state or cancellation.
pub struct StatusPoller {
    api: Arc<dyn AutomationApi>,
    interval: Duration,
}

impl StatusPoller {
    pub fn new(api: Arc<dyn AutomationApi>) -> Self {
        Self {
            api,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Starts polling `handle` on the current tokio runtime.
    ///
    /// Returns `None` and starts nothing when no bearer token is available.
    /// The token is resolved once here and stays fixed for the whole
    /// sequence.
    pub fn start(
        &self,
        handle: TaskHandle,
        credentials: &dyn CredentialProvider,
        sink: Arc<dyn StatusSink>,
    ) -> Option<PollerHandle> {
        let Some(bearer) = credentials.bearer_token() else {
            applier_warn!("status poll not started: no credential available");
            return None;
        };

        let cancel = CancellationToken::new();
        let task_token = cancel.clone();
        let api = Arc::clone(&self.api);
        let poll_interval = self.interval;
        tokio::spawn(async move {
            run_poll_loop(api, handle, bearer, poll_interval, sink, task_token).await;
        });
        Some(PollerHandle { token: cancel })
    }
}

async fn run_poll_loop(
    api: Arc<dyn AutomationApi>,
    handle: TaskHandle,
    bearer: String,
    poll_interval: Duration,
    sink: Arc<dyn StatusSink>,
    cancel: CancellationToken,
) {
    let mut ticker = tokio::time::interval(poll_interval);
    // Skip-if-busy: a slow request swallows the interval ticks it overlaps
    // instead of queueing a burst of catch-up requests.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // The first interval tick completes immediately; consume it so the
    // first request lands one full interval after the run started.
    ticker.tick().await;

    let mut tick: u64 = 0;
    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                applier_info!("status poll for {} cancelled", handle.task_id());
                sink.emit(PollEvent::Finished(StopReason::Cancelled));
                return;
            }
            _ = ticker.tick() => {}
        }

        tick += 1;
        // The request is awaited before the next tick is polled: at most
        // one request is ever in flight, and updates apply in tick order.
        let result = api.status(handle.task_id(), &bearer).await;

        // A cancel that landed while the request was in flight wins; the
        // sink must never observe a status after cancellation.
        if cancel.is_cancelled() {
            sink.emit(PollEvent::Finished(StopReason::Cancelled));
            return;
        }

        match result {
            Ok(status) => {
                let terminal = status.status.is_terminal();
                sink.emit(PollEvent::Status(status));
                if terminal {
                    applier_info!(
                        "status poll for {} reached a terminal state after {tick} tick(s)",
                        handle.task_id()
                    );
                    sink.emit(PollEvent::Finished(StopReason::Terminal));
                    return;
                }
            }
            Err(err) => {
                // Transient: stay polling, the next tick retries.
                applier_warn!("status poll tick {tick} for {} failed: {err}", handle.task_id());
            }
        }
    }
}
