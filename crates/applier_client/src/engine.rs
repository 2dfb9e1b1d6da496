use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use applier_core::{AutomationRequest, TaskStatus};
use applier_logging::applier_warn;

use crate::poller::{PollEvent, PollerHandle, StatusPoller, StatusSink, StopReason};
use crate::{submit, AutomationApi, ClientError, CredentialProvider, SubmitOutcome, TaskHandle};

enum ClientCommand {
    Submit { request: AutomationRequest },
    StartPolling { task_id: String },
    StopPolling,
}

/// Events delivered to the shell, pumped into core messages.
#[derive(Debug)]
pub enum ClientEvent {
    SubmitFinished {
        result: Result<SubmitOutcome, ClientError>,
    },
    Status(TaskStatus),
    PollingFinished(StopReason),
}

/// Bridge between a synchronous shell and the async client: commands in,
/// events out, one background runtime thread.
///
/// Dropping the handle tears everything down, including any live poller.
pub struct ClientHandle {
    cmd_tx: mpsc::Sender<ClientCommand>,
    event_rx: mpsc::Receiver<ClientEvent>,
}

impl ClientHandle {
    pub fn new(
        api: Arc<dyn AutomationApi>,
        credentials: Arc<dyn CredentialProvider>,
        poll_interval: Duration,
    ) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            let mut active_poll: Option<PollerHandle> = None;

            while let Ok(command) = cmd_rx.recv() {
                match command {
                    ClientCommand::Submit { request } => {
                        let api = Arc::clone(&api);
                        let credentials = Arc::clone(&credentials);
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            let result =
                                submit(api.as_ref(), credentials.as_ref(), &request).await;
                            let _ = event_tx.send(ClientEvent::SubmitFinished { result });
                        });
                    }
                    ClientCommand::StartPolling { task_id } => {
                        // One poller at a time: replace any previous run's.
                        if let Some(previous) = active_poll.take() {
                            previous.cancel();
                        }
                        let Some(handle) = TaskHandle::new(task_id) else {
                            applier_warn!("ignoring poll start for an empty task id");
                            continue;
                        };
                        let sink: Arc<dyn StatusSink> = Arc::new(EventSink {
                            tx: event_tx.clone(),
                        });
                        let _guard = runtime.enter();
                        let poller = StatusPoller::new(Arc::clone(&api))
                            .with_interval(poll_interval);
                        active_poll = poller.start(handle, credentials.as_ref(), sink);
                        if active_poll.is_none() {
                            // The poller declined to start (no credential);
                            // tell the shell the run will see no updates.
                            let _ = event_tx
                                .send(ClientEvent::PollingFinished(StopReason::Cancelled));
                        }
                    }
                    ClientCommand::StopPolling => {
                        if let Some(previous) = active_poll.take() {
                            previous.cancel();
                        }
                    }
                }
            }
            // Command channel closed: the handle was dropped. Dropping the
            // poller handle cancels its loop before the runtime goes away.
            drop(active_poll);
        });

        Self { cmd_tx, event_rx }
    }

    pub fn submit(&self, request: AutomationRequest) {
        let _ = self.cmd_tx.send(ClientCommand::Submit { request });
    }

    pub fn start_polling(&self, task_id: impl Into<String>) {
        let _ = self.cmd_tx.send(ClientCommand::StartPolling {
            task_id: task_id.into(),
        });
    }

    pub fn stop_polling(&self) {
        let _ = self.cmd_tx.send(ClientCommand::StopPolling);
    }

    pub fn try_recv(&self) -> Option<ClientEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<ClientEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

struct EventSink {
    tx: mpsc::Sender<ClientEvent>,
}

impl StatusSink for EventSink {
    fn emit(&self, event: PollEvent) {
        let mapped = match event {
            PollEvent::Status(status) => ClientEvent::Status(status),
            PollEvent::Finished(reason) => ClientEvent::PollingFinished(reason),
        };
        let _ = self.tx.send(mapped);
    }
}
