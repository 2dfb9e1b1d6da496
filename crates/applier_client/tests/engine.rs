use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use applier_client::{
    AutomationApi, ClientError, ClientEvent, ClientHandle, StaticCredentials, StopReason,
    SubmitOutcome, TaskHandle,
};
use applier_core::{AutomationRequest, LoginMethod, PlatformConfig, TaskState, TaskStatus};

const RECV_TIMEOUT: Duration = Duration::from_secs(2);

fn status_of(state: TaskState) -> TaskStatus {
    TaskStatus {
        status: state,
        platforms: BTreeMap::new(),
    }
}

fn valid_request() -> AutomationRequest {
    let mut platforms = BTreeMap::new();
    platforms.insert(
        "internshala".to_string(),
        PlatformConfig {
            enabled: true,
            email: "a@b.com".to_string(),
            password: "hunter2".to_string(),
            login_method: LoginMethod::Email,
        },
    );
    AutomationRequest {
        keywords: "web-development".to_string(),
        max_applications: 20,
        max_pages: 2,
        platforms,
    }
}

/// Answers submit with a tracked task and plays back scripted statuses,
/// then keeps answering "running".
struct FlowApi {
    task_id: &'static str,
    statuses: Mutex<VecDeque<TaskStatus>>,
}

impl FlowApi {
    fn new(task_id: &'static str, statuses: Vec<TaskStatus>) -> Self {
        Self {
            task_id,
            statuses: Mutex::new(statuses.into()),
        }
    }
}

#[async_trait::async_trait]
impl AutomationApi for FlowApi {
    async fn submit(
        &self,
        _request: &AutomationRequest,
        _token: &str,
    ) -> Result<SubmitOutcome, ClientError> {
        Ok(SubmitOutcome::Tracked {
            handle: TaskHandle::new(self.task_id).expect("task id"),
            message: Some("Automation started successfully".to_string()),
        })
    }

    async fn status(&self, _task_id: &str, _token: &str) -> Result<TaskStatus, ClientError> {
        Ok(self
            .statuses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| status_of(TaskState::Running)))
    }
}

#[test]
fn submit_then_poll_to_completion() {
    let api = Arc::new(FlowApi::new(
        "task_1",
        vec![status_of(TaskState::Running), status_of(TaskState::Completed)],
    ));
    let credentials = Arc::new(StaticCredentials::new("test-token"));
    let handle = ClientHandle::new(api, credentials, Duration::from_millis(20));

    handle.submit(valid_request());
    let result = match handle.recv_timeout(RECV_TIMEOUT).expect("submit event") {
        ClientEvent::SubmitFinished { result } => result,
        other => panic!("expected SubmitFinished, got {other:?}"),
    };
    let outcome = result.expect("submit ok");
    let task_id = outcome.handle().expect("tracked").task_id().to_string();
    assert_eq!(task_id, "task_1");

    handle.start_polling(task_id);

    let status = match handle.recv_timeout(RECV_TIMEOUT).expect("first status") {
        ClientEvent::Status(status) => status,
        other => panic!("expected Status, got {other:?}"),
    };
    assert_eq!(status.status, TaskState::Running);

    let status = match handle.recv_timeout(RECV_TIMEOUT).expect("second status") {
        ClientEvent::Status(status) => status,
        other => panic!("expected Status, got {other:?}"),
    };
    assert_eq!(status.status, TaskState::Completed);

    let event = handle.recv_timeout(RECV_TIMEOUT).expect("finished event");
    assert!(matches!(
        event,
        ClientEvent::PollingFinished(StopReason::Terminal)
    ));
}

#[test]
fn stop_polling_cancels_the_active_loop() {
    let api = Arc::new(FlowApi::new("task_1", Vec::new()));
    let credentials = Arc::new(StaticCredentials::new("test-token"));
    let handle = ClientHandle::new(api, credentials, Duration::from_millis(20));

    handle.start_polling("task_1");
    let event = handle.recv_timeout(RECV_TIMEOUT).expect("first status");
    assert!(matches!(event, ClientEvent::Status(_)));

    handle.stop_polling();

    // Drain until the cancellation notice; a status may already be queued.
    let mut finished = false;
    while let Some(event) = handle.recv_timeout(RECV_TIMEOUT) {
        if matches!(event, ClientEvent::PollingFinished(StopReason::Cancelled)) {
            finished = true;
            break;
        }
    }
    assert!(finished, "expected a cancellation notice");

    // Quiet after cancellation.
    std::thread::sleep(Duration::from_millis(100));
    assert!(handle.try_recv().is_none());
}

#[test]
fn empty_task_id_never_starts_a_poll_loop() {
    let api = Arc::new(FlowApi::new("task_1", Vec::new()));
    let credentials = Arc::new(StaticCredentials::new("test-token"));
    let handle = ClientHandle::new(api, credentials, Duration::from_millis(20));

    handle.start_polling("");

    std::thread::sleep(Duration::from_millis(100));
    assert!(handle.try_recv().is_none());
}
