use applier_core::{AutomationRequest, TaskStatus};
use applier_logging::applier_debug;
use reqwest::StatusCode;

use crate::types::{ErrorBody, StatusEnvelope, SubmitResponse};
use crate::{ClientError, ClientSettings, CredentialProvider, SubmitOutcome, TaskHandle};

const SUBMIT_PATH: &str = "api/v1/internships/search_and_apply";

/// Backend seam for the submitter and poller.
#[async_trait::async_trait]
pub trait AutomationApi: Send + Sync {
    /// Issues one submission request carrying the bearer credential.
    async fn submit(
        &self,
        request: &AutomationRequest,
        token: &str,
    ) -> Result<SubmitOutcome, ClientError>;

    /// Fetches the current status of a tracked run.
    async fn status(&self, task_id: &str, token: &str) -> Result<TaskStatus, ClientError>;
}

/// Automation Submitter: checks the preconditions, then issues exactly one
/// outbound call. Never starts the poller.
pub async fn submit(
    api: &dyn AutomationApi,
    credentials: &dyn CredentialProvider,
    request: &AutomationRequest,
) -> Result<SubmitOutcome, ClientError> {
    let token = credentials.bearer_token().ok_or(ClientError::Unauthorized)?;
    request.validate()?;
    api.submit(request, &token).await
}

/// Live implementation of [`AutomationApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpAutomationApi {
    client: reqwest::Client,
    settings: ClientSettings,
}

impl HttpAutomationApi {
    pub fn new(settings: ClientSettings) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ClientError::Network(err.to_string()))?;
        Ok(Self { client, settings })
    }

    fn endpoint(&self, path: &str) -> String {
        let base = self.settings.base_url.as_str().trim_end_matches('/');
        format!("{base}/{path}")
    }
}

#[async_trait::async_trait]
impl AutomationApi for HttpAutomationApi {
    async fn submit(
        &self,
        request: &AutomationRequest,
        token: &str,
    ) -> Result<SubmitOutcome, ClientError> {
        let url = self.endpoint(SUBMIT_PATH);
        applier_debug!("submitting automation request to {url}");
        let response = self
            .client
            .post(url)
            .bearer_auth(token)
            .json(request)
            .send()
            .await
            .map_err(|err| ClientError::Network(err.to_string()))?;
        let response = check_status(response).await?;

        let body: SubmitResponse = response
            .json()
            .await
            .map_err(|err| ClientError::Decode(err.to_string()))?;
        let message = body.message;
        match body.task_id.and_then(TaskHandle::new) {
            Some(handle) => Ok(SubmitOutcome::Tracked { handle, message }),
            None => Ok(SubmitOutcome::Untracked { message }),
        }
    }

    async fn status(&self, task_id: &str, token: &str) -> Result<TaskStatus, ClientError> {
        let url = self.endpoint(&format!("api/v1/internships/status/{task_id}"));
        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|err| ClientError::Network(err.to_string()))?;
        let response = check_status(response).await?;

        let envelope: StatusEnvelope = response
            .json()
            .await
            .map_err(|err| ClientError::Decode(err.to_string()))?;
        Ok(envelope.task)
    }
}

/// Maps non-2xx answers into the error taxonomy, keeping any server-provided
/// message for verbatim display.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    match status {
        StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
        StatusCode::FORBIDDEN => Err(ClientError::Forbidden),
        _ => {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message);
            Err(ClientError::Server {
                status: status.as_u16(),
                message,
            })
        }
    }
}
