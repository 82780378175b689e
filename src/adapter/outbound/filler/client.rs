//! HTTP client for the filler service.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};
use url::Url;

use crate::error::{ExecutionError, Result};
use crate::port::outbound::filler::{
    ExecuteRequest, ExecuteResponse, FillerApi, QuoteRequest, QuoteResponse,
};

/// Filler service client rooted at a base URL.
#[derive(Debug, Clone)]
pub struct FillerClient {
    client: Client,
    base: String,
}

impl FillerClient {
    #[must_use]
    pub fn new(base: &Url) -> Self {
        Self {
            client: Client::new(),
            base: base.as_str().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base)
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = self.endpoint(path);
        debug!(url = %url, "POST");

        let response = self.client.post(&url).json(body).send().await?;
        let status = response.status();
        let text = response.text().await?;
        decode_body(status, &text)
    }
}

/// Decode a reply. Error statuses are still decoded when the body carries an
/// `error` field, so the service's own message reaches the user.
fn decode_body<R: DeserializeOwned>(status: StatusCode, body: &str) -> Result<R> {
    if status.is_success() {
        return Ok(serde_json::from_str(body)?);
    }

    let carries_error = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .is_some_and(|value| value.get("error").is_some());
    if carries_error {
        if let Ok(reply) = serde_json::from_str(body) {
            return Ok(reply);
        }
    }

    Err(ExecutionError::SubmissionFailed(format!("filler returned {status}: {body}")).into())
}

#[async_trait]
impl FillerApi for FillerClient {
    async fn quote(&self, request: &QuoteRequest) -> Result<QuoteResponse> {
        self.post("quote", request).await
    }

    async fn execute(&self, request: &ExecuteRequest) -> Result<ExecuteResponse> {
        info!(maker = %request.order.maker, "Submitting order to filler");
        self.post("execute", request).await
    }
}
