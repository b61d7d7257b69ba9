//! Client for the external workflow/notification engine.
//!
//! The engine runs the actual notification workflow (confirmation email and
//! whatever follows); this gateway only submits jobs to it. Deployments
//! without an engine simply configure none, and submission is skipped.

use async_trait::async_trait;
use serde::Serialize;

/// Error returned by a failed job submission.
///
/// Never propagated into a booking result; the dispatcher logs and drops it.
#[derive(Debug, thiserror::Error)]
#[error("workflow submission failed: {0}")]
pub struct SubmitError(pub String);

/// Fire-and-forget job submission to the workflow engine.
#[async_trait]
pub trait WorkflowEngine: Send + Sync + std::fmt::Debug {
    /// Submits a named job onto a task queue. Retries, if any, are the
    /// engine's responsibility.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError`] when the engine rejected or never received
    /// the job.
    async fn submit(
        &self,
        task_queue: &str,
        job: &str,
        payload: serde_json::Value,
    ) -> Result<(), SubmitError>;
}

/// Wire shape of a submitted job.
#[derive(Debug, Serialize)]
struct JobEnvelope<'a> {
    queue: &'a str,
    name: &'a str,
    payload: serde_json::Value,
}

/// HTTP-backed engine client: POSTs the job envelope to `{base_url}/tasks`.
#[derive(Debug, Clone)]
pub struct HttpWorkflowEngine {
    client: reqwest::Client,
    base_url: String,
}

impl HttpWorkflowEngine {
    /// Creates a client for the engine at `base_url` (no trailing slash).
    #[must_use]
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }
}

#[async_trait]
impl WorkflowEngine for HttpWorkflowEngine {
    async fn submit(
        &self,
        task_queue: &str,
        job: &str,
        payload: serde_json::Value,
    ) -> Result<(), SubmitError> {
        let envelope = JobEnvelope {
            queue: task_queue,
            name: job,
            payload,
        };
        let response = self
            .client
            .post(format!("{}/tasks", self.base_url))
            .json(&envelope)
            .send()
            .await
            .map_err(|e| SubmitError(e.to_string()))?;

        response
            .error_for_status()
            .map_err(|e| SubmitError(e.to_string()))?;
        Ok(())
    }
}
