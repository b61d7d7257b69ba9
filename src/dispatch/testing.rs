//! Test doubles for the workflow engine.

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::engine::{SubmitError, WorkflowEngine};

/// A job captured by [`RecordingEngine`].
#[derive(Debug, Clone)]
pub struct SubmittedJob {
    /// Queue the job was submitted to.
    pub task_queue: String,
    /// Job name.
    pub name: String,
    /// Job payload.
    pub payload: serde_json::Value,
}

/// Engine that records every submission on a channel.
#[derive(Debug)]
pub struct RecordingEngine {
    tx: mpsc::UnboundedSender<SubmittedJob>,
}

impl RecordingEngine {
    /// Creates the engine and the receiving end for assertions.
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<SubmittedJob>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[async_trait]
impl WorkflowEngine for RecordingEngine {
    async fn submit(
        &self,
        task_queue: &str,
        job: &str,
        payload: serde_json::Value,
    ) -> Result<(), SubmitError> {
        let _ = self.tx.send(SubmittedJob {
            task_queue: task_queue.to_string(),
            name: job.to_string(),
            payload,
        });
        Ok(())
    }
}

/// Engine whose every submission fails.
#[derive(Debug)]
pub struct FailingEngine;

#[async_trait]
impl WorkflowEngine for FailingEngine {
    async fn submit(
        &self,
        _task_queue: &str,
        _job: &str,
        _payload: serde_json::Value,
    ) -> Result<(), SubmitError> {
        Err(SubmitError("engine unavailable".to_string()))
    }
}
