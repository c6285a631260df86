//! # Dispatch Module
//!
//! Routes a built processing request either to the in-process task engine
//! (when the client is itself standing up a server) or onto the backend's
//! ingress channel. Exactly one path runs per invocation.

use thiserror::Error;
use tracing::info;

use crate::jobs::TaskEngine;
use crate::request::ProcessingRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Hand evidence straight to the local task engine; publish nothing.
    ServerInline,
    /// Serialize and publish to the task backend's ingress channel.
    RemoteSubmit,
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("request publish failed: {0}")]
    Channel(String),
    #[error("request serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Ingress channel of the task backend. The HTTP implementation posts the
/// canonical request JSON; tests substitute a recording fake.
pub trait RequestChannel: Send + Sync {
    fn publish(&self, payload: &str) -> Result<(), DispatchError>;
}

pub struct HttpRequestChannel {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl HttpRequestChannel {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl RequestChannel for HttpRequestChannel {
    fn publish(&self, payload: &str) -> Result<(), DispatchError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("content-type", "application/json")
            .body(payload.to_string())
            .send()
            .map_err(|e| DispatchError::Channel(e.to_string()))?;
        response
            .error_for_status()
            .map_err(|e| DispatchError::Channel(e.to_string()))?;
        Ok(())
    }
}

#[derive(Debug)]
pub enum DispatchOutcome {
    Submitted { request_id: String },
    ExecutedInline { tasks_created: usize },
}

pub fn dispatch(
    request: &ProcessingRequest,
    run_mode: RunMode,
    channel: &dyn RequestChannel,
    engine: &TaskEngine,
) -> Result<DispatchOutcome, DispatchError> {
    match run_mode {
        RunMode::ServerInline => {
            let tasks = engine.ingest(request);
            info!(
                "request {} ingested inline, {} task(s) created",
                request.request_id,
                tasks.len()
            );
            Ok(DispatchOutcome::ExecutedInline {
                tasks_created: tasks.len(),
            })
        }
        RunMode::RemoteSubmit => {
            let payload = serde_json::to_string(request)?;
            channel.publish(&payload)?;
            let names: Vec<String> = request.evidence.iter().map(|e| e.display_name()).collect();
            info!(
                "request {} submitted for evidence [{}]",
                request.request_id,
                names.join(", ")
            );
            Ok(DispatchOutcome::Submitted {
                request_id: request.request_id.clone(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Mutex;

    use super::{DispatchError, DispatchOutcome, RequestChannel, RunMode, dispatch};
    use crate::evidence::{Evidence, EvidenceKind};
    use crate::jobs::TaskEngine;
    use crate::request::build_request;

    #[derive(Default)]
    struct RecordingChannel {
        published: Mutex<Vec<String>>,
    }

    impl RequestChannel for RecordingChannel {
        fn publish(&self, payload: &str) -> Result<(), DispatchError> {
            self.published.lock().unwrap().push(payload.to_string());
            Ok(())
        }
    }

    fn sample_request() -> crate::request::ProcessingRequest {
        build_request(vec![Evidence::new(
            EvidenceKind::RawDisk {
                local_path: PathBuf::from("/images/case1.dd"),
            },
            None,
            None,
        )])
    }

    #[test]
    fn remote_submit_publishes_exactly_one_payload() {
        let channel = RecordingChannel::default();
        let engine = TaskEngine::with_default_jobs();
        let request = sample_request();

        let outcome =
            dispatch(&request, RunMode::RemoteSubmit, &channel, &engine).expect("dispatch");
        let published = channel.published.lock().unwrap();
        assert_eq!(published.len(), 1);
        assert!(published[0].contains(&request.request_id));
        assert!(matches!(outcome, DispatchOutcome::Submitted { .. }));
    }

    #[test]
    fn server_inline_publishes_nothing() {
        let channel = RecordingChannel::default();
        let engine = TaskEngine::with_default_jobs();
        let request = sample_request();

        let outcome =
            dispatch(&request, RunMode::ServerInline, &channel, &engine).expect("dispatch");
        assert!(channel.published.lock().unwrap().is_empty());
        match outcome {
            DispatchOutcome::ExecutedInline { tasks_created } => assert!(tasks_created > 0),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }
}
