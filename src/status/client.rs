//! Remote status lookup. The backend exposes a single function that answers
//! filtered task queries with a JSON envelope; this client encodes the
//! filter, invokes it, and decodes the result set.

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, error};

use crate::config::Config;
use crate::status::{QueryFilter, TaskStatus};

/// Record kind requested from the status backend.
const TASK_KIND: &str = "TracehawkTask";

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("remote function call failed: {0}")]
    Transport(String),
    #[error("status backend returned no result payload")]
    NoResults,
    #[error("could not decode status result: {0}")]
    MalformedResult(String),
}

/// Narrow "invoke remote function, get JSON result" contract. The HTTP
/// implementation posts the argument object; tests script the responses.
pub trait RemoteFunction: Send + Sync {
    fn invoke(&self, args: &serde_json::Value) -> Result<serde_json::Value, QueryError>;
}

pub struct HttpFunction {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl HttpFunction {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl RemoteFunction for HttpFunction {
    fn invoke(&self, args: &serde_json::Value) -> Result<serde_json::Value, QueryError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(args)
            .send()
            .map_err(|e| QueryError::Transport(e.to_string()))?;
        let response = response
            .error_for_status()
            .map_err(|e| QueryError::Transport(e.to_string()))?;
        response
            .json()
            .map_err(|e| QueryError::Transport(e.to_string()))
    }
}

/// Envelope returned by the status function. `result` is itself a
/// JSON-encoded string holding an array of one array of task objects.
#[derive(Debug, Deserialize)]
struct ResultEnvelope {
    #[serde(default)]
    result: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

pub struct StatusClient<'a> {
    function: &'a dyn RemoteFunction,
    cfg: &'a Config,
}

impl<'a> StatusClient<'a> {
    pub fn new(function: &'a dyn RemoteFunction, cfg: &'a Config) -> Self {
        Self { function, cfg }
    }

    /// Fetch the tasks matching `filter`.
    ///
    /// A well-formed empty result list is `Ok(vec![])`; a missing result
    /// payload or an undecodable one is fatal to the invoking command.
    pub fn query(&self, filter: &QueryFilter) -> Result<Vec<TaskStatus>, QueryError> {
        let mut args = serde_json::json!({
            "instance": self.cfg.instance,
            "kind": TASK_KIND,
        });
        match filter {
            QueryFilter::History { days } => {
                let start = chrono::Utc::now() - chrono::Duration::days(*days as i64);
                args["start_time"] =
                    serde_json::Value::String(start.format("%Y-%m-%dT%H:%M:%SZ").to_string());
            }
            QueryFilter::Task { task_id } => {
                args["task_id"] = serde_json::Value::String(task_id.clone());
            }
            QueryFilter::Request { request_id } => {
                args["request_id"] = serde_json::Value::String(request_id.clone());
            }
        }

        debug!("status query args: {args}");
        let raw = self.function.invoke(&args)?;

        let envelope: ResultEnvelope = serde_json::from_value(raw.clone())
            .map_err(|e| QueryError::MalformedResult(e.to_string()))?;
        if let Some(message) = &envelope.error {
            error!("status backend reported an error: {message}");
        }
        let Some(result) = envelope.result else {
            error!("status backend returned no result payload: {raw}");
            return Err(QueryError::NoResults);
        };

        let mut groups: Vec<Vec<TaskStatus>> = serde_json::from_str(&result).map_err(|e| {
            error!("undecodable status result payload: {result}");
            QueryError::MalformedResult(e.to_string())
        })?;
        Ok(groups.pop().unwrap_or_default())
    }
}
