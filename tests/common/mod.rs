//! Shared test infrastructure: a scripted remote function standing in for
//! the status backend, and deployment config fixtures.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use tracehawk::config::Config;
use tracehawk::status::client::{QueryError, RemoteFunction};

/// Remote function that replays a fixed sequence of responses; the last
/// response repeats once the script runs out.
pub struct ScriptedFunction {
    responses: Mutex<VecDeque<serde_json::Value>>,
    last: Mutex<Option<serde_json::Value>>,
    calls: AtomicUsize,
}

impl ScriptedFunction {
    pub fn new(responses: Vec<serde_json::Value>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            last: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RemoteFunction for ScriptedFunction {
    fn invoke(&self, _args: &serde_json::Value) -> Result<serde_json::Value, QueryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut responses = self.responses.lock().unwrap();
        let mut last = self.last.lock().unwrap();
        if let Some(next) = responses.pop_front() {
            *last = Some(next.clone());
            return Ok(next);
        }
        last.clone().ok_or(QueryError::NoResults)
    }
}

/// Status envelope whose `result` payload wraps `tasks_json` in the
/// backend's array-of-one-array form.
pub fn envelope(tasks_json: &str) -> serde_json::Value {
    serde_json::json!({ "result": format!("[{tasks_json}]") })
}

pub fn cloud_deployment() -> Config {
    Config {
        instance: "test".to_string(),
        project: "proj-a".to_string(),
        zone: "us-central1-f".to_string(),
        shared_filesystem: false,
        output_dir: PathBuf::from("/tmp/out"),
        status_function_url: "http://localhost/status".to_string(),
        submit_endpoint_url: "http://localhost/requests".to_string(),
        poll_interval_secs: 60,
        days_history: 1,
    }
}

pub fn shared_fs_deployment() -> Config {
    Config {
        shared_filesystem: true,
        ..cloud_deployment()
    }
}
