//! # Status Module
//!
//! Read-only projection of backend task state: the task status model, the
//! remote query client, the completion poller, and the report formatter.

pub mod client;
pub mod poll;
pub mod report;

use serde::{Deserialize, Serialize};

/// Task outcome as reported by the backend.
///
/// On the wire this is an optional boolean `successful`: absent or null
/// means the task is still running; once true or false the state is
/// terminal and never changes again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TaskOutcome {
    #[default]
    Running,
    Succeeded,
    Failed,
}

impl TaskOutcome {
    pub fn is_terminal(self) -> bool {
        !matches!(self, TaskOutcome::Running)
    }

    pub fn label(self) -> &'static str {
        match self {
            TaskOutcome::Running => "Running",
            TaskOutcome::Succeeded => "Successful",
            TaskOutcome::Failed => "Failed",
        }
    }
}

mod successful_flag {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::TaskOutcome;

    pub fn serialize<S: Serializer>(value: &TaskOutcome, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            TaskOutcome::Running => serializer.serialize_none(),
            TaskOutcome::Succeeded => serializer.serialize_some(&true),
            TaskOutcome::Failed => serializer.serialize_some(&false),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TaskOutcome, D::Error> {
        Ok(match Option::<bool>::deserialize(deserializer)? {
            None => TaskOutcome::Running,
            Some(true) => TaskOutcome::Succeeded,
            Some(false) => TaskOutcome::Failed,
        })
    }
}

/// A single backend task, as reported by the status lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStatus {
    pub id: String,
    #[serde(default)]
    pub request_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub last_update: String,
    /// Free-text progress message; the reporter substitutes a placeholder
    /// when empty.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(rename = "successful", default, with = "successful_flag")]
    pub outcome: TaskOutcome,
    #[serde(default)]
    pub saved_paths: Vec<String>,
}

impl TaskStatus {
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_terminal()
    }
}

/// Status query filter. Exactly one mode applies per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryFilter {
    /// All tasks updated within the last `days` days.
    History { days: u64 },
    Task { task_id: String },
    Request { request_id: String },
}

impl QueryFilter {
    /// Build a filter from CLI flags. Precedence: days, then task id, then
    /// request id; with nothing set, fall back to the configured history
    /// window.
    pub fn from_flags(
        days_history: Option<u64>,
        task_id: Option<String>,
        request_id: Option<String>,
        default_days: u64,
    ) -> Self {
        if let Some(days) = days_history {
            QueryFilter::History { days }
        } else if let Some(task_id) = task_id {
            QueryFilter::Task { task_id }
        } else if let Some(request_id) = request_id {
            QueryFilter::Request { request_id }
        } else {
            QueryFilter::History { days: default_days }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{QueryFilter, TaskOutcome, TaskStatus};

    #[test]
    fn absent_successful_means_running() {
        let task: TaskStatus = serde_json::from_str(r#"{"id": "t1"}"#).expect("parse");
        assert_eq!(task.outcome, TaskOutcome::Running);
        assert!(!task.is_terminal());
    }

    #[test]
    fn null_successful_means_running() {
        let task: TaskStatus =
            serde_json::from_str(r#"{"id": "t1", "successful": null}"#).expect("parse");
        assert_eq!(task.outcome, TaskOutcome::Running);
    }

    #[test]
    fn boolean_successful_maps_to_terminal_outcomes() {
        let ok: TaskStatus =
            serde_json::from_str(r#"{"id": "t1", "successful": true}"#).expect("parse");
        assert_eq!(ok.outcome, TaskOutcome::Succeeded);
        assert!(ok.is_terminal());

        let failed: TaskStatus =
            serde_json::from_str(r#"{"id": "t1", "successful": false}"#).expect("parse");
        assert_eq!(failed.outcome, TaskOutcome::Failed);
        assert!(failed.is_terminal());
    }

    #[test]
    fn outcome_round_trips_through_wire_form() {
        for outcome in [TaskOutcome::Running, TaskOutcome::Succeeded, TaskOutcome::Failed] {
            let task = TaskStatus {
                id: "t1".to_string(),
                request_id: "r1".to_string(),
                name: "timeline".to_string(),
                last_update: "2026-08-01T10:00:00Z".to_string(),
                status: None,
                outcome,
                saved_paths: Vec::new(),
            };
            let json = serde_json::to_string(&task).expect("serialize");
            let parsed: TaskStatus = serde_json::from_str(&json).expect("parse");
            assert_eq!(parsed.outcome, outcome);
        }
    }

    #[test]
    fn filter_precedence_days_then_task_then_request() {
        let filter = QueryFilter::from_flags(
            Some(3),
            Some("t1".to_string()),
            Some("r1".to_string()),
            1,
        );
        assert_eq!(filter, QueryFilter::History { days: 3 });

        let filter = QueryFilter::from_flags(None, Some("t1".to_string()), Some("r1".to_string()), 1);
        assert_eq!(
            filter,
            QueryFilter::Task {
                task_id: "t1".to_string()
            }
        );

        let filter = QueryFilter::from_flags(None, None, Some("r1".to_string()), 1);
        assert_eq!(
            filter,
            QueryFilter::Request {
                request_id: "r1".to_string()
            }
        );

        let filter = QueryFilter::from_flags(None, None, None, 4);
        assert_eq!(filter, QueryFilter::History { days: 4 });
    }
}
