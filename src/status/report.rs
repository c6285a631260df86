//! Human-readable formatting of task status sets. Pure string building; the
//! caller decides where the text goes.

use std::fmt::Write;

use crate::status::TaskStatus;

const STATUS_PLACEHOLDER: &str = "Task in Progress";

/// Format one line per task, with per-task detail lines in verbose mode.
pub fn format_tasks(tasks: &[TaskStatus], all_fields: bool) -> String {
    let mut out = String::new();
    for task in tasks {
        let status = match task.status.as_deref() {
            Some(s) if !s.trim().is_empty() => s,
            _ => STATUS_PLACEHOLDER,
        };
        let _ = writeln!(
            out,
            "{} {} {}: {}",
            task.last_update,
            task.name,
            task.outcome.label(),
            status
        );
        if all_fields {
            let _ = writeln!(out, "  request id: {}", task.request_id);
            let _ = writeln!(out, "  task id: {}", task.id);
            for path in &task.saved_paths {
                let _ = writeln!(out, "  saved path: {path}");
            }
        }
    }
    out
}
