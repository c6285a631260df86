//! # Jobs Module
//!
//! The server side organizes work as jobs: each job inspects the evidence in
//! a request and fans out into zero or more tasks. What a task then does to
//! the evidence is executed elsewhere; this crate only materializes the task
//! specs when running with inline dispatch.

use serde::Serialize;
use uuid::Uuid;

use crate::evidence::{Evidence, EvidenceKind};
use crate::request::ProcessingRequest;

/// Specification of a single unit of backend work.
#[derive(Debug, Clone, Serialize)]
pub struct TaskSpec {
    pub id: String,
    pub request_id: String,
    pub name: String,
    pub evidence: Evidence,
}

fn task(request_id: &str, name: &str, evidence: &Evidence) -> TaskSpec {
    TaskSpec {
        id: Uuid::new_v4().simple().to_string(),
        request_id: request_id.to_string(),
        name: name.to_string(),
        evidence: evidence.clone(),
    }
}

/// A job fans evidence out into tasks. Priority runs 0-100, lowest first.
pub trait Job: Send + Sync {
    fn name(&self) -> &str;

    fn priority(&self) -> u8 {
        100
    }

    fn create_tasks(&self, request_id: &str, evidence: &[Evidence]) -> Vec<TaskSpec>;
}

/// Cheap filesystem stat pass over any evidence kind. Runs first.
struct StatJob;

impl Job for StatJob {
    fn name(&self) -> &str {
        "stat"
    }

    fn priority(&self) -> u8 {
        10
    }

    fn create_tasks(&self, request_id: &str, evidence: &[Evidence]) -> Vec<TaskSpec> {
        evidence.iter().map(|e| task(request_id, "stat", e)).collect()
    }
}

/// Timeline extraction over disk-shaped evidence.
struct TimelineJob;

impl Job for TimelineJob {
    fn name(&self) -> &str {
        "timeline"
    }

    fn priority(&self) -> u8 {
        50
    }

    fn create_tasks(&self, request_id: &str, evidence: &[Evidence]) -> Vec<TaskSpec> {
        evidence
            .iter()
            .filter(|e| {
                matches!(
                    e.kind,
                    EvidenceKind::RawDisk { .. }
                        | EvidenceKind::CloudDisk { .. }
                        | EvidenceKind::CloudDiskEmbeddedRaw { .. }
                )
            })
            .map(|e| task(request_id, "timeline", e))
            .collect()
    }
}

/// Loose-file artefact sweep; only meaningful for directory evidence.
struct ArtefactSweepJob;

impl Job for ArtefactSweepJob {
    fn name(&self) -> &str {
        "artefact_sweep"
    }

    fn create_tasks(&self, request_id: &str, evidence: &[Evidence]) -> Vec<TaskSpec> {
        evidence
            .iter()
            .filter(|e| matches!(e.kind, EvidenceKind::Directory { .. }))
            .map(|e| task(request_id, "artefact_sweep", e))
            .collect()
    }
}

pub fn default_jobs() -> Vec<Box<dyn Job>> {
    vec![Box::new(StatJob), Box::new(TimelineJob), Box::new(ArtefactSweepJob)]
}

/// Local task engine fed by the inline dispatch path.
pub struct TaskEngine {
    jobs: Vec<Box<dyn Job>>,
}

impl TaskEngine {
    pub fn new(jobs: Vec<Box<dyn Job>>) -> Self {
        Self { jobs }
    }

    pub fn with_default_jobs() -> Self {
        Self::new(default_jobs())
    }

    /// Materialize the task specs for a request, in priority order.
    ///
    /// The task count is data-dependent: jobs skip evidence kinds they do
    /// not handle.
    pub fn ingest(&self, request: &ProcessingRequest) -> Vec<TaskSpec> {
        let mut jobs: Vec<&dyn Job> = self.jobs.iter().map(|job| job.as_ref()).collect();
        jobs.sort_by_key(|job| job.priority());

        let mut tasks = Vec::new();
        for job in jobs {
            tasks.extend(job.create_tasks(&request.request_id, &request.evidence));
        }
        tasks
    }
}
