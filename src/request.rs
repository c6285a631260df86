//! Processing request construction and its canonical wire form.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::evidence::Evidence;

/// An immutable unit of submission. `request_id` is assigned once at
/// construction and never reused across requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingRequest {
    pub request_id: String,
    pub evidence: Vec<Evidence>,
}

/// Sole construction site for processing requests.
pub fn build_request(evidence: Vec<Evidence>) -> ProcessingRequest {
    ProcessingRequest {
        request_id: Uuid::new_v4().simple().to_string(),
        evidence,
    }
}

impl ProcessingRequest {
    /// Canonical serialized form, used by `--dump-json` and by the remote
    /// submission channel.
    pub fn to_canonical_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_canonical_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{ProcessingRequest, build_request};
    use crate::evidence::{Evidence, EvidenceKind};

    fn sample_evidence() -> Evidence {
        Evidence::new(
            EvidenceKind::Directory {
                local_path: PathBuf::from("/cases/triage"),
            },
            Some("triage".to_string()),
            Some("collected 2026-08-01".to_string()),
        )
    }

    #[test]
    fn request_ids_are_unique() {
        let a = build_request(vec![sample_evidence()]);
        let b = build_request(vec![sample_evidence()]);
        assert_ne!(a.request_id, b.request_id);
        assert_eq!(a.request_id.len(), 32);
    }

    #[test]
    fn canonical_json_round_trips() {
        let request = build_request(vec![sample_evidence()]);
        let text = request.to_canonical_json().expect("serialize");
        let parsed = ProcessingRequest::from_canonical_json(&text).expect("parse");
        assert_eq!(parsed.request_id, request.request_id);
        assert_eq!(parsed.evidence, request.evidence);
    }
}
