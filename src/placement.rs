//! Placement validation: decides whether a piece of evidence may be
//! dispatched to this deployment at all, before any request is built.

use thiserror::Error;
use tracing::warn;

use crate::config::Config;
use crate::evidence::Evidence;

#[derive(Debug, Error)]
pub enum PlacementError {
    #[error("cloud-only evidence '{name}' cannot be processed by a shared-filesystem deployment")]
    IncompatibleCloudOnly { name: String },
    #[error("evidence '{name}' requires a shared-filesystem deployment")]
    IncompatibleSharedFilesystem { name: String },
    #[error(
        "evidence '{name}' lives in project '{evidence_project}' but this deployment runs in \
         '{deployment_project}' (pass --force-evidence if cross-project IAM access is in place)"
    )]
    ProjectMismatch {
        name: String,
        evidence_project: String,
        deployment_project: String,
    },
}

/// Check evidence/deployment compatibility.
///
/// `force` bypasses the hard checks and downgrades the cross-project check
/// to a warning; every bypass is logged.
pub fn validate(evidence: &Evidence, cfg: &Config, force: bool) -> Result<(), PlacementError> {
    let name = evidence.display_name();

    if evidence.cloud_only() && cfg.shared_filesystem {
        if force {
            warn!("placement check bypassed by --force-evidence: cloud-only evidence {name} on a shared-filesystem deployment");
        } else {
            return Err(PlacementError::IncompatibleCloudOnly { name });
        }
    }

    if evidence.requires_shared_fs() && !cfg.shared_filesystem {
        if force {
            warn!("placement check bypassed by --force-evidence: evidence {name} needs shared filesystem access this deployment does not advertise");
        } else {
            return Err(PlacementError::IncompatibleSharedFilesystem { name });
        }
    }

    if let Some(evidence_project) = evidence.project() {
        if !evidence_project.is_empty() && evidence_project != cfg.project {
            if force {
                warn!(
                    "evidence {name} is in project {evidence_project}, deployment is in {}; \
                     proceeding, cross-project access depends on IAM",
                    cfg.project
                );
            } else {
                return Err(PlacementError::ProjectMismatch {
                    name,
                    evidence_project: evidence_project.to_string(),
                    deployment_project: cfg.project.clone(),
                });
            }
        }
    }

    Ok(())
}
