//! # Evidence Module
//!
//! Typed descriptions of the units of input the platform can process. An
//! `Evidence` value is created once from CLI input, validated for placement,
//! then moves into a processing request.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// The four supported evidence kinds, each carrying only its own fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EvidenceKind {
    /// A raw disk image (or block device) on a shared filesystem.
    RawDisk { local_path: PathBuf },
    /// A directory of loose files on a shared filesystem.
    Directory { local_path: PathBuf },
    /// A cloud persistent disk, referenced by name.
    CloudDisk {
        disk_name: String,
        project: String,
        zone: String,
    },
    /// A raw image embedded inside a cloud persistent disk.
    CloudDiskEmbeddedRaw {
        disk_name: String,
        project: String,
        zone: String,
        embedded_path: PathBuf,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
    #[serde(flatten)]
    pub kind: EvidenceKind,
    /// Display label; falls back to the primary path/identifier when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Free-text provenance note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Evidence {
    pub fn new(kind: EvidenceKind, name: Option<String>, source: Option<String>) -> Self {
        Self { kind, name, source }
    }

    /// Label used in logs and reports.
    pub fn display_name(&self) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }
        match &self.kind {
            EvidenceKind::RawDisk { local_path } | EvidenceKind::Directory { local_path } => {
                local_path.display().to_string()
            }
            EvidenceKind::CloudDisk { disk_name, .. } => disk_name.clone(),
            EvidenceKind::CloudDiskEmbeddedRaw {
                disk_name,
                embedded_path,
                ..
            } => format!("{}:{}", disk_name, embedded_path.display()),
        }
    }

    /// Whether this evidence can only be processed by cloud workers.
    pub fn cloud_only(&self) -> bool {
        match &self.kind {
            EvidenceKind::RawDisk { .. } | EvidenceKind::Directory { .. } => false,
            EvidenceKind::CloudDisk { .. } | EvidenceKind::CloudDiskEmbeddedRaw { .. } => true,
        }
    }

    /// Whether workers must see the same filesystem paths as the client.
    ///
    /// Kept separate from `cloud_only` so a future kind that is neither
    /// cloud-bound nor filesystem-bound validates cleanly.
    pub fn requires_shared_fs(&self) -> bool {
        match &self.kind {
            EvidenceKind::RawDisk { .. } | EvidenceKind::Directory { .. } => true,
            EvidenceKind::CloudDisk { .. } | EvidenceKind::CloudDiskEmbeddedRaw { .. } => false,
        }
    }

    /// Cloud project the evidence lives in, for cloud kinds.
    pub fn project(&self) -> Option<&str> {
        match &self.kind {
            EvidenceKind::CloudDisk { project, .. }
            | EvidenceKind::CloudDiskEmbeddedRaw { project, .. } => Some(project.as_str()),
            EvidenceKind::RawDisk { .. } | EvidenceKind::Directory { .. } => None,
        }
    }
}
