// Backup data model and the local JSON sidecar it is written to.

use crate::error::{BackupError, Result};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// Input collected from the user. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupRequest {
    pub text: String,
    pub group_name: String,
    pub token: String,
}

impl BackupRequest {
    /// Trims every field and rejects the request if any of them ends up
    /// empty.
    pub fn new(
        text: impl AsRef<str>,
        group_name: impl AsRef<str>,
        token: impl AsRef<str>,
    ) -> Result<Self> {
        let req = BackupRequest {
            text: text.as_ref().trim().to_string(),
            group_name: group_name.as_ref().trim().to_string(),
            token: token.as_ref().trim().to_string(),
        };
        req.validate()?;
        Ok(req)
    }

    pub fn validate(&self) -> Result<()> {
        let missing: Vec<&str> = [
            ("text", &self.text),
            ("group name", &self.group_name),
            ("token", &self.token),
        ]
        .into_iter()
        .filter(|(_, v)| v.trim().is_empty())
        .map(|(name, _)| name)
        .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(BackupError::InvalidInput(format!(
                "all fields must be filled in (missing: {})",
                missing.join(", ")
            )))
        }
    }
}

/// Metadata of one object stored on the disk.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UploadedFileInfo {
    pub file_name: String,
    pub size: u64,
    pub created: DateTime<Local>,
    pub path: String,
}

/// What one run leaves behind locally: when it ran, with which inputs,
/// and the files it stored on the disk.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BackupRecord {
    pub timestamp: DateTime<Local>,
    pub text: String,
    pub group_name: String,
    pub files: Vec<UploadedFileInfo>,
}

impl BackupRecord {
    pub fn new(request: &BackupRequest, files: Vec<UploadedFileInfo>) -> Self {
        BackupRecord {
            timestamp: Local::now(),
            text: request.text.clone(),
            group_name: request.group_name.clone(),
            files,
        }
    }
}

/// On-disk shape: the record sits under a `backup_info` key.
#[derive(Serialize, Deserialize, Debug)]
struct RecordFile {
    backup_info: BackupRecord,
}

/// Write the record as pretty JSON, replacing whatever was at `path`.
pub fn persist_record(record: &BackupRecord, path: &Path) -> Result<()> {
    let doc = RecordFile {
        backup_info: record.clone(),
    };
    let json = serde_json::to_string_pretty(&doc)?;
    fs::write(path, json)?;
    info!(path = %path.display(), "backup record written");
    Ok(())
}
