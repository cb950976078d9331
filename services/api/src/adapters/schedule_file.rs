//! services/api/src/adapters/schedule_file.rs
//!
//! This module contains the file-backed implementation of the `ScheduleStore` port.
//! The whole schedule lives in one pretty-printed JSON file that is also served to
//! browsers as a static asset.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{error, info};
use uuid::Uuid;
use weekly_planner_core::domain::ScheduleDocument;
use weekly_planner_core::ports::{PortError, PortResult, ScheduleStore};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// Stores the schedule document in a single JSON file.
///
/// Writes go to a temporary sibling file that is renamed over the target, so a crash
/// mid-write leaves the previous document in place. Writes are serialized through
/// `write_lock`.
pub struct FileScheduleStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileScheduleStore {
    /// Creates a new `FileScheduleStore` for the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "schedule.json".to_string());
        let temp_name = format!(".{}.{}.tmp", file_name, Uuid::new_v4().simple());
        match self.path.parent() {
            Some(parent) => parent.join(temp_name),
            None => PathBuf::from(temp_name),
        }
    }
}

async fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path).await?;
    file.write_all(bytes).await?;
    file.sync_all().await?;
    Ok(())
}

//=========================================================================================
// `ScheduleStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl ScheduleStore for FileScheduleStore {
    async fn read(&self) -> PortResult<ScheduleDocument> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(ScheduleDocument::new());
            }
            Err(e) => {
                return Err(PortError::Storage(format!(
                    "failed to read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        serde_json::from_slice(&bytes).map_err(|e| {
            PortError::Storage(format!("corrupt schedule file {}: {}", self.path.display(), e))
        })
    }

    async fn write(&self, document: &ScheduleDocument) -> PortResult<()> {
        let json = serde_json::to_vec_pretty(document)
            .map_err(|e| PortError::Unexpected(format!("failed to encode schedule: {}", e)))?;

        let _guard = self.write_lock.lock().await;
        let temp_path = self.temp_path();

        if let Err(e) = write_synced(&temp_path, &json).await {
            error!("Failed to write temporary schedule file {}: {}", temp_path.display(), e);
            let _ = fs::remove_file(&temp_path).await;
            return Err(PortError::Storage(e.to_string()));
        }

        if let Err(e) = fs::rename(&temp_path, &self.path).await {
            error!("Failed to replace {}: {}", self.path.display(), e);
            let _ = fs::remove_file(&temp_path).await;
            return Err(PortError::Storage(e.to_string()));
        }

        info!("Schedule saved with {} slots", document.len());
        Ok(())
    }
}
