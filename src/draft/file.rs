//! Filesystem implementation of the draft slot.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use super::{DraftError, DraftStorage, DRAFT_KEY};
use crate::certificate::model::CertificateRecord;

pub struct FileDraftStorage {
    path: PathBuf,
}

impl FileDraftStorage {
    /// Create the storage rooted at `dir`, creating the directory if needed.
    pub fn new(dir: &Path) -> std::io::Result<Self> {
        std::fs::create_dir_all(dir)?;
        Ok(Self {
            path: dir.join(DRAFT_KEY),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DraftStorage for FileDraftStorage {
    async fn save(&self, record: &CertificateRecord) -> Result<(), DraftError> {
        let json = serde_json::to_vec(record).map_err(DraftError::Serialize)?;
        fs::write(&self.path, json).await.map_err(DraftError::Write)
    }

    async fn load(&self) -> Option<CertificateRecord> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                log::warn!("Failed to read draft slot, starting empty: {}", e);
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!("Draft slot is malformed, starting empty: {}", e);
                None
            }
        }
    }

    async fn remove(&self) -> Result<(), DraftError> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            // Removing an absent draft is not an error.
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DraftError::Remove(e)),
        }
    }
}
