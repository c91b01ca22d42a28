//! Draft persistence: a single named slot holding the serialized in-progress
//! record, written through on every accepted mutation and removed on clear
//! or on successful print/export.

mod file;

pub use file::FileDraftStorage;

use async_trait::async_trait;
use thiserror::Error;

use crate::certificate::model::CertificateRecord;

/// Name of the single draft slot.
pub const DRAFT_KEY: &str = "birth_cert_draft.json";

#[derive(Debug, Error)]
pub enum DraftError {
    #[error("failed to write draft slot: {0}")]
    Write(#[source] std::io::Error),
    #[error("failed to remove draft slot: {0}")]
    Remove(#[source] std::io::Error),
    #[error("failed to serialize draft: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Storage backend for the draft slot.
///
/// `load` never fails: malformed or unreadable content is treated as "no
/// draft" so the editor always starts.
#[async_trait]
pub trait DraftStorage: Send + Sync {
    async fn save(&self, record: &CertificateRecord) -> Result<(), DraftError>;
    async fn load(&self) -> Option<CertificateRecord>;
    async fn remove(&self) -> Result<(), DraftError>;
}
