//! Shared application state: the record store behind its lock, the draft
//! storage backend, the certificate template, and the print spooler.

use std::sync::Arc;

use chrono::Local;
use parking_lot::RwLock;

use crate::certificate::store::RecordStore;
use crate::config::AppConfig;
use crate::draft::{DraftStorage, FileDraftStorage};
use crate::renderer::{CertificateTemplate, LpSpooler, PrintSpooler};

pub struct AppState {
    pub store: Arc<RwLock<RecordStore>>,
    pub draft: Arc<dyn DraftStorage>,
    pub template: CertificateTemplate,
    pub spooler: Arc<dyn PrintSpooler>,
}

impl AppState {
    /// Build the state for a new session: open the draft storage, rehydrate
    /// the record from the slot (malformed content falls back to empty), and
    /// run the one-shot initialization that defaults the registration date.
    pub async fn new(config: &AppConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let draft: Arc<dyn DraftStorage> = Arc::new(FileDraftStorage::new(&config.draft_dir)?);
        let spooler: Arc<dyn PrintSpooler> = Arc::new(LpSpooler::new(config.printer.clone()));
        Self::new_with_collaborators(draft, spooler).await
    }

    /// Build the state with explicit collaborators. Used by tests to swap in
    /// a scratch draft directory or a recording spooler.
    pub async fn new_with_collaborators(
        draft: Arc<dyn DraftStorage>,
        spooler: Arc<dyn PrintSpooler>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let saved = draft.load().await;
        if saved.is_some() {
            log::info!("Rehydrated in-progress draft from the draft slot");
        }
        let store = RecordStore::initialize(saved, Local::now().date_naive());
        let template = CertificateTemplate::new()?;

        Ok(Self {
            store: Arc::new(RwLock::new(store)),
            draft,
            template,
            spooler,
        })
    }
}
