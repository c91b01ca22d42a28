//! The record store: owns the canonical in-memory certificate record and
//! applies every mutation under the validation rules (length limits,
//! upper-casing, address mirroring, output lock).

use std::sync::Arc;

use chrono::NaiveDate;
use parking_lot::RwLock;

use super::model::{CertificateRecord, FieldId, Sex};

/// Result of a field write. Rejections are silent no-ops from the client's
/// point of view; the outcome only decides whether the draft is re-persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOutcome {
    Applied,
    Rejected,
}

impl SetOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, SetOutcome::Applied)
    }
}

#[derive(Debug)]
pub struct RecordStore {
    record: CertificateRecord,
    same_address: bool,
    locked: bool,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore {
    pub fn new() -> Self {
        Self {
            record: CertificateRecord::default(),
            same_address: false,
            locked: false,
        }
    }

    /// Construct the store for a new session: adopt the rehydrated draft if
    /// one exists, otherwise start empty, then default the registration date
    /// to today. The default is gated on the field being empty (not on a
    /// run-once flag) so re-loading an empty draft tolerates re-runs.
    pub fn initialize(draft: Option<CertificateRecord>, today: NaiveDate) -> Self {
        let mut store = Self::new();
        if let Some(record) = draft {
            store.record = record;
        }
        if store.record.reg_date.is_none() && !store.locked {
            store.record.reg_date = Some(today);
        }
        store
    }

    pub fn record(&self) -> &CertificateRecord {
        &self.record
    }

    pub fn same_address(&self) -> bool {
        self.same_address
    }

    pub fn locked(&self) -> bool {
        self.locked
    }

    pub(crate) fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    /// Apply a single field write. Text values are upper-cased before the
    /// length check; an over-limit value is rejected whole, never truncated.
    /// Sex and date fields are validated by parsing. Every write is rejected
    /// while the record is locked, and the permanent-address fields are not
    /// independently writable while the mirror is on.
    pub fn set_field(&mut self, field: FieldId, raw: &str) -> SetOutcome {
        if self.locked {
            return SetOutcome::Rejected;
        }

        match field {
            FieldId::Sex => match Sex::parse(raw) {
                Ok(sex) => {
                    self.record.sex = sex;
                    SetOutcome::Applied
                }
                Err(_) => SetOutcome::Rejected,
            },
            FieldId::Dob | FieldId::RegDate => match parse_iso_date(raw) {
                Ok(date) => {
                    if field == FieldId::Dob {
                        self.record.dob = date;
                    } else {
                        self.record.reg_date = date;
                    }
                    SetOutcome::Applied
                }
                Err(_) => SetOutcome::Rejected,
            },
            _ => self.set_text_field(field, raw),
        }
    }

    fn set_text_field(&mut self, field: FieldId, raw: &str) -> SetOutcome {
        if self.same_address && field.is_permanent_addr() {
            return SetOutcome::Rejected;
        }

        let value = raw.to_uppercase();
        if let Some(limit) = field.limit() {
            if value.chars().count() > limit {
                return SetOutcome::Rejected;
            }
        }

        let mirror = field.mirror_target().filter(|_| self.same_address);

        match self.record.text_field_mut(field) {
            Some(slot) => *slot = value.clone(),
            None => return SetOutcome::Rejected,
        }

        if let Some(target) = mirror {
            if let Some(slot) = self.record.text_field_mut(target) {
                *slot = value;
            }
        }

        SetOutcome::Applied
    }

    /// Toggle the one-way address mirror. Turning it on copies the birth
    /// address immediately (idempotent); turning it off blanks the permanent
    /// address rather than restoring prior input.
    pub fn set_same_address(&mut self, flag: bool) -> SetOutcome {
        if self.locked {
            return SetOutcome::Rejected;
        }

        self.same_address = flag;
        if flag {
            self.record.permanent_addr1 = self.record.birth_addr1.clone();
            self.record.permanent_addr2 = self.record.birth_addr2.clone();
            self.record.permanent_addr3 = self.record.birth_addr3.clone();
            self.record.permanent_addr4 = self.record.birth_addr4.clone();
        } else {
            self.record.permanent_addr1.clear();
            self.record.permanent_addr2.clear();
            self.record.permanent_addr3.clear();
            self.record.permanent_addr4.clear();
        }
        SetOutcome::Applied
    }

    /// Reset to the empty defaults. Irreversible, no confirmation step.
    pub fn clear(&mut self) {
        self.record = CertificateRecord::default();
        self.same_address = false;
        self.locked = false;
    }
}

fn parse_iso_date(raw: &str) -> Result<Option<NaiveDate>, chrono::ParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map(Some)
}

/// Scoped ownership of the `locked` flag for the duration of an output
/// action. The flag is released on drop, so every exit path of a print or
/// export (success, render failure, spool failure) unlocks the record.
pub struct OutputGuard {
    store: Arc<RwLock<RecordStore>>,
    snapshot: CertificateRecord,
}

impl OutputGuard {
    /// Lock the record and snapshot it in the same critical section, so the
    /// rendered output cannot diverge from what was frozen. Fails if an
    /// output action is already in flight.
    pub fn acquire(store: &Arc<RwLock<RecordStore>>) -> Option<Self> {
        let snapshot = {
            let mut guard = store.write();
            if guard.locked() {
                return None;
            }
            guard.set_locked(true);
            guard.record().clone()
        };
        Some(Self {
            store: Arc::clone(store),
            snapshot,
        })
    }

    pub fn snapshot(&self) -> &CertificateRecord {
        &self.snapshot
    }
}

impl Drop for OutputGuard {
    fn drop(&mut self) {
        self.store.write().set_locked(false);
    }
}
