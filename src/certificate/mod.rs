//! The certificate record: data model, the record store that owns it, and
//! the HTTP handlers the form edits it through.

pub mod handlers;
pub mod model;
pub mod store;

pub use model::{CertificateRecord, FieldId, Sex, SexParseError};
pub use store::{OutputGuard, RecordStore, SetOutcome};
