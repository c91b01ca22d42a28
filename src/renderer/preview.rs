//! The preview projection: a pure mapping of the current record onto the
//! fixed FORM NO.5 certificate layout. This projection is the single visual
//! source for both output actions — the Typst template consumes it verbatim.

use serde::Serialize;
use utoipa::ToSchema;

use super::common::format_display_date;
use crate::certificate::model::{CertificateRecord, Sex};

/// Fixed header of the certificate page, top to bottom.
pub const HEADER_LINES: [&str; 4] = [
    "FORM NO.5",
    "GOVERNMENT OF ANDHRA PRADESH",
    "MEDICAL & HEALTH DEPARTMENT",
    "BIRTH CERTIFICATE",
];

/// Statute citation printed under the title.
pub const STATUTE_LINE: &str = "(Issued under section 12 / 17 of the Registration of Births and \
Deaths Act, 1969 and Rule 8 / 13 of the Andhra Pradesh Registration of Births and Deaths Rules, \
1999)";

/// Signature caption at the foot of the page.
pub const SIGNATURE_LINE: &str = "Signature of Issuing Authority";

/// Read-only rendering of the record, formatted for a fixed A4 page. Dates
/// appear as `DD/MM/YYYY`; everything else as stored (already upper-cased).
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CertificatePreview {
    pub header: Vec<String>,
    pub statute: String,
    pub register_line: String,
    pub name: String,
    pub sex: String,
    pub date_of_birth: String,
    pub place_of_birth: String,
    pub mother_name: String,
    pub father_name: String,
    pub birth_address: Vec<String>,
    pub permanent_address: Vec<String>,
    pub registration_no: String,
    pub registration_date: String,
    pub remarks: String,
    pub signature: String,
}

impl CertificatePreview {
    pub fn project(record: &CertificateRecord) -> Self {
        Self {
            header: HEADER_LINES.iter().map(|s| s.to_string()).collect(),
            statute: STATUTE_LINE.to_string(),
            register_line: format!(
                "This is to certify that the following information has been taken from the \
                 original record of birth, which is in the register for {} (Local area / local \
                 body) of Mandal {} of District {}. of State Andhra Pradesh State.",
                record.local_body, record.mandal, record.district
            ),
            name: record.name.clone(),
            sex: record.sex.map(|s| Sex::as_str(&s).to_string()).unwrap_or_default(),
            date_of_birth: format_display_date(record.dob),
            place_of_birth: record.place_of_birth.clone(),
            mother_name: record.mother_name.clone(),
            father_name: record.father_name.clone(),
            birth_address: vec![
                record.birth_addr1.clone(),
                record.birth_addr2.clone(),
                record.birth_addr3.clone(),
                record.birth_addr4.clone(),
            ],
            permanent_address: vec![
                record.permanent_addr1.clone(),
                record.permanent_addr2.clone(),
                record.permanent_addr3.clone(),
                record.permanent_addr4.clone(),
            ],
            registration_no: record.reg_no.clone(),
            registration_date: format_display_date(record.reg_date),
            remarks: record.remarks.clone(),
            signature: SIGNATURE_LINE.to_string(),
        }
    }
}
