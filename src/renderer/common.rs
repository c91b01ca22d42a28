//! Shared helpers for the renderer: display-date formatting, the export
//! naming rule, and Typst string escaping.

use chrono::{Datelike, NaiveDate};

use crate::certificate::model::CertificateRecord;

/// Placeholder token used in the export name when the name field is empty.
pub const NAME_PLACEHOLDER: &str = "BIRTH_CERT";
/// Placeholder token used in the export name when the date of birth is empty.
pub const YEAR_PLACEHOLDER: &str = "YEAR";

/// Render a stored date as `DD/MM/YYYY`; empty stays empty.
pub fn format_display_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format("%d/%m/%Y").to_string(),
        None => String::new(),
    }
}

/// First whitespace-delimited token of the trimmed name, reduced to its
/// alphanumeric characters so it stays a plain filename component, or the
/// placeholder. The name field is free text; without the reduction a value
/// like `../X` would put path separators into the artifact name.
pub fn first_name_token(name: &str) -> String {
    let token: String = name
        .trim()
        .split_whitespace()
        .next()
        .unwrap_or("")
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect();
    if token.is_empty() {
        NAME_PLACEHOLDER.to_string()
    } else {
        token
    }
}

/// Leading year component of the date of birth, or the placeholder.
pub fn dob_year(dob: Option<NaiveDate>) -> String {
    match dob {
        Some(d) => d.year().to_string(),
        None => YEAR_PLACEHOLDER.to_string(),
    }
}

/// Naming rule for the exported artifact: `{firstToken(name)}_{yearOf(dob)}.pdf`.
pub fn output_filename(record: &CertificateRecord) -> String {
    format!(
        "{}_{}.pdf",
        first_name_token(&record.name),
        dob_year(record.dob)
    )
}

/// Escape special characters for Typst string literals.
pub fn escape_typst_string(value: &str) -> String {
    value
        .replace('\\', r"\\")
        .replace('"', r#"\""#)
        .replace('\n', r"\n")
}
