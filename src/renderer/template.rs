//! Builds the complete Typst source for a certificate from the preview
//! projection and the static page template.

use std::fs;
use std::path::Path;

use super::common::escape_typst_string;
use super::preview::CertificatePreview;
use super::RenderError;

const TEMPLATE_FILE: &str = "birth_certificate.typ";

/// Get the static assets directory path.
pub fn get_static_dir() -> &'static Path {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/static"))
}

/// The page template plus the splice logic that feeds it a preview.
pub struct CertificateTemplate {
    template: String,
}

impl CertificateTemplate {
    pub fn new() -> Result<Self, RenderError> {
        let path = get_static_dir().join(TEMPLATE_FILE);
        let template = fs::read_to_string(&path).map_err(RenderError::TemplateIo)?;
        Ok(Self { template })
    }

    /// Produce the full Typst source: the template's `birth-certificate`
    /// function followed by a call carrying every preview value, escaped.
    pub fn render(&self, preview: &CertificatePreview) -> String {
        format!(
            r#"{template}
#birth-certificate((
  header: ({header}),
  statute: "{statute}",
  register_line: "{register_line}",
  name: "{name}",
  sex: "{sex}",
  date_of_birth: "{date_of_birth}",
  place_of_birth: "{place_of_birth}",
  mother_name: "{mother_name}",
  father_name: "{father_name}",
  birth_address: ({birth_address}),
  permanent_address: ({permanent_address}),
  registration_no: "{registration_no}",
  registration_date: "{registration_date}",
  remarks: "{remarks}",
  signature: "{signature}",
))
"#,
            template = self.template,
            header = string_array(&preview.header),
            statute = escape_typst_string(&preview.statute),
            register_line = escape_typst_string(&preview.register_line),
            name = escape_typst_string(&preview.name),
            sex = escape_typst_string(&preview.sex),
            date_of_birth = escape_typst_string(&preview.date_of_birth),
            place_of_birth = escape_typst_string(&preview.place_of_birth),
            mother_name = escape_typst_string(&preview.mother_name),
            father_name = escape_typst_string(&preview.father_name),
            birth_address = string_array(&preview.birth_address),
            permanent_address = string_array(&preview.permanent_address),
            registration_no = escape_typst_string(&preview.registration_no),
            registration_date = escape_typst_string(&preview.registration_date),
            remarks = escape_typst_string(&preview.remarks),
            signature = escape_typst_string(&preview.signature),
        )
    }
}

fn string_array(values: &[String]) -> String {
    let quoted: Vec<String> = values
        .iter()
        .map(|v| format!("\"{}\"", escape_typst_string(v)))
        .collect();
    // Trailing comma keeps single-element lists an array in Typst.
    format!("{},", quoted.join(", "))
}
