//! Typst rendering engine.
//!
//! Handles the low-level details of writing Typst source to a temporary
//! directory, invoking the compiler, and reading back the output PDF.

use std::fs;
use std::process::Command;

use tempfile::tempdir;

use super::{RenderError, RenderedCertificate};

const SOURCE_FILE: &str = "birth_certificate.typ";

/// Stateless engine for rendering Typst source to a single-page A4 PDF.
/// Text stays vector in the PDF, so the output matches the preview at any
/// print resolution.
pub struct TypstRenderEngine;

impl TypstRenderEngine {
    /// Render a complete Typst source string to a PDF document.
    ///
    /// # Arguments
    /// * `typst_source` - The complete, rendered Typst source code string.
    /// * `filename` - The artifact name handed back to the caller.
    pub fn render(typst_source: &str, filename: &str) -> Result<RenderedCertificate, RenderError> {
        let temp_dir = tempdir().map_err(RenderError::TempDir)?;
        let source_path = temp_dir.path().join(SOURCE_FILE);
        fs::write(&source_path, typst_source).map_err(RenderError::WriteSource)?;

        let output_path = temp_dir.path().join("output.pdf");

        let status = Command::new("typst")
            .arg("compile")
            .arg(&source_path)
            .arg(&output_path)
            .current_dir(temp_dir.path())
            .status()
            .map_err(RenderError::CompileIo)?;

        if !status.success() {
            let code = status.code().unwrap_or(-1);
            return Err(RenderError::CompileExit(code));
        }

        let pdf = fs::read(&output_path).map_err(RenderError::ReadPdf)?;

        Ok(RenderedCertificate {
            filename: filename.to_string(),
            pdf,
        })
    }
}
