//! Renderer: the read-only preview projection of the record and the output
//! pipeline that turns it into a single-page A4 PDF for export or for the
//! platform print spooler. Both outputs come from the same projection; there
//! is no separate print template.

pub mod common;
pub mod engine;
pub mod handlers;
pub mod preview;
pub mod print;
pub mod template;

pub use engine::TypstRenderEngine;
pub use preview::CertificatePreview;
pub use print::{LpSpooler, PrintSpooler};
pub use template::CertificateTemplate;

use thiserror::Error;

/// Errors from the PDF rendering pipeline.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to load certificate template: {0}")]
    TemplateIo(#[source] std::io::Error),
    #[error("failed to create temporary directory: {0}")]
    TempDir(#[source] std::io::Error),
    #[error("failed to write Typst source: {0}")]
    WriteSource(#[source] std::io::Error),
    #[error("Typst CLI execution failed: {0}")]
    CompileIo(#[source] std::io::Error),
    #[error("Typst CLI exited with status {0}")]
    CompileExit(i32),
    #[error("failed to read generated PDF: {0}")]
    ReadPdf(#[source] std::io::Error),
}

/// Errors from handing a rendered PDF to the print spooler.
#[derive(Debug, Error)]
pub enum PrintError {
    #[error("failed to stage PDF for printing: {0}")]
    Stage(#[source] std::io::Error),
    #[error("print spooler execution failed: {0}")]
    SpoolIo(#[source] std::io::Error),
    #[error("print spooler exited with status {0}")]
    SpoolExit(i32),
}

/// A successfully rendered certificate.
#[derive(Debug)]
pub struct RenderedCertificate {
    pub filename: String,
    pub pdf: Vec<u8>,
}
