//! Print spooler collaborator: hands a rendered PDF to the platform print
//! flow. Behind a trait so tests can observe print jobs without a printer.

use std::fs;
use std::process::Command;

use tempfile::tempdir;

use super::PrintError;

const STAGED_FILE: &str = "certificate.pdf";

pub trait PrintSpooler: Send + Sync {
    /// Submit a PDF to the print flow under the given job name.
    fn spool(&self, pdf: &[u8], job_name: &str) -> Result<(), PrintError>;
}

/// CUPS `lp` spooler. The destination printer is optional; without it the
/// system default printer receives the job.
pub struct LpSpooler {
    printer: Option<String>,
}

impl LpSpooler {
    pub fn new(printer: Option<String>) -> Self {
        Self { printer }
    }
}

impl PrintSpooler for LpSpooler {
    fn spool(&self, pdf: &[u8], job_name: &str) -> Result<(), PrintError> {
        let temp_dir = tempdir().map_err(PrintError::Stage)?;
        // Stage under a fixed internal name; the derived job name is only
        // ever passed as the `-t` title, never as a path.
        let pdf_path = temp_dir.path().join(STAGED_FILE);
        fs::write(&pdf_path, pdf).map_err(PrintError::Stage)?;

        let mut command = Command::new("lp");
        if let Some(printer) = &self.printer {
            command.arg("-d").arg(printer);
        }
        command.arg("-t").arg(job_name).arg(&pdf_path);

        let status = command.status().map_err(PrintError::SpoolIo)?;
        if !status.success() {
            let code = status.code().unwrap_or(-1);
            return Err(PrintError::SpoolExit(code));
        }
        Ok(())
    }
}
