//! Environment-driven configuration, loaded once at startup after
//! `dotenvy::dotenv()`.

use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP server binds to.
    pub bind_addr: String,
    /// Directory holding the draft slot file.
    pub draft_dir: PathBuf,
    /// Optional `lp -d` destination; the system default printer otherwise.
    pub printer: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            draft_dir: env::var("DRAFT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./drafts")),
            printer: env::var("PRINTER").ok().filter(|p| !p.is_empty()),
        }
    }
}
