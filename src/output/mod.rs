//! Output module for crawl artifacts
//!
//! This module handles:
//! - Serializing finished package records to XML
//! - The console status table, fed through a channel
//! - End-of-run tallies
//! - Removing previous artifacts for `--clean`

pub mod stats;
pub mod status;
pub mod xml;

pub use stats::CrawlSummary;
pub use status::{header_line, StatusEvent, StatusLine, StatusPrinter, StatusSender};
pub use xml::{
    parse_package_xml, read_package_xml, render_package_xml, write_package_xml, PackageDocument,
};

use crate::config::OutputConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors writing or reading crawl artifacts
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Write error: {0}")]
    Write(String),

    #[error("Format error: {0}")]
    Format(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for output operations
pub type OutputResult<T> = std::result::Result<T, OutputError>;

/// Creates the docs and logs directories if they do not exist
pub fn prepare_output_dirs(output: &OutputConfig) -> OutputResult<()> {
    for dir in [&output.docs_dir, &output.logs_dir] {
        std::fs::create_dir_all(dir)
            .map_err(|e| OutputError::Write(format!("cannot create {}: {}", dir, e)))?;
    }
    Ok(())
}

/// Removes the retry manifest and the docs and logs directories
///
/// Missing artifacts are skipped. The package manifest is never touched.
///
/// # Returns
///
/// The paths that were actually removed.
pub fn remove_artifacts(output: &OutputConfig) -> OutputResult<Vec<PathBuf>> {
    let mut removed = Vec::new();

    let retry = Path::new(&output.retry_path);
    if retry.is_file() {
        std::fs::remove_file(retry)?;
        removed.push(retry.to_path_buf());
    }

    for dir in [&output.docs_dir, &output.logs_dir] {
        let dir = Path::new(dir);
        if dir.is_dir() {
            std::fs::remove_dir_all(dir)?;
            removed.push(dir.to_path_buf());
        }
    }

    for path in &removed {
        tracing::info!("Removed {}", path.display());
    }
    Ok(removed)
}
