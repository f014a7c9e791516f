//! Class worker: one class page in, one set of records (or a failure) out

use crate::crawler::fetcher::fetch_page;
use crate::extract::{extract_class, ClassExtraction};
use reqwest::Client;
use std::fmt;

/// A class that could not be harvested, tagged with its name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassFailure {
    /// Fully qualified class name, or a row label when no name could be read
    pub class_name: String,
    pub error: String,
}

impl ClassFailure {
    pub fn new(class_name: impl Into<String>, error: impl fmt::Display) -> Self {
        Self {
            class_name: class_name.into(),
            error: error.to_string(),
        }
    }
}

/// Package log line format: `<classname>:<error>`
impl fmt::Display for ClassFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.class_name, self.error)
    }
}

/// Fetches one class page and extracts its records
///
/// Every failure is caught here and returned as a `ClassFailure`; nothing
/// propagates to sibling class tasks.
pub async fn scrape_class(
    client: &Client,
    class_name: &str,
    url: &str,
) -> Result<ClassExtraction, ClassFailure> {
    tracing::debug!("Fetching class {} from {}", class_name, url);

    let body = fetch_page(client, url)
        .await
        .map_err(|e| ClassFailure::new(class_name, e))?;

    let extraction = extract_class(&body, class_name);

    tracing::debug!(
        "Class {}: {} members, {} inherited groups, {} rows skipped",
        class_name,
        extraction.methods.len(),
        extraction.inherited.len(),
        extraction.skipped.len()
    );

    Ok(extraction)
}
