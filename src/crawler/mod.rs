//! Crawler module for package and class page harvesting
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching
//! - The class worker, one class page per task
//! - The package worker, fanning class rows out to a bounded pool
//! - Overall crawl coordination and the retry manifest

mod class_worker;
mod coordinator;
mod fetcher;
mod package_worker;

pub use class_worker::{scrape_class, ClassFailure};
pub use coordinator::{run_crawl, Coordinator, CrawlReport, RunMode};
pub use fetcher::{build_http_client, fetch_page};
pub use package_worker::{scrape_package, PackageContext};

use crate::config::Config;
use crate::HarvestError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Load the package manifest (and the retry manifest in retry-only mode)
/// 2. Build the HTTP client
/// 3. Crawl packages, writing one XML record and one log per package
/// 4. Write the retry manifest and print the tally
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Every selected package settled; see the outcomes
/// * `Err(HarvestError)` - A manifest could not be read or written
pub async fn crawl(config: Config, mode: RunMode) -> Result<CrawlReport, HarvestError> {
    run_crawl(config, mode).await
}
