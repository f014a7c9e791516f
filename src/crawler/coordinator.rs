//! Crawler coordinator - main crawl orchestration logic
//!
//! The coordinator owns the run: it picks the packages to crawl, fans them
//! out to package workers under a bounded pool, turns every worker error or
//! panic into a `Failure` outcome, and writes the retry manifest once all
//! packages have settled.

use crate::config::Config;
use crate::crawler::build_http_client;
use crate::crawler::package_worker::{scrape_package, PackageContext};
use crate::manifest::{PackageManifest, RetryManifest};
use crate::output::{prepare_output_dirs, CrawlSummary, StatusPrinter, StatusSender};
use crate::state::PackageOutcome;
use crate::url::package_url;
use crate::{HarvestError, Result};
use reqwest::Client;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Which packages a run covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Every package in the manifest
    Full,
    /// Only the packages listed in the retry manifest
    RetryOnly,
}

/// What a finished run produced
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// One outcome per dispatched package, in manifest order
    pub outcomes: Vec<PackageOutcome>,
    pub summary: CrawlSummary,
    /// The retry manifest that was written
    pub retry: RetryManifest,
}

/// Main crawler coordinator structure
pub struct Coordinator {
    config: Arc<Config>,
    manifest: PackageManifest,
    client: Client,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Errors
    ///
    /// Fails only if the HTTP client cannot be built.
    pub fn new(config: Config, manifest: PackageManifest) -> Result<Self> {
        let client = build_http_client(&config)?;
        Ok(Self {
            config: Arc::new(config),
            manifest,
            client,
        })
    }

    /// Packages the given mode would crawl, in manifest order
    ///
    /// In retry-only mode an absent retry manifest falls back to the full
    /// manifest with a warning.
    pub fn select_packages(&self, mode: RunMode) -> Result<PackageManifest> {
        match mode {
            RunMode::Full => Ok(self.manifest.clone()),
            RunMode::RetryOnly => {
                let retry_path = Path::new(&self.config.output.retry_path);
                match RetryManifest::load(retry_path)? {
                    Some(retry) => {
                        let selected = self.manifest.retain_listed(&retry);
                        tracing::info!(
                            "Retrying {} of {} listed packages",
                            selected.len(),
                            retry.len()
                        );
                        Ok(selected)
                    }
                    None => {
                        tracing::warn!(
                            "No retry manifest at {}; crawling the full manifest",
                            retry_path.display()
                        );
                        Ok(self.manifest.clone())
                    }
                }
            }
        }
    }

    /// Runs the crawl, printing the status table to stdout
    pub async fn run(&self, mode: RunMode) -> Result<CrawlReport> {
        let (report, _) = self.run_with_output(mode, std::io::stdout()).await?;
        Ok(report)
    }

    /// Runs the crawl, printing the status table to `writer`
    ///
    /// The writer is handed back once the status printer has drained.
    pub async fn run_with_output<W>(
        &self,
        mode: RunMode,
        writer: W,
    ) -> Result<(CrawlReport, W)>
    where
        W: Write + Send + 'static,
    {
        let selected = self.select_packages(mode)?;
        prepare_output_dirs(&self.config.output)?;

        tracing::info!(
            "Crawling {} packages ({} at a time)",
            selected.len(),
            self.config.crawler.package_concurrency
        );
        let start_time = std::time::Instant::now();

        let (status, printer) = StatusPrinter::spawn(writer);
        status.header();

        let outcomes = self.crawl_packages(&selected, &status).await;

        let retry = RetryManifest::new(
            outcomes
                .iter()
                .filter(|o| o.status.needs_retry())
                .map(|o| o.package.clone())
                .collect(),
        );
        retry.write(Path::new(&self.config.output.retry_path))?;

        let summary = CrawlSummary::from_outcomes(&outcomes);
        status.tally(summary);
        drop(status);

        let writer = printer
            .await
            .map_err(|e| HarvestError::Io(std::io::Error::other(e.to_string())))?;

        tracing::info!(
            "Crawl finished in {:?}: {}; {} packages to retry",
            start_time.elapsed(),
            summary,
            summary.retry_count()
        );

        Ok((
            CrawlReport {
                outcomes,
                summary,
                retry,
            },
            writer,
        ))
    }

    async fn crawl_packages(
        &self,
        selected: &PackageManifest,
        status: &StatusSender,
    ) -> Vec<PackageOutcome> {
        let ctx = Arc::new(PackageContext {
            client: self.client.clone(),
            docs_dir: PathBuf::from(&self.config.output.docs_dir),
            logs_dir: PathBuf::from(&self.config.output.logs_dir),
            class_concurrency: self.config.crawler.class_concurrency,
            status: status.clone(),
        });
        let pool = Arc::new(Semaphore::new(self.config.crawler.package_concurrency));

        let mut handles = Vec::with_capacity(selected.len());
        for (package, fragment) in selected.iter() {
            let ctx = Arc::clone(&ctx);
            let pool = Arc::clone(&pool);
            let package = package.to_string();
            let url = package_url(&self.config.crawler.base_url, fragment);

            let handle = tokio::spawn(run_package(ctx, pool, package.clone(), url));
            handles.push((package, handle));
        }

        let mut outcomes = Vec::with_capacity(handles.len());
        for (package, handle) in handles {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::error!("Package task for {} did not complete: {}", package, e);
                    let outcome = PackageOutcome::failed(&package, e.to_string());
                    status.package(&outcome);
                    outcome
                }
            };
            outcomes.push(outcome);
        }
        outcomes
    }
}

/// Runs one package worker under the outer pool
///
/// A worker error becomes a `Failure` outcome whose status line is sent from
/// here, as soon as the package settles.
async fn run_package(
    ctx: Arc<PackageContext>,
    pool: Arc<Semaphore>,
    package: String,
    url: String,
) -> PackageOutcome {
    let status = ctx.status.clone();
    let result = match pool.acquire_owned().await {
        Ok(_permit) => scrape_package(ctx, package.clone(), url).await,
        Err(e) => Err(HarvestError::Task {
            package: package.clone(),
            message: e.to_string(),
        }),
    };

    match result {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::warn!("Package {} failed: {}", package, e);
            let outcome = PackageOutcome::failed(&package, e.to_string());
            status.package(&outcome);
            outcome
        }
    }
}

/// Loads the package manifest named by the config and runs the crawl
pub async fn run_crawl(config: Config, mode: RunMode) -> Result<CrawlReport> {
    let manifest = PackageManifest::load(Path::new(&config.output.manifest_path))?;
    let coordinator = Coordinator::new(config, manifest)?;
    coordinator.run(mode).await
}
