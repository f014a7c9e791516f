//! Package worker: one package index page in, one outcome out
//!
//! The worker reads the class table of the index page, fans the class rows
//! out to a bounded pool of class tasks and joins them in row order before
//! anything is written. Each class task returns its result by value; only
//! this task touches the package log and the XML sink.

use crate::crawler::class_worker::{scrape_class, ClassFailure};
use crate::crawler::fetcher::fetch_page;
use crate::extract::{parse_package_index, ClassExtraction, ClassRow};
use crate::model::{ClassRecord, PackageRecord};
use crate::output::{write_package_xml, StatusSender};
use crate::state::PackageOutcome;
use crate::url::resolve_absolute_url;
use crate::HarvestError;
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

/// Everything a package worker shares with its siblings
#[derive(Debug, Clone)]
pub struct PackageContext {
    pub client: Client,
    pub docs_dir: PathBuf,
    pub logs_dir: PathBuf,
    /// Upper bound on concurrent class tasks per package
    pub class_concurrency: usize,
    pub status: StatusSender,
}

/// Append-only failure log of one package, opened on first write
struct PackageLog {
    path: PathBuf,
    file: Option<File>,
}

impl PackageLog {
    /// Removes the previous run's log so lines never accumulate across runs
    async fn fresh(logs_dir: &Path, package: &str) -> std::io::Result<Self> {
        let path = logs_dir.join(format!("{}.log", package));
        match tokio::fs::remove_file(&path).await {
            Ok(()) => tracing::debug!("Removed stale log {}", path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
        Ok(Self { path, file: None })
    }

    async fn line(&mut self, line: impl std::fmt::Display) -> std::io::Result<()> {
        let file = match self.file.take() {
            Some(file) => file,
            None => {
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&self.path)
                    .await?
            }
        };
        let file = self.file.insert(file);
        file.write_all(format!("{}\n", line).as_bytes()).await?;
        file.flush().await
    }
}

/// A class row ready to be fetched
struct ClassJob {
    name: String,
    description: Option<String>,
    url: String,
}

/// Derives the qualified name and absolute page URL of a class row
fn class_job(package: &str, package_url: &str, row: ClassRow) -> ClassJob {
    ClassJob {
        name: format!("{}.{}", package, row.name),
        description: row.description,
        url: resolve_absolute_url(package_url, &row.href),
    }
}

/// Crawls one package
///
/// # Returns
///
/// * `Ok(PackageOutcome)` - The index page was read; the outcome carries the
///   class counts. A status line has already been sent.
/// * `Err(HarvestError)` - The index page could not be fetched, or the
///   package log or record could not be written. No status line was sent;
///   the caller reports the failure.
pub async fn scrape_package(
    ctx: Arc<PackageContext>,
    package: String,
    url: String,
) -> Result<PackageOutcome, HarvestError> {
    tracing::debug!("Fetching package {} from {}", package, url);

    let mut log = PackageLog::fresh(&ctx.logs_dir, &package).await?;
    let body = fetch_page(&ctx.client, &url).await?;
    let index = parse_package_index(&body);

    let Some(rows) = index.rows else {
        tracing::info!("Package {} has no class table", package);
        let outcome = PackageOutcome::empty(&package);
        ctx.status.package(&outcome);
        return Ok(outcome);
    };

    let total = rows.len();
    let pool = Arc::new(Semaphore::new(ctx.class_concurrency.min(total).max(1)));

    // One slot per row, in row order. A row whose name or link could not be
    // read never gets a task.
    let mut slots: Vec<Result<(ClassJob, JoinHandle<_>), String>> = Vec::with_capacity(total);
    for (i, row) in rows.into_iter().enumerate() {
        match row {
            Ok(row) => {
                let job = class_job(&package, &url, row);
                let handle = spawn_class_task(&ctx.client, &pool, &job);
                slots.push(Ok((job, handle)));
            }
            Err(e) => slots.push(Err(format!("row {}:{}", i + 1, e))),
        }
    }

    let mut classes = Vec::with_capacity(total);
    for slot in slots {
        let (job, handle) = match slot {
            Ok(spawned) => spawned,
            Err(line) => {
                tracing::warn!("{}: {}", package, line);
                log.line(line).await?;
                continue;
            }
        };

        let result = match handle.await {
            Ok(result) => result,
            Err(e) => Err(ClassFailure::new(&job.name, format!("class task failed: {}", e))),
        };

        match result {
            Ok(extraction) => {
                for skipped in &extraction.skipped {
                    log.line(format!("{}:{}", job.name, skipped)).await?;
                }
                classes.push(class_record(job, extraction));
            }
            Err(failure) => {
                tracing::warn!("{}", failure);
                log.line(&failure).await?;
            }
        }
    }

    let outcome = PackageOutcome::from_counts(&package, classes.len(), total);

    if outcome.status.has_record() {
        let record = PackageRecord {
            name: package.clone(),
            description: index.description,
            classes,
        };
        let path = write_package_xml(&ctx.docs_dir, &record).await?;
        tracing::debug!(
            "Wrote {} ({} classes, {} methods)",
            path.display(),
            record.classes.len(),
            record.method_count()
        );
    }

    if outcome.status.needs_retry() {
        tracing::debug!("Failures for {} logged to {}", package, log.path.display());
    }

    ctx.status.package(&outcome);
    Ok(outcome)
}

fn spawn_class_task(
    client: &Client,
    pool: &Arc<Semaphore>,
    job: &ClassJob,
) -> JoinHandle<Result<ClassExtraction, ClassFailure>> {
    let client = client.clone();
    let pool = Arc::clone(pool);
    let name = job.name.clone();
    let url = job.url.clone();

    tokio::spawn(async move {
        let _permit = pool
            .acquire_owned()
            .await
            .map_err(|e| ClassFailure::new(&name, e))?;
        scrape_class(&client, &name, &url).await
    })
}

fn class_record(job: ClassJob, extraction: ClassExtraction) -> ClassRecord {
    ClassRecord {
        name: job.name,
        description: job.description,
        methods: extraction.methods,
        inherited: extraction.inherited,
    }
}
