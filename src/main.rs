//! Javadoc-Harvest main entry point
//!
//! This is the command-line interface for the Javadoc-Harvest API documentation harvester.

use anyhow::Context;
use clap::Parser;
use javadoc_harvest::config::{load_config_with_hash, Config};
use javadoc_harvest::crawler::{crawl, Coordinator, RunMode};
use javadoc_harvest::output::remove_artifacts;
use javadoc_harvest::PackageManifest;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Javadoc-Harvest: a package-by-package API documentation harvester
///
/// Javadoc-Harvest walks every package listed in the package manifest, reads
/// each class page it links to, and writes the public constructors and
/// methods of the package to one XML file. Packages that were not fully
/// harvested are listed in the retry manifest for the next run.
#[derive(Parser, Debug)]
#[command(name = "javadoc-harvest")]
#[command(version = "1.0.0")]
#[command(about = "A package-by-package API documentation harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Only crawl the packages listed in the retry manifest
    #[arg(long, conflicts_with_all = ["dry_run", "clean"])]
    retry_only: bool,

    /// Validate config and manifest and show what would be crawled
    #[arg(long, conflicts_with = "clean")]
    dry_run: bool,

    /// Remove the retry manifest and the docs and logs directories, then exit
    #[arg(long)]
    clean: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            Config::default()
        }
    };

    let mode = if cli.retry_only {
        RunMode::RetryOnly
    } else {
        RunMode::Full
    };

    if cli.clean {
        handle_clean(&config)
    } else if cli.dry_run {
        handle_dry_run(config, mode)
    } else {
        handle_crawl(config, mode).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr; stdout carries the status table.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("javadoc_harvest=info,warn"),
            1 => EnvFilter::new("javadoc_harvest=debug,info"),
            2 => EnvFilter::new("javadoc_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and manifest and lists the packages
fn handle_dry_run(config: Config, mode: RunMode) -> anyhow::Result<()> {
    println!("=== Javadoc-Harvest Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Base URL: {}", config.crawler.base_url);
    println!(
        "  Package concurrency: {}",
        config.crawler.package_concurrency
    );
    println!("  Class concurrency: {}", config.crawler.class_concurrency);
    println!("  Request timeout: {}s", config.crawler.request_timeout);

    println!("\nUser Agent: {}", config.user_agent.header_value());

    println!("\nOutput:");
    println!("  Manifest: {}", config.output.manifest_path);
    println!("  Retry manifest: {}", config.output.retry_path);
    println!("  Docs: {}", config.output.docs_dir);
    println!("  Logs: {}", config.output.logs_dir);

    let manifest = PackageManifest::load(Path::new(&config.output.manifest_path))?;
    let coordinator = Coordinator::new(config, manifest)?;
    let selected = coordinator.select_packages(mode)?;

    println!("\nPackages ({}):", selected.len());
    for (package, fragment) in selected.iter() {
        println!("  - {} ({})", package, fragment);
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would crawl {} packages", selected.len());

    Ok(())
}

/// Handles the --clean mode: removes the artifacts of previous runs
fn handle_clean(config: &Config) -> anyhow::Result<()> {
    let removed = remove_artifacts(&config.output)?;

    if removed.is_empty() {
        println!("Nothing to clean");
    }
    for path in removed {
        println!("Removed {}", path.display());
    }

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config, mode: RunMode) -> anyhow::Result<()> {
    match mode {
        RunMode::Full => tracing::info!("Starting full crawl"),
        RunMode::RetryOnly => tracing::info!("Starting retry crawl"),
    }

    match crawl(config, mode).await {
        Ok(report) => {
            tracing::info!(
                "Crawl completed: {} packages, {} to retry",
                report.summary.total,
                report.retry.len()
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
