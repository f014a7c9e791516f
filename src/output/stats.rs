//! Crawl tally
//!
//! Aggregates package outcomes into the counts printed at the end of a run.

use crate::state::{PackageOutcome, PackageStatus};
use std::fmt;

/// Summary statistics for a crawl
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlSummary {
    /// Packages dispatched
    pub total: usize,

    /// Packages where every class was harvested
    pub complete: usize,

    /// Packages where some classes failed
    pub incomplete: usize,

    /// Packages where nothing was harvested or the index page failed
    pub failed: usize,

    /// Packages without a class table
    pub empty: usize,
}

impl CrawlSummary {
    /// Creates a new empty crawl summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Tallies a set of package outcomes
    pub fn from_outcomes<'a>(outcomes: impl IntoIterator<Item = &'a PackageOutcome>) -> Self {
        let mut summary = Self::new();
        for outcome in outcomes {
            summary.record(outcome.status);
        }
        summary
    }

    /// Counts one more package
    pub fn record(&mut self, status: PackageStatus) {
        self.total += 1;
        match status {
            PackageStatus::Success => self.complete += 1,
            PackageStatus::Partial => self.incomplete += 1,
            PackageStatus::Failure => self.failed += 1,
            PackageStatus::Empty => self.empty += 1,
        }
    }

    /// Packages that belong in the retry manifest
    pub fn retry_count(&self) -> usize {
        self.incomplete + self.failed
    }
}

impl fmt::Display for CrawlSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "total: {}, complete: {}, incomplete: {}, failed: {}, empty: {}",
            self.total, self.complete, self.incomplete, self.failed, self.empty
        )
    }
}
