/// Package outcome definitions for summarising how completely a package was crawled
use std::fmt;

/// How completely a package was crawled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageStatus {
    /// Every class on the index page was harvested
    Success,

    /// Some, but not all, classes were harvested
    Partial,

    /// No class was harvested, or the index page itself was unreachable
    Failure,

    /// The index page declares no class table
    Empty,
}

impl PackageStatus {
    /// Label used in the status table
    pub fn label(&self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::Partial => "PARTIAL",
            Self::Failure => "FAILURE",
            Self::Empty => "EMPTY",
        }
    }

    /// Returns true if the package belongs in the retry manifest
    pub fn needs_retry(&self) -> bool {
        matches!(self, Self::Partial | Self::Failure)
    }

    /// Returns true if a package record is serialized for this status
    pub fn has_record(&self) -> bool {
        matches!(self, Self::Success | Self::Partial)
    }

    /// Derives the status from class counts
    ///
    /// Zero classes is `Empty`; otherwise all succeeded is `Success`, none is
    /// `Failure` and anything in between is `Partial`.
    pub fn from_counts(succeeded: usize, total: usize) -> Self {
        if total == 0 {
            Self::Empty
        } else if succeeded == total {
            Self::Success
        } else if succeeded == 0 {
            Self::Failure
        } else {
            Self::Partial
        }
    }
}

impl fmt::Display for PackageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The result of one package worker, consumed uniformly by the coordinator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageOutcome {
    pub package: String,
    pub status: PackageStatus,
    /// `None` when the index page never yielded a class count
    pub succeeded: Option<usize>,
    pub total: Option<usize>,
    /// Why the package failed, when it failed before counting classes
    pub cause: Option<String>,
}

impl PackageOutcome {
    /// Outcome for a package whose class rows were all attempted
    pub fn from_counts(package: impl Into<String>, succeeded: usize, total: usize) -> Self {
        Self {
            package: package.into(),
            status: PackageStatus::from_counts(succeeded, total),
            succeeded: Some(succeeded),
            total: Some(total),
            cause: None,
        }
    }

    /// Outcome for a package with no class table
    pub fn empty(package: impl Into<String>) -> Self {
        Self::from_counts(package, 0, 0)
    }

    /// Outcome for a package whose index page could not be processed
    pub fn failed(package: impl Into<String>, cause: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            status: PackageStatus::Failure,
            succeeded: None,
            total: None,
            cause: Some(cause.into()),
        }
    }
}
