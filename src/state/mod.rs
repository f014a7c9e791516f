//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `PackageStatus`: Success / Partial / Failure / Empty
//! - `PackageOutcome`: a status together with class counts and an optional cause

mod package_outcome;

// Re-export main types
pub use package_outcome::{PackageOutcome, PackageStatus};
