//! URL handling for Javadoc-Harvest
//!
//! Package index URLs are built by appending manifest fragments to the base
//! URL; class page URLs are resolved from index-page links.

mod resolve;

pub use resolve::resolve_absolute_url;

/// Builds a package index URL from the documentation root and a manifest path fragment
///
/// This is plain concatenation; the configured base URL always ends with `/`.
pub fn package_url(base_url: &str, fragment: &str) -> String {
    format!("{}{}", base_url, fragment)
}
