//! Package manifest and retry manifest handling
//!
//! The package manifest is a JSON object mapping each package name to the
//! path of its index page below the documentation root. Key order in the
//! file is the crawl order.
//!
//! The retry manifest is a plain text file with one package name per line,
//! rewritten at the end of every run.

use crate::ManifestError;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::path::Path;

/// Ordered mapping of package name to index page path fragment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageManifest {
    entries: Vec<(String, String)>,
}

impl PackageManifest {
    /// Builds a manifest from `(package, path)` pairs, keeping their order
    pub fn new(entries: Vec<(String, String)>) -> Self {
        Self { entries }
    }

    /// Loads a JSON manifest from disk
    ///
    /// # Errors
    ///
    /// Fails if the file is missing or unreadable, is not a JSON object, maps a
    /// package to anything but a string, or lists no packages.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let manifest = Self::from_json(&content).map_err(|e| match e {
            ManifestError::Parse { source, .. } => ManifestError::Parse {
                path: path.display().to_string(),
                source,
            },
            ManifestError::Empty { .. } => ManifestError::Empty {
                path: path.display().to_string(),
            },
            other => other,
        })?;

        tracing::info!(
            "Loaded {} packages from {}",
            manifest.len(),
            path.display()
        );
        Ok(manifest)
    }

    /// Parses a JSON manifest
    pub fn from_json(content: &str) -> Result<Self, ManifestError> {
        let object: Map<String, Value> =
            serde_json::from_str(content).map_err(|source| ManifestError::Parse {
                path: "<inline>".to_string(),
                source,
            })?;

        let mut entries = Vec::with_capacity(object.len());
        for (package, value) in object {
            match value {
                Value::String(fragment) => entries.push((package, fragment)),
                _ => return Err(ManifestError::InvalidEntry { package }),
            }
        }

        if entries.is_empty() {
            return Err(ManifestError::Empty {
                path: "<inline>".to_string(),
            });
        }

        Ok(Self { entries })
    }

    /// Keeps only the packages listed in the retry manifest, in manifest order
    pub fn retain_listed(&self, retry: &RetryManifest) -> Self {
        let listed: HashSet<&str> = retry.packages().iter().map(String::as_str).collect();
        Self {
            entries: self
                .entries
                .iter()
                .filter(|(package, _)| listed.contains(package.as_str()))
                .cloned()
                .collect(),
        }
    }

    /// Iterates over `(package, path fragment)` pairs in crawl order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(package, fragment)| (package.as_str(), fragment.as_str()))
    }

    /// Package names in crawl order
    pub fn packages(&self) -> Vec<&str> {
        self.entries.iter().map(|(package, _)| package.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Packages whose previous run was incomplete
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetryManifest {
    packages: Vec<String>,
}

impl RetryManifest {
    pub fn new(packages: Vec<String>) -> Self {
        Self { packages }
    }

    /// Reads the retry manifest
    ///
    /// # Returns
    ///
    /// * `Ok(Some(RetryManifest))` - The file exists; blank lines are ignored
    /// * `Ok(None)` - No retry manifest has been written yet
    /// * `Err(ManifestError)` - The file exists but could not be read
    pub fn load(path: &Path) -> Result<Option<Self>, ManifestError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ManifestError::Read {
                    path: path.display().to_string(),
                    source,
                })
            }
        };

        let packages = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Some(Self { packages }))
    }

    /// Writes the manifest, one package per line, replacing any previous file
    pub fn write(&self, path: &Path) -> Result<(), ManifestError> {
        let mut content = String::new();
        for package in &self.packages {
            content.push_str(package);
            content.push('\n');
        }

        std::fs::write(path, content).map_err(|source| ManifestError::Write {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn packages(&self) -> &[String] {
        &self.packages
    }

    pub fn contains(&self, package: &str) -> bool {
        self.packages.iter().any(|p| p == package)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}
