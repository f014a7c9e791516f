//! Extraction of structured records from documentation markup
//!
//! This module contains the pure parsing layer:
//! - Package index pages: description and class rows
//! - Class pages: methods, constructors and inherited-method groups
//! - Member cells: parameter name/type pairs

mod class_page;
mod package_page;
mod selectors;
mod signature;

pub use class_page::{extract_class, ClassExtraction, Section, SkippedRow};
pub use package_page::{parse_package_index, ClassRow, PackageIndex};
pub use signature::{extract_signature, flatten_cell, tokenize_signature, SignatureTokens};
