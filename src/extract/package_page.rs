//! Package index page parsing
//!
//! The index page carries the package description and a "Class Summary"
//! table whose rows link to the class pages.

use crate::extract::class_page::{collapse_text, data_rows, summary_table};
use crate::extract::selectors::{BLOCK, DOC_SUMMARY_BLOCK, FIRST_CELL, LINK};
use crate::{ExtractError, ExtractResult};
use scraper::{ElementRef, Html};

/// One row of the class summary table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassRow {
    /// Simple class name as linked from the index page
    pub name: String,
    /// Link to the class page, relative to the index page
    pub href: String,
    pub description: Option<String>,
}

/// What the package index page declares
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageIndex {
    pub description: Option<String>,
    /// `None` when the page has no class summary table
    pub rows: Option<Vec<ExtractResult<ClassRow>>>,
}

/// Parses a package index page
///
/// Rows are returned in page order. A row that cannot be read keeps its slot
/// as an error so row positions stay stable.
pub fn parse_package_index(html: &str) -> PackageIndex {
    let document = Html::parse_document(html);

    let description = document
        .select(&DOC_SUMMARY_BLOCK)
        .next()
        .map(collapse_text)
        .filter(|text| !text.is_empty());

    let rows = summary_table(&document, "Class Summary")
        .map(|table| data_rows(table).map(class_row).collect());

    PackageIndex { description, rows }
}

fn class_row(row: ElementRef<'_>) -> ExtractResult<ClassRow> {
    let link = row
        .select(&FIRST_CELL)
        .next()
        .and_then(|cell| cell.select(&LINK).next())
        .ok_or(ExtractError::MissingElement("class link"))?;

    let name = collapse_text(link);
    if name.is_empty() {
        return Err(ExtractError::EmptyField("class name"));
    }

    let href = link
        .value()
        .attr("href")
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .ok_or(ExtractError::MissingElement("class link target"))?
        .to_string();

    let description = row
        .select(&BLOCK)
        .next()
        .map(collapse_text)
        .filter(|text| !text.is_empty());

    Ok(ClassRow {
        name,
        href,
        description,
    })
}
