//! Record extraction from a class documentation page
//!
//! Reads the "Methods" and "Constructors" summary tables and the
//! "methods inherited from" blocks. A row that cannot be read is dropped and
//! reported in [`ClassExtraction::skipped`]; it never fails the whole class.

use crate::extract::selectors::{
    CAPTION_SPAN, CODE, DIV, FIRST_CELL, INHERITED_ANCHOR, LAST_CELL, MEMBER_NAME_LINK,
    NAMED_ANCHOR, ONE_CELL, TABLE_ROW,
};
use crate::extract::signature::{extract_signature, flatten_cell, split_type_tokens};
use crate::model::MethodRecord;
use crate::{ExtractError, ExtractResult};
use scraper::{ElementRef, Html};
use indexmap::IndexMap;
use std::fmt;

/// Marker that excludes a member from the record
const DEPRECATED_MARKER: &str = "Deprecated";

/// Modifiers of members that are not part of the public API
const HIDDEN_MODIFIERS: &[&str] = &["private", "protected", "abstract"];

/// Which part of the class page a skipped row came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Method,
    Constructor,
    Inherited,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Method => write!(f, "method"),
            Self::Constructor => write!(f, "constructor"),
            Self::Inherited => write!(f, "inherited"),
        }
    }
}

/// A row that was dropped because it could not be read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    pub section: Section,
    /// 1-based data row index within its table
    pub row: usize,
    pub error: ExtractError,
}

impl fmt::Display for SkippedRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} row {}: {}", self.section, self.row, self.error)
    }
}

/// Everything read from one class page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassExtraction {
    /// Methods in table order, followed by constructors in table order
    pub methods: Vec<MethodRecord>,
    /// Ancestor class name -> inherited method names
    pub inherited: IndexMap<String, Vec<String>>,
    pub skipped: Vec<SkippedRow>,
}

/// Extracts method and constructor records from a class page
///
/// # Arguments
///
/// * `html` - The class page markup
/// * `class_name` - Fully qualified class name; recorded as the owner of every
///   member and used as the name and return type of constructors
pub fn extract_class(html: &str, class_name: &str) -> ClassExtraction {
    let document = Html::parse_document(html);
    let mut extraction = ClassExtraction::default();

    if let Some(table) = summary_table(&document, "Methods") {
        for (index, row) in data_rows(table).enumerate() {
            match method_record(row, class_name) {
                Ok(Some(record)) => extraction.methods.push(record),
                Ok(None) => {}
                Err(error) => extraction.skipped.push(SkippedRow {
                    section: Section::Method,
                    row: index + 1,
                    error,
                }),
            }
        }
    }

    if let Some(table) = summary_table(&document, "Constructors") {
        for (index, row) in data_rows(table).enumerate() {
            match constructor_record(row, class_name) {
                Ok(Some(record)) => extraction.methods.push(record),
                Ok(None) => {}
                Err(error) => extraction.skipped.push(SkippedRow {
                    section: Section::Constructor,
                    row: index + 1,
                    error,
                }),
            }
        }
    }

    let mut inherited_row = 0;
    for anchor in document.select(&NAMED_ANCHOR) {
        let Some(ancestor) = anchor
            .value()
            .attr("name")
            .and_then(|name| INHERITED_ANCHOR.captures(name))
            .and_then(|captures| captures.get(1))
            .map(|m| m.as_str().to_string())
        else {
            continue;
        };
        inherited_row += 1;

        match inherited_methods(anchor) {
            Ok(names) => {
                extraction.inherited.insert(ancestor, names);
            }
            Err(error) => extraction.skipped.push(SkippedRow {
                section: Section::Inherited,
                row: inherited_row,
                error,
            }),
        }
    }

    tracing::trace!(
        class = class_name,
        members = extraction.methods.len(),
        skipped = extraction.skipped.len(),
        "Extracted class page"
    );

    extraction
}

/// Finds the table whose caption reads exactly `caption`
pub(crate) fn summary_table<'a>(document: &'a Html, caption: &str) -> Option<ElementRef<'a>> {
    document
        .select(&CAPTION_SPAN)
        .find(|span| collapse_text(*span) == caption)
        .and_then(|span| {
            span.ancestors()
                .filter_map(ElementRef::wrap)
                .find(|element| element.value().name() == "table")
        })
}

/// Table rows after the header row
pub(crate) fn data_rows(table: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    table.select(&TABLE_ROW).skip(1)
}

/// Visible text with runs of whitespace collapsed to one space
pub(crate) fn collapse_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Description block of a member cell
enum MemberDescription {
    Deprecated,
    Current(Option<String>),
}

fn member_description(cell: ElementRef<'_>) -> MemberDescription {
    let Some(block) = cell.select(&DIV).next() else {
        return MemberDescription::Current(None);
    };

    let description = collapse_text(block);
    if description.contains(DEPRECATED_MARKER) {
        MemberDescription::Deprecated
    } else if description.is_empty() {
        MemberDescription::Current(None)
    } else {
        MemberDescription::Current(Some(description))
    }
}

/// The cell holding the member link and rendered signature
fn signature_cell(row: ElementRef<'_>) -> Option<ElementRef<'_>> {
    row.select(&LAST_CELL)
        .next()
        .or_else(|| row.select(&ONE_CELL).next())
}

fn method_record(row: ElementRef<'_>, class_name: &str) -> ExtractResult<Option<MethodRecord>> {
    let cell = row
        .select(&LAST_CELL)
        .next()
        .ok_or(ExtractError::MissingElement("description cell"))?;

    let MemberDescription::Current(description) = member_description(cell) else {
        return Ok(None);
    };

    let name = cell
        .select(&MEMBER_NAME_LINK)
        .next()
        .map(collapse_text)
        .ok_or(ExtractError::MissingElement("member name link"))?;
    if name.is_empty() {
        return Err(ExtractError::EmptyField("member name"));
    }

    let Some(return_type) = declared_return_type(row)? else {
        return Ok(None);
    };

    let parameters = extract_signature(&flatten_cell(cell))?.unwrap_or_default();

    Ok(Some(MethodRecord {
        name,
        description,
        parameters,
        return_type,
        class_name: class_name.to_string(),
    }))
}

/// Reads the declared return type from the first column
///
/// # Returns
///
/// * `Ok(None)` - The member carries a hidden modifier and gets no record
/// * `Ok(Some(None))` - The member returns `void`
/// * `Ok(Some(Some(type)))` - The declared return type
fn declared_return_type(row: ElementRef<'_>) -> ExtractResult<Option<Option<String>>> {
    let cell = row
        .select(&FIRST_CELL)
        .next()
        .ok_or(ExtractError::MissingElement("modifier and type cell"))?;

    let tokens = split_type_tokens(&cell.text().collect::<String>());
    if tokens
        .iter()
        .any(|token| HIDDEN_MODIFIERS.contains(&token.as_str()))
    {
        return Ok(None);
    }

    let declared = tokens
        .last()
        .ok_or(ExtractError::EmptyField("modifier and type cell"))?;

    Ok(Some(if declared == "void" {
        None
    } else {
        Some(declared.clone())
    }))
}

fn constructor_record(
    row: ElementRef<'_>,
    class_name: &str,
) -> ExtractResult<Option<MethodRecord>> {
    // One-column layout first; the two-column layout carries modifiers in
    // the first column and the description in the last.
    let cell = match row.select(&ONE_CELL).next() {
        Some(cell) => cell,
        None => {
            let modifiers = row
                .select(&FIRST_CELL)
                .next()
                .ok_or(ExtractError::MissingElement("constructor cell"))?;
            let text = modifiers.text().collect::<String>();
            if text.contains("protected") || text.contains("private") {
                return Ok(None);
            }
            row.select(&LAST_CELL)
                .next()
                .ok_or(ExtractError::MissingElement("description cell"))?
        }
    };

    let MemberDescription::Current(description) = member_description(cell) else {
        return Ok(None);
    };

    let parameters = match signature_cell(row) {
        Some(signature) => extract_signature(&flatten_cell(signature))?.unwrap_or_default(),
        None => Vec::new(),
    };

    Ok(Some(MethodRecord {
        name: class_name.to_string(),
        description,
        parameters,
        return_type: Some(class_name.to_string()),
        class_name: class_name.to_string(),
    }))
}

/// Reads the comma-separated method list next to an inherited-methods anchor
fn inherited_methods(anchor: ElementRef<'_>) -> ExtractResult<Vec<String>> {
    let block = anchor
        .parent()
        .and_then(ElementRef::wrap)
        .ok_or(ExtractError::MissingElement("inherited methods block"))?;
    let code = block
        .select(&CODE)
        .next()
        .ok_or(ExtractError::MissingElement("inherited methods list"))?;

    Ok(code
        .text()
        .collect::<String>()
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect())
}
