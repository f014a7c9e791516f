//! Parameter extraction from a member summary cell
//!
//! A Javadoc member cell spells the parameter list twice: once as the anchor
//! of the member link (`Dialog.html#Dialog(java.awt.Frame,%20java.lang.String)`),
//! which carries the fully qualified types, and once as rendered text
//! (`(Frame owner, String title)`), which alternates type and name tokens.
//!
//! Extraction runs in two phases. [`tokenize_signature`] is tolerant: it finds
//! both spellings and splits them into tokens, returning `None` when the cell
//! has no parameter list at all. [`SignatureTokens::pair`] is strict: it
//! refuses to pair lists whose lengths disagree.

use crate::extract::selectors::{CODE, DUAL_SIGNATURE};
use crate::model::{Parameter, Parameters};
use crate::{ExtractError, ExtractResult};
use scraper::{ElementRef, Html};

/// Both spellings of a parameter list, split into tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureTokens {
    /// Types from the link target, in declaration order
    pub types: Vec<String>,
    /// Rendered tokens, alternating type and name
    pub words: Vec<String>,
}

impl SignatureTokens {
    /// Pairs every rendered name with the linked type at the same position
    ///
    /// # Errors
    ///
    /// `ExtractError::ParameterMismatch` unless there are exactly two rendered
    /// tokens (type, name) per linked type.
    pub fn pair(self) -> ExtractResult<Parameters> {
        if self.words.len() != 2 * self.types.len() {
            return Err(ExtractError::ParameterMismatch {
                tokens: self.words.len(),
                types: self.types.len(),
            });
        }

        Ok(self
            .words
            .into_iter()
            .skip(1)
            .step_by(2)
            .zip(self.types)
            .map(|(name, type_name)| Parameter { name, type_name })
            .collect())
    }
}

/// Splits a flattened member cell into its two parameter spellings
///
/// Returns `None` when the cell does not contain two parenthesised groups,
/// which is how a member without parameters looks.
pub fn tokenize_signature(flat: &str) -> Option<SignatureTokens> {
    let captures = DUAL_SIGNATURE.captures(flat)?;
    let linked = captures.get(1)?.as_str();
    let rendered = captures.get(2)?.as_str();

    let types = linked
        .replace("%20", " ")
        .split_whitespace()
        .map(trim_separators)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();

    let words = split_type_tokens(&rendered_text(rendered))
        .iter()
        .map(|w| trim_separators(w))
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect();

    Some(SignatureTokens { types, words })
}

/// Extracts the ordered parameters of a member cell
///
/// # Returns
///
/// * `Ok(Some(params))` - The member declares parameters
/// * `Ok(None)` - The member takes no parameters
/// * `Err(ExtractError)` - Both spellings were found but disagree
pub fn extract_signature(flat: &str) -> ExtractResult<Option<Parameters>> {
    match tokenize_signature(flat) {
        Some(tokens) => {
            let params = tokens.pair()?;
            Ok(if params.is_empty() { None } else { Some(params) })
        }
        None => Ok(None),
    }
}

/// Flattens a member cell to the markup its signature is read from
///
/// The cell's `<code>` block holds the signature; the description block that
/// follows it is left out so prose in parentheses cannot be mistaken for a
/// parameter list.
pub fn flatten_cell(cell: ElementRef<'_>) -> String {
    let markup = match cell.select(&CODE).next() {
        Some(code) => code.inner_html(),
        None => cell.inner_html(),
    };
    markup.replace(['\n', '\r'], " ")
}

/// Splits type text on whitespace, keeping generic arguments in one token
///
/// `Map<K, V> map` yields `["Map<K, V>", "map"]`.
pub(crate) fn split_type_tokens(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut pending = String::new();
    let mut depth: isize = 0;

    for piece in text.split_whitespace() {
        if !pending.is_empty() {
            pending.push(' ');
        }
        pending.push_str(piece);
        depth += piece.matches('<').count() as isize - piece.matches('>').count() as isize;

        if depth <= 0 {
            tokens.push(std::mem::take(&mut pending));
            depth = 0;
        }
    }

    if !pending.is_empty() {
        tokens.push(pending);
    }
    tokens
}

/// Visible text of a markup fragment, entities decoded
fn rendered_text(fragment: &str) -> String {
    Html::parse_fragment(fragment)
        .root_element()
        .text()
        .collect()
}

fn trim_separators(token: &str) -> &str {
    token.trim_matches(',').trim()
}
