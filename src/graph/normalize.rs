//! Literal normalization
//!
//! - Year columns are widened to a full date (`1995` -> `1995-01-01`)
//! - Typed literals are written as `"value"^^<datatype>`
//! - Multi-valued columns are expanded from bracketed list syntax

use std::fmt;

/// Month-day suffix appended to bare years
pub const YEAR_SUFFIX: &str = "-01-01";

/// Expand a bare year to a date. No other date formats are recognized.
pub fn normalize_year(year: &str) -> String {
    format!("{year}{YEAR_SUFFIX}")
}

/// Wrap `value` as a typed literal when a datatype URI is given
pub fn add_datatype(value: &str, datatype_uri: Option<&str>) -> String {
    match datatype_uri {
        Some(uri) => format!("\"{value}\"^^<{uri}>"),
        None => value.to_string(),
    }
}

/// A bracketed list that could not be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListParseError {
    pub raw: String,
    pub reason: &'static str,
}

impl fmt::Display for ListParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot parse list '{}': {}", self.raw, self.reason)
    }
}

impl std::error::Error for ListParseError {}

/// Expand a possibly multi-valued field
///
/// Only bracketed text is treated as a list. Unbracketed text is one value
/// even if it contains commas, because free-text columns do.
pub fn expand_values(raw: &str, multiple_possible: bool) -> Result<Vec<String>, ListParseError> {
    if multiple_possible && raw.starts_with('[') {
        parse_list(raw)
    } else {
        Ok(vec![raw.to_string()])
    }
}

/// Parse `[a, 'b', "c"]` into its entries
///
/// Entries may be single- or double-quoted (with backslash escapes) or
/// bare. Bare entries are trimmed; empty bare entries are dropped so that
/// `[]` and a trailing comma both behave.
fn parse_list(raw: &str) -> Result<Vec<String>, ListParseError> {
    let err = |reason| ListParseError {
        raw: raw.to_string(),
        reason,
    };

    let inner = raw
        .trim_end()
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(|| err("missing closing bracket"))?;

    let mut values = Vec::new();
    let mut chars = inner.chars().peekable();

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}

        let Some(&c) = chars.peek() else { break };

        if c == '\'' || c == '"' {
            let quote = c;
            chars.next();
            let mut value = String::new();
            loop {
                match chars.next() {
                    Some('\\') => match chars.next() {
                        Some(escaped) => value.push(escaped),
                        None => return Err(err("dangling escape")),
                    },
                    Some(ch) if ch == quote => break,
                    Some(ch) => value.push(ch),
                    None => return Err(err("unterminated quote")),
                }
            }
            values.push(value);

            while chars.next_if(|c| c.is_whitespace()).is_some() {}
            match chars.next() {
                Some(',') | None => {}
                Some(_) => return Err(err("unexpected text after quoted entry")),
            }
        } else {
            let mut value = String::new();
            while let Some(ch) = chars.next_if(|&ch| ch != ',') {
                value.push(ch);
            }
            chars.next();
            let value = value.trim();
            if !value.is_empty() {
                values.push(value.to_string());
            }
        }
    }

    Ok(values)
}
