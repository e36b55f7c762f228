//! Reference identifiers of the form `<prefix><digits>` (e.g. `A007`).

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::config::RefgridConfig;
use crate::error::{RefgridError, Result};
use crate::table::{Row, Table};

static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").unwrap());

/// Increment the numeric part of a reference, keeping its zero padding.
///
/// `A007` -> `A008`, `A999` -> `A1000`. The first character is the prefix;
/// everything after it must be ASCII digits.
pub fn increment_reference_str(reference: &str) -> Result<String> {
    let mut chars = reference.chars();
    let prefix = chars
        .next()
        .ok_or_else(|| RefgridError::InvalidReference(reference.to_string()))?;
    let digits = chars.as_str();
    if !DIGITS.is_match(digits) {
        return Err(RefgridError::InvalidReference(reference.to_string()));
    }

    let mut incremented: Vec<u8> = digits.bytes().collect();
    let mut carry = true;
    for digit in incremented.iter_mut().rev() {
        if *digit == b'9' {
            *digit = b'0';
        } else {
            *digit += 1;
            carry = false;
            break;
        }
    }
    if carry {
        incremented.insert(0, b'1');
    }

    // Only ASCII digits were written.
    let incremented = String::from_utf8(incremented)
        .map_err(|_| RefgridError::InvalidReference(reference.to_string()))?;
    Ok(format!("{prefix}{incremented}"))
}

/// Lexicographically largest string value of `column`, or `""`.
///
/// Non-string values are ignored.
pub fn max_string_value<'a>(column: &str, rows: impl IntoIterator<Item = &'a Row>) -> String {
    rows.into_iter()
        .filter_map(|row| match row.get(column) {
            Some(Value::String(s)) => Some(s.as_str()),
            _ => None,
        })
        .fold("", |max, value| if value > max { value } else { max })
        .to_string()
}

/// The reference that follows the largest one in `table`.
pub fn next_reference(table: &Table, config: &RefgridConfig) -> Result<String> {
    let max = max_string_value(&config.reference_column, &table.data);
    increment_reference_str(&max)
}
