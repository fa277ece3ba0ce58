//! Calendar dates written as `dd/mm/yyyy` text.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::error::DateError;

static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}/\d{2}/\d{4}$").expect("date pattern is valid"));

/// Returns true if `text` has the shape of a `dd/mm/yyyy` date. The date itself may still be
/// impossible, such as `31/02/2020`.
pub fn is_date_literal(text: &str) -> bool {
    DATE_PATTERN.is_match(text)
}

/// Parses a `dd/mm/yyyy` date.
pub fn to_date(text: &str) -> Result<NaiveDate, DateError> {
    if !is_date_literal(text) {
        return Err(DateError::Invalid(text.to_string()));
    }

    NaiveDate::parse_from_str(text, "%d/%m/%Y").map_err(|_| DateError::Invalid(text.to_string()))
}
