//! Pure input validators. Each function turns one raw input line into a typed
//! value or a [`ParseError`] whose message is shown before re-prompting. No
//! I/O happens here; the prompt loops live in the menu module.

use chrono::NaiveDate;
use regex::Regex;
use std::ops::RangeInclusive;
use std::sync::LazyLock;
use thiserror::Error;

use crate::db::DATE_FORMAT;

static AMOUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]*\.?[0-9]*$").unwrap());
static DESCRIPTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z\s]*$").unwrap());
static DATE_SHAPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}-\d{2}-\d{4}$").unwrap());

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("You have entered an invalid input!")]
    InvalidMenuChoice,

    #[error("Invalid amount! Please enter a valid amount")]
    InvalidAmount,

    #[error("Invalid description! Only letters and spaces are allowed")]
    InvalidDescription,

    #[error("Invalid date format! Please enter date in the format of 'DD-MM-YYYY'")]
    InvalidDate,

    #[error("Invalid input. Enter 'y' or 'n'")]
    InvalidYesNo,
}

/// Valid iff `raw` is all ASCII digits and its value falls inside `range`.
/// Leading zeros are accepted ("07" selects option 7).
pub fn parse_menu_choice(raw: &str, range: RangeInclusive<usize>) -> Result<usize, ParseError> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit()) {
        return Err(ParseError::InvalidMenuChoice);
    }
    let choice: usize = raw.parse().map_err(|_| ParseError::InvalidMenuChoice)?;
    if range.contains(&choice) {
        Ok(choice)
    } else {
        Err(ParseError::InvalidMenuChoice)
    }
}

/// Valid iff `raw` is digits with at most one decimal point and contains at
/// least one digit. No sign, exponent, or thousands separators. A value of
/// exactly zero passes the character-class check and is accepted.
pub fn parse_amount(raw: &str) -> Result<f64, ParseError> {
    let raw = raw.trim();
    if !AMOUNT_RE.is_match(raw) || !raw.chars().any(|c| c.is_ascii_digit()) {
        return Err(ParseError::InvalidAmount);
    }
    raw.parse().map_err(|_| ParseError::InvalidAmount)
}

/// Valid iff `raw` contains only English letters and whitespace. Empty is
/// fine; the description is optional.
pub fn parse_description(raw: &str) -> Result<String, ParseError> {
    let raw = raw.trim_end_matches('\n');
    if DESCRIPTION_RE.is_match(raw) {
        Ok(raw.trim().to_string())
    } else {
        Err(ParseError::InvalidDescription)
    }
}

/// Valid iff `raw` is exactly DD-MM-YYYY and denotes a real calendar date.
/// The two/two/four digit grouping is required, so "5-3-2024" is rejected
/// even though chrono would parse it.
pub fn parse_date(raw: &str) -> Result<NaiveDate, ParseError> {
    let raw = raw.trim();
    if !DATE_SHAPE_RE.is_match(raw) {
        return Err(ParseError::InvalidDate);
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| ParseError::InvalidDate)
}

/// Valid iff `raw` is `y` or `n`, case-insensitively. `y` maps to true.
pub fn parse_yes_no(raw: &str) -> Result<bool, ParseError> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("y") {
        Ok(true)
    } else if raw.eq_ignore_ascii_case("n") {
        Ok(false)
    } else {
        Err(ParseError::InvalidYesNo)
    }
}
