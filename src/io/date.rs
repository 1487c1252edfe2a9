//! Fixed-offset date parsing.
//!
//! Dates such as `25/12/2024` or `25-12-2024 10:00` are read by position only:
//! day at offset 0, month at offset 3, year at offset 6. The separator bytes
//! are ignored.

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

const DAY_OFFSET: usize = 0;
const MONTH_OFFSET: usize = 3;
const YEAR_OFFSET: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("date '{0}' is too short (expected DD?MM?YYYY)")]
    TooShort(String),
    #[error("date '{0}' has a non-numeric day, month or year")]
    NotNumeric(String),
    #[error("date '{0}' is not a valid calendar date")]
    OutOfRange(String),
}

/// Parse a `DD?MM?YYYY` date into the integer `YYYYMMDD`.
pub fn parse_day_month_year(s: &str) -> Result<i64, DateError> {
    let field = |offset: usize, len: usize| -> Result<u32, DateError> {
        let part = s
            .get(offset..offset + len)
            .ok_or_else(|| DateError::TooShort(s.to_string()))?;
        if !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DateError::NotNumeric(s.to_string()));
        }
        part.parse::<u32>().map_err(|_| DateError::NotNumeric(s.to_string()))
    };

    let day = field(DAY_OFFSET, 2)?;
    let month = field(MONTH_OFFSET, 2)?;
    let year = field(YEAR_OFFSET, 4)?;

    let date = i32::try_from(year)
        .ok()
        .and_then(|y| NaiveDate::from_ymd_opt(y, month, day))
        .ok_or_else(|| DateError::OutOfRange(s.to_string()))?;

    Ok(i64::from(date.year()) * 10_000 + i64::from(date.month()) * 100 + i64::from(date.day()))
}
