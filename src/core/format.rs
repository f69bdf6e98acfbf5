//! Locale-independent number and date text conversions.
//!
//! Every numeric or date value that crosses a wire format goes through an
//! [`InvariantFormat`]: `.` as decimal separator, no grouping, ASCII digits
//! only, `yyMMdd` dates in the 2000-2099 century.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Formatting context with fixed, process-independent rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InvariantFormat;

/// The shared invariant context.
pub const INVARIANT: InvariantFormat = InvariantFormat;

const SHORT_DATE_FMT: &str = "%y%m%d";

impl InvariantFormat {
    /// Parse a non-negative decimal: digits, optionally `.` and more digits.
    ///
    /// Leading/trailing spaces are tolerated. Signs, exponents, grouping and
    /// `,` separators are rejected.
    pub fn parse_decimal(&self, text: &str) -> Option<Decimal> {
        let text = text.trim();
        let (int, frac) = match text.split_once('.') {
            Some((int, frac)) => (int, Some(frac)),
            None => (text, None),
        };
        let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
        if !digits(int) || frac.is_some_and(|f| !digits(f)) {
            return None;
        }
        Decimal::from_str(text).ok()
    }

    /// Shortest plain representation (`7.7`, `1000`, `0.5`).
    pub fn format_decimal(&self, value: Decimal) -> String {
        value.normalize().to_string()
    }

    /// Payment amount with exactly two decimals (`1949.75`).
    pub fn format_amount(&self, value: Decimal) -> String {
        format!("{:.2}", value)
    }

    /// Parse an unsigned integer made of ASCII digits only.
    pub fn parse_u32(&self, text: &str) -> Option<u32> {
        let text = text.trim();
        if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        text.parse().ok()
    }

    /// Parse a `yyMMdd` date, the year taken as 20yy.
    pub fn parse_short_date(&self, text: &str) -> Option<NaiveDate> {
        if text.len() != 6 || !text.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let year: i32 = text[0..2].parse().ok()?;
        let month: u32 = text[2..4].parse().ok()?;
        let day: u32 = text[4..6].parse().ok()?;
        NaiveDate::from_ymd_opt(2000 + year, month, day)
    }

    /// Format a date as `yyMMdd`. `None` for dates outside 2000-2099, which
    /// the two-digit year cannot represent.
    pub fn format_short_date(&self, date: NaiveDate) -> Option<String> {
        self.is_short_date(date)
            .then(|| date.format(SHORT_DATE_FMT).to_string())
    }

    /// True if `date` survives a `yyMMdd` round trip.
    pub fn is_short_date(&self, date: NaiveDate) -> bool {
        (2000..2100).contains(&date.year())
    }
}
