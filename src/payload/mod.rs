//! Text payload of the QR code.
//!
//! The payload is a fixed sequence of lines, one field per line, with
//! positions that never move: absent values are encoded as empty lines.
//!
//! ```text
//! SPC                      QR type
//! 0200                     version
//! 1                        coding type (UTF-8)
//! CH4431999123000889012    account
//! S                        creditor: address type, then 6 lines
//! ...                      ultimate creditor: 7 reserved empty lines
//! 1949.75                  amount
//! CHF                      currency
//! S                        debtor: address type, then 6 lines
//! QRR                      reference type
//! 210000000003139471430009017
//! Auftrag vom 15.06.2020   unstructured message
//! EPD                      trailer
//! //S1/10/10201409/...     bill information (optional)
//! eBill/B/...              alternative schemes (optional, at most 2)
//! ```

mod decode;
mod encode;

use serde::{Deserialize, Serialize};

pub use decode::{decode, decode_validated, try_decode};
pub use encode::{encode, encode_with};

/// QR type, first payload line.
pub const QR_TYPE: &str = "SPC";
/// Payload version.
pub const VERSION: &str = "0200";
/// Coding type 1: UTF-8 restricted to the Latin character set.
pub const CODING_TYPE: &str = "1";
/// End of payment data.
pub const TRAILER: &str = "EPD";
/// Lines up to and including the trailer.
pub const MANDATORY_LINES: usize = 31;
/// Trailer plus bill information plus two alternative schemes.
pub const MAX_LINES: usize = MANDATORY_LINES + 3;

/// Line terminator used when encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineSeparator {
    /// `\r\n`
    #[default]
    CrLf,
    /// `\n`
    Lf,
}

impl LineSeparator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CrLf => "\r\n",
            Self::Lf => "\n",
        }
    }
}

/// Options for payload encoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadOptions {
    /// Separator between payload lines.
    pub line_separator: LineSeparator,
}

/// Builder for [`PayloadOptions`].
///
/// # Example
///
/// ```
/// use zahlteil::payload::{LineSeparator, PayloadOptionsBuilder};
///
/// let options = PayloadOptionsBuilder::new()
///     .line_separator(LineSeparator::Lf)
///     .build();
/// assert_eq!(options.line_separator.as_str(), "\n");
/// ```
#[derive(Debug, Default)]
pub struct PayloadOptionsBuilder {
    options: PayloadOptions,
}

impl PayloadOptionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the line separator.
    pub fn line_separator(mut self, separator: LineSeparator) -> Self {
        self.options.line_separator = separator;
        self
    }

    pub fn build(self) -> PayloadOptions {
        self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_use_crlf() {
        assert_eq!(PayloadOptions::default().line_separator, LineSeparator::CrLf);
        assert_eq!(PayloadOptionsBuilder::new().build(), PayloadOptions::default());
    }

    #[test]
    fn options_serde() {
        let options = PayloadOptionsBuilder::new()
            .line_separator(LineSeparator::Lf)
            .build();
        let json = serde_json::to_string(&options).unwrap();
        assert_eq!(json, r#"{"line_separator":"Lf"}"#);
        let back: PayloadOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, options);
    }
}
