//! QR-bill data model, checksums, character set and validation.
//!
//! [`validate`] turns a raw [`Bill`] into a [`ValidatedBill`] (cleaned and
//! ready for encoding) plus a [`ValidationResult`] listing every finding.

mod address;
mod builder;
mod charset;
mod checksum;
mod countries;
mod error;
mod format;
mod payments;
mod types;
mod validation;

pub use address::*;
pub use builder::*;
pub use charset::{CleanedText, clean_text, is_valid_qr_bill_char};
pub use checksum::*;
pub use countries::{is_known_country_code, is_qr_bill_account_country};
pub use error::*;
pub use format::{INVARIANT, InvariantFormat};
pub use payments::*;
pub use types::*;
pub use validation::*;
