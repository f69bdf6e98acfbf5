//! IBAN, QR-IBAN and payment reference checks, generation and formatting.

use super::checksum::{mod10_check_digit, mod10_validate, mod97_check_digits, mod97_validate};
use super::countries::is_qr_bill_account_country;
use super::error::QrBillError;

/// Remove all whitespace from `value`.
pub fn whitespace_removed(value: &str) -> String {
    value.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Validate an IBAN (any country) by structure and Mod97 check digits.
///
/// Whitespace is ignored; letters must be upper case.
///
/// ```
/// use zahlteil::core::is_valid_iban;
///
/// assert!(is_valid_iban("CH93 0076 2011 6238 5295 7"));
/// assert!(!is_valid_iban("CH93 0076 2011 6238 5295 8"));
/// ```
pub fn is_valid_iban(iban: &str) -> bool {
    let iban = whitespace_removed(iban);
    if !(5..=34).contains(&iban.len()) || !iban.is_ascii() {
        return false;
    }
    let bytes = iban.as_bytes();
    bytes[..2].iter().all(u8::is_ascii_uppercase)
        && bytes[2..4].iter().all(u8::is_ascii_digit)
        && bytes[4..]
            .iter()
            .all(|b| b.is_ascii_digit() || b.is_ascii_uppercase())
        && mod97_validate(&iban)
}

/// Check whether `iban` is a QR-IBAN.
///
/// QR-IBANs are Swiss or Liechtenstein IBANs whose institution identifier
/// (positions 5-9) lies in the reserved range 30000-31999. The IBAN itself
/// is not validated.
pub fn is_qr_iban(iban: &str) -> bool {
    let iban = whitespace_removed(iban);
    if iban.len() != 21 || !iban.get(..2).is_some_and(is_qr_bill_account_country) {
        return false;
    }
    iban.get(4..9)
        .and_then(|iid| iid.parse::<u32>().ok())
        .is_some_and(|iid| (30000..=31999).contains(&iid))
}

/// Validate a QR reference: 27 digits, not all zero, Mod10-recursive check
/// digit last. Whitespace is ignored.
pub fn is_valid_qr_reference(reference: &str) -> bool {
    let reference = whitespace_removed(reference);
    reference.len() == 27
        && reference.bytes().all(|b| b.is_ascii_digit())
        && reference.bytes().any(|b| b != b'0')
        && mod10_validate(&reference)
}

/// Validate an ISO 11649 creditor reference (`RF`, two check digits and up
/// to 21 alphanumeric characters). Whitespace is ignored.
pub fn is_valid_iso11649_reference(reference: &str) -> bool {
    let reference = whitespace_removed(reference);
    if !(5..=25).contains(&reference.len()) || !reference.is_ascii() {
        return false;
    }
    let bytes = reference.as_bytes();
    reference.starts_with("RF")
        && bytes[2..4].iter().all(u8::is_ascii_digit)
        && bytes[4..]
            .iter()
            .all(|b| b.is_ascii_digit() || b.is_ascii_uppercase())
        && mod97_validate(&reference)
}

/// Create a QR reference from up to 26 digits.
///
/// The digits are left-padded with zeros to 26 and the Mod10-recursive
/// check digit is appended. Whitespace is ignored.
///
/// ```
/// use zahlteil::core::create_qr_reference;
///
/// assert_eq!(
///     create_qr_reference("2100000000031394714300090").unwrap(),
///     "021000000000313947143000903"
/// );
/// ```
pub fn create_qr_reference(raw: &str) -> Result<String, QrBillError> {
    let raw = whitespace_removed(raw);
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(QrBillError::Reference(format!(
            "QR reference input must be numeric, got '{raw}'"
        )));
    }
    if raw.len() > 26 {
        return Err(QrBillError::Reference(format!(
            "QR reference input must not exceed 26 digits, got {}",
            raw.len()
        )));
    }
    let body = format!("{raw:0>26}");
    let check = mod10_check_digit(&body)
        .ok_or_else(|| QrBillError::Reference(format!("not a digit string: '{body}'")))?;
    Ok(format!("{body}{check}"))
}

/// Create an ISO 11649 creditor reference from up to 21 alphanumeric
/// characters. Whitespace is ignored, letters are upper-cased.
///
/// ```
/// use zahlteil::core::create_iso11649_reference;
///
/// assert_eq!(create_iso11649_reference("5390 0754 7034").unwrap(), "RF18539007547034");
/// ```
pub fn create_iso11649_reference(raw: &str) -> Result<String, QrBillError> {
    let raw = whitespace_removed(raw).to_ascii_uppercase();
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(QrBillError::Reference(format!(
            "creditor reference input must be alphanumeric, got '{raw}'"
        )));
    }
    if raw.len() > 21 {
        return Err(QrBillError::Reference(format!(
            "creditor reference input must not exceed 21 characters, got {}",
            raw.len()
        )));
    }
    let check = mod97_check_digits("RF", &raw)
        .ok_or_else(|| QrBillError::Reference(format!("not alphanumeric: '{raw}'")))?;
    Ok(format!("RF{check:02}{raw}"))
}

fn grouped(value: &str, first: usize, size: usize) -> String {
    let chars: Vec<char> = value.chars().collect();
    let mut out = String::with_capacity(chars.len() + chars.len() / size + 1);
    let (head, tail) = chars.split_at(first.min(chars.len()));
    out.extend(head);
    for chunk in tail.chunks(size) {
        if !out.is_empty() {
            out.push(' ');
        }
        out.extend(chunk);
    }
    out
}

/// Format an IBAN for display in blocks of four characters.
///
/// ```
/// use zahlteil::core::format_iban;
///
/// assert_eq!(format_iban("CH4431999123000889012"), "CH44 3199 9123 0008 8901 2");
/// ```
pub fn format_iban(iban: &str) -> String {
    grouped(&whitespace_removed(iban), 0, 4)
}

/// Format a QR reference for display: two digits, then blocks of five.
pub fn format_qr_reference(reference: &str) -> String {
    grouped(&whitespace_removed(reference), 2, 5)
}

/// Format an ISO 11649 creditor reference for display in blocks of four.
pub fn format_iso11649_reference(reference: &str) -> String {
    grouped(&whitespace_removed(reference), 0, 4)
}
