//! Check digit algorithms used by QR references, IBANs and ISO 11649
//! creditor references.
//!
//! The routines assume pre-filtered input (digits only for Mod10,
//! ASCII alphanumerics for Mod97). Anything else makes the validating
//! functions return `false` instead of panicking.

/// Carry transition table of the Mod10-recursive algorithm.
///
/// The full 10×10 table is cyclic: row `carry`, column `digit` equals
/// `MOD10_TABLE[(carry + digit) % 10]`.
const MOD10_TABLE: [u8; 10] = [0, 9, 4, 6, 8, 2, 7, 1, 3, 5];

/// Check digit for each final carry value.
const MOD10_CHECK: [u8; 10] = [0, 9, 8, 7, 6, 5, 4, 3, 2, 1];

fn mod10_carry(digits: &str) -> Option<u8> {
    let mut carry = 0u8;
    for c in digits.chars() {
        let digit = c.to_digit(10)? as u8;
        carry = MOD10_TABLE[((carry + digit) % 10) as usize];
    }
    Some(carry)
}

/// Compute the Mod10-recursive check digit for a string of decimal digits.
///
/// Returns `None` if `digits` contains anything other than `0`-`9`.
///
/// ```
/// use zahlteil::core::mod10_check_digit;
///
/// assert_eq!(mod10_check_digit("21000000000313947143000901"), Some(7));
/// ```
pub fn mod10_check_digit(digits: &str) -> Option<u8> {
    mod10_carry(digits).map(|carry| MOD10_CHECK[carry as usize])
}

/// Verify a digit string whose last digit is the Mod10-recursive check digit.
pub fn mod10_validate(digits_with_check: &str) -> bool {
    let Some(last) = digits_with_check.chars().last() else {
        return false;
    };
    let body = &digits_with_check[..digits_with_check.len() - last.len_utf8()];
    match (mod10_check_digit(body), last.to_digit(10)) {
        (Some(expected), Some(actual)) => u32::from(expected) == actual,
        _ => false,
    }
}

/// Remainder modulo 97 of an alphanumeric string read as a decimal number,
/// letters expanded to two digits (A = 10 … Z = 35).
///
/// Works digit by digit so arbitrarily long identifiers never overflow.
fn mod97_remainder(text: &str) -> Option<u32> {
    let mut rem = 0u32;
    for c in text.chars() {
        let value = c.to_digit(36)?;
        rem = if value < 10 {
            (rem * 10 + value) % 97
        } else {
            (rem * 100 + value) % 97
        };
    }
    Some(rem)
}

/// Validate an identifier using ISO 7064 Mod 97-10.
///
/// The first four characters (country/prefix and check digits) are moved
/// to the end before the remainder is computed. Valid iff the remainder is 1.
/// Letters must be upper case.
///
/// ```
/// use zahlteil::core::mod97_validate;
///
/// assert!(mod97_validate("CH4431999123000889012"));
/// assert!(mod97_validate("RF18539007547034"));
/// assert!(!mod97_validate("CH4431999123000889013"));
/// ```
pub fn mod97_validate(identifier: &str) -> bool {
    if identifier.len() < 5 || !identifier.is_ascii() {
        return false;
    }
    if identifier.chars().any(|c| c.is_ascii_lowercase()) {
        return false;
    }
    let (head, tail) = identifier.split_at(4);
    let rearranged = format!("{tail}{head}");
    mod97_remainder(&rearranged) == Some(1)
}

/// Compute the two Mod 97-10 check digits for `body` under `prefix`
/// (e.g. `"RF"` for creditor references, `"CH"` for Swiss IBANs).
///
/// Returns `None` if either part contains a character outside `0-9A-Z`.
pub fn mod97_check_digits(prefix: &str, body: &str) -> Option<u8> {
    if prefix.chars().chain(body.chars()).any(|c| c.is_ascii_lowercase()) {
        return None;
    }
    let rem = mod97_remainder(&format!("{body}{prefix}00"))?;
    Some((98 - rem) as u8)
}
