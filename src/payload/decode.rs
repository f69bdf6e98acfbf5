use tracing::debug;

use super::{CODING_TYPE, MANDATORY_LINES, MAX_LINES, QR_TYPE, TRAILER, VERSION};
use crate::core::{
    Address, Bill, INVARIANT, PayloadError, QrBillError, Reference, ReferenceType, ValidatedBill,
};
use crate::swico;

/// Decode QR payload text into an unvalidated bill.
///
/// Returns `None` if the text is not a structurally valid payload. Use
/// [`try_decode`] to learn why.
pub fn decode(text: &str) -> Option<Bill> {
    try_decode(text).ok()
}

/// Decode QR payload text into an unvalidated bill.
///
/// Lines may be separated by `\r\n` or `\n`; one trailing separator is
/// tolerated. Only the header, version, coding type, address type markers,
/// amount, reference type and trailer are checked structurally. Field
/// contents are not validated: run the result through
/// [`validate`](crate::core::validate) for that.
///
/// ```
/// use zahlteil::payload::try_decode;
/// use zahlteil::PayloadError;
///
/// assert_eq!(try_decode("SPC\n0200\n1"), Err(PayloadError::TooFewLines(3)));
/// ```
pub fn try_decode(text: &str) -> Result<Bill, PayloadError> {
    let result = decode_lines(&split_lines(text));
    if let Err(err) = &result {
        debug!(error = %err, "QR payload decoding failed");
    }
    result
}

/// Decode QR payload text and validate the result.
///
/// Fails with [`QrBillError::Payload`] if the text is not a structurally
/// valid payload, and with [`QrBillError::Validation`] if the decoded bill
/// has validation errors.
///
/// ```
/// use zahlteil::payload::decode_validated;
/// use zahlteil::{PayloadError, QrBillError};
///
/// let err = decode_validated("SPC\n0200\n1").unwrap_err();
/// assert!(matches!(err, QrBillError::Payload(PayloadError::TooFewLines(3))));
/// ```
pub fn decode_validated(text: &str) -> Result<ValidatedBill, QrBillError> {
    let bill = try_decode(text)?;
    ValidatedBill::try_from(bill)
}

fn split_lines(text: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();
    if lines.len() > 1 && lines.last() == Some(&"") {
        lines.pop();
    }
    lines
}

fn decode_lines(lines: &[&str]) -> Result<Bill, PayloadError> {
    if lines.len() < MANDATORY_LINES {
        return Err(PayloadError::TooFewLines(lines.len()));
    }
    if lines.len() > MAX_LINES {
        return Err(PayloadError::TooManyLines(lines.len()));
    }
    if lines[0] != QR_TYPE {
        return Err(PayloadError::InvalidHeader);
    }
    if lines[1] != VERSION {
        return Err(PayloadError::UnsupportedVersion(lines[1].to_string()));
    }
    if lines[2] != CODING_TYPE {
        return Err(PayloadError::UnsupportedCodingType(lines[2].to_string()));
    }

    let account = lines[3].to_string();
    let creditor = decode_address(&lines[4..11])?.unwrap_or_default();
    // lines[11..18]: ultimate creditor, ignored
    let amount = match lines[18] {
        "" => None,
        text => Some(
            INVARIANT
                .parse_decimal(text)
                .ok_or_else(|| PayloadError::InvalidAmount(text.to_string()))?,
        ),
    };
    let currency = lines[19].to_string();
    let debtor = decode_address(&lines[20..27])?;
    let reference_type = ReferenceType::from_code(lines[27])
        .ok_or_else(|| PayloadError::InvalidReferenceType(lines[27].to_string()))?;
    let reference = Reference {
        reference_type,
        value: non_empty(lines[28]),
    };
    let unstructured_message = non_empty(lines[29]);
    if lines[30] != TRAILER {
        return Err(PayloadError::InvalidTrailer);
    }

    let trailing = &lines[MANDATORY_LINES..];
    let bill_information = trailing.first().and_then(|line| swico::decode(*line));
    let alternative_schemes = trailing
        .iter()
        .skip(1)
        .filter_map(|line| non_empty(line))
        .collect();

    Ok(Bill {
        currency,
        amount,
        account,
        creditor,
        reference,
        debtor,
        unstructured_message,
        bill_information,
        alternative_schemes,
    })
}

/// Decode the 7 address lines. `None` if all of them are empty.
fn decode_address(lines: &[&str]) -> Result<Option<Address>, PayloadError> {
    let field = |i: usize| non_empty(lines[i]);
    let address = match lines[0] {
        "S" => Address {
            name: field(1),
            street: field(2),
            house_no: field(3),
            postal_code: field(4),
            town: field(5),
            country_code: field(6),
            ..Default::default()
        },
        // postal code and town are kept so validation reports the conflict
        "K" => Address {
            name: field(1),
            address_line1: field(2),
            address_line2: field(3),
            postal_code: field(4),
            town: field(5),
            country_code: field(6),
            ..Default::default()
        },
        "" if lines.iter().all(|line| line.is_empty()) => return Ok(None),
        marker => return Err(PayloadError::InvalidAddressType(marker.to_string())),
    };
    Ok(Some(address))
}

fn non_empty(line: &str) -> Option<String> {
    (!line.is_empty()).then(|| line.to_string())
}
