use tracing::{debug, trace};

use super::{PaymentCondition, RateDetail, S1_PREFIX, SwicoBillInformation, Tag};
use crate::core::{INVARIANT, InvariantFormat};

/// Decode Swico S1 bill information.
///
/// Returns `None` if `text` is absent or does not start with `//S1/`.
/// Otherwise decoding never fails: unknown tags, tags out of canonical
/// order and malformed values are skipped and scanning continues.
///
/// ```
/// use zahlteil::swico;
///
/// let info = swico::decode(r"//S1/10/X.66711/20/405\/1/40/0:30").unwrap();
/// assert_eq!(info.invoice_number.as_deref(), Some("X.66711"));
/// assert_eq!(info.customer_reference.as_deref(), Some("405/1"));
/// assert_eq!(info.payment_conditions[0].days, 30);
///
/// assert_eq!(swico::decode(None), None);
/// assert_eq!(swico::decode("Rechnung 10201409"), None);
/// ```
pub fn decode<'a>(text: impl Into<Option<&'a str>>) -> Option<SwicoBillInformation> {
    let body = text.into()?.strip_prefix(S1_PREFIX)?;
    Some(decode_body(body, &INVARIANT))
}

fn decode_body(body: &str, fmt: &InvariantFormat) -> SwicoBillInformation {
    let tokens = split_unescaped(body);
    let mut info = SwicoBillInformation::default();
    let mut highest: Option<Tag> = None;

    // A trailing tag without value is ignored.
    for pair in tokens.chunks_exact(2) {
        let (code, value) = (pair[0].as_str(), pair[1].as_str());
        let Some(tag) = Tag::from_code(code) else {
            trace!(tag = code, "skipping unknown S1 tag");
            continue;
        };
        if highest.is_some_and(|h| tag < h) {
            debug!(tag = code, "skipping S1 tag out of canonical order");
            continue;
        }
        highest = Some(tag);
        if !value.is_empty() {
            apply(&mut info, tag, value, fmt);
        }
    }

    info
}

/// Split at unescaped `/`, resolving `\x` escapes to `x`.
fn split_unescaped(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            }
            '/' => tokens.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    tokens.push(current);
    tokens
}

fn apply(info: &mut SwicoBillInformation, tag: Tag, value: &str, fmt: &InvariantFormat) {
    match tag {
        Tag::InvoiceNumber => info.invoice_number = Some(value.to_string()),
        Tag::InvoiceDate => match fmt.parse_short_date(value) {
            Some(date) => info.invoice_date = Some(date),
            None => malformed(tag, value),
        },
        Tag::CustomerReference => info.customer_reference = Some(value.to_string()),
        Tag::VatNumber => info.vat_number = Some(value.to_string()),
        Tag::VatDates => apply_vat_dates(info, value, fmt),
        Tag::VatRates => {
            if value.contains([':', ';']) {
                info.vat_rate_details = parse_list(tag, value, |item| parse_rate_detail(item, fmt));
            } else {
                match fmt.parse_decimal(value) {
                    Some(rate) => info.vat_rate = Some(rate),
                    None => malformed(tag, value),
                }
            }
        }
        Tag::VatImportTaxes => {
            info.vat_import_taxes = parse_list(tag, value, |item| parse_rate_detail(item, fmt));
        }
        Tag::PaymentConditions => {
            info.payment_conditions =
                parse_list(tag, value, |item| parse_payment_condition(item, fmt));
        }
    }
}

fn apply_vat_dates(info: &mut SwicoBillInformation, value: &str, fmt: &InvariantFormat) {
    match value.len() {
        6 => match fmt.parse_short_date(value) {
            Some(date) => info.vat_date = Some(date),
            None => malformed(Tag::VatDates, value),
        },
        12 if value.is_ascii() => {
            let start = fmt.parse_short_date(&value[..6]);
            let end = fmt.parse_short_date(&value[6..]);
            match (start, end) {
                (Some(start), Some(end)) => {
                    info.vat_start_date = Some(start);
                    info.vat_end_date = Some(end);
                }
                _ => malformed(Tag::VatDates, value),
            }
        }
        _ => malformed(Tag::VatDates, value),
    }
}

/// Parse a `;`-separated list, keeping the items before the first
/// malformed one.
fn parse_list<T>(tag: Tag, value: &str, parse_item: impl Fn(&str) -> Option<T>) -> Vec<T> {
    let mut items = Vec::new();
    for item in value.split(';') {
        match parse_item(item) {
            Some(parsed) => items.push(parsed),
            None => {
                debug!(
                    tag = tag.code(),
                    item,
                    kept = items.len(),
                    "truncating S1 list at malformed item"
                );
                break;
            }
        }
    }
    items
}

fn parse_rate_detail(item: &str, fmt: &InvariantFormat) -> Option<RateDetail> {
    let (rate, amount) = item.split_once(':')?;
    Some(RateDetail {
        rate: fmt.parse_decimal(rate)?,
        amount: fmt.parse_decimal(amount)?,
    })
}

fn parse_payment_condition(item: &str, fmt: &InvariantFormat) -> Option<PaymentCondition> {
    let (discount, days) = item.split_once(':')?;
    Some(PaymentCondition {
        discount: fmt.parse_decimal(discount)?,
        days: fmt.parse_u32(days)?,
    })
}

fn malformed(tag: Tag, value: &str) {
    debug!(tag = tag.code(), value, "dropping malformed S1 value");
}
