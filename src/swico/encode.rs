use super::{PaymentCondition, RateDetail, SwicoBillInformation, Tag};
use crate::core::{INVARIANT, InvariantFormat};

/// Encode bill information as Swico S1 text.
///
/// Populated fields are emitted in canonical tag order; absent fields are
/// omitted. A single VAT date takes precedence over a VAT period, and a
/// single VAT rate over rate details. Dates outside 2000-2099 have no
/// `yyMMdd` form and are omitted as well.
///
/// ```
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
/// use zahlteil::swico::{self, PaymentCondition, SwicoBillInformation};
///
/// let info = SwicoBillInformation {
///     invoice_number: Some("10201409".into()),
///     invoice_date: NaiveDate::from_ymd_opt(2019, 5, 12),
///     payment_conditions: vec![PaymentCondition::new(dec!(0), 30)],
///     ..Default::default()
/// };
/// assert_eq!(swico::encode(&info), "//S1/10/10201409/11/190512/40/0:30");
/// ```
pub fn encode(info: &SwicoBillInformation) -> String {
    let fmt = &INVARIANT;
    let mut out = String::from("//S1");

    if let Some(number) = &info.invoice_number {
        push_pair(&mut out, Tag::InvoiceNumber, &escaped(number));
    }
    if let Some(date) = info.invoice_date.and_then(|d| fmt.format_short_date(d)) {
        push_pair(&mut out, Tag::InvoiceDate, &date);
    }
    if let Some(reference) = &info.customer_reference {
        push_pair(&mut out, Tag::CustomerReference, &escaped(reference));
    }
    if let Some(vat_number) = &info.vat_number {
        push_pair(&mut out, Tag::VatNumber, &escaped(vat_number));
    }
    if let Some(date) = info.vat_date {
        if let Some(date) = fmt.format_short_date(date) {
            push_pair(&mut out, Tag::VatDates, &date);
        }
    } else if let (Some(start), Some(end)) = (info.vat_start_date, info.vat_end_date) {
        if let (Some(start), Some(end)) = (fmt.format_short_date(start), fmt.format_short_date(end))
        {
            push_pair(&mut out, Tag::VatDates, &format!("{start}{end}"));
        }
    }
    if let Some(rate) = info.vat_rate {
        push_pair(&mut out, Tag::VatRates, &fmt.format_decimal(rate));
    } else if !info.vat_rate_details.is_empty() {
        push_pair(&mut out, Tag::VatRates, &rate_list(&info.vat_rate_details, fmt));
    }
    if !info.vat_import_taxes.is_empty() {
        push_pair(&mut out, Tag::VatImportTaxes, &rate_list(&info.vat_import_taxes, fmt));
    }
    if !info.payment_conditions.is_empty() {
        push_pair(
            &mut out,
            Tag::PaymentConditions,
            &condition_list(&info.payment_conditions, fmt),
        );
    }

    out
}

fn push_pair(out: &mut String, tag: Tag, value: &str) {
    out.push('/');
    out.push_str(tag.code());
    out.push('/');
    out.push_str(value);
}

fn escaped(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c == '\\' || c == '/' {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn rate_list(details: &[RateDetail], fmt: &InvariantFormat) -> String {
    details
        .iter()
        .map(|d| {
            format!(
                "{}:{}",
                fmt.format_decimal(d.rate),
                fmt.format_decimal(d.amount)
            )
        })
        .collect::<Vec<_>>()
        .join(";")
}

fn condition_list(conditions: &[PaymentCondition], fmt: &InvariantFormat) -> String {
    conditions
        .iter()
        .map(|c| format!("{}:{}", fmt.format_decimal(c.discount), c.days))
        .collect::<Vec<_>>()
        .join(";")
}
