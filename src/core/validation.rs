use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use tracing::debug;

use super::address::validate_address;
use super::charset::clean_text;
use super::countries::is_qr_bill_account_country;
use super::error::{
    AddressRole, Field, MessageKey, QrBillError, ValidationMessage, ValidationResult,
};
use super::format::INVARIANT;
use super::payments::{
    is_qr_iban, is_valid_iban, is_valid_iso11649_reference, is_valid_qr_reference,
    whitespace_removed,
};
use super::types::*;
use crate::swico::{self, RateDetail, S1_PREFIX, SwicoBillInformation, Tag};

/// Smallest payable amount.
pub const MIN_AMOUNT: Decimal = dec!(0.01);
/// Largest payable amount.
pub const MAX_AMOUNT: Decimal = dec!(999999999.99);
/// Maximum length of the unstructured message, and of message and bill
/// information together.
pub const MAX_ADDITIONAL_INFO_LENGTH: usize = 140;
/// Maximum number of alternative scheme lines.
pub const MAX_ALT_SCHEMES: usize = 2;
/// Maximum length of an alternative scheme line.
pub const MAX_ALT_SCHEME_LENGTH: usize = 100;

/// Validate a bill and produce a cleaned copy.
///
/// All rules are checked in one pass; every finding is reported, in field
/// order. The validated bill is returned only if no error was found
/// (warnings do not block it). The input is never modified.
///
/// ```
/// use zahlteil::core::*;
///
/// let bill = Bill {
///     account: "CH44 3199 9123 0008 8901 2".into(),
///     creditor: AddressBuilder::structured("Robert Schneider AG", "2501", "Biel", "CH").build(),
///     reference: Reference::qr("210000000003139471430009017"),
///     ..Default::default()
/// };
/// let (validated, result) = validate(&bill);
/// assert!(result.is_valid());
/// assert_eq!(validated.unwrap().account, "CH4431999123000889012");
/// ```
pub fn validate(bill: &Bill) -> (Option<ValidatedBill>, ValidationResult) {
    let mut result = ValidationResult::new();

    let currency = validate_currency(&bill.currency, &mut result);
    let amount = validate_amount(bill.amount, &mut result);
    let account = validate_account(&bill.account, &mut result);

    let (creditor, messages) = validate_address(&bill.creditor, AddressRole::Creditor);
    result.extend(messages);
    let debtor = match &bill.debtor {
        Some(debtor) => {
            let (cleaned, messages) = validate_address(debtor, AddressRole::Debtor);
            result.extend(messages);
            cleaned
        }
        None => None,
    };

    let reference = validate_reference(&bill.reference, account.as_ref(), &mut result);
    let (unstructured_message, bill_information) = validate_additional_information(
        bill.unstructured_message.as_deref(),
        bill.bill_information.as_ref(),
        &mut result,
    );
    let alternative_schemes = validate_alternative_schemes(&bill.alternative_schemes, &mut result);

    debug!(
        errors = result.errors().count(),
        warnings = result.warnings().count(),
        "bill validation finished"
    );

    if result.has_errors() {
        return (None, result);
    }

    let cleaned = Bill {
        currency,
        amount,
        account: account.map(|a| a.iban).unwrap_or_default(),
        creditor: creditor.unwrap_or_default(),
        reference,
        debtor,
        unstructured_message,
        bill_information,
        alternative_schemes,
    };
    (Some(ValidatedBill(cleaned)), result)
}

impl Bill {
    /// Validate this bill. See [`validate`].
    pub fn validate(&self) -> (Option<ValidatedBill>, ValidationResult) {
        validate(self)
    }
}

impl TryFrom<Bill> for ValidatedBill {
    type Error = QrBillError;

    fn try_from(bill: Bill) -> Result<Self, Self::Error> {
        match validate(&bill) {
            (Some(validated), _) => Ok(validated),
            (None, result) => Err(QrBillError::Validation(result)),
        }
    }
}

fn validate_currency(currency: &str, result: &mut ValidationResult) -> String {
    let currency = currency.trim().to_string();
    if currency.is_empty() {
        result.error(Field::Currency, MessageKey::FieldValueMissing);
    } else if currency != CURRENCY_CHF && currency != CURRENCY_EUR {
        result.error(Field::Currency, MessageKey::CurrencyNotChfOrEur);
    }
    currency
}

fn validate_amount(amount: Option<Decimal>, result: &mut ValidationResult) -> Option<Decimal> {
    let amount = amount?.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if amount < MIN_AMOUNT || amount > MAX_AMOUNT {
        result.push(
            ValidationMessage::error(Field::Amount, MessageKey::AmountOutsideValidRange)
                .with_param(MIN_AMOUNT)
                .with_param(MAX_AMOUNT),
        );
    }
    Some(amount)
}

/// Cleaned account that passed validation.
struct ValidAccount {
    iban: String,
    is_qr_iban: bool,
}

fn validate_account(account: &str, result: &mut ValidationResult) -> Option<ValidAccount> {
    let iban = whitespace_removed(account).to_ascii_uppercase();
    if iban.is_empty() {
        result.error(Field::Account, MessageKey::FieldValueMissing);
        return None;
    }
    if !is_valid_iban(&iban) {
        result.error(Field::Account, MessageKey::AccountIbanInvalid);
        return None;
    }
    if !iban.get(..2).is_some_and(is_qr_bill_account_country) {
        result.error(Field::Account, MessageKey::AccountIbanNotFromChOrLi);
        return None;
    }
    if iban.len() != 21 {
        result.error(Field::Account, MessageKey::AccountIbanInvalid);
        return None;
    }
    Some(ValidAccount {
        is_qr_iban: is_qr_iban(&iban),
        iban,
    })
}

fn validate_reference(
    reference: &Reference,
    account: Option<&ValidAccount>,
    result: &mut ValidationResult,
) -> Reference {
    let reference_type = reference.reference_type;
    let mut value = reference
        .value
        .as_deref()
        .map(whitespace_removed)
        .filter(|v| !v.is_empty());

    if let Some(account) = account {
        match (account.is_qr_iban, reference_type) {
            (true, ReferenceType::Scor) => {
                result.error(Field::ReferenceType, MessageKey::CredRefInvalidUseForQrIban)
            }
            (true, ReferenceType::Non) => {
                result.error(Field::ReferenceType, MessageKey::QrRefMissing)
            }
            (false, ReferenceType::Qrr) => {
                result.error(Field::ReferenceType, MessageKey::QrRefInvalidUseForNonQrIban)
            }
            _ => {}
        }
    }

    match reference_type {
        ReferenceType::Qrr => match value.as_mut() {
            None => result.error(Field::Reference, MessageKey::QrRefMissing),
            Some(v) => {
                if v.len() < 27 && v.bytes().all(|b| b.is_ascii_digit()) {
                    *v = format!("{v:0>27}");
                }
                if !is_valid_qr_reference(v) {
                    result.error(Field::Reference, MessageKey::RefInvalid);
                }
            }
        },
        ReferenceType::Scor => match value.as_mut() {
            None => result.error(Field::Reference, MessageKey::FieldValueMissing),
            Some(v) => {
                *v = v.to_ascii_uppercase();
                if !is_valid_iso11649_reference(v) {
                    result.error(Field::Reference, MessageKey::RefInvalid);
                }
            }
        },
        ReferenceType::Non => {
            if value.is_some() {
                result.error(Field::Reference, MessageKey::RefInvalid);
            }
        }
    }

    Reference {
        reference_type,
        value,
    }
}

/// Clean a free text value. Reports transliteration as a warning and
/// untranslatable characters as an error.
fn cleaned_text(text: &str, field: Field, result: &mut ValidationResult) -> Option<String> {
    let cleaned = clean_text(text);
    if cleaned.replaced {
        result.push(ValidationMessage::warning(
            field,
            MessageKey::ReplacedUnsupportedCharacters,
        ));
    }
    if !cleaned.unsupported.is_empty() {
        let chars: String = cleaned.unsupported.iter().collect();
        result.push(
            ValidationMessage::error(field, MessageKey::UnsupportedCharacters).with_param(chars),
        );
    }
    (!cleaned.value.is_empty()).then_some(cleaned.value)
}

fn validate_additional_information(
    message: Option<&str>,
    bill_information: Option<&SwicoBillInformation>,
    result: &mut ValidationResult,
) -> (Option<String>, Option<SwicoBillInformation>) {
    let mut message = message.and_then(|m| cleaned_text(m, Field::UnstructuredMessage, result));
    let mut bill_information = bill_information.cloned();

    // S1 text placed in the message belongs to the bill information.
    if bill_information.is_none() && message.as_deref().is_some_and(|m| m.starts_with(S1_PREFIX))
    {
        bill_information = swico::decode(message.as_deref());
        message = None;
    }
    let bill_information =
        bill_information.and_then(|info| validate_bill_information(info, result));

    let message_len = message.as_deref().map_or(0, |m| m.chars().count());
    if message_len > MAX_ADDITIONAL_INFO_LENGTH {
        result.push(
            ValidationMessage::error(Field::UnstructuredMessage, MessageKey::FieldValueTooLong)
                .with_param(MAX_ADDITIONAL_INFO_LENGTH),
        );
    } else if let Some(info) = &bill_information {
        let info_len = swico::encode(info).chars().count();
        if message_len + info_len > MAX_ADDITIONAL_INFO_LENGTH {
            result.push(
                ValidationMessage::error(
                    Field::BillInformation,
                    MessageKey::AdditionalInfoTooLong,
                )
                .with_param(MAX_ADDITIONAL_INFO_LENGTH),
            );
        }
    }

    (message, bill_information)
}

/// Clean the text values of the bill information and check that every
/// remaining value has an S1 representation. Blank text becomes `None`;
/// information left without any value is dropped.
fn validate_bill_information(
    info: SwicoBillInformation,
    result: &mut ValidationResult,
) -> Option<SwicoBillInformation> {
    let mut text = |value: Option<String>| {
        value.and_then(|v| cleaned_text(&v, Field::BillInformation, result))
    };
    let info = SwicoBillInformation {
        invoice_number: text(info.invoice_number),
        customer_reference: text(info.customer_reference),
        vat_number: text(info.vat_number),
        ..info
    }
    .normalized();

    let mut invalid: Vec<Tag> = Vec::new();
    let mut flag = |tag: Tag, is_invalid: bool| {
        if is_invalid && !invalid.contains(&tag) {
            invalid.push(tag);
        }
    };
    let outside_century =
        |date: Option<NaiveDate>| date.is_some_and(|d| !INVARIANT.is_short_date(d));
    let negative_detail =
        |d: &RateDetail| d.rate.is_sign_negative() || d.amount.is_sign_negative();

    flag(Tag::InvoiceDate, outside_century(info.invoice_date));
    for date in [info.vat_date, info.vat_start_date, info.vat_end_date] {
        flag(Tag::VatDates, outside_century(date));
    }
    flag(
        Tag::VatRates,
        info.vat_rate.is_some_and(|r| r.is_sign_negative())
            || info.vat_rate_details.iter().any(negative_detail),
    );
    flag(Tag::VatImportTaxes, info.vat_import_taxes.iter().any(negative_detail));
    flag(
        Tag::PaymentConditions,
        info.payment_conditions
            .iter()
            .any(|c| c.discount.is_sign_negative()),
    );

    for tag in invalid {
        result.push(
            ValidationMessage::error(Field::BillInformation, MessageKey::BillInfoValueInvalid)
                .with_param(tag.code()),
        );
    }
    (!info.is_empty()).then_some(info)
}

fn validate_alternative_schemes(schemes: &[String], result: &mut ValidationResult) -> Vec<String> {
    let cleaned: Vec<String> = schemes
        .iter()
        .filter_map(|s| cleaned_text(s, Field::AltSchemes, result))
        .collect();

    if cleaned.len() > MAX_ALT_SCHEMES {
        result.push(
            ValidationMessage::error(Field::AltSchemes, MessageKey::AltSchemeMaxExceed)
                .with_param(MAX_ALT_SCHEMES),
        );
    }
    if cleaned
        .iter()
        .any(|s| s.chars().count() > MAX_ALT_SCHEME_LENGTH)
    {
        result.push(
            ValidationMessage::error(Field::AltSchemes, MessageKey::FieldValueTooLong)
                .with_param(MAX_ALT_SCHEME_LENGTH),
        );
    }
    cleaned
}
