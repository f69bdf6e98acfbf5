use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while building, validating or decoding a bill.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QrBillError {
    /// Validation produced at least one error.
    #[error("validation failed: {0}")]
    Validation(ValidationResult),

    /// QR payload text does not have the required structure.
    #[error("payload error: {0}")]
    Payload(#[from] PayloadError),

    /// Input to a reference generator is not usable.
    #[error("reference error: {0}")]
    Reference(String),
}

/// Structural failures when decoding QR payload text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum PayloadError {
    #[error("payload has {0} lines, at least 31 are required")]
    TooFewLines(usize),

    #[error("payload has {0} lines, at most 34 are allowed")]
    TooManyLines(usize),

    #[error("payload does not start with the QR type 'SPC'")]
    InvalidHeader,

    #[error("unsupported payload version '{0}'")]
    UnsupportedVersion(String),

    #[error("unsupported coding type '{0}'")]
    UnsupportedCodingType(String),

    #[error("invalid address type '{0}'")]
    InvalidAddressType(String),

    #[error("invalid amount '{0}'")]
    InvalidAmount(String),

    #[error("invalid reference type '{0}'")]
    InvalidReferenceType(String),

    #[error("missing trailer 'EPD'")]
    InvalidTrailer,
}

/// Severity of a validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Blocks production of a validated bill.
    Error,
    /// Informational: the value was cleaned and validation continued.
    Warning,
}

/// Subfield of a creditor or debtor address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddressField {
    Name,
    AddressLine1,
    AddressLine2,
    Street,
    HouseNo,
    PostalCode,
    Town,
    CountryCode,
}

impl AddressField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::AddressLine1 => "addressLine1",
            Self::AddressLine2 => "addressLine2",
            Self::Street => "street",
            Self::HouseNo => "houseNo",
            Self::PostalCode => "postalCode",
            Self::Town => "town",
            Self::CountryCode => "countryCode",
        }
    }
}

/// Role an address plays on a bill. Roots the field path of its messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddressRole {
    Creditor,
    Debtor,
}

impl AddressRole {
    /// Field identifier of `sub` under this role.
    pub fn field(self, sub: AddressField) -> Field {
        match self {
            Self::Creditor => Field::Creditor(sub),
            Self::Debtor => Field::Debtor(sub),
        }
    }
}

/// Identifier of the bill field a validation message refers to.
///
/// Displayed as a dot path, e.g. `creditor.postalCode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    Currency,
    Amount,
    Account,
    Creditor(AddressField),
    Debtor(AddressField),
    ReferenceType,
    Reference,
    UnstructuredMessage,
    BillInformation,
    AltSchemes,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Currency => f.write_str("currency"),
            Self::Amount => f.write_str("amount"),
            Self::Account => f.write_str("account"),
            Self::Creditor(sub) => write!(f, "creditor.{}", sub.as_str()),
            Self::Debtor(sub) => write!(f, "debtor.{}", sub.as_str()),
            Self::ReferenceType => f.write_str("referenceType"),
            Self::Reference => f.write_str("reference"),
            Self::UnstructuredMessage => f.write_str("unstructuredMessage"),
            Self::BillInformation => f.write_str("billInformation"),
            Self::AltSchemes => f.write_str("altSchemes"),
        }
    }
}

/// Stable message keys. Display text is looked up by key in a message
/// catalog outside this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKey {
    CurrencyNotChfOrEur,
    AmountOutsideValidRange,
    FieldValueMissing,
    AccountIbanInvalid,
    AccountIbanNotFromChOrLi,
    AddressTypeConflict,
    CountryCodeInvalid,
    FieldValueClipped,
    FieldValueTooLong,
    AdditionalInfoTooLong,
    ReplacedUnsupportedCharacters,
    UnsupportedCharacters,
    QrRefMissing,
    RefInvalid,
    CredRefInvalidUseForQrIban,
    QrRefInvalidUseForNonQrIban,
    AltSchemeMaxExceed,
    BillInfoValueInvalid,
}

impl MessageKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CurrencyNotChfOrEur => "currency_not_chf_or_eur",
            Self::AmountOutsideValidRange => "amount_outside_valid_range",
            Self::FieldValueMissing => "field_value_missing",
            Self::AccountIbanInvalid => "account_iban_invalid",
            Self::AccountIbanNotFromChOrLi => "account_iban_not_from_ch_or_li",
            Self::AddressTypeConflict => "address_type_conflict",
            Self::CountryCodeInvalid => "country_code_invalid",
            Self::FieldValueClipped => "field_value_clipped",
            Self::FieldValueTooLong => "field_value_too_long",
            Self::AdditionalInfoTooLong => "additional_info_too_long",
            Self::ReplacedUnsupportedCharacters => "replaced_unsupported_characters",
            Self::UnsupportedCharacters => "unsupported_characters",
            Self::QrRefMissing => "qr_ref_missing",
            Self::RefInvalid => "ref_invalid",
            Self::CredRefInvalidUseForQrIban => "cred_ref_invalid_use_for_qr_iban",
            Self::QrRefInvalidUseForNonQrIban => "qr_ref_invalid_use_for_non_qr_iban",
            Self::AltSchemeMaxExceed => "alt_scheme_max_exceed",
            Self::BillInfoValueInvalid => "bill_info_value_invalid",
        }
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single validation finding: severity, field, message key and the
/// positional parameters the message text is formatted with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationMessage {
    pub severity: Severity,
    pub field: Field,
    pub key: MessageKey,
    pub params: Vec<String>,
}

impl ValidationMessage {
    /// Create an error message without parameters.
    pub fn error(field: Field, key: MessageKey) -> Self {
        Self {
            severity: Severity::Error,
            field,
            key,
            params: Vec::new(),
        }
    }

    /// Create a warning message without parameters.
    pub fn warning(field: Field, key: MessageKey) -> Self {
        Self {
            severity: Severity::Warning,
            field,
            key,
            params: Vec::new(),
        }
    }

    /// Append a positional parameter.
    pub fn with_param(mut self, param: impl ToString) -> Self {
        self.params.push(param.to_string());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ValidationMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{severity}: {}: {}", self.field, self.key)?;
        if !self.params.is_empty() {
            write!(f, " [{}]", self.params.join(", "))?;
        }
        Ok(())
    }
}

/// Ordered outcome of a validation pass.
///
/// Messages appear in field declaration order (currency, amount, account,
/// creditor, debtor, reference, unstructured message, bill information,
/// alternative schemes).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    messages: Vec<ValidationMessage>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages in order.
    pub fn messages(&self) -> &[ValidationMessage] {
        &self.messages
    }

    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(|m| m.severity == Severity::Error)
    }

    pub fn has_warnings(&self) -> bool {
        self.messages.iter().any(|m| m.severity == Severity::Warning)
    }

    /// True if there are no errors (warnings are allowed).
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    /// Messages with [`Severity::Error`].
    pub fn errors(&self) -> impl Iterator<Item = &ValidationMessage> {
        self.messages.iter().filter(|m| m.severity == Severity::Error)
    }

    /// Messages with [`Severity::Warning`].
    pub fn warnings(&self) -> impl Iterator<Item = &ValidationMessage> {
        self.messages
            .iter()
            .filter(|m| m.severity == Severity::Warning)
    }

    /// Messages for one field.
    pub fn for_field(&self, field: Field) -> impl Iterator<Item = &ValidationMessage> {
        self.messages.iter().filter(move |m| m.field == field)
    }

    pub fn push(&mut self, message: ValidationMessage) {
        self.messages.push(message);
    }

    pub(crate) fn error(&mut self, field: Field, key: MessageKey) {
        self.push(ValidationMessage::error(field, key));
    }
}

impl Extend<ValidationMessage> for ValidationResult {
    fn extend<T: IntoIterator<Item = ValidationMessage>>(&mut self, iter: T) {
        self.messages.extend(iter);
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, message) in self.messages.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{message}")?;
        }
        Ok(())
    }
}
