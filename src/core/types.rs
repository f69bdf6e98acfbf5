use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::swico::SwicoBillInformation;

/// Swiss franc.
pub const CURRENCY_CHF: &str = "CHF";
/// Euro.
pub const CURRENCY_EUR: &str = "EUR";

/// Payment document carried by the QR code of a Swiss QR-bill.
///
/// A `Bill` is raw input: nothing is guaranteed about its contents until it
/// has been run through [`validate`](super::validate), which produces a
/// [`ValidatedBill`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    /// Currency code, `CHF` or `EUR`.
    pub currency: String,
    /// Payment amount. `None` leaves the amount open for the debtor to fill in.
    pub amount: Option<Decimal>,
    /// Creditor account (IBAN or QR-IBAN).
    pub account: String,
    /// Creditor (payee).
    pub creditor: Address,
    /// Payment reference.
    pub reference: Reference,
    /// Debtor (payer). `None` leaves the debtor for the payer to fill in.
    pub debtor: Option<Address>,
    /// Free text message to the creditor.
    pub unstructured_message: Option<String>,
    /// Structured bill information (Swico S1).
    pub bill_information: Option<SwicoBillInformation>,
    /// Parameters of alternative payment schemes (at most two lines).
    pub alternative_schemes: Vec<String>,
}

impl Default for Bill {
    fn default() -> Self {
        Self {
            currency: CURRENCY_CHF.to_string(),
            amount: None,
            account: String::new(),
            creditor: Address::default(),
            reference: Reference::default(),
            debtor: None,
            unstructured_message: None,
            bill_information: None,
            alternative_schemes: Vec::new(),
        }
    }
}

/// Creditor or debtor address.
///
/// The address is either *structured* (street, house number, postal code and
/// town as separate fields) or *combined* (two free address lines). The shape
/// is not fixed by the type: it is discriminated from the populated fields by
/// [`Address::kind`], which is how conflicting input (both shapes populated)
/// stays representable and reportable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Name (person or company).
    pub name: Option<String>,
    /// Combined shape: street and house number or post office box.
    pub address_line1: Option<String>,
    /// Combined shape: postal code and town.
    pub address_line2: Option<String>,
    /// Structured shape: street or post office box.
    pub street: Option<String>,
    /// Structured shape: house number.
    pub house_no: Option<String>,
    /// Structured shape: postal code.
    pub postal_code: Option<String>,
    /// Structured shape: town.
    pub town: Option<String>,
    /// ISO 3166-1 alpha-2 country code.
    pub country_code: Option<String>,
}

/// Shape discriminator of an [`Address`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AddressKind {
    /// No shape-specific field is populated.
    Undetermined,
    /// Only structured fields are populated.
    Structured,
    /// Only combined address lines are populated.
    Combined,
    /// Fields of both shapes are populated.
    Conflicting,
}

/// Borrowed view of an address resolved to one shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressShape<'a> {
    Structured {
        name: Option<&'a str>,
        street: Option<&'a str>,
        house_no: Option<&'a str>,
        postal_code: Option<&'a str>,
        town: Option<&'a str>,
        country_code: Option<&'a str>,
    },
    Combined {
        name: Option<&'a str>,
        address_line1: Option<&'a str>,
        address_line2: Option<&'a str>,
        country_code: Option<&'a str>,
    },
}

pub(crate) fn is_filled(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

impl Address {
    /// Determine the address shape from the populated fields.
    pub fn kind(&self) -> AddressKind {
        let structured = is_filled(&self.street)
            || is_filled(&self.house_no)
            || is_filled(&self.postal_code)
            || is_filled(&self.town);
        let combined = is_filled(&self.address_line1) || is_filled(&self.address_line2);
        match (structured, combined) {
            (false, false) => AddressKind::Undetermined,
            (true, false) => AddressKind::Structured,
            (false, true) => AddressKind::Combined,
            (true, true) => AddressKind::Conflicting,
        }
    }

    /// Resolve the address to a single shape.
    ///
    /// Undetermined addresses resolve to the structured shape. Returns `None`
    /// for conflicting addresses.
    pub fn shape(&self) -> Option<AddressShape<'_>> {
        match self.kind() {
            AddressKind::Conflicting => None,
            AddressKind::Combined => Some(AddressShape::Combined {
                name: self.name.as_deref(),
                address_line1: self.address_line1.as_deref(),
                address_line2: self.address_line2.as_deref(),
                country_code: self.country_code.as_deref(),
            }),
            AddressKind::Structured | AddressKind::Undetermined => {
                Some(AddressShape::Structured {
                    name: self.name.as_deref(),
                    street: self.street.as_deref(),
                    house_no: self.house_no.as_deref(),
                    postal_code: self.postal_code.as_deref(),
                    town: self.town.as_deref(),
                    country_code: self.country_code.as_deref(),
                })
            }
        }
    }

    /// True if no field carries a non-blank value.
    pub fn is_empty(&self) -> bool {
        !(is_filled(&self.name)
            || is_filled(&self.address_line1)
            || is_filled(&self.address_line2)
            || is_filled(&self.street)
            || is_filled(&self.house_no)
            || is_filled(&self.postal_code)
            || is_filled(&self.town)
            || is_filled(&self.country_code))
    }
}

/// Kind of payment reference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReferenceType {
    /// QRR: 27-digit QR reference with Mod10-recursive check digit.
    Qrr,
    /// SCOR: ISO 11649 creditor reference (`RF` + Mod97 check digits).
    Scor,
    /// NON: no reference.
    #[default]
    Non,
}

impl ReferenceType {
    /// Code used in the QR payload.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Qrr => "QRR",
            Self::Scor => "SCOR",
            Self::Non => "NON",
        }
    }

    /// Parse from the QR payload code.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "QRR" => Some(Self::Qrr),
            "SCOR" => Some(Self::Scor),
            "NON" => Some(Self::Non),
            _ => None,
        }
    }
}

/// Payment reference and its declared type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub reference_type: ReferenceType,
    /// Reference text. Must be `None` (or blank) for [`ReferenceType::Non`].
    pub value: Option<String>,
}

impl Reference {
    /// QR reference (QRR).
    pub fn qr(value: impl Into<String>) -> Self {
        Self {
            reference_type: ReferenceType::Qrr,
            value: Some(value.into()),
        }
    }

    /// ISO 11649 creditor reference (SCOR).
    pub fn creditor(value: impl Into<String>) -> Self {
        Self {
            reference_type: ReferenceType::Scor,
            value: Some(value.into()),
        }
    }

    /// No reference (NON).
    pub fn none() -> Self {
        Self::default()
    }
}

/// A bill that passed validation without errors.
///
/// Holds the cleaned copy produced by validation. Only obtainable through
/// [`validate`](super::validate), [`ValidatedBill::try_from`] or
/// [`BillBuilder::build`](super::BillBuilder::build).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidatedBill(pub(crate) Bill);

impl ValidatedBill {
    /// The cleaned bill.
    pub fn bill(&self) -> &Bill {
        &self.0
    }

    /// Unwrap into the cleaned bill.
    pub fn into_inner(self) -> Bill {
        self.0
    }
}

impl std::ops::Deref for ValidatedBill {
    type Target = Bill;

    fn deref(&self) -> &Bill {
        &self.0
    }
}

impl AsRef<Bill> for ValidatedBill {
    fn as_ref(&self) -> &Bill {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn structured() -> Address {
        Address {
            name: Some("Robert Schneider AG".into()),
            street: Some("Rue du Lac".into()),
            house_no: Some("1268".into()),
            postal_code: Some("2501".into()),
            town: Some("Biel".into()),
            country_code: Some("CH".into()),
            ..Default::default()
        }
    }

    #[test]
    fn address_kinds() {
        assert_eq!(Address::default().kind(), AddressKind::Undetermined);
        assert_eq!(structured().kind(), AddressKind::Structured);

        let combined = Address {
            name: Some("Pia Rutschmann".into()),
            address_line1: Some("Marktgasse 28".into()),
            address_line2: Some("9400 Rorschach".into()),
            country_code: Some("CH".into()),
            ..Default::default()
        };
        assert_eq!(combined.kind(), AddressKind::Combined);

        let conflicting = Address {
            address_line1: Some("Marktgasse 28".into()),
            ..structured()
        };
        assert_eq!(conflicting.kind(), AddressKind::Conflicting);
        assert!(conflicting.shape().is_none());
    }

    #[test]
    fn blank_fields_do_not_count() {
        let addr = Address {
            name: Some("  ".into()),
            street: Some("".into()),
            ..Default::default()
        };
        assert!(addr.is_empty());
        assert_eq!(addr.kind(), AddressKind::Undetermined);
    }

    #[test]
    fn shape_of_structured_address() {
        let addr = structured();
        match addr.shape() {
            Some(AddressShape::Structured { town, .. }) => assert_eq!(town, Some("Biel")),
            other => panic!("unexpected shape: {other:?}"),
        }
    }

    #[test]
    fn reference_type_codes() {
        for t in [ReferenceType::Qrr, ReferenceType::Scor, ReferenceType::Non] {
            assert_eq!(ReferenceType::from_code(t.code()), Some(t));
        }
        assert_eq!(ReferenceType::from_code("qrr"), None);
        assert_eq!(ReferenceType::from_code(""), None);
    }
}
