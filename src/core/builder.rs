use rust_decimal::Decimal;

use super::error::QrBillError;
use super::types::*;
use crate::swico::SwicoBillInformation;

/// Builder for QR-bills.
///
/// ```
/// use zahlteil::core::*;
/// use rust_decimal_macros::dec;
///
/// let bill = BillBuilder::new(
///     "CH44 3199 9123 0008 8901 2",
///     AddressBuilder::structured("Robert Schneider AG", "2501", "Biel", "CH")
///         .street("Rue du Lac")
///         .house_no("1268")
///         .build(),
/// )
/// .amount(dec!(1949.75))
/// .reference(Reference::qr("21 00000 00003 13947 14300 09017"))
/// .unstructured_message("Auftrag vom 15.06.2020")
/// .build()
/// .unwrap();
///
/// assert_eq!(bill.account, "CH4431999123000889012");
/// assert_eq!(bill.reference.value.as_deref(), Some("210000000003139471430009017"));
/// ```
pub struct BillBuilder {
    bill: Bill,
}

impl BillBuilder {
    pub fn new(account: impl Into<String>, creditor: Address) -> Self {
        Self {
            bill: Bill {
                account: account.into(),
                creditor,
                ..Default::default()
            },
        }
    }

    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.bill.currency = currency.into();
        self
    }

    pub fn amount(mut self, amount: Decimal) -> Self {
        self.bill.amount = Some(amount);
        self
    }

    pub fn debtor(mut self, debtor: Address) -> Self {
        self.bill.debtor = Some(debtor);
        self
    }

    pub fn reference(mut self, reference: Reference) -> Self {
        self.bill.reference = reference;
        self
    }

    pub fn unstructured_message(mut self, message: impl Into<String>) -> Self {
        self.bill.unstructured_message = Some(message.into());
        self
    }

    pub fn bill_information(mut self, info: SwicoBillInformation) -> Self {
        self.bill.bill_information = Some(info);
        self
    }

    /// Add an alternative scheme line (at most two are allowed).
    pub fn alternative_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.bill.alternative_schemes.push(scheme.into());
        self
    }

    /// Build and validate. Fails with every validation error at once.
    pub fn build(self) -> Result<ValidatedBill, QrBillError> {
        ValidatedBill::try_from(self.bill)
    }

    /// Build without validation.
    pub fn build_unchecked(self) -> Bill {
        self.bill
    }
}

/// Builder for structured and combined addresses.
pub struct AddressBuilder {
    address: Address,
}

impl AddressBuilder {
    /// Structured address: street and house number are set separately.
    pub fn structured(
        name: impl Into<String>,
        postal_code: impl Into<String>,
        town: impl Into<String>,
        country_code: impl Into<String>,
    ) -> Self {
        Self {
            address: Address {
                name: Some(name.into()),
                postal_code: Some(postal_code.into()),
                town: Some(town.into()),
                country_code: Some(country_code.into()),
                ..Default::default()
            },
        }
    }

    /// Combined address: `address_line2` holds postal code and town.
    pub fn combined(
        name: impl Into<String>,
        address_line2: impl Into<String>,
        country_code: impl Into<String>,
    ) -> Self {
        Self {
            address: Address {
                name: Some(name.into()),
                address_line2: Some(address_line2.into()),
                country_code: Some(country_code.into()),
                ..Default::default()
            },
        }
    }

    pub fn street(mut self, street: impl Into<String>) -> Self {
        self.address.street = Some(street.into());
        self
    }

    pub fn house_no(mut self, house_no: impl Into<String>) -> Self {
        self.address.house_no = Some(house_no.into());
        self
    }

    pub fn address_line1(mut self, line: impl Into<String>) -> Self {
        self.address.address_line1 = Some(line.into());
        self
    }

    pub fn build(self) -> Address {
        self.address
    }
}
