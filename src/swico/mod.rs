//! Swico S1 structured bill information.
//!
//! The S1 syntax embeds invoice, VAT and payment-condition metadata in the
//! bill information line of a QR-bill:
//!
//! ```text
//! //S1/10/10201409/11/190512/20/1400.000-53/30/106017086/31/180508/32/7.7/40/2:10;0:30
//! ```
//!
//! Each `/<tag>/<value>` pair carries one field. `/` and `\` inside text
//! values are escaped with a preceding `\`.

mod decode;
mod encode;

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use decode::decode;
pub use encode::encode;

/// Prefix every S1 text starts with.
pub const S1_PREFIX: &str = "//S1/";

/// Tags of the S1 syntax in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) enum Tag {
    InvoiceNumber,
    InvoiceDate,
    CustomerReference,
    VatNumber,
    VatDates,
    VatRates,
    VatImportTaxes,
    PaymentConditions,
}

impl Tag {
    pub(crate) fn code(self) -> &'static str {
        match self {
            Self::InvoiceNumber => "10",
            Self::InvoiceDate => "11",
            Self::CustomerReference => "20",
            Self::VatNumber => "30",
            Self::VatDates => "31",
            Self::VatRates => "32",
            Self::VatImportTaxes => "33",
            Self::PaymentConditions => "40",
        }
    }

    pub(crate) fn from_code(code: &str) -> Option<Self> {
        match code {
            "10" => Some(Self::InvoiceNumber),
            "11" => Some(Self::InvoiceDate),
            "20" => Some(Self::CustomerReference),
            "30" => Some(Self::VatNumber),
            "31" => Some(Self::VatDates),
            "32" => Some(Self::VatRates),
            "33" => Some(Self::VatImportTaxes),
            "40" => Some(Self::PaymentConditions),
            _ => None,
        }
    }
}

/// VAT rate applied to an amount (tag 32 details and tag 33 import taxes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateDetail {
    /// VAT rate in percent.
    pub rate: Decimal,
    /// Net amount (tag 32) or VAT amount (tag 33) the rate applies to.
    pub amount: Decimal,
}

impl RateDetail {
    pub fn new(rate: Decimal, amount: Decimal) -> Self {
        Self { rate, amount }
    }
}

/// Cash discount granted when paying within a number of days.
/// A discount of 0 marks the payment term proper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentCondition {
    /// Discount in percent.
    pub discount: Decimal,
    /// Days after the invoice date.
    pub days: u32,
}

impl PaymentCondition {
    pub fn new(discount: Decimal, days: u32) -> Self {
        Self { discount, days }
    }
}

/// Decoded Swico S1 bill information. Every field is optional; empty lists
/// mean the field is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwicoBillInformation {
    /// Tag 10: invoice number.
    pub invoice_number: Option<String>,
    /// Tag 11: invoice date.
    pub invoice_date: Option<NaiveDate>,
    /// Tag 20: customer reference.
    pub customer_reference: Option<String>,
    /// Tag 30: VAT number (UID without `CHE` prefix and suffix).
    pub vat_number: Option<String>,
    /// Tag 31: VAT date (single date of service).
    pub vat_date: Option<NaiveDate>,
    /// Tag 31: start of the VAT service period.
    pub vat_start_date: Option<NaiveDate>,
    /// Tag 31: end of the VAT service period.
    pub vat_end_date: Option<NaiveDate>,
    /// Tag 32: single VAT rate for the whole amount.
    pub vat_rate: Option<Decimal>,
    /// Tag 32: VAT rates with their net amounts.
    pub vat_rate_details: Vec<RateDetail>,
    /// Tag 33: VAT on imports.
    pub vat_import_taxes: Vec<RateDetail>,
    /// Tag 40: payment conditions.
    pub payment_conditions: Vec<PaymentCondition>,
}

impl SwicoBillInformation {
    /// Invoice date plus the longest payment condition period.
    ///
    /// `None` unless both the invoice date and at least one payment
    /// condition are present.
    pub fn due_date(&self) -> Option<NaiveDate> {
        let invoice_date = self.invoice_date?;
        let days = self.payment_conditions.iter().map(|c| c.days).max()?;
        invoice_date.checked_add_days(Days::new(u64::from(days)))
    }

    /// True if no field is populated.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Encode as S1 text. Shorthand for [`encode`].
    pub fn encode(&self) -> String {
        encode(self)
    }

    /// Keep only what the S1 text can carry: a VAT date replaces a VAT
    /// period, an incomplete period is dropped, and a single VAT rate
    /// replaces rate details.
    pub(crate) fn normalized(mut self) -> Self {
        if self.vat_date.is_some() || self.vat_start_date.is_none() || self.vat_end_date.is_none()
        {
            self.vat_start_date = None;
            self.vat_end_date = None;
        }
        if self.vat_rate.is_some() {
            self.vat_rate_details.clear();
        }
        self
    }
}
