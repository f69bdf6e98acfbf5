//! # zahlteil
//!
//! Core of the Swiss QR-bill: bill data model, validation, the text payload
//! carried in the QR code and the Swico S1 structured bill information.
//!
//! All amounts use [`rust_decimal::Decimal`], never floating point. Parsing
//! and formatting of numbers and dates do not depend on the process locale.
//!
//! ## Quick Start
//!
//! ```rust
//! use rust_decimal_macros::dec;
//! use zahlteil::core::*;
//!
//! let bill = BillBuilder::new(
//!     "CH44 3199 9123 0008 8901 2",
//!     AddressBuilder::structured("Robert Schneider AG", "2501", "Biel", "CH")
//!         .street("Rue du Lac")
//!         .house_no("1268")
//!         .build(),
//! )
//! .amount(dec!(1949.75))
//! .reference(Reference::qr("210000000003139471430009017"))
//! .debtor(
//!     AddressBuilder::structured("Pia-Maria Rutschmann-Schnyder", "9400", "Rorschach", "CH")
//!         .street("Grosse Marktgasse")
//!         .house_no("28")
//!         .build(),
//! )
//! .unstructured_message("Auftrag vom 15.06.2020")
//! .build()
//! .unwrap();
//!
//! let text = zahlteil::payload::encode(&bill);
//! assert!(text.starts_with("SPC\r\n0200\r\n1\r\nCH4431999123000889012\r\nS\r\n"));
//!
//! let decoded = zahlteil::payload::decode(&text).unwrap();
//! assert_eq!(&decoded, bill.bill());
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `payload` (default) | QR code text payload encoding and decoding |

pub mod core;
pub mod swico;

#[cfg(feature = "payload")]
pub mod payload;

pub use crate::core::*;
