use super::{CODING_TYPE, PayloadOptions, QR_TYPE, TRAILER, VERSION};
use crate::core::{Address, AddressShape, INVARIANT, ValidatedBill};
use crate::swico;

/// Number of lines of an encoded address, including the type marker.
const ADDRESS_LINES: usize = 7;

/// Encode a validated bill as QR payload text with `\r\n` line separators.
pub fn encode(bill: &ValidatedBill) -> String {
    encode_with(bill, &PayloadOptions::default())
}

/// Encode a validated bill as QR payload text.
///
/// Emits the 31 mandatory lines; the bill information line follows if bill
/// information or alternative schemes are present, then the alternative
/// schemes. No separator follows the last line.
pub fn encode_with(bill: &ValidatedBill, options: &PayloadOptions) -> String {
    let mut lines: Vec<String> = vec![
        QR_TYPE.into(),
        VERSION.into(),
        CODING_TYPE.into(),
        bill.account.clone(),
    ];

    push_address(&mut lines, Some(&bill.creditor));
    // ultimate creditor, reserved for future use
    lines.extend(std::iter::repeat_n(String::new(), ADDRESS_LINES));

    lines.push(
        bill.amount
            .map(|amount| INVARIANT.format_amount(amount))
            .unwrap_or_default(),
    );
    lines.push(bill.currency.clone());

    push_address(&mut lines, bill.debtor.as_ref());

    lines.push(bill.reference.reference_type.code().into());
    lines.push(bill.reference.value.clone().unwrap_or_default());
    lines.push(bill.unstructured_message.clone().unwrap_or_default());
    lines.push(TRAILER.into());

    if bill.bill_information.is_some() || !bill.alternative_schemes.is_empty() {
        lines.push(
            bill.bill_information
                .as_ref()
                .map(swico::encode)
                .unwrap_or_default(),
        );
        lines.extend(bill.alternative_schemes.iter().cloned());
    }

    lines.join(options.line_separator.as_str())
}

fn push_address(lines: &mut Vec<String>, address: Option<&Address>) {
    let text = |value: Option<&str>| value.unwrap_or_default().to_string();
    match address.and_then(Address::shape) {
        Some(AddressShape::Structured {
            name,
            street,
            house_no,
            postal_code,
            town,
            country_code,
        }) => lines.extend([
            "S".into(),
            text(name),
            text(street),
            text(house_no),
            text(postal_code),
            text(town),
            text(country_code),
        ]),
        Some(AddressShape::Combined {
            name,
            address_line1,
            address_line2,
            country_code,
        }) => lines.extend([
            "K".into(),
            text(name),
            text(address_line1),
            text(address_line2),
            String::new(),
            String::new(),
            text(country_code),
        ]),
        // absent debtor
        None => lines.extend(std::iter::repeat_n(String::new(), ADDRESS_LINES)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::*;
    use crate::payload::{LineSeparator, MANDATORY_LINES, PayloadOptionsBuilder};
    use crate::swico::SwicoBillInformation;
    use rust_decimal_macros::dec;

    fn validated(bill: Bill) -> ValidatedBill {
        ValidatedBill::try_from(bill).unwrap()
    }

    fn minimal() -> Bill {
        BillBuilder::new(
            "CH9300762011623852957",
            AddressBuilder::structured("Robert Schneider AG", "2501", "Biel", "CH").build(),
        )
        .build_unchecked()
    }

    fn lf() -> PayloadOptions {
        PayloadOptionsBuilder::new()
            .line_separator(LineSeparator::Lf)
            .build()
    }

    #[test]
    fn minimal_bill_has_mandatory_lines_only() {
        let text = encode_with(&validated(minimal()), &lf());
        let lines: Vec<&str> = text.split('\n').collect();
        assert_eq!(lines.len(), MANDATORY_LINES);
        assert_eq!(&lines[..4], ["SPC", "0200", "1", "CH9300762011623852957"]);
        assert_eq!(
            &lines[4..11],
            ["S", "Robert Schneider AG", "", "", "2501", "Biel", "CH"]
        );
        assert!(lines[11..18].iter().all(|l| l.is_empty()));
        assert_eq!(&lines[18..20], ["", "CHF"]);
        assert!(lines[20..27].iter().all(|l| l.is_empty()));
        assert_eq!(&lines[27..], ["NON", "", "", "EPD"]);
    }

    #[test]
    fn crlf_is_the_default() {
        let text = encode(&validated(minimal()));
        assert!(text.starts_with("SPC\r\n0200\r\n1\r\n"));
        assert!(text.ends_with("\r\nEPD"));
    }

    #[test]
    fn combined_debtor_and_amount() {
        let bill = Bill {
            amount: Some(dec!(50)),
            debtor: Some(
                AddressBuilder::combined("Pia Rutschmann", "9400 Rorschach", "CH")
                    .address_line1("Marktgasse 28")
                    .build(),
            ),
            ..minimal()
        };
        let text = encode_with(&validated(bill), &lf());
        let lines: Vec<&str> = text.split('\n').collect();
        assert_eq!(lines[18], "50.00");
        assert_eq!(
            &lines[20..27],
            ["K", "Pia Rutschmann", "Marktgasse 28", "9400 Rorschach", "", "", "CH"]
        );
    }

    #[test]
    fn alternative_schemes_force_bill_information_line() {
        let bill = Bill {
            alternative_schemes: vec!["eBill/B/41010560425610173".into()],
            ..minimal()
        };
        let text = encode_with(&validated(bill), &lf());
        let lines: Vec<&str> = text.split('\n').collect();
        assert_eq!(lines.len(), MANDATORY_LINES + 2);
        assert_eq!(lines[31], "");
        assert_eq!(lines[32], "eBill/B/41010560425610173");
    }

    #[test]
    fn bill_information_line() {
        let bill = Bill {
            bill_information: Some(SwicoBillInformation {
                invoice_number: Some("10201409".into()),
                ..Default::default()
            }),
            ..minimal()
        };
        let text = encode_with(&validated(bill), &lf());
        assert!(text.ends_with("\nEPD\n//S1/10/10201409"));
    }
}
