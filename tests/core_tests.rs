use zahlteil::core::*;

// --- Checksums ---

#[test]
fn mod10_check_digit_of_reference_body() {
    assert_eq!(mod10_check_digit("21000000000313947143000901"), Some(7));
    assert_eq!(mod10_check_digit(""), Some(0));
    assert_eq!(mod10_check_digit("12a"), None);
}

#[test]
fn mod10_validates_full_references() {
    assert!(mod10_validate("210000000003139471430009017"));
    assert!(mod10_validate("000000000000000000001878583"));
    assert!(!mod10_validate("210000000003139471430009071"));
}

#[test]
fn mod97_validates_ibans_and_creditor_references() {
    for valid in [
        "CH4431999123000889012",
        "CH9300762011623852957",
        "LI21088100002324013AA",
        "DE89370400440532013000",
        "RF18539007547034",
        "RF18000000000539007547034",
    ] {
        assert!(mod97_validate(valid), "{valid}");
    }
    assert!(!mod97_validate("RF19539007547034"));
    assert!(!mod97_validate("RF18"));
    assert!(!mod97_validate("rf18539007547034"));
}

#[test]
fn mod97_check_digits_match_validation() {
    assert_eq!(mod97_check_digits("RF", "539007547034"), Some(18));
    assert_eq!(mod97_check_digits("CH", "31999123000889012"), Some(44));
    assert_eq!(mod97_check_digits("RF", "abc"), None);
}

// --- IBAN and references ---

#[test]
fn qr_iban_detection() {
    assert!(is_qr_iban("CH4431999123000889012"));
    assert!(is_qr_iban("CH44 3199 9123 0008 8901 2"));
    assert!(!is_qr_iban("CH9300762011623852957"));
    assert!(!is_qr_iban("LI21088100002324013AA"));
    assert!(!is_qr_iban("DE89370400440532013000"));
}

#[test]
fn iban_validation_ignores_whitespace_only() {
    assert!(is_valid_iban(" CH93 0076 2011 6238 5295 7 "));
    assert!(!is_valid_iban("ch9300762011623852957"));
    assert!(!is_valid_iban("CH93-0076-2011-6238-5295-7"));
    assert!(!is_valid_iban(""));
}

#[test]
fn qr_reference_validation() {
    assert!(is_valid_qr_reference("21 00000 00003 13947 14300 09017"));
    assert!(!is_valid_qr_reference("000000000000000000000000000"));
    assert!(!is_valid_qr_reference("21000000000313947143000901"));
    assert!(!is_valid_qr_reference("21000000000313947143000901A"));
}

#[test]
fn creditor_reference_validation() {
    assert!(is_valid_iso11649_reference("RF18 5390 0754 7034"));
    assert!(is_valid_iso11649_reference("RF18000000000539007547034"));
    assert!(!is_valid_iso11649_reference("RF180000000005390075470340"));
    assert!(!is_valid_iso11649_reference("XY18539007547034"));
}

#[test]
fn create_references() {
    let qr = create_qr_reference("2100000000031394714300090").unwrap();
    assert_eq!(qr, "021000000000313947143000903");
    assert!(is_valid_qr_reference(&qr));

    let scor = create_iso11649_reference("539007547034").unwrap();
    assert_eq!(scor, "RF18539007547034");

    assert!(matches!(
        create_qr_reference("12AB"),
        Err(QrBillError::Reference(_))
    ));
    assert!(create_qr_reference(&"1".repeat(27)).is_err());
    assert!(create_iso11649_reference(&"A".repeat(22)).is_err());
    assert!(create_iso11649_reference("AB-12").is_err());
}

#[test]
fn display_formatting() {
    assert_eq!(format_iban("CH4431999123000889012"), "CH44 3199 9123 0008 8901 2");
    assert_eq!(
        format_qr_reference("210000000003139471430009017"),
        "21 00000 00003 13947 14300 09017"
    );
    assert_eq!(format_iso11649_reference("RF18539007547034"), "RF18 5390 0754 7034");
}

// --- Character set ---

#[test]
fn permitted_characters() {
    for c in ['A', '~', 'é', 'ÿ', 'Ā', 'ſ', 'Ș', 'ț', '€'] {
        assert!(is_valid_qr_bill_char(c), "{c:?}");
    }
    for c in ['\n', '\u{7F}', '\u{180}', '\u{2019}', '中'] {
        assert!(!is_valid_qr_bill_char(c), "{c:?}");
    }
}

#[test]
fn clean_text_reports_unsupported_characters_once() {
    let cleaned = clean_text("A中B中C😀");
    assert_eq!(cleaned.value, "ABC");
    assert_eq!(cleaned.unsupported, vec!['中', '😀']);
    assert!(!cleaned.replaced);
}

#[test]
fn clean_text_collapses_whitespace() {
    let cleaned = clean_text("\n Rue  du\u{A0}Lac \r\n");
    assert_eq!(cleaned.value, "Rue du Lac");
    assert_eq!(clean_text(" \t ").value, "");
}

// --- Model ---

#[test]
fn address_kind_follows_populated_fields() {
    let structured = AddressBuilder::structured("A", "8000", "Zürich", "CH").build();
    assert_eq!(structured.kind(), AddressKind::Structured);
    assert!(matches!(structured.shape(), Some(AddressShape::Structured { .. })));

    let combined = AddressBuilder::combined("A", "8000 Zürich", "CH").build();
    assert_eq!(combined.kind(), AddressKind::Combined);

    let conflicting = Address {
        street: Some("Bahnhofstrasse".into()),
        ..combined
    };
    assert_eq!(conflicting.kind(), AddressKind::Conflicting);
    assert_eq!(conflicting.shape(), None);

    let blank = Address {
        name: Some("A".into()),
        street: Some("  ".into()),
        ..Default::default()
    };
    assert_eq!(blank.kind(), AddressKind::Undetermined);
    assert!(!blank.is_empty());
    assert!(Address::default().is_empty());
}

#[test]
fn reference_type_codes() {
    for t in [ReferenceType::Qrr, ReferenceType::Scor, ReferenceType::Non] {
        assert_eq!(ReferenceType::from_code(t.code()), Some(t));
    }
    assert_eq!(ReferenceType::from_code("qrr"), None);
    assert_eq!(Reference::none().reference_type, ReferenceType::Non);
}

#[test]
fn bill_defaults_to_chf() {
    let bill = Bill::default();
    assert_eq!(bill.currency, CURRENCY_CHF);
    assert_eq!(bill.amount, None);
    assert_eq!(bill.reference, Reference::none());
}

#[test]
fn bill_serde_roundtrip() {
    let bill = BillBuilder::new(
        "CH9300762011623852957",
        AddressBuilder::structured("Robert Schneider AG", "2501", "Biel", "CH").build(),
    )
    .amount(rust_decimal_macros::dec!(199.95))
    .reference(Reference::creditor("RF18539007547034"))
    .build_unchecked();
    let json = serde_json::to_string(&bill).unwrap();
    assert!(json.contains(r#""amount":"199.95""#));
    assert!(json.contains(r#""reference_type":"Scor""#));
    let back: Bill = serde_json::from_str(&json).unwrap();
    assert_eq!(back, bill);
}

#[test]
fn validated_bill_serializes_as_bill() {
    let validated = BillBuilder::new(
        "CH9300762011623852957",
        AddressBuilder::structured("Robert Schneider AG", "2501", "Biel", "CH").build(),
    )
    .build()
    .unwrap();
    assert_eq!(
        serde_json::to_value(&validated).unwrap(),
        serde_json::to_value(validated.bill()).unwrap()
    );
}
