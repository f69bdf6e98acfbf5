use chrono::NaiveDate;
use rust_decimal_macros::dec;
use zahlteil::swico::{self, PaymentCondition, RateDetail, SwicoBillInformation};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// --- Decoding ---

#[test]
fn decode_with_escaped_slash() {
    let info = swico::decode(r"//S1/10/X.66711/20/405\/1/40/0:30").unwrap();
    assert_eq!(info.invoice_number.as_deref(), Some("X.66711"));
    assert_eq!(info.customer_reference.as_deref(), Some("405/1"));
    assert_eq!(info.payment_conditions, vec![PaymentCondition::new(dec!(0), 30)]);
    assert_eq!(info.invoice_date, None);
}

#[test]
fn decode_absent_or_foreign_text() {
    assert_eq!(swico::decode(None), None);
    assert_eq!(swico::decode(""), None);
    assert_eq!(swico::decode("//S2/10/X"), None);
    assert_eq!(swico::decode("S1/10/X"), None);
}

#[test]
fn decode_empty_bodies() {
    for text in ["//S1/", "//S1/10//11//20//30/"] {
        let info = swico::decode(text).unwrap();
        assert!(info.is_empty(), "{text}");
    }
}

#[test]
fn empty_value_still_advances_tag_order() {
    let info = swico::decode("//S1/20//10/INV").unwrap();
    assert_eq!(info.invoice_number, None);
}

#[test]
fn repeated_tag_overwrites() {
    let info = swico::decode("//S1/10/FIRST/10/SECOND").unwrap();
    assert_eq!(info.invoice_number.as_deref(), Some("SECOND"));
}

#[test]
fn decode_example_with_vat_details() {
    let info = swico::decode(
        "//S1/10/10104/11/180228/30/395856455/31/180226180227/32/3.7:400.19;7.7:553.39;0:14/40/0:30",
    )
    .unwrap();
    assert_eq!(info.invoice_number.as_deref(), Some("10104"));
    assert_eq!(info.invoice_date, Some(date(2018, 2, 28)));
    assert_eq!(info.vat_number.as_deref(), Some("395856455"));
    assert_eq!(info.vat_start_date, Some(date(2018, 2, 26)));
    assert_eq!(info.vat_end_date, Some(date(2018, 2, 27)));
    assert_eq!(
        info.vat_rate_details,
        vec![
            RateDetail::new(dec!(3.7), dec!(400.19)),
            RateDetail::new(dec!(7.7), dec!(553.39)),
            RateDetail::new(dec!(0), dec!(14)),
        ]
    );
    assert_eq!(info.due_date(), Some(date(2018, 3, 30)));
}

#[test]
fn malformed_values_are_skipped() {
    let info = swico::decode("//S1/10/INV/11/991399/30/CHE/32/x/40/2:10;y;0:30").unwrap();
    assert_eq!(info.invoice_number.as_deref(), Some("INV"));
    assert_eq!(info.invoice_date, None);
    assert_eq!(info.vat_number.as_deref(), Some("CHE"));
    assert_eq!(info.vat_rate, None);
    assert_eq!(info.payment_conditions, vec![PaymentCondition::new(dec!(2), 10)]);
}

#[test]
fn negative_and_signed_numbers_are_malformed() {
    let info = swico::decode("//S1/32/-7.7/40/+2:10").unwrap();
    assert!(info.is_empty());
}

// --- Encoding ---

#[test]
fn encode_full_information() {
    let info = SwicoBillInformation {
        invoice_number: Some("10201409".into()),
        invoice_date: Some(date(2019, 5, 12)),
        customer_reference: Some("1400.000-53".into()),
        vat_number: Some("106017086".into()),
        vat_date: Some(date(2018, 5, 8)),
        vat_rate: Some(dec!(7.7)),
        payment_conditions: vec![
            PaymentCondition::new(dec!(2), 10),
            PaymentCondition::new(dec!(0), 30),
        ],
        ..Default::default()
    };
    assert_eq!(
        info.encode(),
        "//S1/10/10201409/11/190512/20/1400.000-53/30/106017086/31/180508/32/7.7/40/2:10;0:30"
    );
}

#[test]
fn encode_omits_absent_fields() {
    let info = SwicoBillInformation {
        vat_import_taxes: vec![RateDetail::new(dec!(7.7), dec!(48.37))],
        ..Default::default()
    };
    assert_eq!(swico::encode(&info), "//S1/33/7.7:48.37");
}

#[test]
fn encode_then_decode_restores_information() {
    let info = SwicoBillInformation {
        invoice_number: Some(r"2020/05\A".into()),
        customer_reference: Some("K-17".into()),
        vat_rate_details: vec![
            RateDetail::new(dec!(8), dec!(1000)),
            RateDetail::new(dec!(2.5), dec!(51.80)),
        ],
        payment_conditions: vec![PaymentCondition::new(dec!(1.5), 20)],
        ..Default::default()
    };
    let text = swico::encode(&info);
    assert_eq!(swico::decode(text.as_str()), Some(info));
}

#[test]
fn serde_roundtrip() {
    let info = SwicoBillInformation {
        invoice_date: Some(date(2019, 5, 12)),
        vat_rate: Some(dec!(7.7)),
        ..Default::default()
    };
    let json = serde_json::to_string(&info).unwrap();
    assert!(json.contains(r#""invoice_date":"2019-05-12""#));
    assert!(json.contains(r#""vat_rate":"7.7""#));
    let back: SwicoBillInformation = serde_json::from_str(&json).unwrap();
    assert_eq!(back, info);
}
