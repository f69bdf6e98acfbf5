//! ISO 3166-1 alpha-2 country codes accepted in creditor and debtor
//! addresses.

/// Check whether `code` is a known ISO 3166-1 alpha-2 country code.
/// Codes must be uppercase.
pub fn is_known_country_code(code: &str) -> bool {
    COUNTRY_CODES.binary_search(&code).is_ok()
}

/// Check whether accounts from country `code` may receive QR-bill
/// payments. Only Switzerland and Liechtenstein qualify.
pub fn is_qr_bill_account_country(code: &str) -> bool {
    matches!(code, "CH" | "LI")
}

/// Complete list of ISO 3166-1 alpha-2 country codes (249 entries).
/// Sorted for binary search.
static COUNTRY_CODES: &[&str] = &[
    "AD", "AE", "AF", "AG", "AI", "AL", "AM", "AO", "AQ", "AR", "AS", "AT", "AU", "AW", "AX", "AZ",
    "BA", "BB", "BD", "BE", "BF", "BG", "BH", "BI", "BJ", "BL", "BM", "BN", "BO", "BQ", "BR", "BS",
    "BT", "BV", "BW", "BY", "BZ", "CA", "CC", "CD", "CF", "CG", "CH", "CI", "CK", "CL", "CM", "CN",
    "CO", "CR", "CU", "CV", "CW", "CX", "CY", "CZ", "DE", "DJ", "DK", "DM", "DO", "DZ", "EC", "EE",
    "EG", "EH", "ER", "ES", "ET", "FI", "FJ", "FK", "FM", "FO", "FR", "GA", "GB", "GD", "GE", "GF",
    "GG", "GH", "GI", "GL", "GM", "GN", "GP", "GQ", "GR", "GS", "GT", "GU", "GW", "GY", "HK", "HM",
    "HN", "HR", "HT", "HU", "ID", "IE", "IL", "IM", "IN", "IO", "IQ", "IR", "IS", "IT", "JE", "JM",
    "JO", "JP", "KE", "KG", "KH", "KI", "KM", "KN", "KP", "KR", "KW", "KY", "KZ", "LA", "LB", "LC",
    "LI", "LK", "LR", "LS", "LT", "LU", "LV", "LY", "MA", "MC", "MD", "ME", "MF", "MG", "MH", "MK",
    "ML", "MM", "MN", "MO", "MP", "MQ", "MR", "MS", "MT", "MU", "MV", "MW", "MX", "MY", "MZ", "NA",
    "NC", "NE", "NF", "NG", "NI", "NL", "NO", "NP", "NR", "NU", "NZ", "OM", "PA", "PE", "PF", "PG",
    "PH", "PK", "PL", "PM", "PN", "PR", "PS", "PT", "PW", "PY", "QA", "RE", "RO", "RS", "RU", "RW",
    "SA", "SB", "SC", "SD", "SE", "SG", "SH", "SI", "SJ", "SK", "SL", "SM", "SN", "SO", "SR", "SS",
    "ST", "SV", "SX", "SY", "SZ", "TC", "TD", "TF", "TG", "TH", "TJ", "TK", "TL", "TM", "TN", "TO",
    "TR", "TT", "TV", "TW", "TZ", "UA", "UG", "UM", "US", "UY", "UZ", "VA", "VC", "VE", "VG", "VI",
    "VN", "VU", "WF", "WS", "YE", "YT", "ZA", "ZM", "ZW",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_countries() {
        for code in ["CH", "LI", "DE", "AT", "FR", "IT"] {
            assert!(is_known_country_code(code), "{code}");
        }
        // Kosovo uses a user-assigned code outside ISO 3166-1.
        assert!(!is_known_country_code("XK"));
    }

    #[test]
    fn codes_must_be_normalized_first() {
        for code in ["ch", "Li", " CH", "CHE", "C", ""] {
            assert!(!is_known_country_code(code), "{code:?}");
        }
    }

    #[test]
    fn account_countries() {
        assert!(is_qr_bill_account_country("CH"));
        assert!(is_qr_bill_account_country("LI"));
        for code in ["DE", "AT", "li", "CHE", ""] {
            assert!(!is_qr_bill_account_country(code), "{code:?}");
        }
    }

    #[test]
    fn account_countries_are_known() {
        assert!(
            ["CH", "LI"]
                .into_iter()
                .all(|c| is_qr_bill_account_country(c) && is_known_country_code(c))
        );
    }

    #[test]
    fn list_is_sorted() {
        assert!(COUNTRY_CODES.windows(2).all(|w| w[0] < w[1]));
    }
}
