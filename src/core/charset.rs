//! QR-bill character set and text cleaning.
//!
//! Permitted: printable ASCII, Latin-1 Supplement, Latin Extended-A,
//! Ș ș Ț ț and the euro sign. Other characters are transliterated where a
//! reasonable replacement exists and reported otherwise.

/// Check whether `c` belongs to the QR-bill character set.
pub fn is_valid_qr_bill_char(c: char) -> bool {
    matches!(c,
        '\u{20}'..='\u{7E}'
        | '\u{A0}'..='\u{FF}'
        | '\u{100}'..='\u{17F}'
        | '\u{218}'..='\u{21B}'
        | '\u{20AC}')
}

/// Replacement for a character outside the permitted set, if any.
fn transliterate(c: char) -> Option<&'static str> {
    let replacement = match c {
        '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' | '\u{2032}' => "'",
        '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' | '\u{2033}' => "\"",
        '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2013}' | '\u{2014}' | '\u{2212}' => "-",
        '\u{2026}' => "...",
        '\u{2022}' => ".",
        'ǎ' | 'ạ' | 'ả' | 'ấ' | 'ầ' | 'ẩ' | 'ẫ' | 'ậ' | 'ắ' | 'ằ' | 'ẳ' | 'ẵ' | 'ặ' => "a",
        'Ǎ' | 'Ạ' | 'Ả' | 'Ấ' | 'Ầ' | 'Ẩ' | 'Ẫ' | 'Ậ' | 'Ắ' | 'Ằ' | 'Ẳ' | 'Ẵ' | 'Ặ' => "A",
        'ẹ' | 'ẻ' | 'ẽ' | 'ế' | 'ề' | 'ể' | 'ễ' | 'ệ' | 'ǝ' | 'ə' => "e",
        'Ẹ' | 'Ẻ' | 'Ẽ' | 'Ế' | 'Ề' | 'Ể' | 'Ễ' | 'Ệ' | 'Ǝ' | 'Ə' => "E",
        'ǐ' | 'ỉ' | 'ị' => "i",
        'Ǐ' | 'Ỉ' | 'Ị' => "I",
        'ǒ' | 'ơ' | 'ọ' | 'ỏ' | 'ố' | 'ồ' | 'ổ' | 'ỗ' | 'ộ' | 'ớ' | 'ờ' | 'ở' | 'ỡ' | 'ợ' => "o",
        'Ǒ' | 'Ơ' | 'Ọ' | 'Ỏ' | 'Ố' | 'Ồ' | 'Ổ' | 'Ỗ' | 'Ộ' | 'Ớ' | 'Ờ' | 'Ở' | 'Ỡ' | 'Ợ' => "O",
        'ǔ' | 'ǖ' | 'ǘ' | 'ǚ' | 'ǜ' | 'ư' | 'ụ' | 'ủ' | 'ứ' | 'ừ' | 'ử' | 'ữ' | 'ự' => "u",
        'Ǔ' | 'Ǖ' | 'Ǘ' | 'Ǚ' | 'Ǜ' | 'Ư' | 'Ụ' | 'Ủ' | 'Ứ' | 'Ừ' | 'Ử' | 'Ữ' | 'Ự' => "U",
        'ỳ' | 'ỵ' | 'ỷ' | 'ỹ' => "y",
        'Ỳ' | 'Ỵ' | 'Ỷ' | 'Ỹ' => "Y",
        'ẁ' | 'ẃ' | 'ẅ' => "w",
        'Ẁ' | 'Ẃ' | 'Ẅ' => "W",
        'ǧ' => "g",
        'Ǧ' => "G",
        'ǩ' => "k",
        'Ǩ' => "K",
        'ǰ' => "j",
        'ḍ' => "d",
        'Ḍ' => "D",
        'ḥ' => "h",
        'Ḥ' => "H",
        'ṃ' => "m",
        'Ṃ' => "M",
        'ṇ' => "n",
        'Ṇ' => "N",
        'ṛ' => "r",
        'Ṛ' => "R",
        'ṣ' => "s",
        'Ṣ' => "S",
        'ṭ' => "t",
        'Ṭ' => "T",
        'ƒ' => "f",
        'ẞ' => "SS",
        'Ǆ' | 'ǅ' => "DZ",
        'ǆ' => "dz",
        'Ǉ' | 'ǈ' => "LJ",
        'ǉ' => "lj",
        'Ǌ' | 'ǋ' => "NJ",
        'ǌ' => "nj",
        _ => return None,
    };
    Some(replacement)
}

/// Result of cleaning a text value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanedText {
    /// Trimmed text with whitespace runs collapsed and characters
    /// transliterated. Unsupported characters are removed.
    pub value: String,
    /// At least one character was transliterated.
    pub replaced: bool,
    /// Characters that could neither be kept nor transliterated.
    pub unsupported: Vec<char>,
}

/// Clean a text value for use on a QR-bill.
///
/// Trims the value, collapses every run of whitespace (including line breaks
/// and non-breaking spaces) into a single space, and maps characters outside
/// the permitted set.
///
/// ```
/// use zahlteil::core::clean_text;
///
/// let cleaned = clean_text("  Zahlung\t\t„Miete“  ");
/// assert_eq!(cleaned.value, "Zahlung \"Miete\"");
/// assert!(cleaned.replaced);
/// ```
pub fn clean_text(input: &str) -> CleanedText {
    let mut out = CleanedText::default();
    let mut pending_space = false;

    for c in input.chars() {
        if c.is_whitespace() {
            pending_space = !out.value.is_empty();
            continue;
        }

        let mapped = if is_valid_qr_bill_char(c) {
            None
        } else if let Some(replacement) = transliterate(c) {
            out.replaced = true;
            Some(replacement)
        } else {
            if !out.unsupported.contains(&c) {
                out.unsupported.push(c);
            }
            continue;
        };

        if pending_space {
            out.value.push(' ');
            pending_space = false;
        }
        match mapped {
            Some(replacement) => out.value.push_str(replacement),
            None => out.value.push(c),
        }
    }

    out
}

/// Truncate `value` to at most `max` characters.
pub(crate) fn clipped(value: &str, max: usize) -> Option<String> {
    if value.chars().count() <= max {
        return None;
    }
    Some(value.chars().take(max).collect::<String>().trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permitted_characters() {
        for c in ['A', 'z', '0', ' ', '~', 'ä', 'é', 'ß', 'ÿ', 'Ł', 'ő', 'Ș', 'ț', '€'] {
            assert!(is_valid_qr_bill_char(c), "{c} should be permitted");
        }
        for c in ['\n', '\t', '\u{7F}', 'ǎ', '“', '—', '中', '😀'] {
            assert!(!is_valid_qr_bill_char(c), "{c:?} should not be permitted");
        }
    }

    #[test]
    fn whitespace_is_collapsed() {
        let cleaned = clean_text("\n  Rue  du\u{A0}Lac \r\n 1268 ");
        assert_eq!(cleaned.value, "Rue du Lac 1268");
        assert!(!cleaned.replaced);
        assert!(cleaned.unsupported.is_empty());
    }

    #[test]
    fn accented_latin_is_kept() {
        let cleaned = clean_text("Zürich Genève Łódź");
        assert_eq!(cleaned.value, "Zürich Genève Łódź");
        assert!(!cleaned.replaced);
    }

    #[test]
    fn transliteration() {
        let cleaned = clean_text("Nguyễn – Trần…");
        assert_eq!(cleaned.value, "Nguyen - Tran...");
        assert!(cleaned.replaced);
    }

    #[test]
    fn untranslatable_characters_are_reported() {
        let cleaned = clean_text("Preis 中 😀 中");
        assert_eq!(cleaned.value, "Preis");
        assert_eq!(cleaned.unsupported, vec!['中', '😀']);
    }

    #[test]
    fn clipping() {
        assert_eq!(clipped("Biel", 35), None);
        assert_eq!(clipped("abcdef", 4), Some("abcd".to_string()));
        assert_eq!(clipped("ab cdef", 3), Some("ab".to_string()));
        assert_eq!(clipped("ääää", 2), Some("ää".to_string()));
    }
}
