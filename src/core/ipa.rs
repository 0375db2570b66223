// File: src/core/ipa.rs
//! IPA symbol inventory used for pronunciation entry.
//!
//! Entries are strings, not chars: affricates carry a tie bar (`t͡ʃ`) and most
//! diacritics are combining marks with no base letter of their own.

/// A named group of symbols, e.g. close vowels or plosives.
pub type IpaGroup = (&'static str, &'static [&'static str]);

pub const VOWELS: &[IpaGroup] = &[
    ("close", &["i", "y", "ɨ", "ʉ", "ɯ", "u"]),
    ("near-close", &["ɪ", "ʏ", "ʊ"]),
    ("close-mid", &["e", "ø", "ɘ", "ɵ", "ɤ", "o"]),
    ("mid", &["ə"]),
    ("open-mid", &["ɛ", "œ", "ɜ", "ɞ", "ʌ", "ɔ"]),
    ("near-open", &["æ", "ɐ"]),
    ("open", &["a", "ɶ", "ɑ", "ɒ"]),
];

pub const CONSONANTS: &[IpaGroup] = &[
    ("plosive", &["p", "b", "t", "d", "ʈ", "ɖ", "c", "ɟ", "k", "g", "q", "ɢ", "ʔ"]),
    ("nasal", &["m", "ɱ", "n", "ɳ", "ɲ", "ŋ", "ɴ"]),
    ("trill", &["ʙ", "r", "ʀ"]),
    ("tap", &["ⱱ", "ɾ", "ɽ"]),
    (
        "fricative",
        &[
            "ɸ", "β", "f", "v", "θ", "ð", "s", "z", "ʃ", "ʒ", "ʂ", "ʐ", "ç", "ʝ", "x", "ɣ", "χ",
            "ʁ", "ħ", "ʕ", "h", "ɦ",
        ],
    ),
    ("lateral fricative", &["ɬ", "ɮ"]),
    ("approximant", &["ʋ", "ɹ", "ɻ", "j", "ɰ"]),
    ("lateral approximant", &["l", "ɭ", "ʎ", "ʟ"]),
    ("affricate", &["t\u{361}ʃ", "d\u{361}ʒ", "t\u{361}s", "d\u{361}z", "t\u{361}ɕ", "d\u{361}ʑ"]),
];

pub const DIACRITICS: &[IpaGroup] = &[
    ("length", &["ː", "ˑ", "\u{306}"]),
    ("stress", &["ˈ", "ˌ"]),
    ("tone", &["˥", "˦", "˧", "˨", "˩", "꜀", "꜁", "꜂", "꜃", "꜄", "꜅", "꜆"]),
    ("nasalization", &["\u{303}"]),
    ("voicing", &["\u{325}", "\u{32c}"]),
    ("aspiration", &["ʰ", "\u{324}"]),
    (
        "other",
        &[
            "\u{329}", "\u{32f}", "\u{30a}", "\u{30d}", "\u{31d}", "\u{31e}", "\u{318}", "\u{319}",
            "\u{32a}", "\u{33a}", "\u{33b}", "\u{33c}",
        ],
    ),
];

/// Every symbol in the inventory, vowels then consonants then diacritics.
pub fn all_symbols() -> impl Iterator<Item = &'static str> {
    VOWELS
        .iter()
        .chain(CONSONANTS)
        .chain(DIACRITICS)
        .flat_map(|(_, symbols)| symbols.iter().copied())
}

/// True when any inventory symbol occurs in `text`.
pub fn contains_ipa(text: &str) -> bool {
    all_symbols().any(|symbol| text.contains(symbol))
}

/// Pronunciations are accepted as long as they are non-empty.
pub fn validate_ipa(text: &str) -> bool {
    !text.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn affricates_are_single_entries_with_a_tie_bar() {
        let affricates = CONSONANTS.iter().find(|(name, _)| *name == "affricate").unwrap().1;
        assert_eq!(affricates.len(), 6);
        assert!(affricates.contains(&"t͡ʃ"));
        assert!(affricates.iter().all(|a| a.chars().count() == 3));
    }

    #[test]
    fn combining_diacritics_are_detected_on_any_base() {
        assert!(contains_ipa("\u{303}"));
        assert!(contains_ipa("٣\u{303}"));
        assert!(contains_ipa("\u{30a}"));
        assert!(contains_ipa("ʰ"));
    }

    #[test]
    fn detects_symbols_and_rejects_foreign_text() {
        assert!(contains_ipa("ˈt͡ʃa.ŋa"));
        assert!(contains_ipa("ɬ"));
        assert!(!contains_ipa("٣٤"));
        assert!(!contains_ipa(""));
    }

    #[test]
    fn validation_only_requires_content() {
        assert!(validate_ipa("???"));
        assert!(!validate_ipa(""));
    }

    #[test]
    fn inventory_has_no_duplicates() {
        let symbols: Vec<&str> = all_symbols().collect();
        let mut unique = symbols.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), symbols.len());
    }
}
