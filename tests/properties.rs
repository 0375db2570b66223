use glotbase_core::core::affix::{apply_affix, midpoint};
use glotbase_core::core::lexicon::Lexicon;
use glotbase_core::core::rules::AffixRuleBook;
use glotbase_core::core::syntax::{validate_word_order, validate_word_order_strict};
use glotbase_core::core::types::{
    AffixType, NewAffixRule, NewWord, PartOfSpeech, WordEntry, WordOrder,
};
use proptest::prelude::*;

fn entry(romanization: &str, native: &str) -> WordEntry {
    let mut lexicon = Lexicon::new();
    let mut word = NewWord::root(romanization, PartOfSpeech::Verb);
    word.native_script = native.to_string();
    lexicon.add(word).clone()
}

fn rule(affix_type: AffixType, replacement: &str) -> glotbase_core::AffixRule {
    let mut book = AffixRuleBook::new();
    book.add(NewAffixRule::new("r", affix_type, replacement)).clone()
}

fn any_pos() -> impl Strategy<Value = PartOfSpeech> {
    prop::sample::select(PartOfSpeech::ALL.to_vec())
}

fn any_order() -> impl Strategy<Value = WordOrder> {
    prop::sample::select(WordOrder::ALL.to_vec())
}

proptest! {
    #[test]
    fn suffix_appends(rom in "\\PC{0,12}", native in "\\PC{0,6}") {
        let form = apply_affix(&entry(&rom, &native), &rule(AffixType::Suffix, "$ROOT-an"));
        prop_assert_eq!(form.romanization, format!("{}an", rom));
    }

    #[test]
    fn prefix_prepends(rom in "\\PC{0,12}") {
        let form = apply_affix(&entry(&rom, ""), &rule(AffixType::Prefix, "me-$ROOT"));
        prop_assert_eq!(form.romanization, format!("me{}", rom));
        prop_assert_eq!(form.native_script, "");
    }

    #[test]
    fn circumfix_wraps(rom in "\\PC{0,12}", native in "\\PC{1,6}") {
        let form = apply_affix(&entry(&rom, &native), &rule(AffixType::Circumfix, "ke-$ROOT-an"));
        prop_assert_eq!(form.romanization, format!("ke{}an", rom));
        prop_assert_eq!(form.native_script, format!("ke{}an", native));
    }

    #[test]
    fn infix_lands_at_midpoint_and_removes_cleanly(rom in "\\PC{0,12}") {
        let form = apply_affix(&entry(&rom, ""), &rule(AffixType::Infix, "-um-"));
        let at = midpoint(&rom);
        prop_assert_eq!(&form.romanization[at..at + 2], "um");
        let mut restored = form.romanization.clone();
        restored.replace_range(at..at + 2, "");
        prop_assert_eq!(restored, rom);
    }

    #[test]
    fn strict_validator_passes_short_sentences(
        pos in prop::collection::vec(any_pos(), 0..2),
        order in any_order(),
    ) {
        prop_assert!(validate_word_order_strict(pos.as_slice(), order).is_valid);
    }

    #[test]
    fn rich_pattern_has_one_label_per_word(
        pos in prop::collection::vec(any_pos(), 1..8),
        order in any_order(),
    ) {
        let result = validate_word_order(pos.as_slice(), order);
        prop_assert_eq!(result.pattern.len(), pos.len());
        prop_assert_eq!(result.expected_order, Some(order));
    }
}

#[test]
fn rich_validator_examples() {
    use PartOfSpeech::{Noun, Verb};
    assert!(validate_word_order(&[Verb, Noun, Noun], WordOrder::VSO).is_valid);
    assert!(!validate_word_order(&[Noun, Verb, Noun], WordOrder::VSO).is_valid);
}
