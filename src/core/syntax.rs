// File: src/core/syntax.rs
use crate::core::types::{PartOfSpeech, WordEntry, WordOrder};

/// Anything that carries a part-of-speech tag can be checked for word order.
pub trait Tagged {
    fn part_of_speech(&self) -> PartOfSpeech;
}

impl Tagged for PartOfSpeech {
    fn part_of_speech(&self) -> PartOfSpeech {
        *self
    }
}

impl Tagged for WordEntry {
    fn part_of_speech(&self) -> PartOfSpeech {
        self.part_of_speech
    }
}

impl<T: Tagged + ?Sized> Tagged for &T {
    fn part_of_speech(&self) -> PartOfSpeech {
        (**self).part_of_speech()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationResult {
    pub is_valid: bool,
    /// Display label per word: `V`, `S/O`, or the tag's initial.
    pub pattern: Vec<String>,
    pub suggestions: Vec<String>,
    pub expected_order: Option<WordOrder>,
    pub actual_order: Option<String>,
    pub message: Option<String>,
}

impl ValidationResult {
    fn invalid_empty() -> Self {
        Self {
            is_valid: false,
            suggestions: vec!["Add at least one word to validate".to_string()],
            ..Self::default()
        }
    }
}

/// Two checkers coexist and are used by different screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationStrategy {
    /// Minimum-component checks, positional test and corrective suggestions.
    #[default]
    RichSuggestions,
    /// Compares the V/S/O order string with the expected order verbatim.
    StrictOrderString,
}

pub fn validate_with<W: Tagged>(
    strategy: ValidationStrategy,
    words: &[W],
    expected: WordOrder,
) -> ValidationResult {
    match strategy {
        ValidationStrategy::RichSuggestions => validate_word_order(words, expected),
        ValidationStrategy::StrictOrderString => validate_word_order_strict(words, expected),
    }
}

pub fn role_label(pos: PartOfSpeech) -> String {
    match pos {
        PartOfSpeech::Verb => "V".to_string(),
        PartOfSpeech::Noun | PartOfSpeech::Pronoun => "S/O".to_string(),
        other => other.as_str()[..1].to_ascii_uppercase(),
    }
}

/// Badge shown next to a word in the sentence builder.
pub fn word_order_indicator<W: Tagged>(word: &W) -> Option<&'static str> {
    match word.part_of_speech() {
        PartOfSpeech::Verb => Some("V"),
        PartOfSpeech::Noun | PartOfSpeech::Pronoun => Some("S/O"),
        _ => None,
    }
}

fn role_pattern<W: Tagged>(words: &[W]) -> Vec<String> {
    words.iter().map(|w| role_label(w.part_of_speech())).collect()
}

fn is_verb<W: Tagged>(w: &W) -> bool {
    w.part_of_speech() == PartOfSpeech::Verb
}

fn is_nominal<W: Tagged>(w: &W) -> bool {
    w.part_of_speech().is_nominal()
}

/// Only the first verb and the first two nouns/pronouns take part in the
/// positional test. Subject and object are not told apart, so VOS, OVS and
/// OSV accept exactly what VSO, SVO and SOV accept.
pub fn validate_word_order<W: Tagged>(words: &[W], expected: WordOrder) -> ValidationResult {
    if words.is_empty() {
        return ValidationResult {
            expected_order: Some(expected),
            ..ValidationResult::invalid_empty()
        };
    }

    let pattern = role_pattern(words);
    let mut suggestions = Vec::new();
    let mut is_valid = true;

    let verb = words.iter().position(is_verb);
    let nominal_count = words.iter().filter(|w| is_nominal(*w)).count();

    if verb.is_none() {
        suggestions.push("Add a verb to your sentence".to_string());
        is_valid = false;
    }
    if nominal_count < 2 {
        suggestions.push("Add at least 2 nouns/pronouns (subject and object)".to_string());
        is_valid = false;
    }

    if let (Some(v), true) = (verb, nominal_count >= 2) {
        let first = words.iter().position(is_nominal).unwrap_or(0);
        let second = words
            .iter()
            .enumerate()
            .skip(first + 1)
            .find(|(_, w)| is_nominal(*w))
            .map(|(i, _)| i)
            .unwrap_or(first);

        let holds = match expected {
            WordOrder::VSO | WordOrder::VOS => v < first && first < second,
            WordOrder::SVO | WordOrder::OVS => first < v && v < second,
            WordOrder::SOV | WordOrder::OSV => first < second && second < v,
        };

        if holds {
            suggestions.push(format!("✓ Perfect {} structure!", expected));
        } else {
            suggestions.push(format!("Expected {} word order", expected.description()));
            is_valid = false;
        }
    }

    ValidationResult {
        is_valid,
        pattern,
        suggestions,
        expected_order: Some(expected),
        ..ValidationResult::default()
    }
}

/// Builds the observed order from the first verb (V) and the first two
/// nouns/pronouns (S, then O) and requires an exact match. Fewer than two
/// words, or fewer than two roles found, always pass.
pub fn validate_word_order_strict<W: Tagged>(words: &[W], expected: WordOrder) -> ValidationResult {
    let pattern = role_pattern(words);
    if words.len() < 2 {
        return ValidationResult { is_valid: true, pattern, ..ValidationResult::default() };
    }

    let mut roles: Vec<(char, usize)> = Vec::with_capacity(3);
    if let Some(v) = words.iter().position(is_verb) {
        roles.push(('V', v));
    }
    let mut nominals = words.iter().enumerate().filter(|(_, w)| is_nominal(*w)).map(|(i, _)| i);
    if let Some(s) = nominals.next() {
        roles.push(('S', s));
    }
    if let Some(o) = nominals.next() {
        roles.push(('O', o));
    }
    roles.sort_by_key(|&(_, pos)| pos);
    let actual: String = roles.iter().map(|&(role, _)| role).collect();

    if actual.len() < 2 || actual == expected.as_str() {
        return ValidationResult { is_valid: true, pattern, ..ValidationResult::default() };
    }

    let found = if actual.is_empty() { "incomplete sentence" } else { actual.as_str() };
    ValidationResult {
        is_valid: false,
        pattern,
        suggestions: Vec::new(),
        message: Some(format!("Expected {} word order, but found {}", expected, found)),
        expected_order: Some(expected),
        actual_order: Some(actual),
    }
}

/// Dedicated verb-initial checker.
pub fn validate_vso<W: Tagged>(words: &[W]) -> ValidationResult {
    if words.is_empty() {
        return ValidationResult::invalid_empty();
    }

    let pattern = role_pattern(words);
    let mut suggestions = Vec::new();
    let mut is_valid = true;
    let starts_with_verb = is_verb(&words[0]);

    if words.len() < 2 {
        suggestions.push("VSO order requires at least a verb and one noun/pronoun".to_string());
        is_valid = false;
    }
    if !starts_with_verb {
        suggestions.push("VSO order should start with a verb (V)".to_string());
        is_valid = false;
    }
    if words.len() >= 2 && !words[1..].iter().any(is_nominal) {
        suggestions.push("Add a subject (noun/pronoun) after the verb".to_string());
        is_valid = false;
    }
    if words.len() >= 3 && starts_with_verb {
        match words[1..].iter().filter(|w| is_nominal(*w)).count() {
            0 => {}
            1 => suggestions.push("Good start! Add another noun/pronoun for object".to_string()),
            _ => suggestions.push("✓ Perfect VSO structure: Verb + Subject + Object".to_string()),
        }
    }
    if is_valid && suggestions.is_empty() {
        suggestions.push("✓ Valid VSO word order".to_string());
    }

    ValidationResult {
        is_valid,
        pattern,
        suggestions,
        expected_order: Some(WordOrder::VSO),
        ..ValidationResult::default()
    }
}
