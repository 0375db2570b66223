// File: src/core/affix.rs
use crate::core::types::{AffixRule, AffixType, EntryId, NewWord, PartOfSpeech, WordEntry};

const ROOT_PLACEHOLDER: &str = "$ROOT";
const DERIVED_TAG: &str = "derived";

/// The literal affix material of a rule, extracted once from its
/// `$ROOT` replacement template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AffixPattern {
    Prefix(String),
    Suffix(String),
    Infix(String),
    Circumfix { prefix: String, suffix: String },
}

impl AffixPattern {
    /// A template without `$ROOT` is taken whole as affix material.
    pub fn compile(affix_type: AffixType, replacement: &str) -> Self {
        let without_root = replacement.replacen(ROOT_PLACEHOLDER, "", 1);
        match affix_type {
            AffixType::Prefix => {
                let prefix = without_root.strip_suffix('-').unwrap_or(&without_root);
                AffixPattern::Prefix(prefix.to_string())
            }
            AffixType::Suffix => {
                let suffix = without_root.strip_prefix('-').unwrap_or(&without_root);
                AffixPattern::Suffix(suffix.to_string())
            }
            AffixType::Infix => AffixPattern::Infix(without_root.replace('-', "")),
            AffixType::Circumfix => {
                let mut parts = replacement.split(ROOT_PLACEHOLDER);
                let head = parts.next().unwrap_or("");
                let tail = parts.next().unwrap_or("");
                AffixPattern::Circumfix {
                    prefix: head.strip_suffix('-').unwrap_or(head).to_string(),
                    suffix: tail.strip_prefix('-').unwrap_or(tail).to_string(),
                }
            }
        }
    }

    /// Attaches the affix to one surface string.
    pub fn attach(&self, base: &str) -> String {
        match self {
            AffixPattern::Prefix(prefix) => format!("{}{}", prefix, base),
            AffixPattern::Suffix(suffix) => format!("{}{}", base, suffix),
            AffixPattern::Infix(infix) => {
                let at = midpoint(base);
                let mut out = String::with_capacity(base.len() + infix.len());
                out.push_str(&base[..at]);
                out.push_str(infix);
                out.push_str(&base[at..]);
                out
            }
            AffixPattern::Circumfix { prefix, suffix } => format!("{}{}{}", prefix, base, suffix),
        }
    }
}

/// Byte offset of the `floor(len / 2)`-th character.
pub fn midpoint(s: &str) -> usize {
    let half = s.chars().count() / 2;
    s.char_indices().nth(half).map(|(i, _)| i).unwrap_or(s.len())
}

/// How a derivation treats the native-script form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AffixStrategy {
    /// Apply the same literal affix to a non-empty native script.
    #[default]
    MirrorNativeScript,
    /// Only the romanization changes; native script is copied as-is.
    RomanizationOnly,
}

/// The fields a single rule application decides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedForm {
    pub romanization: String,
    pub native_script: String,
    pub part_of_speech: PartOfSpeech,
    pub is_root: bool,
    pub root_word_id: EntryId,
}

pub fn apply_affix(root: &WordEntry, rule: &AffixRule) -> DerivedForm {
    apply_affix_with(root, rule, AffixStrategy::MirrorNativeScript)
}

pub fn apply_affix_with(
    root: &WordEntry,
    rule: &AffixRule,
    strategy: AffixStrategy,
) -> DerivedForm {
    let pattern = rule.compiled();
    let native_script = match strategy {
        AffixStrategy::MirrorNativeScript if !root.native_script.is_empty() => {
            pattern.attach(&root.native_script)
        }
        _ => root.native_script.clone(),
    };

    DerivedForm {
        romanization: pattern.attach(&root.romanization),
        native_script,
        part_of_speech: rule.resulting_pos.unwrap_or(root.part_of_speech),
        is_root: false,
        root_word_id: root.id.clone(),
    }
}

/// Applies every rule to the untouched root. Rules never chain.
pub fn derive_words<'a, I>(root: &WordEntry, rules: I) -> Vec<NewWord>
where
    I: IntoIterator<Item = &'a AffixRule>,
{
    rules
        .into_iter()
        .map(|rule| {
            let form = apply_affix(root, rule);
            let sense = if rule.description.is_empty() { &rule.name } else { &rule.description };
            let mut tags = root.tags.clone();
            tags.push(DERIVED_TAG.to_string());

            NewWord {
                native_script: form.native_script,
                romanization: form.romanization,
                ipa: root.ipa.clone(),
                part_of_speech: form.part_of_speech,
                etymology: format!("Derived from \"{}\" using {}", root.romanization, rule.name),
                gender: root.gender.clone(),
                definition: format!("{} form of: {}", sense, root.definition),
                tags,
                is_root: form.is_root,
                root_word_id: Some(form.root_word_id),
                notes: None,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivationPreview {
    pub rule: String,
    pub original: String,
    pub derived: String,
}

pub fn preview_derivations<'a, I>(root: &WordEntry, rules: I) -> Vec<DerivationPreview>
where
    I: IntoIterator<Item = &'a AffixRule>,
{
    rules
        .into_iter()
        .map(|rule| DerivationPreview {
            rule: rule.name.clone(),
            original: root.romanization.clone(),
            derived: apply_affix(root, rule).romanization,
        })
        .collect()
}

pub fn derived_words_of<'a>(root_id: &str, words: &'a [WordEntry]) -> Vec<&'a WordEntry> {
    words
        .iter()
        .filter(|w| w.root_word_id.as_deref() == Some(root_id))
        .collect()
}
