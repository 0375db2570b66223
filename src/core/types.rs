// src/core/types.rs
use crate::core::affix::AffixPattern;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// A unique identifier for a lexicon entry or affix rule.
pub type EntryId = String;

/// Timestamps as they appear in stored and exported documents.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// `<kind>-<unix millis>-<9 random chars>`, e.g. `word-1714564800000-3f9a1c2be`.
pub fn fresh_id(kind: &str, now: Timestamp) -> EntryId {
    let random = uuid::Uuid::new_v4().simple().to_string();
    format!("{}-{}-{}", kind, now.timestamp_millis(), &random[..9])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    Adverb,
    Pronoun,
    Preposition,
    Conjunction,
    Particle,
    Interjection,
    Determiner,
}

impl PartOfSpeech {
    pub const ALL: [PartOfSpeech; 10] = [
        PartOfSpeech::Noun,
        PartOfSpeech::Verb,
        PartOfSpeech::Adjective,
        PartOfSpeech::Adverb,
        PartOfSpeech::Pronoun,
        PartOfSpeech::Preposition,
        PartOfSpeech::Conjunction,
        PartOfSpeech::Particle,
        PartOfSpeech::Interjection,
        PartOfSpeech::Determiner,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PartOfSpeech::Noun => "noun",
            PartOfSpeech::Verb => "verb",
            PartOfSpeech::Adjective => "adjective",
            PartOfSpeech::Adverb => "adverb",
            PartOfSpeech::Pronoun => "pronoun",
            PartOfSpeech::Preposition => "preposition",
            PartOfSpeech::Conjunction => "conjunction",
            PartOfSpeech::Particle => "particle",
            PartOfSpeech::Interjection => "interjection",
            PartOfSpeech::Determiner => "determiner",
        }
    }

    /// Nouns and pronouns both fill the subject/object slots.
    pub fn is_nominal(self) -> bool {
        matches!(self, PartOfSpeech::Noun | PartOfSpeech::Pronoun)
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PartOfSpeech {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PartOfSpeech::ALL
            .into_iter()
            .find(|pos| pos.as_str() == s)
            .ok_or_else(|| format!("unknown part of speech '{}'", s))
    }
}

/// Grammatical gender. Anything outside the four built-in values is kept
/// verbatim as a custom label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Gender {
    #[default]
    Neutral,
    Masculine,
    Feminine,
    Divine,
    Custom(String),
}

impl From<String> for Gender {
    fn from(value: String) -> Self {
        match value.as_str() {
            "neutral" => Gender::Neutral,
            "masculine" => Gender::Masculine,
            "feminine" => Gender::Feminine,
            "divine" => Gender::Divine,
            "custom" | "" => Gender::Custom(String::new()),
            _ => Gender::Custom(value),
        }
    }
}

impl From<Gender> for String {
    fn from(value: Gender) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Neutral => f.write_str("neutral"),
            Gender::Masculine => f.write_str("masculine"),
            Gender::Feminine => f.write_str("feminine"),
            Gender::Divine => f.write_str("divine"),
            Gender::Custom(label) if label.is_empty() => f.write_str("custom"),
            Gender::Custom(label) => f.write_str(label),
        }
    }
}

impl FromStr for Gender {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Gender::from(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AffixType {
    Prefix,
    Suffix,
    Infix,
    Circumfix,
}

impl fmt::Display for AffixType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AffixType::Prefix => "prefix",
            AffixType::Suffix => "suffix",
            AffixType::Infix => "infix",
            AffixType::Circumfix => "circumfix",
        })
    }
}

impl FromStr for AffixType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "prefix" => Ok(AffixType::Prefix),
            "suffix" => Ok(AffixType::Suffix),
            "infix" => Ok(AffixType::Infix),
            "circumfix" => Ok(AffixType::Circumfix),
            other => Err(format!("unknown affix type '{}'", other)),
        }
    }
}

/// The six canonical Verb/Subject/Object permutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WordOrder {
    VSO,
    SVO,
    SOV,
    VOS,
    OVS,
    OSV,
}

impl WordOrder {
    pub const ALL: [WordOrder; 6] = [
        WordOrder::VSO,
        WordOrder::SVO,
        WordOrder::SOV,
        WordOrder::VOS,
        WordOrder::OVS,
        WordOrder::OSV,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            WordOrder::VSO => "VSO",
            WordOrder::SVO => "SVO",
            WordOrder::SOV => "SOV",
            WordOrder::VOS => "VOS",
            WordOrder::OVS => "OVS",
            WordOrder::OSV => "OSV",
        }
    }

    /// Human-readable pattern, e.g. "Verb → Subject → Object".
    pub fn description(self) -> &'static str {
        match self {
            WordOrder::VSO => "Verb → Subject → Object",
            WordOrder::SVO => "Subject → Verb → Object",
            WordOrder::SOV => "Subject → Object → Verb",
            WordOrder::VOS => "Verb → Object → Subject",
            WordOrder::OVS => "Object → Verb → Subject",
            WordOrder::OSV => "Object → Subject → Verb",
        }
    }

    pub fn example(self) -> &'static str {
        match self {
            WordOrder::VSO => "Ate the cat the fish",
            WordOrder::SVO => "The cat ate the fish",
            WordOrder::SOV => "The cat the fish ate",
            WordOrder::VOS => "Ate the fish the cat",
            WordOrder::OVS => "The fish ate the cat",
            WordOrder::OSV => "The fish the cat ate",
        }
    }

    pub fn languages(self) -> &'static str {
        match self {
            WordOrder::VSO => "Welsh, Irish, Classical Arabic",
            WordOrder::SVO => "English, Mandarin, French, Spanish",
            WordOrder::SOV => "Japanese, Korean, Turkish, Hindi",
            WordOrder::VOS => "Malagasy, Fijian",
            WordOrder::OVS => "Hixkaryana",
            WordOrder::OSV => "Warao",
        }
    }
}

impl fmt::Display for WordOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WordOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase();
        WordOrder::ALL
            .into_iter()
            .find(|order| order.as_str() == upper)
            .ok_or_else(|| format!("unknown word order '{}'", s))
    }
}

/// A single lexicon entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordEntry {
    pub id: EntryId,
    #[serde(default)]
    pub native_script: String,
    pub romanization: String,
    #[serde(default)]
    pub ipa: String,
    pub part_of_speech: PartOfSpeech,
    #[serde(default)]
    pub etymology: String,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub definition: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_is_root")]
    pub is_root: bool,
    /// Lookup key of the root this entry was derived from. Not kept in sync
    /// with deletions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_word_id: Option<EntryId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(with = "iso_millis")]
    pub created_at: Timestamp,
    #[serde(with = "iso_millis")]
    pub updated_at: Timestamp,
}

impl WordEntry {
    pub(crate) fn from_new(id: EntryId, word: NewWord, now: Timestamp) -> Self {
        Self {
            id,
            native_script: word.native_script,
            romanization: word.romanization,
            ipa: word.ipa,
            part_of_speech: word.part_of_speech,
            etymology: word.etymology,
            gender: word.gender,
            definition: word.definition,
            tags: word.tags,
            is_root: word.is_root,
            root_word_id: word.root_word_id,
            notes: word.notes,
            created_at: now,
            updated_at: now,
        }
    }

    /// Everything but the identity and timestamps.
    pub fn to_new(&self) -> NewWord {
        NewWord {
            native_script: self.native_script.clone(),
            romanization: self.romanization.clone(),
            ipa: self.ipa.clone(),
            part_of_speech: self.part_of_speech,
            etymology: self.etymology.clone(),
            gender: self.gender.clone(),
            definition: self.definition.clone(),
            tags: self.tags.clone(),
            is_root: self.is_root,
            root_word_id: self.root_word_id.clone(),
            notes: self.notes.clone(),
        }
    }
}

/// Form data for a word that has not been assigned an id yet.
/// Import files are read straight into this shape; unknown keys such as
/// `id` or `createdAt` are dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWord {
    #[serde(default)]
    pub native_script: String,
    pub romanization: String,
    #[serde(default)]
    pub ipa: String,
    pub part_of_speech: PartOfSpeech,
    #[serde(default)]
    pub etymology: String,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub definition: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_is_root")]
    pub is_root: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_word_id: Option<EntryId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

fn default_is_root() -> bool {
    true
}

impl NewWord {
    pub fn root(romanization: &str, part_of_speech: PartOfSpeech) -> Self {
        Self {
            native_script: String::new(),
            romanization: romanization.to_string(),
            ipa: String::new(),
            part_of_speech,
            etymology: String::new(),
            gender: Gender::Neutral,
            definition: String::new(),
            tags: Vec::new(),
            is_root: true,
            root_word_id: None,
            notes: None,
        }
    }
}

/// Partial update for a word; `None` leaves the field alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WordPatch {
    pub native_script: Option<String>,
    pub romanization: Option<String>,
    pub ipa: Option<String>,
    pub part_of_speech: Option<PartOfSpeech>,
    pub etymology: Option<String>,
    pub gender: Option<Gender>,
    pub definition: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_root: Option<bool>,
    pub root_word_id: Option<Option<EntryId>>,
    pub notes: Option<Option<String>>,
}

impl WordPatch {
    pub(crate) fn apply_to(self, word: &mut WordEntry) {
        if let Some(v) = self.native_script {
            word.native_script = v;
        }
        if let Some(v) = self.romanization {
            word.romanization = v;
        }
        if let Some(v) = self.ipa {
            word.ipa = v;
        }
        if let Some(v) = self.part_of_speech {
            word.part_of_speech = v;
        }
        if let Some(v) = self.etymology {
            word.etymology = v;
        }
        if let Some(v) = self.gender {
            word.gender = v;
        }
        if let Some(v) = self.definition {
            word.definition = v;
        }
        if let Some(v) = self.tags {
            word.tags = v;
        }
        if let Some(v) = self.is_root {
            word.is_root = v;
        }
        if let Some(v) = self.root_word_id {
            word.root_word_id = v;
        }
        if let Some(v) = self.notes {
            word.notes = v;
        }
    }
}

/// A morphological transformation template. `pattern` is kept for display
/// only; `replacement` is compiled into [`AffixPattern`] whenever the rule is
/// built, loaded or patched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "AffixRuleRecord", into = "AffixRuleRecord")]
pub struct AffixRule {
    pub id: EntryId,
    pub name: String,
    pub affix_type: AffixType,
    pub pattern: String,
    pub replacement: String,
    pub resulting_pos: Option<PartOfSpeech>,
    pub description: String,
    pub example: String,
    compiled: AffixPattern,
}

impl AffixRule {
    pub(crate) fn from_new(id: EntryId, rule: NewAffixRule) -> Self {
        let compiled = AffixPattern::compile(rule.affix_type, &rule.replacement);
        Self {
            id,
            name: rule.name,
            affix_type: rule.affix_type,
            pattern: rule.pattern,
            replacement: rule.replacement,
            resulting_pos: rule.resulting_pos,
            description: rule.description,
            example: rule.example,
            compiled,
        }
    }

    pub fn compiled(&self) -> &AffixPattern {
        &self.compiled
    }

    pub(crate) fn recompile(&mut self) {
        self.compiled = AffixPattern::compile(self.affix_type, &self.replacement);
    }
}

/// Stored shape of an [`AffixRule`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AffixRuleRecord {
    id: EntryId,
    name: String,
    #[serde(rename = "type")]
    affix_type: AffixType,
    #[serde(default)]
    pattern: String,
    replacement: String,
    #[serde(
        rename = "resultingPOS",
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    resulting_pos: Option<PartOfSpeech>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    example: String,
}

impl From<AffixRuleRecord> for AffixRule {
    fn from(record: AffixRuleRecord) -> Self {
        let new = NewAffixRule {
            name: record.name,
            affix_type: record.affix_type,
            pattern: record.pattern,
            replacement: record.replacement,
            resulting_pos: record.resulting_pos,
            description: record.description,
            example: record.example,
        };
        AffixRule::from_new(record.id, new)
    }
}

impl From<AffixRule> for AffixRuleRecord {
    fn from(rule: AffixRule) -> Self {
        Self {
            id: rule.id,
            name: rule.name,
            affix_type: rule.affix_type,
            pattern: rule.pattern,
            replacement: rule.replacement,
            resulting_pos: rule.resulting_pos,
            description: rule.description,
            example: rule.example,
        }
    }
}

// An unselected "resulting POS" field is stored as an empty string.
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<PartOfSpeech>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewAffixRule {
    pub name: String,
    pub affix_type: AffixType,
    pub pattern: String,
    pub replacement: String,
    pub resulting_pos: Option<PartOfSpeech>,
    pub description: String,
    pub example: String,
}

impl NewAffixRule {
    pub fn new(name: &str, affix_type: AffixType, replacement: &str) -> Self {
        Self {
            name: name.to_string(),
            affix_type,
            pattern: "$ROOT".to_string(),
            replacement: replacement.to_string(),
            resulting_pos: None,
            description: String::new(),
            example: String::new(),
        }
    }

    pub fn with_resulting_pos(mut self, pos: PartOfSpeech) -> Self {
        self.resulting_pos = Some(pos);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AffixRulePatch {
    pub name: Option<String>,
    pub affix_type: Option<AffixType>,
    pub pattern: Option<String>,
    pub replacement: Option<String>,
    pub resulting_pos: Option<Option<PartOfSpeech>>,
    pub description: Option<String>,
    pub example: Option<String>,
}

impl AffixRulePatch {
    pub(crate) fn apply_to(self, rule: &mut AffixRule) {
        if let Some(v) = self.name {
            rule.name = v;
        }
        if let Some(v) = self.affix_type {
            rule.affix_type = v;
        }
        if let Some(v) = self.pattern {
            rule.pattern = v;
        }
        if let Some(v) = self.replacement {
            rule.replacement = v;
        }
        if let Some(v) = self.resulting_pos {
            rule.resulting_pos = v;
        }
        if let Some(v) = self.description {
            rule.description = v;
        }
        if let Some(v) = self.example {
            rule.example = v;
        }
        rule.recompile();
    }
}

/// ISO-8601 UTC with millisecond precision, e.g. `2024-05-01T12:00:00.000Z`.
pub mod iso_millis {
    use super::Timestamp;
    use chrono::SecondsFormat;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn format(ts: &Timestamp) -> String {
        ts.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn serialize<S: Serializer>(ts: &Timestamp, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Timestamp, D::Error> {
        let raw = String::deserialize(deserializer)?;
        chrono::DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&chrono::Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_gender_keeps_its_label() {
        let g: Gender = serde_json::from_str("\"celestial\"").unwrap();
        assert_eq!(g, Gender::Custom("celestial".into()));
        assert_eq!(serde_json::to_string(&g).unwrap(), "\"celestial\"");
        assert_eq!(serde_json::to_string(&Gender::Divine).unwrap(), "\"divine\"");
    }

    #[test]
    fn word_order_parses_case_insensitively() {
        assert_eq!("vos".parse::<WordOrder>().unwrap(), WordOrder::VOS);
        assert!("XYZ".parse::<WordOrder>().is_err());
    }

    #[test]
    fn affix_rule_reads_blank_resulting_pos() {
        let json = r#"{"id":"affix-1","name":"agent","type":"prefix","pattern":"$ROOT",
            "replacement":"pe-$ROOT","resultingPOS":"","description":"","example":""}"#;
        let rule: AffixRule = serde_json::from_str(json).unwrap();
        assert_eq!(rule.resulting_pos, None);
        assert_eq!(rule.compiled(), &AffixPattern::Prefix("pe".into()));
    }

    #[test]
    fn timestamps_use_millisecond_iso_strings() {
        let json = r#"{"id":"w","nativeScript":"","romanization":"tulis","ipa":"",
            "partOfSpeech":"verb","etymology":"","gender":"neutral","definition":"",
            "tags":[],"isRoot":true,"createdAt":"2024-05-01T12:00:00.000Z",
            "updatedAt":"2024-05-01T12:00:00.000Z"}"#;
        let word: WordEntry = serde_json::from_str(json).unwrap();
        let back = serde_json::to_value(&word).unwrap();
        assert_eq!(back["createdAt"], "2024-05-01T12:00:00.000Z");
        assert!(back.get("rootWordId").is_none());
    }

    #[test]
    fn stored_word_missing_optional_fields_still_loads() {
        let json = r#"{"id":"w","romanization":"batu","partOfSpeech":"noun",
            "createdAt":"2024-05-01T12:00:00.000Z","updatedAt":"2024-05-01T12:00:00.000Z"}"#;
        let word: WordEntry = serde_json::from_str(json).unwrap();
        assert_eq!(word.romanization, "batu");
        assert!(word.tags.is_empty());
        assert_eq!(word.etymology, "");
        assert_eq!(word.gender, Gender::Neutral);
        assert!(word.is_root);
    }
}
