// File: src/workspace.rs
use crate::core::affix::{derive_words, preview_derivations, DerivationPreview};
use crate::core::lexicon::Lexicon;
use crate::core::rules::AffixRuleBook;
use crate::core::stats::LexiconStats;
use crate::core::syntax::{validate_with, ValidationResult, ValidationStrategy};
use crate::core::types::{
    AffixRule, AffixRulePatch, NewAffixRule, NewWord, Timestamp, WordEntry, WordOrder, WordPatch,
};
use crate::error::{GlotError, Result};
use crate::exchange::{self, EXPORT_BASENAME};
use crate::persistence::{Storage, StorageKey};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// The lexicon and rule list plus the storage they are mirrored to.
/// Every successful mutation rewrites the affected list in full.
pub struct Workspace {
    lexicon: Lexicon,
    rules: AffixRuleBook,
    storage: Option<Storage>,
}

impl Workspace {
    /// A workspace that never touches disk.
    pub fn in_memory() -> Self {
        Self { lexicon: Lexicon::new(), rules: AffixRuleBook::new(), storage: None }
    }

    /// Loads both lists; absent or corrupt documents start empty.
    pub fn open(storage: Storage) -> Self {
        let words: Vec<WordEntry> = storage.get(StorageKey::Lexicon, Vec::new());
        let rules: Vec<AffixRule> = storage.get(StorageKey::AffixRules, Vec::new());
        info!(
            dir = %storage.root().display(),
            words = words.len(),
            rules = rules.len(),
            "workspace loaded"
        );
        Self {
            lexicon: Lexicon::from_words(words),
            rules: AffixRuleBook::from_rules(rules),
            storage: Some(storage),
        }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn rules(&self) -> &AffixRuleBook {
        &self.rules
    }

    fn persist_lexicon(&self) -> Result<()> {
        match &self.storage {
            Some(storage) => storage.set(StorageKey::Lexicon, self.lexicon.words()),
            None => Ok(()),
        }
    }

    fn persist_rules(&self) -> Result<()> {
        match &self.storage {
            Some(storage) => storage.set(StorageKey::AffixRules, self.rules.all()),
            None => Ok(()),
        }
    }

    pub fn add_word(&mut self, word: NewWord) -> Result<WordEntry> {
        let entry = self.lexicon.add(word).clone();
        self.persist_lexicon()?;
        Ok(entry)
    }

    pub fn update_word(&mut self, id: &str, patch: WordPatch) -> Result<WordEntry> {
        let entry = self.lexicon.update(id, patch)?.clone();
        self.persist_lexicon()?;
        Ok(entry)
    }

    pub fn delete_word(&mut self, id: &str) -> Result<WordEntry> {
        let entry = self.lexicon.delete(id)?;
        self.persist_lexicon()?;
        Ok(entry)
    }

    pub fn add_rule(&mut self, rule: NewAffixRule) -> Result<AffixRule> {
        let rule = self.rules.add(rule).clone();
        self.persist_rules()?;
        Ok(rule)
    }

    pub fn update_rule(&mut self, id: &str, patch: AffixRulePatch) -> Result<AffixRule> {
        let rule = self.rules.update(id, patch)?.clone();
        self.persist_rules()?;
        Ok(rule)
    }

    pub fn delete_rule(&mut self, id: &str) -> Result<AffixRule> {
        let rule = self.rules.delete(id)?;
        self.persist_rules()?;
        Ok(rule)
    }

    fn root(&self, root_id: &str) -> Result<&WordEntry> {
        self.lexicon
            .get(root_id)
            .ok_or_else(|| GlotError::WordNotFound(root_id.to_string()))
    }

    pub fn preview(&self, root_id: &str, rule_ids: &[String]) -> Result<Vec<DerivationPreview>> {
        let root = self.root(root_id)?;
        Ok(preview_derivations(root, self.rules.select(rule_ids)?))
    }

    /// Adds one derived word per selected rule.
    pub fn derive(&mut self, root_id: &str, rule_ids: &[String]) -> Result<Vec<WordEntry>> {
        let drafts = derive_words(self.root(root_id)?, self.rules.select(rule_ids)?);
        let added: Vec<WordEntry> =
            drafts.into_iter().map(|d| self.lexicon.add(d).clone()).collect();
        self.persist_lexicon()?;
        info!(root_id, count = added.len(), "derived words generated");
        Ok(added)
    }

    pub fn validate(
        &self,
        word_ids: &[String],
        order: WordOrder,
        strategy: ValidationStrategy,
    ) -> Result<ValidationResult> {
        let words = word_ids
            .iter()
            .map(|id| self.lexicon.get(id).ok_or_else(|| GlotError::WordNotFound(id.clone())))
            .collect::<Result<Vec<_>>>()?;
        Ok(validate_with(strategy, words.as_slice(), order))
    }

    pub fn stats(&self) -> LexiconStats {
        LexiconStats::compute(self.lexicon.words(), self.rules.len())
    }

    pub fn export_json(&self, dir: &Path, now: Timestamp) -> Result<PathBuf> {
        let contents = exchange::export_json(self.lexicon.words())?;
        let filename = exchange::timestamped_filename(EXPORT_BASENAME, "json", now);
        exchange::write_export(dir, &filename, &contents)
    }

    pub fn export_csv(&self, dir: &Path, now: Timestamp) -> Result<PathBuf> {
        let contents = exchange::export_csv(self.lexicon.words());
        let filename = exchange::timestamped_filename(EXPORT_BASENAME, "csv", now);
        exchange::write_export(dir, &filename, &contents)
    }

    /// Always adds, with fresh ids and timestamps. A rejected file adds nothing.
    pub fn import_str(&mut self, text: &str) -> Result<Vec<WordEntry>> {
        let drafts = exchange::import_json(text)?;
        let added: Vec<WordEntry> =
            drafts.into_iter().map(|d| self.lexicon.add(d).clone()).collect();
        self.persist_lexicon()?;
        info!(count = added.len(), "words imported");
        Ok(added)
    }

    pub fn import_file(&mut self, path: &Path) -> Result<Vec<WordEntry>> {
        let text = fs::read_to_string(path)?;
        self.import_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{AffixType, PartOfSpeech};
    use tempfile::TempDir;

    #[test]
    fn changes_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let mut ws = Workspace::open(Storage::new(dir.path()));
        let root = ws.add_word(NewWord::root("tulis", PartOfSpeech::Verb)).unwrap();
        let rule = ws.add_rule(NewAffixRule::new("active", AffixType::Prefix, "me-$ROOT")).unwrap();
        ws.derive(&root.id, &[rule.id.clone()]).unwrap();

        let reopened = Workspace::open(Storage::new(dir.path()));
        assert_eq!(reopened.lexicon().len(), 2);
        assert_eq!(reopened.lexicon().derived_words(&root.id)[0].romanization, "metulis");
        assert_eq!(reopened.rules().get(&rule.id).unwrap().name, "active");
        assert_eq!(
            reopened.lexicon().words()[0].created_at.timestamp_millis(),
            root.created_at.timestamp_millis()
        );
    }

    #[test]
    fn unknown_rule_derives_nothing() {
        let mut ws = Workspace::in_memory();
        let root = ws.add_word(NewWord::root("tulis", PartOfSpeech::Verb)).unwrap();
        assert!(ws.derive(&root.id, &["affix-missing".into()]).is_err());
        assert_eq!(ws.lexicon().len(), 1);
    }

    #[test]
    fn corrupt_storage_starts_empty() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path());
        fs::write(storage.path_for(StorageKey::Lexicon), "[{\"broken\":").unwrap();
        assert!(Workspace::open(storage).lexicon().is_empty());
    }

    #[test]
    fn validate_resolves_ids() {
        let mut ws = Workspace::in_memory();
        let v = ws.add_word(NewWord::root("makan", PartOfSpeech::Verb)).unwrap().id;
        let s = ws.add_word(NewWord::root("kucing", PartOfSpeech::Noun)).unwrap().id;
        let o = ws.add_word(NewWord::root("ikan", PartOfSpeech::Noun)).unwrap().id;
        let result = ws
            .validate(&[v, s, o], WordOrder::VSO, ValidationStrategy::RichSuggestions)
            .unwrap();
        assert!(result.is_valid);
        assert!(ws
            .validate(&["nope".into()], WordOrder::VSO, ValidationStrategy::RichSuggestions)
            .is_err());
    }

    #[test]
    fn rejected_import_adds_nothing() {
        let mut ws = Workspace::in_memory();
        assert!(ws.import_str("[{\"romanization\":\"a\",\"partOfSpeech\":\"noun\"}, 5]").is_err());
        assert!(ws.lexicon().is_empty());
    }
}
