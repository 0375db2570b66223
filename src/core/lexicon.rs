// File: src/core/lexicon.rs
use crate::core::types::{fresh_id, NewWord, PartOfSpeech, WordEntry, WordPatch};
use crate::error::{GlotError, Result};
use chrono::Utc;
use tracing::{debug, warn};

/// The in-memory word list, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Lexicon {
    words: Vec<WordEntry>,
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_words(words: Vec<WordEntry>) -> Self {
        Self { words }
    }

    pub fn words(&self) -> &[WordEntry] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Assigns a fresh id and stamps both timestamps.
    pub fn add(&mut self, word: NewWord) -> &WordEntry {
        let now = Utc::now();
        let entry = WordEntry::from_new(fresh_id("word", now), word, now);
        debug!(id = %entry.id, romanization = %entry.romanization, "word added");
        self.words.push(entry);
        &self.words[self.words.len() - 1]
    }

    /// Merges the patch into the word and refreshes `updated_at`.
    pub fn update(&mut self, id: &str, patch: WordPatch) -> Result<&WordEntry> {
        let word = self
            .words
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or_else(|| GlotError::WordNotFound(id.to_string()))?;
        patch.apply_to(word);
        word.updated_at = Utc::now();
        debug!(id, "word updated");
        Ok(&*word)
    }

    /// Removes a word. Words derived from it keep their `root_word_id`.
    pub fn delete(&mut self, id: &str) -> Result<WordEntry> {
        let idx = self
            .words
            .iter()
            .position(|w| w.id == id)
            .ok_or_else(|| GlotError::WordNotFound(id.to_string()))?;
        debug!(id, "word deleted");
        Ok(self.words.remove(idx))
    }

    pub fn get(&self, id: &str) -> Option<&WordEntry> {
        self.words.iter().find(|w| w.id == id)
    }

    /// Case-insensitive over romanization, definition and etymology; native
    /// script is matched as typed.
    pub fn search(&self, query: &str) -> Vec<&WordEntry> {
        let lower = query.to_lowercase();
        self.words
            .iter()
            .filter(|w| {
                w.romanization.to_lowercase().contains(&lower)
                    || w.native_script.contains(query)
                    || w.definition.to_lowercase().contains(&lower)
                    || w.etymology.to_lowercase().contains(&lower)
            })
            .collect()
    }

    pub fn filter_by_tag(&self, tag: &str) -> Vec<&WordEntry> {
        self.words.iter().filter(|w| w.tags.iter().any(|t| t == tag)).collect()
    }

    pub fn filter_by_pos(&self, pos: PartOfSpeech) -> Vec<&WordEntry> {
        self.words.iter().filter(|w| w.part_of_speech == pos).collect()
    }

    pub fn root_words(&self) -> Vec<&WordEntry> {
        self.words.iter().filter(|w| w.is_root).collect()
    }

    pub fn derived_words(&self, root_id: &str) -> Vec<&WordEntry> {
        crate::core::affix::derived_words_of(root_id, &self.words)
    }

    /// Looks up the word's root; a reference to a deleted root yields `None`.
    pub fn resolve_root(&self, word: &WordEntry) -> Option<&WordEntry> {
        let root_id = word.root_word_id.as_deref()?;
        let root = self.get(root_id);
        if root.is_none() {
            warn!(id = %word.id, root_id, "root word no longer exists");
        }
        root
    }
}
