// File: src/core/sentence.rs
use crate::core::syntax::{validate_with, ValidationResult, ValidationStrategy};
use crate::core::types::{WordEntry, WordOrder};
use std::collections::VecDeque;

const DEFAULT_SLOTS: usize = 3;
const HISTORY_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    pub id: usize,
    pub word: Option<WordEntry>,
}

/// Slot-based sentence composer with a short history of accepted sentences.
#[derive(Debug, Clone)]
pub struct SentenceBuilder {
    order: WordOrder,
    strategy: ValidationStrategy,
    slots: Vec<Slot>,
    next_slot_id: usize,
    history: VecDeque<String>,
}

impl Default for SentenceBuilder {
    fn default() -> Self {
        Self::new(WordOrder::VSO, ValidationStrategy::RichSuggestions)
    }
}

impl SentenceBuilder {
    pub fn new(order: WordOrder, strategy: ValidationStrategy) -> Self {
        let mut builder = Self {
            order,
            strategy,
            slots: Vec::new(),
            next_slot_id: 0,
            history: VecDeque::with_capacity(HISTORY_LIMIT),
        };
        builder.reset_slots();
        builder
    }

    fn reset_slots(&mut self) {
        self.slots.clear();
        for _ in 0..DEFAULT_SLOTS {
            self.add_slot();
        }
    }

    pub fn order(&self) -> WordOrder {
        self.order
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Most recent first.
    pub fn history(&self) -> impl Iterator<Item = &str> {
        self.history.iter().map(String::as_str)
    }

    pub fn add_slot(&mut self) -> usize {
        self.next_slot_id += 1;
        self.slots.push(Slot { id: self.next_slot_id, word: None });
        self.next_slot_id
    }

    /// The last remaining slot is never removed.
    pub fn remove_slot(&mut self, slot_id: usize) -> bool {
        if self.slots.len() <= 1 {
            return false;
        }
        let before = self.slots.len();
        self.slots.retain(|s| s.id != slot_id);
        self.slots.len() != before
    }

    pub fn set_word(&mut self, slot_id: usize, word: Option<WordEntry>) -> bool {
        match self.slots.iter_mut().find(|s| s.id == slot_id) {
            Some(slot) => {
                slot.word = word;
                true
            }
            None => false,
        }
    }

    pub fn clear_slot(&mut self, slot_id: usize) -> bool {
        self.set_word(slot_id, None)
    }

    pub fn set_order(&mut self, order: WordOrder) -> Option<ValidationResult> {
        self.order = order;
        self.validation()
    }

    pub fn filled_words(&self) -> Vec<&WordEntry> {
        self.slots.iter().filter_map(|s| s.word.as_ref()).collect()
    }

    /// `None` while every slot is empty.
    pub fn validation(&self) -> Option<ValidationResult> {
        let words = self.filled_words();
        if words.is_empty() {
            return None;
        }
        Some(validate_with(self.strategy, words.as_slice(), self.order))
    }

    /// Records the sentence when it validates and starts over with fresh
    /// slots. Returns the recorded line.
    pub fn save(&mut self) -> Option<String> {
        let valid = self.validation().map(|v| v.is_valid).unwrap_or(false);
        let sentence = self
            .filled_words()
            .iter()
            .map(|w| w.romanization.as_str())
            .filter(|r| !r.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if !valid || sentence.is_empty() {
            return None;
        }

        let line = format!("[{}] {}", self.order, sentence);
        if self.history.len() == HISTORY_LIMIT {
            self.history.pop_back();
        }
        self.history.push_front(line.clone());
        self.reset_slots();
        Some(line)
    }

    pub fn clear_all(&mut self) {
        self.reset_slots();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{NewWord, PartOfSpeech};
    use chrono::Utc;

    fn word(romanization: &str, pos: PartOfSpeech) -> WordEntry {
        let new = NewWord::root(romanization, pos);
        WordEntry::from_new(format!("word-{}", romanization), new, Utc::now())
    }

    fn fill(builder: &mut SentenceBuilder, words: [WordEntry; 3]) {
        let ids: Vec<usize> = builder.slots().iter().map(|s| s.id).collect();
        for (id, w) in ids.into_iter().zip(words) {
            builder.set_word(id, Some(w));
        }
    }

    #[test]
    fn starts_with_three_empty_slots() {
        let builder = SentenceBuilder::default();
        assert_eq!(builder.slots().len(), 3);
        assert!(builder.validation().is_none());
    }

    #[test]
    fn last_slot_survives_removal() {
        let mut builder = SentenceBuilder::default();
        let ids: Vec<usize> = builder.slots().iter().map(|s| s.id).collect();
        assert!(builder.remove_slot(ids[0]));
        assert!(builder.remove_slot(ids[1]));
        assert!(!builder.remove_slot(ids[2]));
        assert_eq!(builder.slots().len(), 1);
    }

    #[test]
    fn saves_valid_sentence_and_resets() {
        let mut builder = SentenceBuilder::default();
        fill(
            &mut builder,
            [
                word("makan", PartOfSpeech::Verb),
                word("kucing", PartOfSpeech::Noun),
                word("ikan", PartOfSpeech::Noun),
            ],
        );
        assert!(builder.validation().unwrap().is_valid);
        assert_eq!(builder.save().as_deref(), Some("[VSO] makan kucing ikan"));
        assert!(builder.filled_words().is_empty());
        assert_eq!(builder.history().next(), Some("[VSO] makan kucing ikan"));
    }

    #[test]
    fn invalid_sentence_is_not_saved() {
        let mut builder = SentenceBuilder::default();
        fill(
            &mut builder,
            [
                word("kucing", PartOfSpeech::Noun),
                word("makan", PartOfSpeech::Verb),
                word("ikan", PartOfSpeech::Noun),
            ],
        );
        assert!(builder.save().is_none());
        assert!(builder.set_order(WordOrder::SVO).unwrap().is_valid);
        assert!(builder.save().is_some());
    }

    #[test]
    fn history_keeps_ten_newest() {
        let mut builder = SentenceBuilder::new(WordOrder::SOV, ValidationStrategy::RichSuggestions);
        for i in 0..12 {
            fill(
                &mut builder,
                [
                    word(&format!("s{}", i), PartOfSpeech::Pronoun),
                    word("o", PartOfSpeech::Noun),
                    word("v", PartOfSpeech::Verb),
                ],
            );
            builder.save().unwrap();
        }
        let history: Vec<&str> = builder.history().collect();
        assert_eq!(history.len(), 10);
        assert_eq!(history[0], "[SOV] s11 o v");
        assert_eq!(history[9], "[SOV] s2 o v");
    }
}
