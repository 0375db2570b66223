// File: src/core/stats.rs
use crate::core::types::{PartOfSpeech, WordEntry};

const TOP_TAGS: usize = 5;
const RECENT_WORDS: usize = 5;
const COMPLETION_TARGET: usize = 100;

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct LexiconStats {
    pub total_words: usize,
    pub root_words: usize,
    pub derived_words: usize,
    pub affix_rules: usize,
    /// Most used tags, most frequent first; ties keep first-seen order.
    pub top_tags: Vec<(String, usize)>,
    /// Only parts of speech that occur, in first-seen order.
    pub pos_distribution: Vec<(PartOfSpeech, usize)>,
    pub completion_percent: f64,
    /// Newest first by `created_at`.
    pub recent_words: Vec<WordEntry>,
}

impl LexiconStats {
    pub fn compute(words: &[WordEntry], affix_rules: usize) -> Self {
        let root_words = words.iter().filter(|w| w.is_root).count();

        let mut tags: Vec<(String, usize)> = Vec::new();
        let mut pos_distribution: Vec<(PartOfSpeech, usize)> = Vec::new();
        for word in words {
            for tag in &word.tags {
                match tags.iter_mut().find(|(t, _)| t == tag) {
                    Some((_, count)) => *count += 1,
                    None => tags.push((tag.clone(), 1)),
                }
            }
            match pos_distribution.iter_mut().find(|(p, _)| *p == word.part_of_speech) {
                Some((_, count)) => *count += 1,
                None => pos_distribution.push((word.part_of_speech, 1)),
            }
        }
        // Stable sort keeps first-seen order among equal counts.
        tags.sort_by(|a, b| b.1.cmp(&a.1));
        tags.truncate(TOP_TAGS);

        let mut recent: Vec<&WordEntry> = words.iter().collect();
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let recent_words = recent.into_iter().take(RECENT_WORDS).cloned().collect();

        let completion = words.len().min(COMPLETION_TARGET) as f64 / COMPLETION_TARGET as f64;

        Self {
            total_words: words.len(),
            root_words,
            derived_words: words.len() - root_words,
            affix_rules,
            top_tags: tags,
            pos_distribution,
            completion_percent: completion * 100.0,
            recent_words,
        }
    }
}
