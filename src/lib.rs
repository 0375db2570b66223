// src/lib.rs

pub mod config;
pub mod core;
pub mod error;
pub mod exchange;
pub mod persistence;
pub mod workspace;

pub use crate::core::affix::{apply_affix, AffixPattern, AffixStrategy};
pub use crate::core::syntax::{validate_word_order, ValidationResult, ValidationStrategy};
pub use crate::core::types::{AffixRule, NewAffixRule, NewWord, PartOfSpeech, WordEntry, WordOrder};
pub use crate::error::{GlotError, Result};
pub use crate::workspace::Workspace;
