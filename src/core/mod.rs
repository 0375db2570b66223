pub mod affix;
pub mod ipa;
pub mod lexicon;
pub mod rules;
pub mod sentence;
pub mod stats;
pub mod syntax;
pub mod types;
