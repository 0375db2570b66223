// File: src/persistence.rs
use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, error};

/// One JSON document per key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKey {
    Lexicon,
    AffixRules,
    // Reserved; only `Storage::clear` touches these.
    Phonology,
    Grammar,
    Corpus,
    Metadata,
}

impl StorageKey {
    pub const ALL: [StorageKey; 6] = [
        StorageKey::Lexicon,
        StorageKey::AffixRules,
        StorageKey::Phonology,
        StorageKey::Grammar,
        StorageKey::Corpus,
        StorageKey::Metadata,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StorageKey::Lexicon => "glotbase_lexicon",
            StorageKey::AffixRules => "glotbase_affixes",
            StorageKey::Phonology => "glotbase_phonology",
            StorageKey::Grammar => "glotbase_grammar",
            StorageKey::Corpus => "glotbase_corpus",
            StorageKey::Metadata => "glotbase_metadata",
        }
    }
}

/// Key-value store backed by a directory of JSON files.
#[derive(Debug, Clone)]
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, key: StorageKey) -> PathBuf {
        self.root.join(format!("{}.json", key.name()))
    }

    /// Missing documents yield `default`; unreadable or malformed ones are
    /// logged and also yield `default`.
    pub fn get<T: DeserializeOwned>(&self, key: StorageKey, default: T) -> T {
        let path = self.path_for(key);
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return default,
            Err(e) => {
                error!(key = key.name(), error = %e, "error reading from storage");
                return default;
            }
        };
        match serde_json::from_reader(BufReader::new(file)) {
            Ok(value) => value,
            Err(e) => {
                error!(key = key.name(), error = %e, "error reading from storage");
                default
            }
        }
    }

    /// Replaces the document atomically: write a sibling temp file, then rename.
    pub fn set<T: Serialize + ?Sized>(&self, key: StorageKey, value: &T) -> Result<()> {
        let path = self.path_for(key);
        write_atomic(&path, |writer| Ok(serde_json::to_writer(writer, value)?))?;
        debug!(key = key.name(), "stored");
        Ok(())
    }

    pub fn remove(&self, key: StorageKey) -> Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }

    pub fn clear(&self) -> Result<()> {
        for key in StorageKey::ALL {
            self.remove(key)?;
        }
        Ok(())
    }
}

/// Creates the parent directory if needed and swaps the finished file into
/// place so readers never observe a partial write.
pub fn write_atomic<F>(path: &Path, fill: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<&NamedTempFile>) -> Result<()>,
{
    let parent_dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent_dir)?;

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(&temp_file);
        fill(&mut writer)?;
        writer.flush()?;
    }
    temp_file.persist(path).map_err(|e| e.error)?;
    Ok(())
}
