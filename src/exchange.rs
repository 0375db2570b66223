// File: src/exchange.rs
//! Lexicon export (JSON, CSV) and JSON import.
use crate::core::types::{iso_millis, NewWord, Timestamp, WordEntry};
use crate::error::{GlotError, Result};
use crate::persistence::write_atomic;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

pub const EXPORT_BASENAME: &str = "glotbase-lexicon";

const CSV_HEADERS: [&str; 10] = [
    "Native Script",
    "Romanization",
    "IPA",
    "Part of Speech",
    "Gender",
    "Definition",
    "Etymology",
    "Tags",
    "Is Root",
    "Created At",
];

/// Pretty-printed with two-space indentation.
pub fn export_json(words: &[WordEntry]) -> Result<String> {
    Ok(serde_json::to_string_pretty(words)?)
}

/// Free-text columns are always quoted; enum columns never are.
pub fn export_csv(words: &[WordEntry]) -> String {
    let mut lines = Vec::with_capacity(words.len() + 1);
    lines.push(CSV_HEADERS.join(","));
    for word in words {
        let row = [
            quote(&word.native_script),
            quote(&word.romanization),
            quote(&word.ipa),
            word.part_of_speech.to_string(),
            word.gender.to_string(),
            quote(&word.definition),
            quote(&word.etymology),
            format!("\"{}\"", word.tags.join(", ")),
            if word.is_root { "Yes" } else { "No" }.to_string(),
            iso_millis::format(&word.created_at),
        ];
        lines.push(row.join(","));
    }
    lines.join("\n")
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// `<base>-<YYYY-MM-DDTHH-MM-SS>.<ext>`, always in UTC.
pub fn timestamped_filename(base: &str, extension: &str, now: Timestamp) -> String {
    format!("{}-{}.{}", base, now.format("%Y-%m-%dT%H-%M-%S"), extension)
}

pub fn write_export(dir: &Path, filename: &str, contents: &str) -> Result<PathBuf> {
    let path = dir.join(filename);
    write_atomic(&path, |writer| Ok(writer.write_all(contents.as_bytes())?))?;
    info!(path = %path.display(), bytes = contents.len(), "export written");
    Ok(path)
}

/// Reads an exported lexicon back as new-word form data. A root that is not
/// an array yields no words; invalid JSON, or an element that is not a word,
/// rejects the whole file.
pub fn import_json(text: &str) -> Result<Vec<NewWord>> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|_| GlotError::InvalidImport)?;
    let serde_json::Value::Array(items) = value else {
        return Ok(Vec::new());
    };
    items
        .into_iter()
        .map(|item| serde_json::from_value(item).map_err(|_| GlotError::InvalidImport))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Gender, PartOfSpeech};
    use chrono::{TimeZone, Utc};

    fn word() -> WordEntry {
        let mut new = NewWord::root("kata", PartOfSpeech::Noun);
        new.native_script = "كات".into();
        new.ipa = "ka.ta".into();
        new.definition = "a \"word\"".into();
        new.gender = Gender::Custom("animate".into());
        new.tags = vec!["core".into(), "speech".into()];
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 5).unwrap();
        WordEntry::from_new("word-1".into(), new, at)
    }

    #[test]
    fn csv_quotes_and_doubles() {
        let csv = export_csv(&[word()]);
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Native Script,Romanization,IPA,Part of Speech,Gender,Definition,Etymology,Tags,Is Root,Created At"
        );
        assert_eq!(
            lines.next().unwrap(),
            "\"كات\",\"kata\",\"ka.ta\",noun,animate,\"a \"\"word\"\"\",\"\",\"core, speech\",Yes,2024-05-01T12:30:05.000Z"
        );
    }

    #[test]
    fn json_export_is_indented() {
        let json = export_json(&[word()]).unwrap();
        assert!(json.starts_with("[\n  {\n    \"id\": \"word-1\""));
    }

    #[test]
    fn filename_replaces_colons() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 8, 7).unwrap();
        assert_eq!(
            timestamped_filename(EXPORT_BASENAME, "json", at),
            "glotbase-lexicon-2024-05-01T09-08-07.json"
        );
    }

    #[test]
    fn import_drops_identity() {
        let json = export_json(&[word()]).unwrap();
        let imported = import_json(&json).unwrap();
        assert_eq!(imported, vec![word().to_new()]);
    }

    #[test]
    fn non_array_root_imports_nothing() {
        assert!(import_json("{\"romanization\":\"x\"}").unwrap().is_empty());
    }

    #[test]
    fn sparse_records_take_defaults() {
        let imported = import_json(r#"[{"romanization":"api","partOfSpeech":"noun"}]"#).unwrap();
        let word = &imported[0];
        assert_eq!(word.romanization, "api");
        assert_eq!(word.part_of_speech, PartOfSpeech::Noun);
        assert!(word.tags.is_empty());
        assert_eq!(word.etymology, "");
        assert_eq!(word.ipa, "");
        assert_eq!(word.gender, Gender::Neutral);
        assert!(word.is_root);
        assert_eq!(word.root_word_id, None);
    }

    #[test]
    fn bad_files_are_rejected() {
        assert!(matches!(import_json("not json"), Err(GlotError::InvalidImport)));
        assert!(matches!(import_json("[{\"ipa\":\"a\"}]"), Err(GlotError::InvalidImport)));
        assert_eq!(GlotError::InvalidImport.to_string(), "Invalid JSON file format");
    }
}
