// File: src/config.rs
use std::path::PathBuf;

const APP_DIR: &str = "glotbase";

/// Where documents are stored and where exports land.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub export_dir: PathBuf,
}

impl Config {
    /// Explicit values win; otherwise the per-user data directory and the
    /// current directory.
    pub fn resolve(data_dir: Option<PathBuf>, export_dir: Option<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.unwrap_or_else(default_data_dir),
            export_dir: export_dir.unwrap_or_else(|| PathBuf::from(".")),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::resolve(None, None)
    }
}

pub fn default_data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_paths_win() {
        let config = Config::resolve(Some("/tmp/lex".into()), Some("/tmp/out".into()));
        assert_eq!(config.data_dir, PathBuf::from("/tmp/lex"));
        assert_eq!(config.export_dir, PathBuf::from("/tmp/out"));
    }

    #[test]
    fn default_data_dir_is_app_scoped() {
        assert!(Config::default().data_dir.ends_with(APP_DIR));
    }
}
