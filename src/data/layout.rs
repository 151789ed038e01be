//! On-disk layout of per-symbol files

use crate::config::DataConfig;
use std::fs;
use std::path::{Path, PathBuf};

/// Resolves input and output paths for a symbol
#[derive(Debug, Clone)]
pub struct DataLayout {
    raw_dir: PathBuf,
    filtered_dir: PathBuf,
    labeled_dir: PathBuf,
}

impl DataLayout {
    /// Build from the `[data]` config section, joining each directory onto `root`
    pub fn new(config: &DataConfig) -> Self {
        Self {
            raw_dir: config.root.join(&config.raw_dir),
            filtered_dir: config.root.join(&config.filtered_dir),
            labeled_dir: config.root.join(&config.labeled_dir),
        }
    }

    fn file_path(dir: &Path, symbol: &str) -> PathBuf {
        dir.join(format!("{}.csv", symbol))
    }

    /// Raw minute bars
    pub fn raw_path(&self, symbol: &str) -> PathBuf {
        Self::file_path(&self.raw_dir, symbol)
    }

    /// CUSUM-filtered event rows
    pub fn filtered_path(&self, symbol: &str) -> PathBuf {
        Self::file_path(&self.filtered_dir, symbol)
    }

    /// Labeled output table
    pub fn labeled_path(&self, symbol: &str) -> PathBuf {
        Self::file_path(&self.labeled_dir, symbol)
    }

    pub fn raw_dir(&self) -> &Path {
        &self.raw_dir
    }

    /// Symbols with a raw bar file, sorted by name
    pub fn discover_symbols(&self) -> std::io::Result<Vec<String>> {
        let mut symbols: Vec<String> = fs::read_dir(&self.raw_dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && path
                        .extension()
                        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
            })
            .filter_map(|path| path.file_stem()?.to_str().map(str::to_string))
            .collect();
        symbols.sort();
        Ok(symbols)
    }
}
