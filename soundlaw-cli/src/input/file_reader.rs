//! Word list reading

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Reads word lists: one word per line, `#` comments and blank lines skipped
pub struct FileReader;

impl FileReader {
    /// Read a file as UTF-8 text
    pub fn read_text(path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
    }

    /// Read the words of a word list
    pub fn read_words(path: &Path) -> Result<Vec<String>> {
        let content = Self::read_text(path)?;
        Ok(Self::parse_words(&content))
    }

    /// Words of word list text
    pub fn parse_words(content: &str) -> Vec<String> {
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect()
    }
}
