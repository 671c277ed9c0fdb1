//! Phonology tables
//!
//! The digraph map, vowel inventory, legal diphthongs, legal onset clusters
//! and prosodic marks of one language stage. Tables are described in TOML
//! (see `configs/phonology/`), validated once when loaded and read-only
//! afterwards.

pub mod config;
mod loader;

use std::collections::HashSet;
use std::path::Path;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::error::PhonologyError;
use crate::normalizer::{DigraphTable, PhonemeUnit};

pub use config::PhonologyConfig;
pub use loader::{default_phonology, get_phonology, list_available_phonologies, DEFAULT_PHONOLOGY};

/// Validated, runtime form of a [`PhonologyConfig`]
#[derive(Debug, Clone)]
pub struct Phonology {
    code: String,
    name: String,
    digraphs: DigraphTable,
    vowels: HashSet<char>,
    vowel_class: Vec<char>,
    diphthongs: HashSet<(char, char)>,
    onsets: HashSet<(char, char)>,
    long_marks: Vec<char>,
    stress_mark: char,
}

impl Phonology {
    /// Parse and validate tables from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self, PhonologyError> {
        let config: PhonologyConfig =
            toml::from_str(toml_str).map_err(|e| PhonologyError::Parse(e.to_string()))?;
        Self::from_config(&config)
    }

    /// Load tables from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PhonologyError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| PhonologyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Validate a parsed configuration and build lookup tables
    pub fn from_config(config: &PhonologyConfig) -> Result<Self, PhonologyError> {
        if config.metadata.code.trim().is_empty() {
            return Err(PhonologyError::Invalid("metadata.code is empty".to_string()));
        }

        let mut seen = HashSet::new();
        for entry in &config.digraphs {
            if entry.sequence.chars().count() < 2 {
                return Err(PhonologyError::Invalid(format!(
                    "digraph {:?} must span at least two characters",
                    entry.sequence
                )));
            }
            if !seen.insert(entry.sequence.as_str()) {
                return Err(PhonologyError::Invalid(format!(
                    "digraph {:?} is listed twice",
                    entry.sequence
                )));
            }
            if is_combining_mark(entry.phoneme) {
                return Err(PhonologyError::Invalid(format!(
                    "stand-in for {:?} is a combining mark",
                    entry.sequence
                )));
            }
        }
        let digraphs = DigraphTable::new(&config.digraphs);

        if config.vowels.letters.is_empty() {
            return Err(PhonologyError::Invalid("no vowel letters".to_string()));
        }
        let vowels: HashSet<char> = config.vowels.letters.iter().copied().collect();

        if config.vowels.vowel_class.is_empty() {
            return Err(PhonologyError::Invalid("vowel class is empty".to_string()));
        }

        let mut diphthongs = HashSet::new();
        for diphthong in &config.vowels.diphthongs {
            let pair = two_phonemes(&digraphs, diphthong).ok_or_else(|| {
                PhonologyError::Invalid(format!(
                    "diphthong {diphthong:?} must be exactly two vowels"
                ))
            })?;
            if !vowels.contains(&pair.0) || !vowels.contains(&pair.1) {
                return Err(PhonologyError::Invalid(format!(
                    "diphthong {diphthong:?} contains a letter that is not a vowel"
                )));
            }
            diphthongs.insert(pair);
        }

        let mut onsets = HashSet::new();
        for cluster in &config.onsets.clusters {
            let pair = two_phonemes(&digraphs, cluster).ok_or_else(|| {
                PhonologyError::Invalid(format!(
                    "onset cluster {cluster:?} must be exactly two phonemes"
                ))
            })?;
            onsets.insert(pair);
        }

        for &mark in config.marks.long.iter().chain([&config.marks.stress]) {
            if !is_combining_mark(mark) {
                return Err(PhonologyError::Invalid(format!(
                    "mark U+{:04X} is not a combining diacritic",
                    mark as u32
                )));
            }
        }

        Ok(Self {
            code: config.metadata.code.clone(),
            name: config.metadata.name.clone(),
            digraphs,
            vowels,
            vowel_class: config.vowels.vowel_class.clone(),
            diphthongs,
            onsets,
            long_marks: config.marks.long.clone(),
            stress_mark: config.marks.stress,
        })
    }

    /// Table code, e.g. `eldarin`
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Human-readable name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Digraph map
    pub fn digraphs(&self) -> &DigraphTable {
        &self.digraphs
    }

    /// Fold digraph spellings to stand-ins
    pub fn to_single(&self, word: &str) -> String {
        self.digraphs.to_single(word)
    }

    /// Expand stand-ins to their canonical spellings
    pub fn to_digraphs(&self, normalized: &str) -> String {
        self.digraphs.to_digraphs(normalized)
    }

    /// Split a word into phoneme units
    pub fn segment(&self, word: &str, compound_hint: bool) -> Vec<PhonemeUnit> {
        self.digraphs.segment(word, compound_hint)
    }

    /// Whether a lowercase base letter is a vowel
    #[inline]
    pub fn is_vowel(&self, base: char) -> bool {
        self.vowels.contains(&base)
    }

    /// Members of the `V` class in rule notation
    pub fn vowel_class(&self) -> &[char] {
        &self.vowel_class
    }

    /// Whether two vowels form a legal diphthong
    #[inline]
    pub fn is_diphthong(&self, first: char, second: char) -> bool {
        self.diphthongs.contains(&(first, second))
    }

    /// Whether two consonants may begin a syllable together
    #[inline]
    pub fn is_onset(&self, first: char, second: char) -> bool {
        self.onsets.contains(&(first, second))
    }

    /// Whether a mark makes a vowel long
    #[inline]
    pub fn is_long_mark(&self, mark: char) -> bool {
        self.long_marks.contains(&mark)
    }

    /// The diacritic that writes stress
    pub fn stress_mark(&self) -> char {
        self.stress_mark
    }
}

/// Decompose and fold `text`, returning its two phonemes
fn two_phonemes(digraphs: &DigraphTable, text: &str) -> Option<(char, char)> {
    let decomposed: String = text.nfd().collect();
    let folded = digraphs.to_single(&decomposed);
    let mut chars = folded.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(a), Some(b), None) => Some((a, b)),
        _ => None,
    }
}
