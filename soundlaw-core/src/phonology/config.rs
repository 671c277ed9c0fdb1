//! TOML schema for phonology tables

use serde::{Deserialize, Serialize};

/// Root phonology configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhonologyConfig {
    pub metadata: Metadata,
    #[serde(default)]
    pub digraphs: Vec<DigraphEntry>,
    pub vowels: Vowels,
    #[serde(default)]
    pub onsets: Onsets,
    #[serde(default)]
    pub marks: Marks,
}

/// Table metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    pub code: String,
    pub name: String,
}

/// One multi-character spelling and its stand-in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigraphEntry {
    pub sequence: String,
    pub phoneme: char,
    #[serde(default)]
    pub compound_split: bool,
}

/// Vowel inventory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vowels {
    pub letters: Vec<char>,
    #[serde(default = "default_vowel_class")]
    pub vowel_class: Vec<char>,
    #[serde(default)]
    pub diphthongs: Vec<String>,
}

/// Legal syllable-initial clusters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Onsets {
    #[serde(default)]
    pub clusters: Vec<String>,
}

/// Diacritics with prosodic meaning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Marks {
    #[serde(default = "default_long_marks")]
    pub long: Vec<char>,
    #[serde(default = "default_stress_mark")]
    pub stress: char,
}

impl Default for Marks {
    fn default() -> Self {
        Self {
            long: default_long_marks(),
            stress: default_stress_mark(),
        }
    }
}

fn default_vowel_class() -> Vec<char> {
    vec!['a', 'e', 'i', 'o', 'u']
}

fn default_long_marks() -> Vec<char> {
    vec!['\u{0304}']
}

fn default_stress_mark() -> char {
    '\u{0301}'
}
