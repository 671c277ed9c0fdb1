//! Phoneme normalizer
//!
//! Maps multi-character spellings ("digraphs" such as `th` or `kʰ`) to a
//! single stand-in code point and back, so that later stages can treat one
//! phoneme as one character. The reverse mapping is not injective: `ch` and
//! `kh` fold to the same spirant. Text that is rewritten and handed back to
//! a caller is therefore rendered in one [`SpellingMode`], decided once per
//! input.

use smallvec::SmallVec;
use std::collections::HashMap;
use std::ops::Range;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::phonology::config::DigraphEntry;

/// Combining marks carried by a phoneme unit, in decomposed order
pub type Marks = SmallVec<[char; 2]>;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Digraph {
    sequence: Vec<char>,
    phoneme: char,
    compound_split: bool,
}

/// Bidirectional digraph table
///
/// Entries are kept longest-first so that `kʰw` is consumed before `kʰ`.
#[derive(Debug, Clone, Default)]
pub struct DigraphTable {
    entries: Vec<Digraph>,
    canonical: HashMap<char, String>,
}

impl DigraphTable {
    /// Build from configuration entries
    ///
    /// The first entry for a given stand-in is its canonical spelling.
    pub fn new(entries: &[DigraphEntry]) -> Self {
        let mut canonical = HashMap::new();
        let mut digraphs: Vec<Digraph> = entries
            .iter()
            .map(|entry| {
                let sequence: Vec<char> = entry.sequence.nfd().collect();
                canonical
                    .entry(entry.phoneme)
                    .or_insert_with(|| sequence.iter().collect::<String>());
                Digraph {
                    sequence,
                    phoneme: entry.phoneme,
                    compound_split: entry.compound_split,
                }
            })
            .collect();

        // Stable: equal lengths keep declaration order
        digraphs.sort_by(|a, b| b.sequence.len().cmp(&a.sequence.len()));

        Self {
            entries: digraphs,
            canonical,
        }
    }

    /// Number of spellings in the table
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no spellings
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `ch` is one of the stand-in code points
    #[inline]
    pub fn is_stand_in(&self, ch: char) -> bool {
        self.canonical.contains_key(&ch)
    }

    /// Canonical spelling of a stand-in
    pub fn spelling(&self, phoneme: char) -> Option<&str> {
        self.canonical.get(&phoneme).map(String::as_str)
    }

    /// Longest spelling starting at the head of `chars`
    ///
    /// Returns the number of characters consumed and the stand-in. With
    /// `compound_hint`, spellings flagged as possibly spanning a morpheme
    /// boundary are skipped.
    pub fn match_at(&self, chars: &[char], compound_hint: bool) -> Option<(usize, char)> {
        self.entries
            .iter()
            .filter(|d| !(compound_hint && d.compound_split))
            .find(|d| chars.starts_with(&d.sequence))
            .map(|d| (d.sequence.len(), d.phoneme))
    }

    /// Replace every digraph spelling with its stand-in
    ///
    /// Matching is case-sensitive and everything that is not a digraph is
    /// passed through untouched.
    pub fn to_single(&self, word: &str) -> String {
        let chars: Vec<char> = word.chars().collect();
        let mut out = String::with_capacity(word.len());
        let mut i = 0;

        while i < chars.len() {
            match self.match_at(&chars[i..], false) {
                Some((len, phoneme)) => {
                    out.push(phoneme);
                    i += len;
                }
                None => {
                    out.push(chars[i]);
                    i += 1;
                }
            }
        }

        out
    }

    /// Replace every stand-in with its canonical spelling
    pub fn to_digraphs(&self, normalized: &str) -> String {
        let mut out = String::with_capacity(normalized.len() + 4);
        for ch in normalized.chars() {
            match self.canonical.get(&ch) {
                Some(spelling) => out.push_str(spelling),
                None => out.push(ch),
            }
        }
        out
    }

    /// Split a word into phoneme units
    ///
    /// Letters are lowercased and decomposed; a digraph becomes one unit
    /// whose base is its stand-in. Every unit records the character span
    /// of the input it was read from, so unit boundaries can be mapped back
    /// onto the original spelling.
    pub fn segment(&self, word: &str, compound_hint: bool) -> Vec<PhonemeUnit> {
        let lower: Vec<char> = word.chars().map(fold_case).collect();
        let mut units = Vec::with_capacity(lower.len());
        let mut i = 0;

        while i < lower.len() {
            let start = i;
            let mut marks = Marks::new();

            let base = match self.match_at(&lower[i..], compound_hint) {
                Some((len, phoneme)) => {
                    i += len;
                    phoneme
                }
                None => {
                    let mut decomposed = std::iter::once(lower[i]).nfd();
                    let base = decomposed.next().unwrap_or(lower[i]);
                    marks.extend(decomposed);
                    i += 1;
                    base
                }
            };

            while i < lower.len() && is_combining_mark(lower[i]) {
                marks.extend(std::iter::once(lower[i]).nfd());
                i += 1;
            }

            units.push(PhonemeUnit {
                base,
                marks,
                span: start..i,
            });
        }

        units
    }
}

/// One phoneme of a segmented word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhonemeUnit {
    /// Lowercase base letter or digraph stand-in
    pub base: char,
    /// Combining marks on the base, decomposed
    pub marks: Marks,
    /// Character range of the source text this unit covers
    pub span: Range<usize>,
}

impl PhonemeUnit {
    /// Whether the unit carries `mark`
    #[inline]
    pub fn has_mark(&self, mark: char) -> bool {
        self.marks.contains(&mark)
    }
}

/// How stand-ins are rendered when text is handed back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SpellingMode {
    /// Multi-character phonetic spelling (`th`, `kʰ`)
    #[default]
    Digraph,
    /// One stand-in code point per phoneme
    Single,
}

impl SpellingMode {
    /// Decide the spelling convention of `word`
    ///
    /// A word that already contains a stand-in is in single-phoneme
    /// spelling; anything else is treated as digraph spelling.
    pub fn detect(table: &DigraphTable, word: &str) -> Self {
        if word.chars().any(|ch| table.is_stand_in(ch)) {
            SpellingMode::Single
        } else {
            SpellingMode::Digraph
        }
    }

    /// Render one phoneme base in this mode
    pub fn render(self, table: &DigraphTable, base: char, out: &mut String) {
        match (self, table.spelling(base)) {
            (SpellingMode::Digraph, Some(spelling)) => out.push_str(spelling),
            _ => out.push(base),
        }
    }
}

/// Lowercase a character when that maps it to exactly one character
pub(crate) fn fold_case(ch: char) -> char {
    let mut lower = ch.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => ch,
    }
}
