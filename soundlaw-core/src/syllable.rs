//! Syllable and prosody analysis
//!
//! Words are split into phoneme units, nuclei are located, and the
//! consonant run between each pair of nuclei decides where the break falls.
//! Syllables are sliced out of the original word, so digraph spelling and
//! letter case survive unchanged and the syllables always concatenate back
//! to the input.

use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::normalizer::PhonemeUnit;
use crate::phonology::Phonology;

/// Syllable weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weight {
    /// Short vowel in an open syllable
    Light,
    /// Long vowel, diphthong, or closed syllable
    Heavy,
}

/// Whether a syllable ends in a vowel or a consonant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Structure {
    /// Ends in its nucleus
    Open,
    /// Ends in a consonant
    Closed,
}

impl Weight {
    pub fn as_str(&self) -> &'static str {
        match self {
            Weight::Light => "light",
            Weight::Heavy => "heavy",
        }
    }
}

impl Structure {
    pub fn as_str(&self) -> &'static str {
        match self {
            Structure::Open => "open",
            Structure::Closed => "closed",
        }
    }
}

/// One analysed syllable
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Syllable {
    /// The syllable as spelled in the input
    pub text: String,
    /// Consonants before the nucleus
    pub onset: String,
    /// Vowel or diphthong
    pub nucleus: String,
    /// Consonants after the nucleus
    pub coda: String,
    pub weight: Weight,
    pub structure: Structure,
    pub stressed: bool,
    /// Byte range of the syllable in the input
    pub span: Range<usize>,
}

/// Unit-index layout of one syllable
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SyllableLayout {
    pub units: Range<usize>,
    pub nucleus: Range<usize>,
}

/// Split a word into syllable strings
pub fn syllabify_with(phonology: &Phonology, word: &str, compound_hint: bool) -> Vec<String> {
    analyse_with(phonology, word, compound_hint)
        .into_iter()
        .map(|syllable| syllable.text)
        .collect()
}

/// Split a word into syllables with weight, structure and stress
pub fn analyse_with(phonology: &Phonology, word: &str, compound_hint: bool) -> Vec<Syllable> {
    let units = phonology.segment(word, compound_hint);
    let layouts = layout(phonology, &units);

    // Char index -> byte offset, with one past the end
    let offsets: Vec<usize> = word
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(word.len()))
        .collect();
    let slice = |range: Range<usize>| slice_units(word, &offsets, &units, range);

    let mut syllables: Vec<Syllable> = layouts
        .iter()
        .map(|layout| {
            let (text, span) = slice(layout.units.clone());
            let (onset, _) = slice(layout.units.start..layout.nucleus.start);
            let (nucleus, _) = slice(layout.nucleus.clone());
            let (coda, _) = slice(layout.nucleus.end..layout.units.end);
            let structure = structure_of(phonology, &units, layout);

            Syllable {
                text: text.to_string(),
                onset: onset.to_string(),
                nucleus: nucleus.to_string(),
                coda: coda.to_string(),
                weight: weight_of(phonology, &units, layout, structure),
                structure,
                stressed: false,
                span,
            }
        })
        .collect();

    let weights: Vec<Weight> = syllables.iter().map(|s| s.weight).collect();
    if let Some(index) = stressed_index(&weights) {
        syllables[index].stressed = true;
    }

    log::trace!("analysed {word:?} into {} syllables", syllables.len());
    syllables
}

/// Text and byte range of a run of units
fn slice_units<'w>(
    word: &'w str,
    offsets: &[usize],
    units: &[PhonemeUnit],
    range: Range<usize>,
) -> (&'w str, Range<usize>) {
    if range.is_empty() {
        return ("", 0..0);
    }
    let start = offsets[units[range.start].span.start];
    let end = offsets[units[range.end - 1].span.end];
    (&word[start..end], start..end)
}

/// Syllable layouts over a unit sequence
pub(crate) fn layout(phonology: &Phonology, units: &[PhonemeUnit]) -> Vec<SyllableLayout> {
    if units.is_empty() {
        return Vec::new();
    }

    let nuclei = find_nuclei(phonology, units);
    if nuclei.len() <= 1 {
        return vec![SyllableLayout {
            units: 0..units.len(),
            nucleus: nuclei.into_iter().next().unwrap_or(0..0),
        }];
    }

    let mut breaks = Vec::with_capacity(nuclei.len() - 1);
    for pair in nuclei.windows(2) {
        breaks.push(break_between(phonology, units, pair[0].end, pair[1].start));
    }

    let mut layouts = Vec::with_capacity(nuclei.len());
    let mut start = 0;
    for (i, nucleus) in nuclei.into_iter().enumerate() {
        let end = breaks.get(i).copied().unwrap_or(units.len());
        layouts.push(SyllableLayout {
            units: start..end,
            nucleus,
        });
        start = end;
    }
    layouts
}

/// Index of the stressed syllable, if any
pub(crate) fn stressed_index(weights: &[Weight]) -> Option<usize> {
    match weights.len() {
        0 | 1 => None,
        2 => Some(0),
        n if weights[n - 2] == Weight::Heavy => Some(n - 2),
        n => Some(n.saturating_sub(3)),
    }
}

/// Unit range of the stressed syllable's nucleus
pub(crate) fn stressed_nucleus(phonology: &Phonology, units: &[PhonemeUnit]) -> Option<Range<usize>> {
    let layouts = layout(phonology, units);
    let weights: Vec<Weight> = layouts
        .iter()
        .map(|layout| {
            let structure = structure_of(phonology, units, layout);
            weight_of(phonology, units, layout, structure)
        })
        .collect();

    stressed_index(&weights).map(|index| layouts[index].nucleus.clone())
}

/// Diphthongs first, else single vowels; left to right, non-overlapping
fn find_nuclei(phonology: &Phonology, units: &[PhonemeUnit]) -> Vec<Range<usize>> {
    let mut nuclei = Vec::new();
    let mut i = 0;

    while i < units.len() {
        if !phonology.is_vowel(units[i].base) {
            i += 1;
            continue;
        }

        let diphthong = units
            .get(i + 1)
            .is_some_and(|next| phonology.is_diphthong(units[i].base, next.base));
        let len = if diphthong { 2 } else { 1 };
        nuclei.push(i..i + len);
        i += len;
    }

    nuclei
}

/// Where the syllable break falls in the consonant run `start..end`
fn break_between(phonology: &Phonology, units: &[PhonemeUnit], start: usize, end: usize) -> usize {
    match end - start {
        // Hiatus, or a single consonant that opens the next syllable
        0 | 1 => start,
        2 => start + 1,
        3 => {
            if phonology.is_onset(units[start + 1].base, units[start + 2].base) {
                start + 1
            } else {
                start + 2
            }
        }
        n => start + n / 2,
    }
}

fn structure_of(phonology: &Phonology, units: &[PhonemeUnit], layout: &SyllableLayout) -> Structure {
    let ends_in_consonant = layout
        .units
        .clone()
        .next_back()
        .is_some_and(|last| !phonology.is_vowel(units[last].base));

    if ends_in_consonant {
        Structure::Closed
    } else {
        Structure::Open
    }
}

fn weight_of(
    phonology: &Phonology,
    units: &[PhonemeUnit],
    layout: &SyllableLayout,
    structure: Structure,
) -> Weight {
    let nucleus = &units[layout.nucleus.clone()];
    let long = nucleus
        .iter()
        .any(|unit| unit.marks.iter().any(|&m| phonology.is_long_mark(m)));
    let diphthong = nucleus.len() == 2;

    if long || diphthong || structure == Structure::Closed {
        Weight::Heavy
    } else {
        Weight::Light
    }
}
