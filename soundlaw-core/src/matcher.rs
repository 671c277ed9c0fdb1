//! Rule matching and rewriting
//!
//! The word is segmented into phoneme units and every step of a compiled
//! variant is bound against successive units, starting from each offset
//! the position anchor allows. The first full binding is rewritten and
//! spliced back into the original text; everything outside the matched
//! span keeps its original spelling, case and normalization form.

use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::HashMap;
use std::ops::Range;
use std::sync::Arc;

use unicode_normalization::{is_nfc, UnicodeNormalization};

use crate::normalizer::{Marks, PhonemeUnit, SpellingMode};
use crate::phonology::Phonology;
use crate::rule::{CompiledRule, Position, RewriteStep};
use crate::syllable;

/// Switches that change how rules bind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyOptions {
    /// Let a step requiring the stress mark also bind the nucleus of the
    /// syllable the analyzer stresses, even when the mark is not written
    #[serde(default)]
    pub stress_from_analysis: bool,
}

/// Everything a sound change needs besides the word itself
///
/// The spelling mode is decided once per input word and carried through
/// every change applied to it.
#[derive(Debug, Clone)]
pub struct ApplyContext {
    pub phonology: Arc<Phonology>,
    pub spelling: SpellingMode,
    pub options: ApplyOptions,
}

impl ApplyContext {
    pub fn new(phonology: Arc<Phonology>, spelling: SpellingMode) -> Self {
        Self {
            phonology,
            spelling,
            options: ApplyOptions::default(),
        }
    }

    /// Context with the spelling mode of `word`
    pub fn for_word(phonology: Arc<Phonology>, word: &str) -> Self {
        let spelling = SpellingMode::detect(phonology.digraphs(), word);
        Self::new(phonology, spelling)
    }

    pub fn with_options(mut self, options: ApplyOptions) -> Self {
        self.options = options;
        self
    }
}

/// A full binding of one variant
#[derive(Debug)]
struct Binding {
    units: Range<usize>,
    /// Per step: the bound unit and the matched alternative
    matched: Vec<Option<(usize, usize)>>,
    captures: HashMap<u8, char>,
}

/// Apply one compiled variant, returning the rewritten word if it matched
pub(crate) fn apply_compiled(
    rule: &CompiledRule,
    phonology: &Phonology,
    word: &str,
    context: &ApplyContext,
) -> Option<String> {
    let units = phonology.segment(word, false);
    let stressed = if context.options.stress_from_analysis {
        syllable::stressed_nucleus(phonology, &units)
    } else {
        None
    };

    let n = units.len();
    for start in 0..=n {
        if rule.position == Position::Initial && start > 0 {
            break;
        }

        let Some(binding) = bind_at(rule, phonology, &units, start, stressed.as_ref()) else {
            continue;
        };
        if !rule.position.admits(start, binding.units.end, n) {
            continue;
        }

        log::trace!(
            "{word:?}: bound units {:?} at position {}",
            binding.units,
            rule.position
        );
        return Some(splice(rule, phonology, word, &units, &binding, context.spelling));
    }

    None
}

fn bind_at(
    rule: &CompiledRule,
    phonology: &Phonology,
    units: &[PhonemeUnit],
    start: usize,
    stressed: Option<&Range<usize>>,
) -> Option<Binding> {
    let mut captures = HashMap::new();
    let mut matched = Vec::with_capacity(rule.steps.len());
    let mut cursor = start;

    for step in &rule.steps {
        if step.is_insertion() {
            matched.push(None);
            continue;
        }

        let unit = units.get(cursor)?;
        let alternative = match_alternative(step, unit)?;

        if let Some(mark) = step.old_mark {
            let prosodic = mark == phonology.stress_mark()
                && stressed.is_some_and(|nucleus| nucleus.contains(&cursor));
            if !unit.has_mark(mark) && !prosodic {
                return None;
            }
        }

        if let Some(id) = step.old_coindex {
            let bound = *captures.entry(id).or_insert(unit.base);
            if bound != unit.base {
                return None;
            }
        }

        matched.push(Some((cursor, alternative)));
        cursor += 1;
    }

    Some(Binding {
        units: start..cursor,
        matched,
        captures,
    })
}

/// Index of the most specific alternative that accepts `unit`
fn match_alternative(step: &RewriteStep, unit: &PhonemeUnit) -> Option<usize> {
    step.find_literals
        .iter()
        .enumerate()
        .filter(|(_, literal)| {
            literal.base == unit.base && literal.marks.iter().all(|&m| unit.has_mark(m))
        })
        .min_by_key(|(_, literal)| Reverse(literal.marks.len()))
        .map(|(index, _)| index)
}

fn splice(
    rule: &CompiledRule,
    phonology: &Phonology,
    word: &str,
    units: &[PhonemeUnit],
    binding: &Binding,
    spelling: SpellingMode,
) -> String {
    let chars: Vec<char> = word.chars().collect();
    let start = units
        .get(binding.units.start)
        .map_or(chars.len(), |unit| unit.span.start);
    let end = if binding.units.is_empty() {
        start
    } else {
        units[binding.units.end - 1].span.end
    };

    let mut replacement = String::new();
    for (step, matched) in rule.steps.iter().zip(&binding.matched) {
        let matched = matched.map(|(unit, alternative)| (&units[unit], alternative));
        render_step(step, matched, &binding.captures, phonology, spelling, &mut replacement);
    }

    if chars[start..end].first().is_some_and(|c| c.is_uppercase()) {
        replacement = capitalize(&replacement);
    }

    let mut out: String = chars[..start].iter().collect();
    out.push_str(&replacement);
    out.extend(&chars[end..]);

    if is_nfc(word) {
        out.nfc().collect()
    } else {
        out
    }
}

fn render_step(
    step: &RewriteStep,
    matched: Option<(&PhonemeUnit, usize)>,
    captures: &HashMap<u8, char>,
    phonology: &Phonology,
    spelling: SpellingMode,
    out: &mut String,
) {
    let mut marks = Marks::new();

    let base = match step.new_coindex.and_then(|id| captures.get(&id)) {
        Some(&captured) => captured,
        None => {
            let alternative = matched.map_or(0, |(_, alternative)| alternative);
            let literal = match step.replace_literals.as_slice() {
                [] => return,
                [only] => only,
                many => &many[alternative.min(many.len() - 1)],
            };
            marks.extend(literal.marks.iter().copied());
            literal.base
        }
    };

    // Marks the match did not ask for stay on the phoneme
    if let Some((unit, alternative)) = matched {
        let consumed = &step.find_literals[alternative].marks;
        for &mark in &unit.marks {
            if !consumed.contains(&mark) && Some(mark) != step.old_mark && !marks.contains(&mark) {
                marks.push(mark);
            }
        }
    }

    if let Some(mark) = step.new_mark {
        if step.new_mark != step.old_mark && !marks.contains(&mark) {
            marks.push(mark);
        }
    }

    spelling.render(phonology.digraphs(), base, out);
    out.extend(marks);
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
