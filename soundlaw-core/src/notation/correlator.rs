//! Old/new slot correlation
//!
//! Walks the old and new slot streams of each pipe segment side by side and
//! produces one rewrite step per position. Structural problems (unequal
//! streams, misplaced wildcards, alternative sets that cannot pair up) are
//! reported here so that applying a compiled rule can never fail.

use std::collections::HashSet;

use super::parser::{ParsedForm, ParsedSegment, Slot};
use crate::error::NotationError;
use crate::phonology::Phonology;
use crate::rule::{CompiledRule, Literal, Position, RewriteStep};
use crate::text::PhoneticStr;

/// Position anchor of a rule, from its old form
///
/// A trailing `-` leaves the rest of the word open after the match, so
/// the match must start the word; a leading `-` mirrors that.
pub fn position_of(old_source: &str) -> Position {
    let source = old_source.trim();
    match (source.starts_with('-'), source.ends_with('-')) {
        (false, true) => Position::Initial,
        (true, false) => Position::Final,
        (true, true) => Position::Medial,
        (false, false) => Position::Any,
    }
}

/// Pair old and new forms into one compiled variant per pipe segment
pub fn correlate(
    old: &ParsedForm,
    new: &ParsedForm,
    position: Position,
    phonology: &Phonology,
) -> Result<Vec<CompiledRule>, NotationError> {
    if old.segments.len() != new.segments.len() {
        return Err(NotationError::SegmentCountMismatch {
            old: old.segments.len(),
            new: new.segments.len(),
        });
    }

    old.segments
        .iter()
        .zip(&new.segments)
        .enumerate()
        .map(|(index, (old, new))| correlate_segment(index, old, new, position, phonology))
        .collect()
}

fn correlate_segment(
    segment: usize,
    old: &ParsedSegment,
    new: &ParsedSegment,
    position: Position,
    phonology: &Phonology,
) -> Result<CompiledRule, NotationError> {
    if old.slots.len() != new.slots.len() {
        return Err(NotationError::SlotCountMismatch {
            segment,
            old: old.slots.len(),
            new: new.slots.len(),
        });
    }

    let last = old.slots.len().saturating_sub(1);
    let captured: HashSet<u8> = old.coindex.values().copied().collect();
    let mut old_groups = old.elements.iter();
    let mut new_groups = new.elements.iter();
    let mut steps = Vec::with_capacity(old.slots.len());

    for (slot, (old_slot, new_slot)) in old.slots.iter().zip(&new.slots).enumerate() {
        let old_wild = *old_slot == Slot::Wildcard;
        let new_wild = *new_slot == Slot::Wildcard;
        if old_wild || new_wild {
            if slot != 0 && slot != last {
                return Err(NotationError::InteriorWildcard { segment, slot });
            }
            if old_wild != new_wild {
                return Err(NotationError::WildcardMismatch { segment, slot });
            }
            continue;
        }

        let find = expand(old_slot, &mut old_groups, phonology);
        let replace = expand(new_slot, &mut new_groups, phonology);
        let new_coindex = new.coindex.get(&slot).copied();

        // A captured value replaces the step's own set, so its size is moot
        let uses_capture = new_coindex.is_some_and(|id| captured.contains(&id));
        if !uses_capture && replace.len() > 1 && replace.len() != find.len() {
            return Err(NotationError::AlternativeCountMismatch {
                segment,
                slot,
                find: find.len(),
                replace: replace.len(),
            });
        }

        let mut step = RewriteStep::new(find, replace, phonology);
        step.old_coindex = old.coindex.get(&slot).copied();
        step.new_coindex = new_coindex;
        step.old_mark = old.marks.get(&slot).copied();
        step.new_mark = new.marks.get(&slot).copied();
        steps.push(step);
    }

    if steps.is_empty() {
        return Err(NotationError::EmptyPattern { segment });
    }

    Ok(CompiledRule { steps, position })
}

/// Literal set a slot stands for
fn expand<'a>(
    slot: &Slot,
    groups: &mut impl Iterator<Item = &'a String>,
    phonology: &Phonology,
) -> Vec<Literal> {
    match slot {
        Slot::Literal(ch) => vec![Literal::new(*ch)],
        Slot::Alternatives => groups
            .next()
            .map(|content| split_alternatives(content, phonology))
            .unwrap_or_default(),
        Slot::VowelClass => phonology
            .vowel_class()
            .iter()
            .map(|&vowel| Literal::new(vowel))
            .collect(),
        Slot::Deletion | Slot::Wildcard => Vec::new(),
    }
}

/// One literal per phoneme of a group's raw content
fn split_alternatives(content: &str, phonology: &Phonology) -> Vec<Literal> {
    phonology
        .to_single(content)
        .phonemes()
        .filter_map(Literal::parse)
        .collect()
}
