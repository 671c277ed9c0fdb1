//! Notation parser
//!
//! Turns one half of a rule (the old form or the new form) into a linear
//! stream of slots. Multi-phoneme `{...}` groups become placeholder slots
//! whose raw content waits in an elements queue until the correlator
//! resolves it; combining marks and subscript digits are lifted out of the
//! stream into side tables keyed by slot index.

use std::collections::{BTreeMap, VecDeque};

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::error::NotationError;
use crate::phonology::Phonology;
use crate::text::{subscript_digit, PhoneticStr};

/// One position in a linearized rule pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    /// A single phoneme, in single-phoneme spelling
    Literal(char),
    /// A set of alternatives; content is the next entry of the elements queue
    Alternatives,
    /// `V`, any member of the vowel class
    VowelClass,
    /// `ø`, nothing
    Deletion,
    /// `-`, the rest of the word
    Wildcard,
}

/// Parsed form of one pipe segment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedSegment {
    pub slots: Vec<Slot>,
    /// Raw content of each multi-phoneme group, in declaration order
    pub elements: VecDeque<String>,
    /// Slot index -> diacritic
    pub marks: BTreeMap<usize, char>,
    /// Slot index -> coindex id
    pub coindex: BTreeMap<usize, u8>,
}

/// Parsed form of a whole half rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedForm {
    /// The form after bracket stripping and decomposition
    pub source: String,
    pub segments: Vec<ParsedSegment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Char(char),
    Group,
    /// One-phoneme group: base and the marks written on it
    Literal(char, Vec<char>),
}

/// Parse one half of a rule
///
/// `side` names the half ("old" or "new") in error messages.
pub fn parse_form(
    text: &str,
    phonology: &Phonology,
    side: &'static str,
) -> Result<ParsedForm, NotationError> {
    let source = strip_brackets(text).nfd().collect::<String>();
    if source.is_empty() {
        return Err(NotationError::EmptyForm { side });
    }

    let segments = split_segments(&source)?
        .into_iter()
        .map(|segment| {
            if segment.trim().is_empty() {
                return Err(NotationError::EmptyForm { side });
            }
            parse_segment(segment, phonology)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ParsedForm { source, segments })
}

/// Trim whitespace and one pair of enclosing square brackets
pub(crate) fn strip_brackets(text: &str) -> &str {
    let trimmed = text.trim();
    trimmed
        .strip_prefix('[')
        .and_then(|inner| inner.strip_suffix(']'))
        .map_or(trimmed, str::trim)
}

/// Split on `|` outside of groups
fn split_segments(source: &str) -> Result<Vec<&str>, NotationError> {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (position, (i, ch)) in source.char_indices().enumerate() {
        match ch {
            '{' => {
                if depth > 0 {
                    return Err(NotationError::NestedGroup { position });
                }
                depth += 1;
            }
            '}' => {
                if depth == 0 {
                    return Err(NotationError::UnexpectedGroupClose { position });
                }
                depth -= 1;
            }
            '|' if depth == 0 => {
                segments.push(&source[start..i]);
                start = i + ch.len_utf8();
            }
            _ => {}
        }
    }
    segments.push(&source[start..]);

    Ok(segments)
}

/// Parse one pipe segment
pub fn parse_segment(segment: &str, phonology: &Phonology) -> Result<ParsedSegment, NotationError> {
    let mut parsed = ParsedSegment::default();

    for piece in flatten_groups(segment, phonology, &mut parsed.elements)? {
        let last = parsed.slots.len().checked_sub(1);

        match piece {
            Piece::Char(ch) if ch.is_whitespace() => {}
            Piece::Char(ch) if is_combining_mark(ch) => {
                let slot = last.ok_or(NotationError::DanglingMark { mark: ch })?;
                if parsed.marks.insert(slot, ch).is_some() {
                    return Err(NotationError::DuplicateMark { slot });
                }
            }
            Piece::Char(ch) if subscript_digit(ch).is_some() => {
                let digit = subscript_digit(ch).unwrap_or_default();
                let slot = last.ok_or(NotationError::DanglingCoindex { digit })?;
                parsed.coindex.insert(slot, digit);
            }
            Piece::Char('V') => parsed.slots.push(Slot::VowelClass),
            Piece::Char('ø') => parsed.slots.push(Slot::Deletion),
            Piece::Char('-') => parsed.slots.push(Slot::Wildcard),
            Piece::Char(ch) => parsed.slots.push(Slot::Literal(ch)),
            Piece::Group => parsed.slots.push(Slot::Alternatives),
            Piece::Literal(ch, marks) => {
                let slot = parsed.slots.len();
                match marks.as_slice() {
                    [] => {}
                    [mark] => {
                        parsed.marks.insert(slot, *mark);
                    }
                    _ => return Err(NotationError::DuplicateMark { slot }),
                }
                parsed.slots.push(Slot::Literal(ch));
            }
        }
    }

    Ok(parsed)
}

/// Replace groups with placeholders and fold digraphs everywhere else
fn flatten_groups(
    segment: &str,
    phonology: &Phonology,
    elements: &mut VecDeque<String>,
) -> Result<Vec<Piece>, NotationError> {
    let mut pieces = Vec::new();
    let mut text = String::new();
    let mut chars = segment.chars().enumerate();

    while let Some((position, ch)) = chars.next() {
        if ch != '{' {
            text.push(ch);
            continue;
        }

        let mut content = String::new();
        let mut closed = false;
        for (_, inner) in chars.by_ref() {
            if inner == '}' {
                closed = true;
                break;
            }
            if !inner.is_whitespace() {
                content.push(inner);
            }
        }
        if !closed {
            return Err(NotationError::UnclosedGroup { position });
        }
        if content.is_empty() {
            return Err(NotationError::EmptyGroup { position });
        }

        pieces.extend(phonology.to_single(&text).chars().map(Piece::Char));
        text.clear();

        let folded = phonology.to_single(&content);
        if folded.phoneme_count() > 1 {
            elements.push_back(content);
            pieces.push(Piece::Group);
        } else {
            let mut parts = folded.chars();
            let base = parts.next().unwrap_or_default();
            pieces.push(Piece::Literal(base, parts.collect()));
        }
    }
    pieces.extend(phonology.to_single(&text).chars().map(Piece::Char));

    Ok(pieces)
}
