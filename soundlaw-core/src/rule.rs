//! Compiled sound-change rules
//!
//! A [`Rule`] is the compiled form of one notation string such as
//! `[ln] > [ll]`. Each pipe-separated variant becomes a [`CompiledRule`]:
//! a sequence of [`RewriteStep`]s plus the position anchor shared by every
//! variant of the rule.

use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use crate::error::{NotationError, Result};
use crate::matcher::{self, ApplyContext};
use crate::normalizer::Marks;
use crate::notation;
use crate::phonology::{default_phonology, Phonology};

/// Where in a word a rule may match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    /// The match starts at the beginning of the word
    Initial,
    /// The match touches neither edge
    Medial,
    /// The match ends at the end of the word
    Final,
    /// Unconstrained
    Any,
}

impl Position {
    /// Whether a match over `start..end` of an `n`-unit word is allowed
    #[inline]
    pub fn admits(self, start: usize, end: usize, n: usize) -> bool {
        match self {
            // The open side's `-` stands for at least one phoneme
            Position::Initial => start == 0 && end < n,
            Position::Final => start > 0 && end == n,
            Position::Medial => start > 0 && end < n,
            Position::Any => true,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Position::Initial => "initial",
            Position::Medial => "medial",
            Position::Final => "final",
            Position::Any => "any",
        };
        f.write_str(name)
    }
}

/// One phoneme in single-phoneme spelling, with the marks it requires or
/// produces
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Literal {
    pub base: char,
    pub marks: Marks,
}

impl Literal {
    pub fn new(base: char) -> Self {
        Self {
            base,
            marks: Marks::new(),
        }
    }

    /// Read a base-plus-marks cluster
    pub fn parse(cluster: &str) -> Option<Self> {
        let mut chars = cluster.chars();
        let base = chars.next()?;
        Some(Self {
            base,
            marks: chars.collect(),
        })
    }

    /// Phonetic spelling, with digraphs expanded
    pub fn spelled(&self, phonology: &Phonology) -> String {
        let mut out = phonology
            .digraphs()
            .spelling(self.base)
            .map_or_else(|| self.base.to_string(), str::to_string);
        out.extend(self.marks.iter());
        out
    }
}

/// One position of a compiled rule: what to look for and what to write
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RewriteStep {
    /// Alternatives that may match here, in phonetic spelling
    pub find: Vec<String>,
    /// Replacements, in phonetic spelling; empty means deletion
    pub replace: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_coindex: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_coindex: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_mark: Option<char>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_mark: Option<char>,
    #[serde(skip)]
    pub(crate) find_literals: Vec<Literal>,
    #[serde(skip)]
    pub(crate) replace_literals: Vec<Literal>,
}

impl RewriteStep {
    pub(crate) fn new(find: Vec<Literal>, replace: Vec<Literal>, phonology: &Phonology) -> Self {
        Self {
            find: find.iter().map(|l| l.spelled(phonology)).collect(),
            replace: replace.iter().map(|l| l.spelled(phonology)).collect(),
            old_coindex: None,
            new_coindex: None,
            old_mark: None,
            new_mark: None,
            find_literals: find,
            replace_literals: replace,
        }
    }

    /// Whether the step inserts without consuming anything
    pub fn is_insertion(&self) -> bool {
        self.find_literals.is_empty()
    }

    /// Whether the step removes what it matched
    pub fn is_deletion(&self) -> bool {
        self.replace_literals.is_empty() && self.new_coindex.is_none()
    }
}

/// One pipe variant of a rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledRule {
    pub steps: Vec<RewriteStep>,
    pub position: Position,
}

/// A compiled, named sound change
#[derive(Debug, Clone, Serialize)]
pub struct Rule {
    name: String,
    notation: String,
    position: Position,
    variants: Vec<CompiledRule>,
    #[serde(skip)]
    phonology: Arc<Phonology>,
}

impl Rule {
    /// Compile against the default phonology tables
    ///
    /// # Example
    ///
    /// ```rust
    /// use soundlaw_core::Rule;
    ///
    /// let rule = Rule::compile("[ln] > [ll]").unwrap();
    /// assert_eq!(rule.apply("olna"), "olla");
    /// assert_eq!(rule.apply("orna"), "orna");
    /// ```
    pub fn compile(notation: &str) -> Result<Self> {
        Self::compile_with(notation, default_phonology())
    }

    /// Compile against specific phonology tables
    pub fn compile_with(notation: &str, phonology: Arc<Phonology>) -> Result<Self> {
        let (old, new) = split_arrow(notation)?;

        let old_form = notation::parse_form(old, &phonology, "old")?;
        let new_form = notation::parse_form(new, &phonology, "new")?;
        let position = notation::position_of(&old_form.source);
        let variants = notation::correlate(&old_form, &new_form, position, &phonology)?;

        log::debug!(
            "compiled {:?}: {} variant(s), position {position}",
            notation.trim(),
            variants.len()
        );

        Ok(Self {
            name: notation.trim().to_string(),
            notation: notation.trim().to_string(),
            position,
            variants,
            phonology,
        })
    }

    /// Give the rule a name other than its notation
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn notation(&self) -> &str {
        &self.notation
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Pipe variants, in the order they are tried
    pub fn variants(&self) -> &[CompiledRule] {
        &self.variants
    }

    pub fn phonology(&self) -> &Arc<Phonology> {
        &self.phonology
    }

    /// Apply to one word, detecting its spelling mode
    pub fn apply(&self, word: &str) -> String {
        let context = ApplyContext::for_word(Arc::clone(&self.phonology), word);
        self.apply_with(word, &context)
    }

    /// Apply to one word under an existing context
    ///
    /// Variants are tried in order and the first one that matches wins. A
    /// word no variant matches is returned unchanged.
    pub fn apply_with(&self, word: &str, context: &ApplyContext) -> String {
        self.variants
            .iter()
            .find_map(|variant| matcher::apply_compiled(variant, &self.phonology, word, context))
            .unwrap_or_else(|| word.to_string())
    }
}

/// Split a rule on its single `>`
fn split_arrow(notation: &str) -> std::result::Result<(&str, &str), NotationError> {
    let mut halves = notation.split('>');
    match (halves.next(), halves.next(), halves.next()) {
        (Some(old), Some(new), None) => Ok((old, new)),
        (_, None, _) => Err(NotationError::MissingArrow),
        _ => Err(NotationError::MultipleArrows),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_split_arrow() {
        assert_eq!(split_arrow("[a] > [b]"), Ok(("[a] ", " [b]")));
        assert_eq!(split_arrow("[a]"), Err(NotationError::MissingArrow));
        assert_eq!(split_arrow("[a]>[b]>[c]"), Err(NotationError::MultipleArrows));
    }

    #[test]
    fn test_position_admits() {
        assert!(Position::Initial.admits(0, 2, 5));
        assert!(!Position::Initial.admits(1, 3, 5));
        assert!(Position::Final.admits(3, 5, 5));
        assert!(!Position::Final.admits(0, 2, 5));
        assert!(Position::Medial.admits(1, 3, 5));
        assert!(!Position::Medial.admits(0, 3, 5));
        assert!(!Position::Medial.admits(2, 5, 5));
        assert!(Position::Any.admits(0, 5, 5));
        assert!(!Position::Initial.admits(0, 5, 5));
        assert!(!Position::Final.admits(0, 5, 5));
    }

    #[test]
    fn test_compile_simple() {
        let rule = Rule::compile("[ln] > [ll]").unwrap();
        assert_eq!(rule.position(), Position::Any);
        assert_eq!(rule.name(), "[ln] > [ll]");
        assert_eq!(rule.variants().len(), 1);

        let steps = &rule.variants()[0].steps;
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].find, vec!["l"]);
        assert_eq!(steps[1].find, vec!["n"]);
        assert_eq!(steps[1].replace, vec!["l"]);
    }

    #[test]
    fn test_compile_expands_stand_ins() {
        let rule = Rule::compile("[{pʰtʰkʰ}-] > [{φθχ}-]").unwrap();
        let step = &rule.variants()[0].steps[0];
        assert_eq!(step.find, vec!["pʰ", "tʰ", "kʰ"]);
        assert_eq!(step.replace, vec!["ph", "th", "ch"]);
        assert_eq!(rule.position(), Position::Initial);
    }

    #[test]
    fn test_named() {
        let rule = Rule::compile("[ln] > [ll]").unwrap().named("assimilation");
        assert_eq!(rule.name(), "assimilation");
        assert_eq!(rule.notation(), "[ln] > [ll]");
    }

    #[test]
    fn test_compile_errors() {
        assert!(matches!(
            Rule::compile("[ln]"),
            Err(Error::Notation(NotationError::MissingArrow))
        ));
        assert!(matches!(
            Rule::compile("[ln] > [l]"),
            Err(Error::Notation(NotationError::SlotCountMismatch { .. }))
        ));
        assert!(matches!(
            Rule::compile("[a|b] > [c]"),
            Err(Error::Notation(NotationError::SegmentCountMismatch { old: 2, new: 1 }))
        ));
    }

    #[test]
    fn test_step_serializes_phonetic_spelling() {
        let rule = Rule::compile("[thá] > [ða]").unwrap();
        let json = serde_json::to_value(&rule.variants()[0]).unwrap();
        assert_eq!(json["position"], "any");
        assert_eq!(json["steps"][0]["find"][0], "th");
        assert_eq!(json["steps"][0]["replace"][0], "dh");
        assert_eq!(json["steps"][1]["old_mark"], "\u{0301}");
        assert!(json["steps"][1].get("new_mark").is_none());
    }
}
