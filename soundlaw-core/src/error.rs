//! Error types for notation compilation and phonology loading

use std::path::PathBuf;
use thiserror::Error;

/// Malformed rule notation
///
/// Every variant is raised while a rule is compiled. Applying a compiled
/// rule never fails: a rule whose condition does not hold simply leaves the
/// word unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    /// The rule has no `>` separating old and new forms
    #[error("missing '>' between old and new forms")]
    MissingArrow,

    /// More than one `>` in a single rule
    #[error("more than one '>' in rule")]
    MultipleArrows,

    /// A form (or a pipe segment of it) is empty
    #[error("empty {side} form")]
    EmptyForm {
        /// "old" or "new"
        side: &'static str,
    },

    /// `{` without a matching `}`
    #[error("unclosed group starting at character {position}")]
    UnclosedGroup {
        /// Character offset of the opening brace
        position: usize,
    },

    /// `}` without a matching `{`
    #[error("unexpected '}}' at character {position}")]
    UnexpectedGroupClose {
        /// Character offset of the closing brace
        position: usize,
    },

    /// `{` inside another group
    #[error("nested group at character {position}")]
    NestedGroup {
        /// Character offset of the inner brace
        position: usize,
    },

    /// `{}`
    #[error("empty group at character {position}")]
    EmptyGroup {
        /// Character offset of the opening brace
        position: usize,
    },

    /// A combining mark with no slot before it
    #[error("diacritic {mark:?} has no preceding slot")]
    DanglingMark {
        /// The orphaned mark
        mark: char,
    },

    /// A second mark on a slot that already carries one
    #[error("slot {slot} carries more than one diacritic")]
    DuplicateMark {
        /// Slot index within its segment
        slot: usize,
    },

    /// A subscript digit with no slot before it
    #[error("coindex {digit} has no preceding slot")]
    DanglingCoindex {
        /// The coindex digit value
        digit: u8,
    },

    /// Old and new forms have different numbers of pipe segments
    #[error("old form has {old} segments but new form has {new}")]
    SegmentCountMismatch {
        /// Segment count of the old form
        old: usize,
        /// Segment count of the new form
        new: usize,
    },

    /// Old and new slot streams of a segment differ in length
    #[error("segment {segment}: old form has {old} slots but new form has {new}")]
    SlotCountMismatch {
        /// Pipe segment index
        segment: usize,
        /// Slot count on the old side
        old: usize,
        /// Slot count on the new side
        new: usize,
    },

    /// A step's replacement set cannot be paired with its find set
    #[error(
        "segment {segment}, slot {slot}: {replace} replacements cannot pair with {find} alternatives"
    )]
    AlternativeCountMismatch {
        /// Pipe segment index
        segment: usize,
        /// Slot index
        slot: usize,
        /// Size of the find set
        find: usize,
        /// Size of the replace set
        replace: usize,
    },

    /// A `-` somewhere other than the first or last slot
    #[error("segment {segment}: wildcard at slot {slot} is not at a word edge")]
    InteriorWildcard {
        /// Pipe segment index
        segment: usize,
        /// Slot index
        slot: usize,
    },

    /// A `-` on one side without a `-` at the same slot on the other side
    #[error("segment {segment}: wildcard at slot {slot} has no counterpart")]
    WildcardMismatch {
        /// Pipe segment index
        segment: usize,
        /// Slot index
        slot: usize,
    },

    /// A segment made only of wildcards
    #[error("segment {segment} has nothing to match")]
    EmptyPattern {
        /// Pipe segment index
        segment: usize,
    },
}

/// Phonology table loading and validation errors
#[derive(Debug, Error)]
pub enum PhonologyError {
    /// TOML could not be parsed into the table schema
    #[error("failed to parse phonology tables: {0}")]
    Parse(String),

    /// File could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        /// The file that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Tables parsed but are inconsistent
    #[error("invalid phonology tables: {0}")]
    Invalid(String),

    /// No embedded tables under this code
    #[error("unknown phonology: {0}")]
    Unknown(String),
}

/// Crate-level error
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed notation
    #[error(transparent)]
    Notation(#[from] NotationError),

    /// Phonology tables failed to load
    #[error(transparent)]
    Phonology(#[from] PhonologyError),

    /// A named rule from a rule set failed to compile
    #[error("rule '{name}': {source}")]
    Rule {
        /// Rule name
        name: String,
        /// What was wrong with its notation
        #[source]
        source: NotationError,
    },

    /// A rule set file could not be read or parsed
    #[error("rule set error: {0}")]
    RuleSet(String),
}

/// Result type for soundlaw operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notation_error_display() {
        let err = NotationError::SlotCountMismatch {
            segment: 0,
            old: 3,
            new: 2,
        };
        assert_eq!(
            err.to_string(),
            "segment 0: old form has 3 slots but new form has 2"
        );
        assert_eq!(
            NotationError::UnexpectedGroupClose { position: 4 }.to_string(),
            "unexpected '}' at character 4"
        );
    }

    #[test]
    fn test_rule_error_names_rule() {
        let err = Error::Rule {
            name: "syncope".to_string(),
            source: NotationError::MissingArrow,
        };
        assert_eq!(
            err.to_string(),
            "rule 'syncope': missing '>' between old and new forms"
        );
    }

    #[test]
    fn test_from_conversions() {
        let err: Error = NotationError::MissingArrow.into();
        assert!(matches!(err, Error::Notation(NotationError::MissingArrow)));

        let err: Error = PhonologyError::Unknown("klingon".to_string()).into();
        assert_eq!(err.to_string(), "unknown phonology: klingon");
    }
}
