//! Sound-change notation compiler, rule matcher and syllable analyzer
//!
//! This crate simulates historical sound change: a word is passed through
//! an ordered sequence of rules, each written in a compact bracket
//! notation such as `[{ptk}V₁{rl}V́₁-] > [{ptk}ø{rl}V́₁-]`.
//!
//! # Architecture
//!
//! - **Normalizer**: folds digraphs (`th`, `kʰ`) to single stand-in code
//!   points and back, and remembers which spelling a word came in
//! - **Syllable analyzer**: splits words into syllables and assigns
//!   weight and stress
//! - **Notation compiler**: parses both halves of a rule and correlates
//!   them into rewrite steps with a position anchor
//! - **Matcher**: binds a compiled rule against a word and rewrites the
//!   first match
//!
//! All of it is driven by [`Phonology`] tables loaded from TOML.
//!
//! # Example
//!
//! ```rust
//! use soundlaw_core::{syllabify, Rule};
//!
//! assert_eq!(syllabify("Galadriel"), vec!["Ga", "lad", "ri", "el"]);
//!
//! let rule = Rule::compile("[{ptkpʰkʰbdgm}V₁{rl}V́₁-] > [{ptkpʰkʰbdgm}ø{rl}V́₁-]").unwrap();
//! assert_eq!(rule.apply("barándā"), "brandā");
//! ```

pub mod error;
pub mod matcher;
pub mod normalizer;
pub mod notation;
pub mod phonology;
pub mod pipeline;
pub mod rule;
pub mod rule_set;
pub mod syllable;
pub mod text;

pub use error::{Error, NotationError, PhonologyError, Result};
pub use matcher::{ApplyContext, ApplyOptions};
pub use normalizer::{DigraphTable, PhonemeUnit, SpellingMode};
pub use phonology::{
    default_phonology, get_phonology, list_available_phonologies, Phonology, PhonologyConfig,
    DEFAULT_PHONOLOGY,
};
pub use pipeline::{Derivation, DerivationStep, Mechanic, Pipeline, SoundChange};
pub use rule::{CompiledRule, Position, RewriteStep, Rule};
pub use rule_set::{RuleEntry, RuleSet};
pub use syllable::{Structure, Syllable, Weight};
pub use text::PhoneticStr;

/// Fold digraphs to stand-ins using the default tables
pub fn to_single(word: &str) -> String {
    default_phonology().to_single(word)
}

/// Expand stand-ins using the default tables
pub fn to_digraphs(normalized: &str) -> String {
    default_phonology().to_digraphs(normalized)
}

/// Split a word into syllables using the default tables
pub fn syllabify(word: &str) -> Vec<String> {
    syllable::syllabify_with(&default_phonology(), word, false)
}

/// Analyse a word's syllables using the default tables
pub fn analyse(word: &str) -> Vec<Syllable> {
    syllable::analyse_with(&default_phonology(), word, false)
}

/// Compile a rule against the default tables
pub fn compile(notation: &str) -> Result<Rule> {
    Rule::compile(notation)
}

/// Compile and apply a rule in one go
pub fn apply(notation: &str, word: &str) -> Result<String> {
    Ok(Rule::compile(notation)?.apply(word))
}
