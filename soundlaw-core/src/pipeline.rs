//! Ordered sound-change pipelines
//!
//! A [`Pipeline`] runs a sequence of [`SoundChange`]s over one word. Compiled
//! [`Rule`]s and hand-written [`Mechanic`]s can be mixed freely; both see the
//! same [`ApplyContext`], whose spelling mode is decided once from the input
//! word before the first change runs.

use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use crate::matcher::{ApplyContext, ApplyOptions};
use crate::phonology::Phonology;
use crate::rule::Rule;

/// Anything that rewrites a word
pub trait SoundChange: Send + Sync {
    /// Name shown in derivations
    fn name(&self) -> &str;

    /// Rewrite `word`, returning it unchanged when the change does not apply
    fn apply(&self, word: &str, context: &ApplyContext) -> String;
}

impl SoundChange for Rule {
    fn name(&self) -> &str {
        Rule::name(self)
    }

    fn apply(&self, word: &str, context: &ApplyContext) -> String {
        self.apply_with(word, context)
    }
}

type MechanicFn = dyn Fn(&str, &ApplyContext) -> String + Send + Sync;

/// A sound change written directly as code
///
/// # Example
///
/// ```rust
/// use soundlaw_core::{Mechanic, Pipeline};
///
/// let apocope = Mechanic::new("final-i-loss", |word, _| {
///     word.strip_suffix('i').unwrap_or(word).to_string()
/// });
/// let pipeline = Pipeline::default().with(apocope);
/// assert_eq!(pipeline.run("edhi").output, "edh");
/// ```
pub struct Mechanic {
    name: String,
    f: Box<MechanicFn>,
}

impl Mechanic {
    pub fn new<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&str, &ApplyContext) -> String + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            f: Box::new(f),
        }
    }
}

impl fmt::Debug for Mechanic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mechanic").field("name", &self.name).finish()
    }
}

impl SoundChange for Mechanic {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, word: &str, context: &ApplyContext) -> String {
        (self.f)(word, context)
    }
}

/// One change that altered the word
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivationStep {
    pub rule: String,
    pub before: String,
    pub after: String,
}

/// Result of running a pipeline over one word
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Derivation {
    pub input: String,
    pub output: String,
    /// Only the changes that did something, in order
    pub steps: Vec<DerivationStep>,
}

/// An ordered list of sound changes
pub struct Pipeline {
    phonology: Arc<Phonology>,
    options: ApplyOptions,
    changes: Vec<Box<dyn SoundChange>>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(crate::phonology::default_phonology())
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("phonology", &self.phonology.code())
            .field("options", &self.options)
            .field("changes", &self.names())
            .finish()
    }
}

impl Pipeline {
    pub fn new(phonology: Arc<Phonology>) -> Self {
        Self {
            phonology,
            options: ApplyOptions::default(),
            changes: Vec::new(),
        }
    }

    pub fn with_options(mut self, options: ApplyOptions) -> Self {
        self.options = options;
        self
    }

    /// Append a change
    pub fn with(mut self, change: impl SoundChange + 'static) -> Self {
        self.push(change);
        self
    }

    pub fn push(&mut self, change: impl SoundChange + 'static) {
        self.changes.push(Box::new(change));
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Names of the changes, in order
    pub fn names(&self) -> Vec<&str> {
        self.changes.iter().map(|c| c.name()).collect()
    }

    pub fn phonology(&self) -> &Arc<Phonology> {
        &self.phonology
    }

    /// Run every change over `word`
    pub fn run(&self, word: &str) -> Derivation {
        let context =
            ApplyContext::for_word(Arc::clone(&self.phonology), word).with_options(self.options);

        let mut current = word.to_string();
        let mut steps = Vec::new();

        for change in &self.changes {
            let next = change.apply(&current, &context);
            if next != current {
                log::debug!("{}: {current} -> {next}", change.name());
                steps.push(DerivationStep {
                    rule: change.name().to_string(),
                    before: std::mem::replace(&mut current, next.clone()),
                    after: next,
                });
            }
        }

        Derivation {
            input: word.to_string(),
            output: current,
            steps,
        }
    }
}
