//! Output formatting module

use anyhow::Result;
use serde::Serialize;
use soundlaw_core::{CompiledRule, Derivation, Position, RewriteStep, Syllable};
use std::io::Write;
use std::str::FromStr;

use crate::error::CliError;

pub mod json;
pub mod markdown;
pub mod text;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;

/// One unit of command output
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Record {
    /// `syllabify`
    Syllables { word: String, syllables: Vec<String> },
    /// `analyse`
    Analysis {
        word: String,
        syllables: Vec<Syllable>,
    },
    /// `compile`
    Rule {
        notation: String,
        position: Position,
        variants: Vec<CompiledRule>,
    },
    /// `apply`
    Derivation(Derivation),
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format and output one record
    fn format_record(&mut self, record: &Record) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text, one word per line
    Text,
    /// JSON array of records
    Json,
    /// Markdown lists and tables
    Markdown,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "markdown",
        }
    }

    pub fn all() -> [OutputFormat; 3] {
        [OutputFormat::Text, OutputFormat::Json, OutputFormat::Markdown]
    }
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            other => Err(CliError::ConfigError(format!("unknown output format '{other}'"))),
        }
    }
}

/// Presentation switches shared by the formatters
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatOptions {
    pub pretty_json: bool,
    /// Prefix stressed syllables with `ˈ`
    pub stress_marks: bool,
}

/// Build the formatter for `format` over `writer`
pub fn create_formatter<W: Write + Send + Sync + 'static>(
    format: OutputFormat,
    writer: W,
    options: FormatOptions,
) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(writer, options)),
        OutputFormat::Json => Box::new(JsonFormatter::new(writer, options)),
        OutputFormat::Markdown => Box::new(MarkdownFormatter::new(writer, options)),
    }
}

/// Syllables joined with hyphens, optionally with stress marks
pub(crate) fn join_syllables(syllables: &[Syllable], stress_marks: bool) -> String {
    syllables
        .iter()
        .map(|s| {
            if stress_marks && s.stressed {
                format!("ˈ{}", s.text)
            } else {
                s.text.clone()
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

/// Find or replace set as written in listings
pub(crate) fn describe_set(set: &[String]) -> String {
    match set {
        [] => "ø".to_string(),
        [only] => only.clone(),
        many => format!("{{{}}}", many.join(" ")),
    }
}

/// Coindex and mark annotations of one side of a step
pub(crate) fn describe_extras(coindex: Option<u8>, mark: Option<char>) -> String {
    let mut extras = Vec::new();
    if let Some(id) = coindex {
        extras.push(format!("#{id}"));
    }
    if let Some(mark) = mark {
        extras.push(format!("U+{:04X}", mark as u32));
    }
    if extras.is_empty() {
        String::new()
    } else {
        format!(" [{}]", extras.join(", "))
    }
}

/// `find -> replace` with annotations
pub(crate) fn describe_step(step: &RewriteStep) -> String {
    format!(
        "{}{} -> {}{}",
        describe_set(&step.find),
        describe_extras(step.old_coindex, step.old_mark),
        describe_set(&step.replace),
        describe_extras(step.new_coindex, step.new_mark),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("MD".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_describe_set() {
        assert_eq!(describe_set(&[]), "ø");
        assert_eq!(describe_set(&["l".to_string()]), "l");
        assert_eq!(
            describe_set(&["p".to_string(), "kʰ".to_string()]),
            "{p kʰ}"
        );
    }

    #[test]
    fn test_describe_step() {
        let rule = soundlaw_core::Rule::compile("[V₁á] > [øá]").unwrap();
        let steps = &rule.variants()[0].steps;
        assert_eq!(describe_step(&steps[0]), "{a e i o u} [#1] -> ø");
        assert_eq!(describe_step(&steps[1]), "a [U+0301] -> a [U+0301]");
    }

    #[test]
    fn test_join_syllables() {
        let syllables = soundlaw_core::analyse("talan");
        assert_eq!(join_syllables(&syllables, false), "ta-lan");
        assert_eq!(join_syllables(&syllables, true), "ˈta-lan");
    }
}
