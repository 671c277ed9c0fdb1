//! CLI command implementations

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use soundlaw_core::Phonology;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::{resolve_patterns, FileReader};
use crate::output::{create_formatter, FormatOptions, OutputFormat, OutputFormatter};
use crate::phonology_source::PhonologySource;
use crate::progress::ProgressReporter;

pub mod analyse;
pub mod apply;
pub mod compile;
pub mod generate_config;
pub mod list;
pub mod syllabify;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Split words into syllables
    Syllabify(syllabify::SyllabifyArgs),

    /// Show onset, nucleus, coda, weight and stress of each syllable
    Analyse(analyse::AnalyseArgs),

    /// Compile a rule and show its rewrite steps
    Compile(compile::CompileArgs),

    /// Apply sound-change rules to words
    Apply(apply::ApplyArgs),

    /// Check phonology tables and, optionally, a rule file
    Validate(validate::ValidateArgs),

    /// Write a phonology table template
    GenerateConfig(generate_config::GenerateConfigArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },
}

/// List subcommands
#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// List embedded phonology tables
    Phonologies,

    /// List available output formats
    Formats,
}

impl Commands {
    /// Run the selected command
    pub fn execute(&self, global: &GlobalOptions) -> Result<()> {
        match self {
            Commands::Syllabify(args) => args.execute(global),
            Commands::Analyse(args) => args.execute(global),
            Commands::Compile(args) => args.execute(global),
            Commands::Apply(args) => args.execute(global),
            Commands::Validate(args) => args.execute(global),
            Commands::GenerateConfig(args) => args.execute(),
            Commands::List { subcommand } => list::execute(subcommand),
        }
    }
}

/// Settings shared by every command
#[derive(Debug, Default)]
pub struct GlobalOptions {
    /// `--phonology`, when given
    pub phonology: Option<String>,
    pub config: CliConfig,
    pub quiet: bool,
}

impl GlobalOptions {
    /// Tables chosen by `--phonology`, then `fallback`, then the config default
    pub fn phonology_source(&self, fallback: Option<&str>) -> PhonologySource {
        let value = self
            .phonology
            .as_deref()
            .or(fallback)
            .unwrap_or(self.config.phonology.default.as_str());
        PhonologySource::parse(value)
    }

    pub fn load_phonology(&self, fallback: Option<&str>) -> Result<Arc<Phonology>> {
        let source = self.phonology_source(fallback);
        log::info!("Using phonology tables: {}", source.display_name());
        source.load()
    }
}

/// Words given inline or read from files
#[derive(Debug, Args, Default)]
pub struct WordArgs {
    /// Words to process
    #[arg(value_name = "WORD")]
    pub words: Vec<String>,

    /// Word list files or patterns (supports glob), one word per line
    #[arg(short, long, value_name = "FILE/PATTERN")]
    pub input: Vec<String>,
}

impl WordArgs {
    /// Inline words followed by the words of every matched file
    pub fn collect(&self, quiet: bool) -> Result<Vec<String>> {
        let mut words = self.words.clone();

        if !self.input.is_empty() {
            let files = resolve_patterns(&self.input)?;
            log::info!("Reading words from {} file(s)", files.len());

            let mut progress = ProgressReporter::new(quiet);
            progress.init_files(files.len() as u64);
            for path in &files {
                let file_words = FileReader::read_words(path)?;
                progress.file_completed(&path.display().to_string(), file_words.len());
                words.extend(file_words);
            }
            progress.finish();
        }

        if words.is_empty() {
            return Err(CliError::NoWords.into());
        }
        Ok(words)
    }
}

/// Output format and destination
#[derive(Debug, Args, Default)]
pub struct OutputArgs {
    /// Output format (default from config, else text)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl OutputArgs {
    pub fn resolve_format(&self, config: &CliConfig) -> Result<OutputFormat> {
        match self.format {
            Some(format) => Ok(format),
            None => Ok(config.output.default_format.parse()?),
        }
    }

    /// Formatter writing to the chosen destination
    pub fn formatter(
        &self,
        global: &GlobalOptions,
        stress_marks: bool,
    ) -> Result<Box<dyn OutputFormatter>> {
        let format = self.resolve_format(&global.config)?;
        let options = FormatOptions {
            pretty_json: global.config.output.pretty_json,
            stress_marks,
        };
        let writer = open_output(self.output.as_deref())?;
        Ok(create_formatter(format, writer, options))
    }
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write + Send + Sync>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Ok(Box::new(io::BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    #[test]
    fn test_commands_debug_format() {
        let list_cmd = Commands::List {
            subcommand: ListCommands::Phonologies,
        };
        let debug_str = format!("{:?}", list_cmd);
        assert!(debug_str.contains("List"));
        assert!(debug_str.contains("Phonologies"));
    }

    #[test]
    fn test_phonology_source_precedence() {
        let mut global = GlobalOptions::default();
        assert_eq!(
            global.phonology_source(None),
            PhonologySource::Embedded("eldarin".to_string())
        );
        assert_eq!(
            global.phonology_source(Some("telerin")),
            PhonologySource::Embedded("telerin".to_string())
        );

        global.phonology = Some("eldarin".to_string());
        assert_eq!(
            global.phonology_source(Some("telerin")),
            PhonologySource::Embedded("eldarin".to_string())
        );
    }

    #[test]
    fn test_collect_inline_and_file_words() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# glosses\nthand\n\nolna").unwrap();

        let args = WordArgs {
            words: vec!["talan".to_string()],
            input: vec![file.path().display().to_string()],
        };
        assert_eq!(args.collect(true).unwrap(), vec!["talan", "thand", "olna"]);
    }

    #[test]
    fn test_collect_nothing_is_an_error() {
        let err = WordArgs::default().collect(true).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::NoWords)
        ));
    }

    #[test]
    fn test_format_falls_back_to_config() {
        let mut config = CliConfig::default();
        config.output.default_format = "markdown".to_string();

        let args = OutputArgs::default();
        assert_eq!(args.resolve_format(&config).unwrap(), OutputFormat::Markdown);

        let args = OutputArgs {
            format: Some(OutputFormat::Json),
            output: None,
        };
        assert_eq!(args.resolve_format(&config).unwrap(), OutputFormat::Json);

        config.output.default_format = "yaml".to_string();
        assert!(OutputArgs::default().resolve_format(&config).is_err());
    }
}
