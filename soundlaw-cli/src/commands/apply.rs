//! Apply command implementation

use anyhow::{Context, Result};
use clap::Args;
use soundlaw_core::{ApplyOptions, Pipeline, Rule, RuleSet};
use std::path::PathBuf;

use super::{GlobalOptions, OutputArgs, WordArgs};
use crate::batch::map_words;
use crate::output::Record;

/// Arguments for the apply command
#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Rule notation; repeat to apply several rules in order
    #[arg(
        short = 'r',
        long = "rule",
        value_name = "NOTATION",
        required_unless_present = "rule_file"
    )]
    pub rules: Vec<String>,

    /// TOML rule file ([[rules]] name/notation), applied before any -r rules
    #[arg(long = "rules", value_name = "FILE")]
    pub rule_file: Option<PathBuf>,

    #[command(flatten)]
    pub words: WordArgs,

    /// Include every rule that changed a word in the output
    #[arg(long)]
    pub trace: bool,

    /// Let stress-marked rule positions match the analysed stressed syllable
    #[arg(long)]
    pub prosodic_stress: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl ApplyArgs {
    /// Execute the apply command
    pub fn execute(&self, global: &GlobalOptions) -> Result<()> {
        let pipeline = self.build_pipeline(global)?;
        let words = self.words.collect(global.quiet)?;
        log::info!(
            "Applying {} rule(s) to {} words",
            pipeline.len(),
            words.len()
        );

        let records = map_words(&words, &global.config.performance, |word| {
            let mut derivation = pipeline.run(word);
            if !self.trace {
                derivation.steps.clear();
            }
            Record::Derivation(derivation)
        })?;

        let mut formatter = self.output.formatter(global, false)?;
        for record in &records {
            formatter.format_record(record)?;
        }
        formatter.finish()
    }

    /// Rules from the rule file, then the inline rules
    pub fn build_pipeline(&self, global: &GlobalOptions) -> Result<Pipeline> {
        let rule_set = match &self.rule_file {
            Some(path) => Some(RuleSet::from_file(path)?),
            None => None,
        };

        let fallback = rule_set.as_ref().and_then(|set| set.phonology.as_deref());
        let phonology = global.load_phonology(fallback)?;

        let mut pipeline = match &rule_set {
            Some(set) => set.pipeline(phonology.clone())?,
            None => Pipeline::new(phonology.clone()),
        };
        for notation in &self.rules {
            let rule = Rule::compile_with(notation, phonology.clone())
                .with_context(|| format!("Failed to compile rule {notation}"))?;
            pipeline.push(rule);
        }

        Ok(pipeline.with_options(ApplyOptions {
            stress_from_analysis: self.prosodic_stress,
        }))
    }
}
