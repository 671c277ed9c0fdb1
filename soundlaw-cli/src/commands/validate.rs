//! Validate command implementation

use anyhow::Result;
use clap::Args;
use soundlaw_core::RuleSet;
use std::path::PathBuf;

use super::GlobalOptions;
use crate::error::CliError;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Rule file to compile against the tables
    #[arg(long, value_name = "FILE")]
    pub rules: Option<PathBuf>,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self, global: &GlobalOptions) -> Result<()> {
        let rule_set = match &self.rules {
            Some(path) => {
                println!("Validating rule file: {}", path.display());
                Some(RuleSet::from_file(path).map_err(|e| fail(&e))?)
            }
            None => None,
        };

        let fallback = rule_set.as_ref().and_then(|set| set.phonology.as_deref());
        let source = global.phonology_source(fallback);
        println!("Validating phonology tables: {}", source.display_name());

        let phonology = source.load().map_err(|e| fail(&format!("{e:#}")))?;
        println!("✓ Phonology tables are valid!");
        println!("  Code: {}", phonology.code());
        println!("  Name: {}", phonology.name());
        println!("  Digraphs: {}", phonology.digraphs().len());

        if let Some(rule_set) = rule_set {
            let rules = rule_set.compile(&phonology).map_err(|e| fail(&e))?;
            println!("✓ Rule file is valid!");
            for rule in &rules {
                println!("  {}: {} ({})", rule.name(), rule.notation(), rule.position());
            }
        }
        Ok(())
    }
}

fn fail(error: &dyn std::fmt::Display) -> anyhow::Error {
    println!("✗ Validation failed!");
    println!("  Error: {error}");
    CliError::ValidationFailed(error.to_string()).into()
}
