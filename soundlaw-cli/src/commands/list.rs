//! List command implementation

use anyhow::Result;
use soundlaw_core::{get_phonology, list_available_phonologies, DEFAULT_PHONOLOGY};

use super::ListCommands;
use crate::output::OutputFormat;

/// Execute a list subcommand
pub fn execute(subcommand: &ListCommands) -> Result<()> {
    match subcommand {
        ListCommands::Phonologies => {
            println!("Embedded phonology tables:");
            for code in list_available_phonologies() {
                let phonology = get_phonology(code)?;
                let default = if code == DEFAULT_PHONOLOGY {
                    " (default)"
                } else {
                    ""
                };
                println!("  {code:<10} {}{default}", phonology.name());
            }
        }
        ListCommands::Formats => {
            println!("Output formats:");
            for format in OutputFormat::all() {
                println!("  {}", format.as_str());
            }
        }
    }
    Ok(())
}
