//! Generate config command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Code for the new phonology tables
    #[arg(short = 'c', long, value_name = "CODE", required = true)]
    pub code: String,

    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        use std::fs;

        println!("Generating phonology table template...");
        println!("  Code: {}", self.code);
        println!("  Output file: {}", self.output.display());

        let template = self.generate_template();

        fs::write(&self.output, template)
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Phonology template generated successfully!");
        println!();
        println!("Next steps:");
        println!("1. Edit the digraphs, vowels and onset clusters");
        println!("2. Validate your tables:");
        println!("   soundlaw --phonology {} validate", self.output.display());
        println!("3. Use them when applying rules:");
        println!(
            "   soundlaw --phonology {} apply -r \"[ln] > [ll]\" olna",
            self.output.display()
        );

        Ok(())
    }

    /// Generate template configuration content
    fn generate_template(&self) -> String {
        format!(
            r#"# Phonology tables for {code}

[metadata]
code = "{code}"
name = "Custom Phonology"

# Multi-character spellings folded to one stand-in code point.
# Longer sequences win over shorter ones ("kʰw" before "kʰ").
# When several spellings share a stand-in, the first one listed is used
# on output.
[[digraphs]]
sequence = "kʰ"
phoneme = "ƙ"

[[digraphs]]
sequence = "th"
phoneme = "θ"

[[digraphs]]
sequence = "ch"
phoneme = "χ"

# compound_split: the sequence may straddle a morpheme boundary and is left
# unfolded when syllabifying with --compound
[[digraphs]]
sequence = "ng"
phoneme = "ŋ"
compound_split = true

[vowels]
letters = ["a", "e", "i", "o", "u"]
# Letters matched by V in rule notation
vowel_class = ["a", "e", "i", "o", "u"]
diphthongs = ["ai", "au", "ei", "oi", "ui"]

# Two-phoneme clusters that may begin a syllable
[onsets]
clusters = ["pr", "tr", "kr", "pl", "kl", "st"]

[marks]
# Combining diacritics that make a vowel long
long = ["\u0304", "\u0302"]
# Combining diacritic that marks stress
stress = "\u0301"
"#,
            code = self.code
        )
    }
}
