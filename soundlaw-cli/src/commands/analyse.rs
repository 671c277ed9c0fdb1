//! Analyse command implementation

use anyhow::Result;
use clap::Args;
use soundlaw_core::syllable::analyse_with;

use super::{GlobalOptions, OutputArgs, WordArgs};
use crate::batch::map_words;
use crate::output::Record;

/// Arguments for the analyse command
#[derive(Debug, Args)]
pub struct AnalyseArgs {
    #[command(flatten)]
    pub words: WordArgs,

    /// Keep boundary-straddling digraphs (ng, ss, lh, rh) apart
    #[arg(long)]
    pub compound: bool,

    /// Mark the stressed syllable with ˈ in text and markdown output
    #[arg(long)]
    pub stress_marks: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl AnalyseArgs {
    /// Execute the analyse command
    pub fn execute(&self, global: &GlobalOptions) -> Result<()> {
        let phonology = global.load_phonology(None)?;
        let words = self.words.collect(global.quiet)?;
        let compound = self.compound || global.config.phonology.compound;
        log::info!("Analysing {} words", words.len());

        let records = map_words(&words, &global.config.performance, |word| {
            Record::Analysis {
                word: word.to_string(),
                syllables: analyse_with(&phonology, word, compound),
            }
        })?;

        let mut formatter = self.output.formatter(global, self.stress_marks)?;
        for record in &records {
            formatter.format_record(record)?;
        }
        formatter.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use tempfile::TempDir;

    #[test]
    fn test_analyse_json() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("analysis.json");
        let args = AnalyseArgs {
            words: WordArgs {
                words: vec!["Eruhíni".to_string()],
                input: Vec::new(),
            },
            compound: false,
            stress_marks: false,
            output: OutputArgs {
                format: Some(OutputFormat::Json),
                output: Some(out.clone()),
            },
        };

        args.execute(&GlobalOptions::default()).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out).unwrap()).unwrap();
        let syllables = json[0]["syllables"].as_array().unwrap();
        let texts: Vec<&str> = syllables
            .iter()
            .map(|s| s["text"].as_str().unwrap())
            .collect();
        assert_eq!(texts, vec!["E", "ru", "hí", "ni"]);
        // Light penult, so the antepenult carries stress
        assert_eq!(syllables[1]["stressed"], true);
    }
}
