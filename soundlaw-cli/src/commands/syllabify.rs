//! Syllabify command implementation

use anyhow::Result;
use clap::Args;
use soundlaw_core::syllable::syllabify_with;

use super::{GlobalOptions, OutputArgs, WordArgs};
use crate::batch::map_words;
use crate::output::Record;

/// Arguments for the syllabify command
#[derive(Debug, Args)]
pub struct SyllabifyArgs {
    #[command(flatten)]
    pub words: WordArgs,

    /// Keep boundary-straddling digraphs (ng, ss, lh, rh) apart
    #[arg(long)]
    pub compound: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl SyllabifyArgs {
    /// Execute the syllabify command
    pub fn execute(&self, global: &GlobalOptions) -> Result<()> {
        let phonology = global.load_phonology(None)?;
        let words = self.words.collect(global.quiet)?;
        let compound = self.compound || global.config.phonology.compound;
        log::info!("Syllabifying {} words (compound hint: {compound})", words.len());

        let records = map_words(&words, &global.config.performance, |word| {
            Record::Syllables {
                word: word.to_string(),
                syllables: syllabify_with(&phonology, word, compound),
            }
        })?;

        let mut formatter = self.output.formatter(global, false)?;
        for record in &records {
            formatter.format_record(record)?;
        }
        formatter.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_syllabify_to_file() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("out.txt");
        let args = SyllabifyArgs {
            words: WordArgs {
                words: vec!["Galadriel".to_string(), "Angband".to_string()],
                input: Vec::new(),
            },
            compound: true,
            output: OutputArgs {
                format: None,
                output: Some(out.clone()),
            },
        };

        args.execute(&GlobalOptions::default()).unwrap();
        let written = std::fs::read_to_string(out).unwrap();
        assert_eq!(written, "Galadriel: Ga-lad-ri-el\nAngband: Ang-band\n");
    }
}
