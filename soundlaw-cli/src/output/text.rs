//! Plain text output formatter

use super::{describe_step, join_syllables, FormatOptions, OutputFormatter, Record};
use anyhow::Result;
use std::io::Write;

/// Plain text formatter - one line per word, indented detail lines below
pub struct TextFormatter<W: Write> {
    writer: W,
    stress_marks: bool,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W, options: FormatOptions) -> Self {
        Self {
            writer,
            stress_marks: options.stress_marks,
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_record(&mut self, record: &Record) -> Result<()> {
        match record {
            Record::Syllables { word, syllables } => {
                writeln!(self.writer, "{word}: {}", syllables.join("-"))?;
            }
            Record::Analysis { word, syllables } => {
                writeln!(
                    self.writer,
                    "{word}: {}",
                    join_syllables(syllables, self.stress_marks)
                )?;
                for syllable in syllables {
                    let line = format!(
                        "  {:<8} {:<6} {:<7}{}",
                        syllable.text,
                        syllable.weight.as_str(),
                        syllable.structure.as_str(),
                        if syllable.stressed { " stressed" } else { "" }
                    );
                    writeln!(self.writer, "{}", line.trim_end())?;
                }
            }
            Record::Rule {
                notation,
                position,
                variants,
            } => {
                writeln!(self.writer, "{notation}")?;
                writeln!(self.writer, "  position: {position}")?;
                for (index, variant) in variants.iter().enumerate() {
                    if variants.len() > 1 {
                        writeln!(self.writer, "  variant {}:", index + 1)?;
                    }
                    for (step_no, step) in variant.steps.iter().enumerate() {
                        writeln!(self.writer, "  {}. {}", step_no + 1, describe_step(step))?;
                    }
                }
            }
            Record::Derivation(derivation) => {
                writeln!(self.writer, "{} -> {}", derivation.input, derivation.output)?;
                for step in &derivation.steps {
                    writeln!(
                        self.writer,
                        "  [{}] {} -> {}",
                        step.rule, step.before, step.after
                    )?;
                }
            }
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
