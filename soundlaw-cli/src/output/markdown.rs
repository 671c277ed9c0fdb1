//! Markdown output formatter

use super::{describe_extras, describe_set, join_syllables, FormatOptions, OutputFormatter, Record};
use anyhow::Result;
use std::io::Write;

/// Markdown formatter - words as a numbered list, analyses and rules as tables
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    stress_marks: bool,
    word_count: usize,
    rule_count: usize,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W, options: FormatOptions) -> Self {
        Self {
            writer,
            stress_marks: options.stress_marks,
            word_count: 0,
            rule_count: 0,
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for MarkdownFormatter<W> {
    fn format_record(&mut self, record: &Record) -> Result<()> {
        match record {
            Record::Syllables { word, syllables } => {
                self.word_count += 1;
                writeln!(
                    self.writer,
                    "{}. **{word}**: {}",
                    self.word_count,
                    syllables.join("-")
                )?;
            }
            Record::Analysis { word, syllables } => {
                self.word_count += 1;
                writeln!(
                    self.writer,
                    "### {word} ({})",
                    join_syllables(syllables, self.stress_marks)
                )?;
                writeln!(self.writer)?;
                writeln!(
                    self.writer,
                    "| Syllable | Onset | Nucleus | Coda | Weight | Structure | Stressed |"
                )?;
                writeln!(self.writer, "|---|---|---|---|---|---|---|")?;
                for s in syllables {
                    writeln!(
                        self.writer,
                        "| {} | {} | {} | {} | {} | {} | {} |",
                        s.text,
                        s.onset,
                        s.nucleus,
                        s.coda,
                        s.weight.as_str(),
                        s.structure.as_str(),
                        if s.stressed { "yes" } else { "" }
                    )?;
                }
                writeln!(self.writer)?;
            }
            Record::Rule {
                notation,
                position,
                variants,
            } => {
                self.rule_count += 1;
                writeln!(self.writer, "### `{notation}`")?;
                writeln!(self.writer)?;
                writeln!(self.writer, "*Position: {position}*")?;
                for (index, variant) in variants.iter().enumerate() {
                    writeln!(self.writer)?;
                    if variants.len() > 1 {
                        writeln!(self.writer, "Variant {}:", index + 1)?;
                        writeln!(self.writer)?;
                    }
                    writeln!(self.writer, "| # | Find | Replace |")?;
                    writeln!(self.writer, "|---|---|---|")?;
                    for (step_no, step) in variant.steps.iter().enumerate() {
                        writeln!(
                            self.writer,
                            "| {} | {}{} | {}{} |",
                            step_no + 1,
                            describe_set(&step.find),
                            describe_extras(step.old_coindex, step.old_mark),
                            describe_set(&step.replace),
                            describe_extras(step.new_coindex, step.new_mark),
                        )?;
                    }
                }
                writeln!(self.writer)?;
            }
            Record::Derivation(derivation) => {
                self.word_count += 1;
                writeln!(
                    self.writer,
                    "{}. **{}** → {}",
                    self.word_count, derivation.input, derivation.output
                )?;
                for step in &derivation.steps {
                    writeln!(
                        self.writer,
                        "   - *{}*: {} → {}",
                        step.rule, step.before, step.after
                    )?;
                }
            }
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "---")?;
        if self.rule_count > 0 {
            writeln!(self.writer, "*Total rules: {}*", self.rule_count)?;
        } else {
            writeln!(self.writer, "*Total words: {}*", self.word_count)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
