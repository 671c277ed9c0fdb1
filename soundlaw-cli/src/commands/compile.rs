//! Compile command implementation

use anyhow::{Context, Result};
use clap::Args;
use soundlaw_core::Rule;

use super::{GlobalOptions, OutputArgs};
use crate::output::Record;

/// Arguments for the compile command
#[derive(Debug, Args)]
pub struct CompileArgs {
    /// Rule notation, e.g. "[ln] > [ll]"
    #[arg(value_name = "NOTATION", required = true)]
    pub notations: Vec<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl CompileArgs {
    /// Execute the compile command
    pub fn execute(&self, global: &GlobalOptions) -> Result<()> {
        let phonology = global.load_phonology(None)?;

        let mut formatter = self.output.formatter(global, false)?;
        for notation in &self.notations {
            let rule = Rule::compile_with(notation, phonology.clone())
                .with_context(|| format!("Failed to compile rule {notation}"))?;
            formatter.format_record(&Record::Rule {
                notation: rule.notation().to_string(),
                position: rule.position(),
                variants: rule.variants().to_vec(),
            })?;
        }
        formatter.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn args(notation: &str, out: std::path::PathBuf) -> CompileArgs {
        CompileArgs {
            notations: vec![notation.to_string()],
            output: OutputArgs {
                format: None,
                output: Some(out),
            },
        }
    }

    #[test]
    fn test_compile_lists_steps() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("rule.txt");
        args("[-{ptk}] > [-{bdg}]", out.clone())
            .execute(&GlobalOptions::default())
            .unwrap();

        let written = std::fs::read_to_string(out).unwrap();
        assert_eq!(
            written,
            "[-{ptk}] > [-{bdg}]\n  position: final\n  1. {p t k} -> {b d g}\n"
        );
    }

    #[test]
    fn test_compile_error_names_notation() {
        let dir = TempDir::new().unwrap();
        let err = args("[ln] > [l]", dir.path().join("rule.txt"))
            .execute(&GlobalOptions::default())
            .unwrap_err();
        assert!(err.to_string().contains("[ln] > [l]"));
    }
}
