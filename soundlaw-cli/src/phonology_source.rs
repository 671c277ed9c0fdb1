//! Phonology table source management for CLI

use anyhow::{Context, Result};
use soundlaw_core::{get_phonology, Phonology};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Where phonology tables come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhonologySource {
    /// Tables embedded in the binary, by code
    Embedded(String),
    /// A TOML file
    External(PathBuf),
}

impl PhonologySource {
    /// Interpret a `--phonology` value
    ///
    /// Anything that names an existing file, or ends in `.toml`, is a path;
    /// everything else is an embedded table code.
    pub fn parse(value: &str) -> Self {
        let path = Path::new(value);
        if path.is_file() || path.extension().is_some_and(|ext| ext == "toml") {
            PhonologySource::External(path.to_path_buf())
        } else {
            PhonologySource::Embedded(value.to_string())
        }
    }

    /// Load and validate the tables
    pub fn load(&self) -> Result<Arc<Phonology>> {
        match self {
            PhonologySource::Embedded(code) => Ok(get_phonology(code)?),
            PhonologySource::External(path) => {
                let phonology = Phonology::from_file(path).with_context(|| {
                    format!("Failed to load phonology tables from {}", path.display())
                })?;
                Ok(Arc::new(phonology))
            }
        }
    }

    pub fn display_name(&self) -> String {
        match self {
            PhonologySource::Embedded(code) => format!("Embedded: {code}"),
            PhonologySource::External(path) => format!("External: {}", path.display()),
        }
    }
}
