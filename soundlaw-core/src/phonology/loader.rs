//! Embedded phonology tables
//!
//! Tables shipped with the crate are parsed on first access and shared
//! for the rest of the process.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use super::Phonology;
use crate::error::PhonologyError;

/// Code of the tables used when none is requested
pub const DEFAULT_PHONOLOGY: &str = "eldarin";

static EMBEDDED: OnceLock<HashMap<String, Arc<Phonology>>> = OnceLock::new();

macro_rules! embed_phonology {
    ($code:expr, $path:expr) => {
        ($code, include_str!($path))
    };
}

fn load_embedded() -> Result<HashMap<String, Arc<Phonology>>, PhonologyError> {
    let mut tables = HashMap::new();

    let embedded = [
        embed_phonology!("eldarin", "../../configs/phonology/eldarin.toml"),
        embed_phonology!("telerin", "../../configs/phonology/telerin.toml"),
    ];

    for (code, toml_content) in embedded {
        let phonology = Phonology::from_toml_str(toml_content)?;

        if phonology.code() != code {
            return Err(PhonologyError::Invalid(format!(
                "embedded table code mismatch: expected {code}, got {}",
                phonology.code()
            )));
        }

        log::debug!("loaded embedded phonology '{code}'");
        tables.insert(code.to_string(), Arc::new(phonology));
    }

    Ok(tables)
}

fn embedded() -> &'static HashMap<String, Arc<Phonology>> {
    EMBEDDED.get_or_init(|| load_embedded().expect("Failed to load embedded phonology tables"))
}

/// Look up embedded tables by code
pub fn get_phonology(code: &str) -> Result<Arc<Phonology>, PhonologyError> {
    embedded()
        .get(code)
        .cloned()
        .ok_or_else(|| PhonologyError::Unknown(code.to_string()))
}

/// Codes of all embedded tables, sorted
pub fn list_available_phonologies() -> Vec<&'static str> {
    let mut codes: Vec<&'static str> = embedded().keys().map(String::as_str).collect();
    codes.sort_unstable();
    codes
}

/// The default embedded tables
pub fn default_phonology() -> Arc<Phonology> {
    embedded()
        .get(DEFAULT_PHONOLOGY)
        .cloned()
        .expect("default phonology is embedded")
}
