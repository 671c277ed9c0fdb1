//! Rule set files
//!
//! ```toml
//! phonology = "eldarin"
//!
//! [[rules]]
//! name = "liquid assimilation"
//! notation = "[ln] > [ll]"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::phonology::Phonology;
use crate::pipeline::Pipeline;
use crate::rule::Rule;

/// An ordered list of named rules
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    /// Code of the phonology tables the rules are written against
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phonology: Option<String>,
    #[serde(default)]
    pub rules: Vec<RuleEntry>,
}

/// One named rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleEntry {
    pub name: String,
    pub notation: String,
}

impl RuleSet {
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).map_err(|e| Error::RuleSet(e.to_string()))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::RuleSet(format!("failed to read {}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Compile every rule, stopping at the first malformed one
    pub fn compile(&self, phonology: &Arc<Phonology>) -> Result<Vec<Rule>> {
        self.rules
            .iter()
            .map(|entry| {
                Rule::compile_with(&entry.notation, Arc::clone(phonology))
                    .map(|rule| rule.named(&entry.name))
                    .map_err(|e| match e {
                        Error::Notation(source) => Error::Rule {
                            name: entry.name.clone(),
                            source,
                        },
                        other => other,
                    })
            })
            .collect()
    }

    /// Compile into a pipeline, in file order
    pub fn pipeline(&self, phonology: Arc<Phonology>) -> Result<Pipeline> {
        let mut pipeline = Pipeline::new(Arc::clone(&phonology));
        for rule in self.compile(&phonology)? {
            pipeline.push(rule);
        }
        Ok(pipeline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NotationError;
    use crate::phonology::default_phonology;
    use std::io::Write;

    const RULES: &str = r#"
phonology = "eldarin"

[[rules]]
name = "syncope"
notation = "[{ptkpʰkʰbdgm}V₁{rl}V́₁-] > [{ptkpʰkʰbdgm}ø{rl}V́₁-]"

[[rules]]
name = "liquid assimilation"
notation = "[ln] > [ll]"
"#;

    #[test]
    fn test_from_toml_str() {
        let set = RuleSet::from_toml_str(RULES).unwrap();
        assert_eq!(set.phonology.as_deref(), Some("eldarin"));
        assert_eq!(set.rules.len(), 2);
        assert_eq!(set.rules[1].notation, "[ln] > [ll]");
    }

    #[test]
    fn test_pipeline_from_rule_set() {
        let set = RuleSet::from_toml_str(RULES).unwrap();
        let pipeline = set.pipeline(default_phonology()).unwrap();
        assert_eq!(pipeline.names(), vec!["syncope", "liquid assimilation"]);
        assert_eq!(pipeline.run("barándā").output, "brandā");
    }

    #[test]
    fn test_compile_error_names_rule() {
        let set = RuleSet::from_toml_str(
            r#"
[[rules]]
name = "broken"
notation = "[ab] > [a]"
"#,
        )
        .unwrap();
        let err = set.compile(&default_phonology()).unwrap_err();
        match err {
            Error::Rule { name, source } => {
                assert_eq!(name, "broken");
                assert!(matches!(source, NotationError::SlotCountMismatch { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(RULES.as_bytes()).unwrap();
        let set = RuleSet::from_file(file.path()).unwrap();
        assert_eq!(set.rules[0].name, "syncope");
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            RuleSet::from_toml_str("[[rules]]\nname = 1"),
            Err(Error::RuleSet(_))
        ));
        assert!(matches!(
            RuleSet::from_file("/nonexistent/rules.toml"),
            Err(Error::RuleSet(_))
        ));
    }
}
