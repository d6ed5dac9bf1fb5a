use super::error::Error;
use crate::canon::ConflictPolicy;
use crate::pack::DEFAULT_ALPHABET;
use serde::{Deserialize, Serialize};

/// Settings shared by every analysis request.
///
/// # Examples
///
/// ```
/// use rna_adapters::{AnalysisConfig, ConflictPolicy};
///
/// let config = AnalysisConfig::from_toml(
///     r#"
///     chain-alphabet = "XYZ"
///     conflict-policy = "first-wins"
///     "#,
/// )?;
/// assert_eq!(config.chain_alphabet, "XYZ");
/// assert_eq!(config.conflict_policy, ConflictPolicy::FirstWins);
/// # Ok::<(), rna_adapters::AnalysisError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct AnalysisConfig {
    /// Symbols handed out, in order, to the chains of structures sent to tools that read
    /// single-character chain identifiers.
    pub chain_alphabet: String,

    /// Survivor when a tool reports one residue pair with two classifications.
    pub conflict_policy: ConflictPolicy,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            chain_alphabet: DEFAULT_ALPHABET.to_string(),
            conflict_policy: ConflictPolicy::default(),
        }
    }
}

impl AnalysisConfig {
    /// Parses a TOML document. Missing keys keep their defaults.
    pub fn from_toml(text: &str) -> Result<Self, Error> {
        Ok(toml::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let config = AnalysisConfig::from_toml("").expect("parse");
        assert_eq!(config, AnalysisConfig::default());
        assert_eq!(config.chain_alphabet.chars().count(), 94);
        assert_eq!(config.conflict_policy, ConflictPolicy::LastWins);
    }

    #[test]
    fn reads_every_policy() {
        for (name, policy) in [
            ("last-wins", ConflictPolicy::LastWins),
            ("first-wins", ConflictPolicy::FirstWins),
            ("keep-all", ConflictPolicy::KeepAll),
        ] {
            let config =
                AnalysisConfig::from_toml(&format!("conflict-policy = \"{name}\"")).expect("parse");
            assert_eq!(config.conflict_policy, policy);
        }
    }

    #[test]
    fn rejects_unknown_keys_and_values() {
        assert!(matches!(
            AnalysisConfig::from_toml("alphabet = \"AB\""),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            AnalysisConfig::from_toml("conflict-policy = \"newest\""),
            Err(Error::Config(_))
        ));
    }
}
