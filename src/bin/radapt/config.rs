use std::fs;

use anyhow::{Context, Result};
use rna_adapters::{AnalysisConfig, ConflictPolicy as LibConflictPolicy};

use crate::cli::{ConfigOptions, ConflictPolicy};

/// Loads the TOML file if one was given, then applies command-line overrides.
pub fn build_analysis_config(opts: &ConfigOptions) -> Result<AnalysisConfig> {
    let mut config = match &opts.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            AnalysisConfig::from_toml(&text)
                .with_context(|| format!("Invalid config file: {}", path.display()))?
        }
        None => AnalysisConfig::default(),
    };

    if let Some(alphabet) = &opts.chain_alphabet {
        config.chain_alphabet = alphabet.clone();
    }
    if let Some(policy) = opts.conflict_policy {
        config.conflict_policy = policy.into();
    }

    Ok(config)
}

impl From<ConflictPolicy> for LibConflictPolicy {
    fn from(policy: ConflictPolicy) -> Self {
        match policy {
            ConflictPolicy::LastWins => LibConflictPolicy::LastWins,
            ConflictPolicy::FirstWins => LibConflictPolicy::FirstWins,
            ConflictPolicy::KeepAll => LibConflictPolicy::KeepAll,
        }
    }
}

pub fn policy_name(policy: LibConflictPolicy) -> &'static str {
    match policy {
        LibConflictPolicy::LastWins => "last-wins",
        LibConflictPolicy::FirstWins => "first-wins",
        LibConflictPolicy::KeepAll => "keep-all",
    }
}
