use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Dictionary-relative residue identity (`label_asym_id`, `label_seq_id`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResidueLabel {
    pub chain: String,
    pub number: i32,
    pub name: String,
}

impl ResidueLabel {
    pub fn new(chain: impl Into<String>, number: i32, name: impl Into<String>) -> Self {
        Self {
            chain: chain.into(),
            number,
            name: name.into(),
        }
    }
}

/// Author-assigned residue identity, as printed in structure files.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResidueAuth {
    pub chain: String,
    pub number: i32,
    pub icode: Option<char>,
    pub name: String,
}

impl ResidueAuth {
    pub fn new(
        chain: impl Into<String>,
        number: i32,
        icode: Option<char>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            chain: chain.into(),
            number,
            icode,
            name: name.into(),
        }
    }
}

/// A residue as reported by an analysis tool.
///
/// At least one of `label` and `auth` is populated. Ordering and matching use the
/// author identity when present and fall back to the label identity otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Residue {
    pub label: Option<ResidueLabel>,
    pub auth: Option<ResidueAuth>,
}

impl Residue {
    pub fn new(label: Option<ResidueLabel>, auth: Option<ResidueAuth>) -> Self {
        debug_assert!(
            label.is_some() || auth.is_some(),
            "a residue needs a label or an auth identity"
        );
        Self { label, auth }
    }

    /// Builds a residue carrying only the author identity, which is what every
    /// text-protocol tool reports.
    pub fn from_auth(
        chain: impl Into<String>,
        number: i32,
        icode: Option<char>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            label: None,
            auth: Some(ResidueAuth::new(chain, number, icode, name)),
        }
    }

    pub fn chain(&self) -> &str {
        match (&self.auth, &self.label) {
            (Some(auth), _) => &auth.chain,
            (None, Some(label)) => &label.chain,
            (None, None) => "",
        }
    }

    pub fn number(&self) -> i32 {
        match (&self.auth, &self.label) {
            (Some(auth), _) => auth.number,
            (None, Some(label)) => label.number,
            (None, None) => 0,
        }
    }

    pub fn icode(&self) -> Option<char> {
        self.auth.as_ref().and_then(|auth| auth.icode)
    }

    pub fn name(&self) -> &str {
        match (&self.auth, &self.label) {
            (Some(auth), _) => &auth.name,
            (None, Some(label)) => &label.name,
            (None, None) => "",
        }
    }

    /// Total order used to pick the canonical direction of an interaction:
    /// chain, then number, then insertion code (absent sorts first).
    pub fn canonical_cmp(&self, other: &Self) -> Ordering {
        self.chain()
            .cmp(other.chain())
            .then_with(|| self.number().cmp(&other.number()))
            .then_with(|| icode_key(self.icode()).cmp(&icode_key(other.icode())))
    }

    /// Returns `true` when both residues denote the same position, ignoring names
    /// and label identity.
    pub fn same_position(&self, other: &Self) -> bool {
        self.canonical_cmp(other) == Ordering::Equal
    }
}

fn icode_key(icode: Option<char>) -> String {
    icode.map(String::from).unwrap_or_default()
}

impl fmt::Display for ResidueAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}{}", self.chain, self.name, self.number)?;
        if let Some(icode) = self.icode {
            write!(f, "^{icode}")?;
        }
        Ok(())
    }
}

impl fmt::Display for ResidueLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}{}", self.chain, self.name, self.number)
    }
}

impl fmt::Display for Residue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.auth, &self.label) {
            (Some(auth), _) => write!(f, "{auth}"),
            (None, Some(label)) => write!(f, "label:{label}"),
            (None, None) => write!(f, "?"),
        }
    }
}
