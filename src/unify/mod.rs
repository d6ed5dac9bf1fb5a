//! Per-tool translation of raw annotation output into the canonical model.
//!
//! Every supported program gets one pure function taking its raw documents (and, for tools
//! that identify residues positionally, the structure that was submitted to it) and
//! returning the interactions it reported. [`unify`] dispatches on [`RawOutput`].
//!
//! Codes a tool emits but the taxonomy cannot place are not errors: they become
//! [`OtherInteraction`]s and are logged at `debug`. Output that violates a tool's grammar
//! aborts with [`Error::Format`].
//!
//! [`OtherInteraction`]: crate::model::interaction::OtherInteraction

use crate::model::interaction::BaseInteractions;
use crate::model::structure::Structure;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

mod atoms;
mod error;

pub mod barnaba;
pub mod bpnet;
pub mod fr3d;
pub mod maxit;
pub mod mc_annotate;
pub mod rnaview;

pub use atoms::AtomGroup;
pub use error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolKind {
    Bpnet,
    Fr3d,
    Barnaba,
    McAnnotate,
    Rnaview,
    Maxit,
}

impl ToolKind {
    pub const ALL: [ToolKind; 6] = [
        ToolKind::Bpnet,
        ToolKind::Fr3d,
        ToolKind::Barnaba,
        ToolKind::McAnnotate,
        ToolKind::Rnaview,
        ToolKind::Maxit,
    ];

    /// Identifier used on the command line and in serialized requests.
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolKind::Bpnet => "bpnet",
            ToolKind::Fr3d => "fr3d",
            ToolKind::Barnaba => "barnaba",
            ToolKind::McAnnotate => "mc-annotate",
            ToolKind::Rnaview => "rnaview",
            ToolKind::Maxit => "maxit",
        }
    }

    /// Whether the tool reads fixed-width PDB and therefore needs single-character chains.
    pub fn needs_packed_chains(&self) -> bool {
        matches!(
            self,
            ToolKind::Barnaba | ToolKind::McAnnotate | ToolKind::Rnaview
        )
    }

    /// Whether the tool reports residues by sequential number and drops insertion codes.
    pub fn needs_renumbering(&self) -> bool {
        matches!(self, ToolKind::Barnaba)
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolKind::Bpnet => write!(f, "BPNet"),
            ToolKind::Fr3d => write!(f, "FR3D"),
            ToolKind::Barnaba => write!(f, "baRNAba"),
            ToolKind::McAnnotate => write!(f, "MC-Annotate"),
            ToolKind::Rnaview => write!(f, "RNAView"),
            ToolKind::Maxit => write!(f, "MAXIT"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown analysis tool: {0}")]
pub struct ParseToolKindError(String);

impl FromStr for ToolKind {
    type Err = ParseToolKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        ToolKind::ALL
            .into_iter()
            .find(|tool| {
                tool.as_str() == normalized || tool.as_str().replace('-', "") == normalized
            })
            .ok_or_else(|| ParseToolKindError(s.to_string()))
    }
}

/// The raw documents one tool produced for one structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawOutput {
    /// The `_basepair.json` report and the `.rob` overlap report; either may be absent.
    Bpnet {
        basepairs: Option<String>,
        overlaps: Option<String>,
    },
    /// Interaction listing, one `unit-id classification unit-id` per line.
    Fr3d(String),
    /// Combined pairing and stacking annotation lines.
    Barnaba(String),
    McAnnotate(String),
    Rnaview(String),
    /// mmCIF document holding `_ndb_struct_na_base_pair`.
    Maxit(String),
}

impl RawOutput {
    pub fn tool(&self) -> ToolKind {
        match self {
            RawOutput::Bpnet { .. } => ToolKind::Bpnet,
            RawOutput::Fr3d(_) => ToolKind::Fr3d,
            RawOutput::Barnaba(_) => ToolKind::Barnaba,
            RawOutput::McAnnotate(_) => ToolKind::McAnnotate,
            RawOutput::Rnaview(_) => ToolKind::Rnaview,
            RawOutput::Maxit(_) => ToolKind::Maxit,
        }
    }
}

/// Translates one tool's raw output. `structure` must be the exact structure the tool was
/// run on (packed and renumbered where the tool required it).
pub fn unify(raw: &RawOutput, structure: &Structure) -> Result<BaseInteractions, Error> {
    let interactions = match raw {
        RawOutput::Bpnet {
            basepairs,
            overlaps,
        } => bpnet::unify(basepairs.as_deref(), overlaps.as_deref())?,
        RawOutput::Fr3d(text) => fr3d::unify(text)?,
        RawOutput::Barnaba(text) => barnaba::unify(text, structure)?,
        RawOutput::McAnnotate(text) => mc_annotate::unify(text, structure)?,
        RawOutput::Rnaview(text) => rnaview::unify(text, structure)?,
        RawOutput::Maxit(text) => maxit::unify(text)?,
    };
    tracing::debug!(
        tool = %raw.tool(),
        interactions = interactions.len(),
        "unified raw tool output"
    );
    Ok(interactions)
}

/// Folds `parse` over the non-empty lines of `text`, with 1-based line numbers.
pub(crate) fn fold_lines<I>(
    text: &str,
    mut parse: impl FnMut(usize, &str) -> Result<I, Error>,
) -> Result<BaseInteractions, Error>
where
    I: IntoIterator,
    I::Item: Into<crate::model::interaction::Interaction>,
{
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .try_fold(BaseInteractions::new(), |mut acc, (idx, line)| {
            for interaction in parse(idx + 1, line)? {
                acc.push(interaction);
            }
            Ok(acc)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tool_names_leniently() {
        assert_eq!("bpnet".parse::<ToolKind>(), Ok(ToolKind::Bpnet));
        assert_eq!("MC-Annotate".parse::<ToolKind>(), Ok(ToolKind::McAnnotate));
        assert_eq!("mc_annotate".parse::<ToolKind>(), Ok(ToolKind::McAnnotate));
        assert_eq!("mcannotate".parse::<ToolKind>(), Ok(ToolKind::McAnnotate));
        assert_eq!(" RNAView ".parse::<ToolKind>(), Ok(ToolKind::Rnaview));
        assert!("dssr".parse::<ToolKind>().is_err());
    }

    #[test]
    fn preparation_requirements_per_tool() {
        let packed: Vec<_> = ToolKind::ALL
            .into_iter()
            .filter(ToolKind::needs_packed_chains)
            .collect();
        assert_eq!(
            packed,
            vec![ToolKind::Barnaba, ToolKind::McAnnotate, ToolKind::Rnaview]
        );
        let renumbered: Vec<_> = ToolKind::ALL
            .into_iter()
            .filter(ToolKind::needs_renumbering)
            .collect();
        assert_eq!(renumbered, vec![ToolKind::Barnaba]);
    }

    #[test]
    fn raw_output_knows_its_tool() {
        let raw = RawOutput::Bpnet {
            basepairs: None,
            overlaps: None,
        };
        assert_eq!(raw.tool(), ToolKind::Bpnet);
        assert_eq!(RawOutput::Maxit(String::new()).tool(), ToolKind::Maxit);
    }

    #[test]
    fn empty_bpnet_output_has_no_interactions() {
        let raw = RawOutput::Bpnet {
            basepairs: None,
            overlaps: None,
        };
        let interactions = unify(&raw, &Structure::default()).expect("unify");
        assert!(interactions.is_empty());
    }

    #[test]
    fn tool_kind_serializes_as_identifier() {
        let json = serde_json::to_string(&ToolKind::McAnnotate).expect("serialize");
        assert_eq!(json, "\"mc-annotate\"");
    }
}
