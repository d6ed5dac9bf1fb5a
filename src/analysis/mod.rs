//! End-to-end processing of one analysis request.
//!
//! A request runs in three stages:
//!
//! 1. [`prepare`] packs chain identifiers and renumbers residues when the chosen tool
//!    needs it, keeping the tables that undo both in [`RestoreTables`].
//! 2. A [`ToolRunner`] hands the prepared structure to the external program and returns
//!    its raw documents. Running programs is left to the caller.
//! 3. [`finish`] unifies the raw output, restores original numbering and then chains,
//!    and deduplicates the result.
//!
//! [`analyze`] chains the three stages. All state belongs to the request; nothing is
//! shared between calls.

mod config;
mod error;

pub use config::AnalysisConfig;
pub use error::Error;

use crate::canon::{self, DedupReport};
use crate::model::interaction::BaseInteractions;
use crate::model::structure::Structure;
use crate::pack::{self, ChainMap, NumberMap};
use crate::unify::{self, RawOutput, ToolKind};
use serde::{Deserialize, Serialize};

/// Runs one external analysis program.
pub trait ToolRunner {
    /// Analyzes `input`, which is already in the form `tool` requires.
    fn run(&self, tool: ToolKind, input: &Structure) -> Result<RawOutput, Error>;
}

/// Everything needed to translate a tool's residues back to the submitted structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreTables {
    pub tool: ToolKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_map: Option<ChainMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_map: Option<NumberMap>,
}

impl RestoreTables {
    /// Undoes renumbering first, since its table is keyed by packed chain, then packing.
    pub fn restore(&self, interactions: BaseInteractions) -> Result<BaseInteractions, pack::Error> {
        let interactions = match &self.number_map {
            Some(map) => pack::restore_numbers(interactions, map)?,
            None => interactions,
        };
        match &self.chain_map {
            Some(map) => pack::restore_chains(interactions, map),
            None => Ok(interactions),
        }
    }
}

/// A structure in the form one tool requires, with its restore tables.
#[derive(Debug, Clone, PartialEq)]
pub struct Prepared {
    pub structure: Structure,
    pub tables: RestoreTables,
}

/// Interactions of one request with the record of what deduplication changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    pub interactions: BaseInteractions,
    pub report: DedupReport,
}

/// Rewrites `structure` for `tool`: chains are packed for tools that read fixed-width PDB
/// and residues renumbered for tools that cannot keep insertion codes.
pub fn prepare(
    structure: &Structure,
    tool: ToolKind,
    config: &AnalysisConfig,
) -> Result<Prepared, Error> {
    let (structure, chain_map) = if tool.needs_packed_chains() {
        let (packed, map) = pack::pack_chains(structure, &config.chain_alphabet)?;
        (packed, Some(map))
    } else {
        (structure.clone(), None)
    };
    let (structure, number_map) = if tool.needs_renumbering() {
        let (renumbered, map) = pack::renumber(&structure);
        (renumbered, Some(map))
    } else {
        (structure, None)
    };

    tracing::debug!(
        %tool,
        atoms = structure.atom_count(),
        packed = chain_map.is_some(),
        renumbered = number_map.is_some(),
        "prepared structure"
    );
    Ok(Prepared {
        structure,
        tables: RestoreTables {
            tool,
            chain_map,
            number_map,
        },
    })
}

/// Turns raw tool output into canonical interactions of the original structure.
pub fn finish(
    raw: &RawOutput,
    prepared: &Prepared,
    config: &AnalysisConfig,
) -> Result<Analysis, Error> {
    let tool = raw.tool();
    if tool != prepared.tables.tool {
        return Err(Error::ToolMismatch {
            expected: prepared.tables.tool,
            found: tool,
        });
    }

    let unified = unify::unify(raw, &prepared.structure)?;
    let restored = prepared.tables.restore(unified)?;
    let (interactions, report) =
        canon::deduplicate_and_sort_with_report(restored, config.conflict_policy);

    tracing::info!(
        %tool,
        base_pairs = interactions.base_pairs.len(),
        stackings = interactions.stackings.len(),
        base_ribose = interactions.base_ribose_interactions.len(),
        base_phosphate = interactions.base_phosphate_interactions.len(),
        other = interactions.other_interactions.len(),
        "analysis finished"
    );
    Ok(Analysis {
        interactions,
        report,
    })
}

/// Prepares `structure`, runs `tool` through `runner`, and finishes the result.
pub fn analyze<R: ToolRunner + ?Sized>(
    structure: &Structure,
    tool: ToolKind,
    runner: &R,
    config: &AnalysisConfig,
) -> Result<Analysis, Error> {
    tracing::info!(%tool, atoms = structure.atom_count(), "starting analysis");
    let prepared = prepare(structure, tool, config)?;
    let raw = runner.run(tool, &prepared.structure)?;
    finish(&raw, &prepared, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::classification::{LeontisWesthof, StackingTopology};
    use crate::model::residue::Residue;
    use crate::model::structure::AtomRecord;

    fn structure() -> Structure {
        Structure::new(vec![
            AtomRecord::new("P", "G", "LONG", 10, [0.0; 3]).with_icode(Some('A')),
            AtomRecord::new("P", "C", "LONG", 12, [0.0; 3]),
            AtomRecord::new("P", "U", "B", 3, [0.0; 3]),
        ])
    }

    /// Replays canned baRNAba output written against the prepared structure.
    struct CannedBarnaba;

    impl ToolRunner for CannedBarnaba {
        fn run(&self, tool: ToolKind, input: &Structure) -> Result<RawOutput, Error> {
            assert_eq!(tool, ToolKind::Barnaba);
            assert_eq!(input.chains(), vec!["A", "B"]);
            let numbers: Vec<_> = input.atoms.iter().map(|a| (a.number, a.icode)).collect();
            assert_eq!(numbers, vec![(1, None), (2, None), (1, None)]);
            Ok(RawOutput::Barnaba(
                "C_2_0 G_1_0 WCc\nU_1_1 C_2_0 >>\nG_1_0 C_2_0 WCc\n".to_string(),
            ))
        }
    }

    struct FailingRunner;

    impl ToolRunner for FailingRunner {
        fn run(&self, tool: ToolKind, _: &Structure) -> Result<RawOutput, Error> {
            Err(Error::third_party(tool, "exited with status 139"))
        }
    }

    #[test]
    fn prepares_only_what_the_tool_needs() {
        let config = AnalysisConfig::default();

        let fr3d = prepare(&structure(), ToolKind::Fr3d, &config).expect("prepare");
        assert_eq!(fr3d.structure, structure());
        assert!(fr3d.tables.chain_map.is_none() && fr3d.tables.number_map.is_none());

        let rnaview = prepare(&structure(), ToolKind::Rnaview, &config).expect("prepare");
        assert_eq!(rnaview.structure.chains(), vec!["A", "B"]);
        assert_eq!(rnaview.structure.atoms[0].icode, Some('A'));
        assert!(rnaview.tables.number_map.is_none());

        let barnaba = prepare(&structure(), ToolKind::Barnaba, &config).expect("prepare");
        assert!(barnaba.tables.chain_map.is_some() && barnaba.tables.number_map.is_some());
    }

    #[test]
    fn analyzes_end_to_end_in_original_identifiers() {
        let analysis = analyze(
            &structure(),
            ToolKind::Barnaba,
            &CannedBarnaba,
            &AnalysisConfig::default(),
        )
        .expect("analyze");

        let pairs = &analysis.interactions.base_pairs;
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].nt1, Residue::from_auth("LONG", 10, Some('A'), "G"));
        assert_eq!(pairs[0].nt2, Residue::from_auth("LONG", 12, None, "C"));
        assert_eq!(pairs[0].lw, LeontisWesthof::CWW);

        let stacking = &analysis.interactions.stackings[0];
        assert_eq!(stacking.nt1, Residue::from_auth("B", 3, None, "U"));
        assert_eq!(stacking.topology, Some(StackingTopology::Upward));

        assert_eq!(analysis.report.duplicates, 1);
        assert_eq!(analysis.report.reversed, 1);
    }

    #[test]
    fn runner_failure_aborts_the_request() {
        let err = analyze(
            &structure(),
            ToolKind::Bpnet,
            &FailingRunner,
            &AnalysisConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::ThirdParty { tool: ToolKind::Bpnet, .. }));
        assert_eq!(err.to_string(), "BPNet failed: exited with status 139");
    }

    #[test]
    fn packing_capacity_is_reported() {
        let config = AnalysisConfig {
            chain_alphabet: "X".to_string(),
            ..AnalysisConfig::default()
        };
        let err = prepare(&structure(), ToolKind::McAnnotate, &config).unwrap_err();
        assert!(matches!(
            err,
            Error::Pack(pack::Error::Capacity {
                chains: 2,
                capacity: 1
            })
        ));
    }

    #[test]
    fn rejects_output_of_another_tool() {
        let config = AnalysisConfig::default();
        let prepared = prepare(&structure(), ToolKind::Fr3d, &config).expect("prepare");
        let err = finish(&RawOutput::Maxit(String::new()), &prepared, &config).unwrap_err();
        assert!(matches!(
            err,
            Error::ToolMismatch {
                expected: ToolKind::Fr3d,
                found: ToolKind::Maxit
            }
        ));
    }

    #[test]
    fn restore_tables_survive_json() {
        let prepared =
            prepare(&structure(), ToolKind::Barnaba, &AnalysisConfig::default()).expect("prepare");
        let json = serde_json::to_string(&prepared.tables).expect("serialize");
        let back: RestoreTables = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, prepared.tables);

        let fr3d = prepare(&structure(), ToolKind::Fr3d, &AnalysisConfig::default())
            .expect("prepare");
        let json = serde_json::to_string(&fr3d.tables).expect("serialize");
        assert_eq!(json, r#"{"tool":"fr3d"}"#);
    }
}
