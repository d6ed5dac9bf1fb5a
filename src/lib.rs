//! Normalization of RNA structural-interaction annotations produced by external
//! analysis programs into one canonical, tool-agnostic model.
//!
//! Each supported program (BPNet, FR3D, baRNAba, MC-Annotate, RNAView and MAXIT) speaks
//! its own notation for base pairs, stackings and backbone contacts. This crate maps all
//! of them onto the Leontis-Westhof and Saenger taxonomies, carries structures through
//! tools that only read fixed-width PDB, and collapses the two directional encodings of
//! each contact into one.
//!
//! # Features
//!
//! - **Canonical model**: residues with author and label identity, five interaction
//!   kinds and their classification enumerations
//! - **Per-tool unifiers**: one pure function per program, dispatched on [`RawOutput`]
//! - **Identifier packing**: chain-symbol compaction and residue renumbering with exact
//!   inverse tables
//! - **Deduplication**: canonical direction, conflict detection and stable ordering
//! - **Structure I/O**: fixed-column PDB reading and writing, mmCIF category extraction
//!
//! # Quick Start
//!
//! ```
//! use rna_adapters::{LeontisWesthof, RawOutput, Structure, deduplicate_and_sort, unify};
//!
//! let raw = RawOutput::Fr3d(
//!     "1EHZ|1|A|C|70 tSH 1EHZ|1|A|G|3\n1EHZ|1|A|G|3 tHS 1EHZ|1|A|C|70\n".to_string(),
//! );
//! let interactions = deduplicate_and_sort(unify(&raw, &Structure::default())?);
//!
//! assert_eq!(interactions.base_pairs.len(), 1);
//! assert_eq!(interactions.base_pairs[0].nt1.number(), 3);
//! assert_eq!(interactions.base_pairs[0].lw, LeontisWesthof::THS);
//! # Ok::<(), rna_adapters::UnifyError>(())
//! ```
//!
//! # Module Organization
//!
//! - [`model`] — Residues, classifications, interactions and atom-level structures
//! - [`unify`] — Per-tool translation of raw output
//! - [`pack`] — Chain packing and residue renumbering with their inverses
//! - [`canon`] — Canonical direction, deduplication and sorting
//! - [`analysis`] — Prepare / run / finish pipeline for one request
//! - [`io`] — PDB and mmCIF reading and writing

pub mod analysis;
pub mod canon;
pub mod io;
pub mod model;
pub mod pack;
pub mod unify;

pub use model::classification::{
    BPh, BR, LeontisWesthof, ParseLeontisWesthofError, ParseSaengerError,
    ParseStackingTopologyError, Saenger, StackingTopology,
};
pub use model::interaction::{
    BaseInteractions, BasePair, BasePhosphate, BaseRibose, Interaction, OtherInteraction,
    Stacking, Structure2D,
};
pub use model::residue::{Residue, ResidueAuth, ResidueLabel};
pub use model::structure::{AtomRecord, RecordKind, ResidueKey, Structure};

pub use unify::{RawOutput, ToolKind, unify};

pub use canon::{ConflictPolicy, DedupReport, deduplicate_and_sort};

pub use analysis::{AnalysisConfig, Prepared, RestoreTables, ToolRunner};

pub use analysis::Error as AnalysisError;
pub use io::Error as IoError;
pub use pack::Error as PackError;
pub use unify::Error as UnifyError;
