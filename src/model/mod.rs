//! Canonical data model shared by every tool adapter.
//!
//! - [`residue`] – Author and dictionary residue identities with the canonical ordering.
//! - [`classification`] – Leontis-Westhof, Saenger, stacking topology, BR and BPh taxonomies.
//! - [`interaction`] – The five interaction kinds and the [`BaseInteractions`] container.
//! - [`structure`] – Atom-level coordinate records submitted to the external tools.
//!
//! [`BaseInteractions`]: interaction::BaseInteractions

pub mod classification;
pub mod interaction;
pub mod residue;
pub mod structure;
