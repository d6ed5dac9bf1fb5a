//! Canonical direction, deduplication and ordering of interaction sets.
//!
//! Tools routinely report a contact once from each residue. This module turns every
//! undirected interaction so its first residue precedes the second (reversing the
//! classification to match), merges repeats, and sorts each list by
//! `(nt1.chain, nt1.number, nt2.chain, nt2.number)`.

mod dedup;
mod reverse;

pub use dedup::{
    Conflict, ConflictPolicy, DedupReport, deduplicate_and_sort, deduplicate_and_sort_with_report,
};
pub use reverse::Reversible;
