//! Identifier packing for tools that only read fixed-width PDB.
//!
//! Legacy programs see one character per chain and four digits per residue number with
//! an optional insertion code. [`pack_chains`] and [`renumber`] rewrite a structure so it
//! fits those columns and return the table needed to translate the tool's residues back
//! with [`restore_chains`] and [`restore_numbers`]. The tables are plain data, owned by
//! one request, and serialize to JSON.

mod chains;
mod error;
mod numbers;

pub use chains::{ChainMap, DEFAULT_ALPHABET, pack_chains, restore_chains};
pub use error::Error;
pub use numbers::{NumberMap, OriginalNumber, renumber, restore_numbers};
