//! Reading and writing of the coordinate formats exchanged with the analysis tools.
//!
//! PDB is the lingua franca of the legacy tools: its fixed-width columns are why chain
//! identifiers and residue numbers must be packed before submission. mmCIF is read two
//! ways: atom sites into a [`Structure`](crate::model::structure::Structure), which keeps
//! multi-character chains, and single categories, which is how MAXIT reports base pairs.

use std::fmt;

pub mod error;

pub mod pdb {
    mod reader;
    mod writer;

    pub use reader::{read, read_model};
    pub use writer::write;
}

pub mod mmcif {
    mod reader;
    mod structure;

    pub use reader::{Category, read_category};
    pub use structure::{read, read_model};
}

pub use error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Pdb,
    Mmcif,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Pdb => write!(f, "PDB"),
            Format::Mmcif => write!(f, "mmCIF"),
        }
    }
}
