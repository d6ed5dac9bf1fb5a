use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Record type of a coordinate line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum RecordKind {
    #[default]
    Atom,
    Hetatm,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Atom => "ATOM",
            RecordKind::Hetatm => "HETATM",
        }
    }
}

/// A single atom with its residue context, as read from a coordinate file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtomRecord {
    pub kind: RecordKind,
    pub serial: u32,
    pub name: String,
    pub alt_loc: Option<char>,
    pub residue_name: String,
    pub chain: String,
    pub number: i32,
    pub icode: Option<char>,
    pub position: [f64; 3],
    pub occupancy: f64,
    pub temperature_factor: f64,
    pub element: String,
}

impl AtomRecord {
    pub fn new(
        name: impl Into<String>,
        residue_name: impl Into<String>,
        chain: impl Into<String>,
        number: i32,
        position: [f64; 3],
    ) -> Self {
        Self {
            kind: RecordKind::Atom,
            serial: 0,
            name: name.into(),
            alt_loc: None,
            residue_name: residue_name.into(),
            chain: chain.into(),
            number,
            icode: None,
            position,
            occupancy: 1.0,
            temperature_factor: 0.0,
            element: String::new(),
        }
    }

    pub fn with_icode(mut self, icode: Option<char>) -> Self {
        self.icode = icode;
        self
    }

    pub fn residue_key(&self) -> ResidueKey {
        ResidueKey {
            chain: self.chain.clone(),
            number: self.number,
            icode: self.icode,
        }
    }

    pub fn distance(&self, other: &AtomRecord) -> f64 {
        let dx = self.position[0] - other.position[0];
        let dy = self.position[1] - other.position[1];
        let dz = self.position[2] - other.position[2];
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// Positional residue identity within a structure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResidueKey {
    pub chain: String,
    pub number: i32,
    pub icode: Option<char>,
}

impl ResidueKey {
    pub fn new(chain: impl Into<String>, number: i32, icode: Option<char>) -> Self {
        Self {
            chain: chain.into(),
            number,
            icode,
        }
    }
}

/// Atoms of one residue, borrowed from a [`Structure`].
#[derive(Debug, Clone)]
pub struct ResidueAtoms<'a> {
    pub key: ResidueKey,
    pub name: &'a str,
    pub atoms: Vec<&'a AtomRecord>,
}

impl<'a> ResidueAtoms<'a> {
    pub fn atom(&self, name: &str) -> Option<&'a AtomRecord> {
        self.atoms.iter().copied().find(|atom| atom.name == name)
    }
}

/// One structural model as an ordered list of atom records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Structure {
    pub atoms: Vec<AtomRecord>,
}

impl Structure {
    pub fn new(atoms: Vec<AtomRecord>) -> Self {
        Self { atoms }
    }

    #[inline]
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Distinct chain identifiers in first-seen order.
    pub fn chains(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.atoms
            .iter()
            .map(|atom| atom.chain.as_str())
            .filter(|chain| seen.insert(*chain))
            .collect()
    }

    /// Chain identifier of every contiguous run of atoms, with a new entry each time
    /// the chain differs from the previous atom's. A chain split by other chains
    /// appears more than once.
    pub fn chain_runs(&self) -> Vec<&str> {
        let mut runs: Vec<&str> = Vec::new();
        for atom in &self.atoms {
            if runs.last() != Some(&atom.chain.as_str()) {
                runs.push(&atom.chain);
            }
        }
        runs
    }

    /// Residues in first-seen order, each with its atoms in file order.
    pub fn residues(&self) -> Vec<ResidueAtoms<'_>> {
        let mut index: HashMap<ResidueKey, usize> = HashMap::new();
        let mut residues: Vec<ResidueAtoms<'_>> = Vec::new();
        for atom in &self.atoms {
            let key = atom.residue_key();
            let slot = *index.entry(key.clone()).or_insert_with(|| {
                residues.push(ResidueAtoms {
                    key,
                    name: &atom.residue_name,
                    atoms: Vec::new(),
                });
                residues.len() - 1
            });
            residues[slot].atoms.push(atom);
        }
        residues
    }

    /// Residue name lookup by position.
    pub fn residue_names(&self) -> HashMap<ResidueKey, &str> {
        let mut names = HashMap::new();
        for atom in &self.atoms {
            names
                .entry(atom.residue_key())
                .or_insert(atom.residue_name.as_str());
        }
        names
    }

    pub fn residue_name(&self, chain: &str, number: i32, icode: Option<char>) -> Option<&str> {
        self.atoms
            .iter()
            .find(|atom| atom.chain == chain && atom.number == number && atom.icode == icode)
            .map(|atom| atom.residue_name.as_str())
    }
}
