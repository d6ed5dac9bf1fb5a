use super::error::Error;
use crate::model::interaction::BaseInteractions;
use crate::model::residue::Residue;
use crate::model::structure::{ResidueKey, Structure};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Author numbering of a residue before renumbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginalNumber {
    pub number: i32,
    pub icode: Option<char>,
}

/// Per chain, new sequential number to original numbering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NumberMap {
    chains: BTreeMap<String, BTreeMap<i32, OriginalNumber>>,
}

impl NumberMap {
    pub fn original(&self, chain: &str, number: i32) -> Option<OriginalNumber> {
        self.chains.get(chain)?.get(&number).copied()
    }

    /// Number of renumbered residues over all chains.
    pub fn len(&self) -> usize {
        self.chains.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Renumbers every chain from 1 in first-seen residue order and drops insertion codes.
pub fn renumber(structure: &Structure) -> (Structure, NumberMap) {
    let mut assigned: HashMap<ResidueKey, i32> = HashMap::new();
    let mut counters: HashMap<String, i32> = HashMap::new();
    let mut map = NumberMap::default();
    let mut renumbered = structure.clone();

    for atom in &mut renumbered.atoms {
        let key = atom.residue_key();
        let new_number = match assigned.get(&key) {
            Some(number) => *number,
            None => {
                let counter = counters.entry(atom.chain.clone()).or_insert(0);
                *counter += 1;
                map.chains.entry(atom.chain.clone()).or_default().insert(
                    *counter,
                    OriginalNumber {
                        number: key.number,
                        icode: key.icode,
                    },
                );
                assigned.insert(key, *counter);
                *counter
            }
        };
        atom.number = new_number;
        atom.icode = None;
    }

    tracing::debug!(residues = map.len(), "renumbered residues");
    (renumbered, map)
}

fn restore_residue(mut residue: Residue, map: &NumberMap) -> Result<Residue, Error> {
    if let Some(auth) = residue.auth.as_mut() {
        let original = map
            .original(&auth.chain, auth.number)
            .ok_or_else(|| Error::UnknownNumber {
                chain: auth.chain.clone(),
                number: auth.number,
            })?;
        auth.number = original.number;
        auth.icode = original.icode;
    }
    Ok(residue)
}

/// Maps every residue's author number back to its original number and insertion code.
pub fn restore_numbers(
    interactions: BaseInteractions,
    map: &NumberMap,
) -> Result<BaseInteractions, Error> {
    interactions.try_map_residues(|residue| restore_residue(residue, map))
}
