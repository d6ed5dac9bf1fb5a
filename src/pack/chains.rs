use super::error::Error;
use crate::model::interaction::BaseInteractions;
use crate::model::residue::Residue;
use crate::model::structure::Structure;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Printable single-character chain symbols, in assignment order: upper-case letters,
/// digits, lower-case letters, then ASCII punctuation.
pub const DEFAULT_ALPHABET: &str = concat!(
    "ABCDEFGHIJKLMNOPQRSTUVWXYZ",
    "0123456789",
    "abcdefghijklmnopqrstuvwxyz",
    "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~",
);

/// Packed chain symbol to original chain identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainMap {
    symbols: BTreeMap<String, String>,
}

impl ChainMap {
    pub fn original(&self, symbol: &str) -> Option<&str> {
        self.symbols.get(symbol).map(String::as_str)
    }

    pub fn symbol(&self, original: &str) -> Option<&str> {
        self.symbols
            .iter()
            .find(|(_, o)| o.as_str() == original)
            .map(|(s, _)| s.as_str())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.symbols.iter().map(|(s, o)| (s.as_str(), o.as_str()))
    }
}

fn validate_alphabet(alphabet: &str) -> Result<Vec<char>, Error> {
    let mut seen = HashSet::new();
    let mut symbols = Vec::new();
    for symbol in alphabet.chars() {
        if symbol.is_whitespace() || symbol.is_control() {
            return Err(Error::InvalidAlphabet(format!(
                "symbol {symbol:?} is not printable"
            )));
        }
        if !seen.insert(symbol) {
            return Err(Error::InvalidAlphabet(format!(
                "symbol '{symbol}' appears more than once"
            )));
        }
        symbols.push(symbol);
    }
    Ok(symbols)
}

/// Assigns successive alphabet symbols to the distinct chains of `structure` in
/// first-seen order and returns the rewritten copy with the restore table.
pub fn pack_chains(structure: &Structure, alphabet: &str) -> Result<(Structure, ChainMap), Error> {
    let symbols = validate_alphabet(alphabet)?;
    let chains = structure.chains();
    if chains.len() > symbols.len() {
        return Err(Error::Capacity {
            chains: chains.len(),
            capacity: symbols.len(),
        });
    }

    let forward: HashMap<&str, String> = chains
        .iter()
        .zip(&symbols)
        .map(|(chain, symbol)| (*chain, symbol.to_string()))
        .collect();

    let mut packed = structure.clone();
    for atom in &mut packed.atoms {
        if let Some(symbol) = forward.get(atom.chain.as_str()) {
            atom.chain = symbol.clone();
        }
    }

    let map = ChainMap {
        symbols: forward
            .into_iter()
            .map(|(chain, symbol)| (symbol, chain.to_string()))
            .collect(),
    };
    tracing::debug!(chains = map.len(), "packed chain identifiers");
    Ok((packed, map))
}

fn restore_residue(mut residue: Residue, map: &ChainMap) -> Result<Residue, Error> {
    if let Some(auth) = residue.auth.as_mut() {
        let original = map
            .original(&auth.chain)
            .ok_or_else(|| Error::UnknownChain(auth.chain.clone()))?;
        auth.chain = original.to_string();
    }
    if let Some(label) = residue.label.as_mut() {
        if let Some(original) = map.original(&label.chain) {
            label.chain = original.to_string();
        }
    }
    Ok(residue)
}

/// Rewrites every residue's chain from packed symbol back to the original identifier.
/// Label chains are rewritten only when their symbol is known.
pub fn restore_chains(
    interactions: BaseInteractions,
    map: &ChainMap,
) -> Result<BaseInteractions, Error> {
    interactions.try_map_residues(|residue| restore_residue(residue, map))
}
