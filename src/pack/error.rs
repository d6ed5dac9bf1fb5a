use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("structure has {chains} distinct chains but the alphabet holds only {capacity} symbols")]
    Capacity { chains: usize, capacity: usize },

    #[error("invalid chain alphabet: {0}")]
    InvalidAlphabet(String),

    #[error("chain symbol '{0}' has no entry in the chain map")]
    UnknownChain(String),

    #[error("residue {number} of chain '{chain}' has no entry in the number map")]
    UnknownNumber { chain: String, number: i32 },
}
