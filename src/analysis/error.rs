//! Error types for the analysis pipeline.

use crate::unify::ToolKind;
use thiserror::Error;

/// Errors that can occur while preparing a structure, running a tool, or turning its
/// output into canonical interactions.
///
/// No stage retries and no partial result is returned: the first failure aborts the
/// request.
#[derive(Debug, Error)]
pub enum Error {
    /// The structure could not be packed, or a tool residue could not be restored.
    #[error("identifier mapping failed: {0}")]
    Pack(#[from] crate::pack::Error),

    /// Raw tool output violated the tool's grammar.
    #[error("{0}")]
    Unify(#[from] crate::unify::Error),

    /// A structure file could not be read or written.
    #[error("structure I/O failed: {0}")]
    Io(#[from] crate::io::Error),

    /// Failed to parse analysis configuration TOML.
    #[error("failed to parse analysis configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// The external program failed or produced no usable output.
    #[error("{tool} failed: {details}")]
    ThirdParty { tool: ToolKind, details: String },

    /// Raw output was paired with restore tables prepared for another tool.
    #[error("output of {found} cannot be restored with tables prepared for {expected}")]
    ToolMismatch { expected: ToolKind, found: ToolKind },
}

impl Error {
    /// Creates a [`ThirdParty`](Error::ThirdParty) error.
    pub fn third_party(tool: ToolKind, details: impl Into<String>) -> Self {
        Self::ThirdParty {
            tool,
            details: details.into(),
        }
    }
}
