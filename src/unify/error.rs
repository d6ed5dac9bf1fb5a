use super::ToolKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed {tool} output: {details} (at line {line})")]
    Format {
        tool: ToolKind,
        line: usize,
        details: String,
    },

    #[error(
        "{tool} residue index {index} points at {expected} but the output names {found} (at line {line})"
    )]
    IndexMismatch {
        tool: ToolKind,
        line: usize,
        index: usize,
        expected: String,
        found: String,
    },

    #[error("{tool} output references a residue absent from the structure: {details} (at line {line})")]
    UnknownResidue {
        tool: ToolKind,
        line: usize,
        details: String,
    },

    #[error("malformed {tool} JSON at line {}: {source}", .source.line())]
    Json {
        tool: ToolKind,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read {tool} mmCIF output: {source}")]
    Mmcif {
        tool: ToolKind,
        #[source]
        source: crate::io::Error,
    },
}

impl Error {
    pub fn format(tool: ToolKind, line: usize, details: impl Into<String>) -> Self {
        Self::Format {
            tool,
            line,
            details: details.into(),
        }
    }

    pub fn unknown_residue(tool: ToolKind, line: usize, details: impl Into<String>) -> Self {
        Self::UnknownResidue {
            tool,
            line,
            details: details.into(),
        }
    }
}
