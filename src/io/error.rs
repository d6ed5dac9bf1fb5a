use super::Format;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O operation failed: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("failed to parse {format} data: {details} (at line ~{line})")]
    Parse {
        format: Format,
        line: usize,
        details: String,
    },

    #[error("chain identifier '{chain}' does not fit the single-character {format} column")]
    ChainTooLong { format: Format, chain: String },

    #[error("value '{value}' overflows the {width}-character {field} column")]
    FieldOverflow {
        field: &'static str,
        width: usize,
        value: String,
    },

    #[error("model {0} not found in the input")]
    MissingModel(u32),
}

impl Error {
    pub fn parse(format: Format, line: usize, details: impl Into<String>) -> Self {
        Self::Parse {
            format,
            line,
            details: details.into(),
        }
    }
}
