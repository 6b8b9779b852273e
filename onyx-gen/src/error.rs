use std::path::PathBuf;

/// Invalid run parameters. Always raised before any output is opened.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("No valid allowed characters selected")]
    EmptyAlphabet,

    #[error("Invalid length range {min}-{max}: lengths must satisfy 1 <= min <= max")]
    InvalidLengthRange { min: usize, max: usize },

    #[error("Cannot parse length '{input}': expected N or MIN-MAX")]
    UnparsableLength { input: String },

    #[error("Requested count must be greater than zero")]
    ZeroCount,

    #[error("Progress report interval must be greater than zero")]
    ZeroReportInterval,

    #[error("Every candidate over this alphabet is excluded by the active filters")]
    NoAcceptableCandidates,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Cannot open '{path}' for writing: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
