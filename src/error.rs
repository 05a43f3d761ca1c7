use std::path::PathBuf;
use thiserror::Error;

/// Result type for driver operations
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal problems found while rewriting a single file.
///
/// Line numbers are 1-based.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    #[error("mixed indent on line {line}: {text:?} (an indent must not contain both tabs and spaces)")]
    MixedIndentation { line: usize, text: String },

    #[error("cannot split compound line {line} to insert a docstring, it has more than one ':': {text:?}")]
    UnsplittableCompoundLine { line: usize, text: String },
}

/// Errors that stop a conversion run
#[derive(Error, Debug)]
pub enum Error {
    #[error("{}: {source}", path.display())]
    Convert {
        path: PathBuf,
        #[source]
        source: ConvertError,
    },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("report serialization failed: {0}")]
    Report(#[from] serde_json::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn convert(path: impl Into<PathBuf>, source: ConvertError) -> Self {
        Self::Convert {
            path: path.into(),
            source,
        }
    }
}
