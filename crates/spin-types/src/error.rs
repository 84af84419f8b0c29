use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpinError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Material index {index} out of range ({count} materials configured)")]
    MaterialOutOfRange { index: usize, count: usize },

    #[error("Atom index {index} out of range (system has {count} atoms)")]
    AtomOutOfRange { index: usize, count: usize },

    #[error("Atom range {start}..{end} invalid for system of {count} atoms")]
    BadAtomRange {
        start: usize,
        end: usize,
        count: usize,
    },

    #[error("Array length mismatch for {name}: expected {expected}, got {got}")]
    LengthMismatch {
        name: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type SpinResult<T> = Result<T, SpinError>;
