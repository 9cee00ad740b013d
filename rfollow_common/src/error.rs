use thiserror::Error;

#[derive(Error, Debug)]
pub enum RFollowError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("VFS error: {0}")]
    Vfs(#[from] VfsError),

    #[error("Input is empty")]
    EmptyInput,

    #[error("Input is too large: {size} bytes (limit {limit} bytes)")]
    InputTooLarge { size: u64, limit: u64 },

    #[error("Unsupported input: {0}")]
    UnsupportedInput(String),

    #[error("Corrupted archive or not a ZIP file: {0}")]
    CorruptArchive(String),

    #[error("Unexpected export layout: {0} folder not found")]
    MissingDirectory(String),

    #[error("Required export file not found: {0}")]
    MissingRequiredFile(String),

    #[error("Failed to parse {file}: {source}")]
    Schema {
        file: String,
        #[source]
        source: SchemaError,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Processing cancelled")]
    Cancelled,
}

impl RFollowError {
    /// True for failures caused by the input itself rather than the layout
    /// or contents of a readable archive.
    pub fn is_input_rejection(&self) -> bool {
        matches!(
            self,
            RFollowError::EmptyInput
                | RFollowError::InputTooLarge { .. }
                | RFollowError::UnsupportedInput(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, RFollowError>;

#[derive(Error, Debug)]
pub enum VfsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid archive: {0}")]
    InvalidArchive(String),

    #[error("Path not found: {0}")]
    NotFound(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("Not a file: {0}")]
    NotAFile(String),
}

/// Failure to turn one export file into identity records.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("malformed JSON: {0}")]
    Json(String),

    #[error("expected {expected} at top level, found {found}")]
    UnexpectedShape {
        expected: &'static str,
        found: &'static str,
    },

    #[error("missing key '{0}'")]
    MissingKey(&'static str),

    #[error("entry {index}: {reason}")]
    InvalidEntry { index: usize, reason: String },
}
