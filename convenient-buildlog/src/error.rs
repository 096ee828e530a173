use std::path::PathBuf;

/// Result of build-log extraction operations
pub type BuildlogResult<T> = Result<T, BuildlogError>;

/// Errors during build-log extraction
#[derive(Debug, thiserror::Error)]
pub enum BuildlogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot read dependency file {path}: {source}")]
    DepFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot import generated file {path}: {source}")]
    GeneratedImport {
        path: PathBuf,
        source: std::io::Error,
    },
}
