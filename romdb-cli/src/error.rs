use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Loading, downloading or caching an RDB failed
    #[error("{0}")]
    Rdb(#[from] romdb_rdb::RdbError),

    /// Writing JSON output failed
    #[error("{0}")]
    Json(#[from] serde_json::Error),

    /// A ROM path with no file name to import under
    #[error("Not a ROM file path: {}", .0.display())]
    InvalidRomPath(std::path::PathBuf),

    /// A checksum argument that is not 1-8 hex digits
    #[error("Invalid CRC32 '{0}': expected up to 8 hex digits")]
    InvalidCrc(String),
}

impl CliError {
    pub(crate) fn invalid_crc(msg: impl Into<String>) -> Self {
        Self::InvalidCrc(msg.into())
    }
}
