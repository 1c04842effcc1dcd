/// Errors from the RDB cache: reading, downloading and storing database files.
///
/// Decoding itself never fails; see [`decode`](crate::decode::decode).
#[derive(Debug, thiserror::Error)]
pub enum RdbError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Download failed: {0}")]
    Download(String),

    #[error("Download too large: {size} bytes exceeds the {limit} byte limit")]
    TooLarge { size: u64, limit: u64 },

    #[error("Invalid system name '{0}': must be a single file name")]
    InvalidSystem(String),

    #[error("Cache error: {0}")]
    Cache(String),
}

impl RdbError {
    pub fn download(msg: impl Into<String>) -> Self {
        Self::Download(msg.into())
    }

    pub fn cache(msg: impl Into<String>) -> Self {
        Self::Cache(msg.into())
    }
}
