use thiserror::Error;

/// Errors related to the core types of the URL shortener.
pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Clone, Error)]
pub enum CoreError {
    #[error("invalid short code: {0}")]
    InvalidShortCode(String),
}

/// Errors reported by repository implementations.
///
/// The two conflict variants correspond to the two uniqueness constraints
/// every repository enforces natively: one on the short code and one on the
/// original URL.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("short code already exists: {0}")]
    CodeConflict(String),
    #[error("original url already has a short code: {0}")]
    UrlConflict(String),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("storage operation failed: {0}")]
    Operation(String),
}

#[derive(Debug, Clone, Error)]
pub enum ShortenerError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
    #[error("no free short code found after {attempts} attempts")]
    AllocationExhausted { attempts: u32 },
}

impl ShortenerError {
    /// Whether this error should be treated as an operational alarm.
    ///
    /// Invalid input is a routine outcome and is not.
    pub fn is_alarm(&self) -> bool {
        !matches!(self, ShortenerError::InvalidUrl(_))
    }
}

impl From<StorageError> for ShortenerError {
    fn from(value: StorageError) -> Self {
        Self::StorageUnavailable(value.to_string())
    }
}
