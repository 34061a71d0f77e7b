use crate::error::StorageError;
use crate::shortcode::ShortCode;
use async_trait::async_trait;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// A stored URL record in the repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlRecord {
    /// The original URL that was shortened.
    pub original_url: String,
    /// When the short code was first allocated.
    pub created_at: Timestamp,
}

impl UrlRecord {
    /// Creates a record for `original_url` stamped with the current time.
    pub fn new(original_url: impl Into<String>) -> Self {
        Self {
            original_url: original_url.into(),
            created_at: Timestamp::now(),
        }
    }
}

/// A read-only view of a repository.
///
/// This trait provides only the read operations from [`Repository`].
#[async_trait]
pub trait ReadRepository: Send + Sync + 'static {
    /// Retrieves the URL record for a given short code.
    /// Returns `None` if the code does not exist.
    async fn get(&self, code: &ShortCode) -> Result<Option<UrlRecord>>;

    /// Looks up the short code already assigned to `original_url`, if any.
    ///
    /// Matching is exact; no URL normalisation is applied.
    async fn find_code(&self, original_url: &str) -> Result<Option<ShortCode>>;

    /// Checks whether a short code already exists in the repository.
    async fn exists(&self, code: &ShortCode) -> Result<bool>;
}

#[async_trait]
pub trait Repository: ReadRepository {
    /// Atomically inserts a new URL record.
    ///
    /// Implementations must enforce both uniqueness constraints natively:
    /// returns `Err(CodeConflict)` if the code is taken and `Err(UrlConflict)`
    /// if the original URL already has a code. On error nothing is written.
    async fn insert(&self, code: &ShortCode, record: UrlRecord) -> Result<()>;
}
