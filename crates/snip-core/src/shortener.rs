use crate::repository::UrlRecord;
use crate::shortcode::ShortCode;
use async_trait::async_trait;

type Result<T> = std::result::Result<T, crate::error::ShortenerError>;

/// Outcome of a successful [`Shortener::shorten`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shortened {
    /// A fresh short code was allocated and stored.
    Created(ShortCode),
    /// The URL already had a short code; nothing was written.
    Existing(ShortCode),
}

impl Shortened {
    pub fn code(&self) -> &ShortCode {
        match self {
            Shortened::Created(code) | Shortened::Existing(code) => code,
        }
    }

    pub fn into_code(self) -> ShortCode {
        match self {
            Shortened::Created(code) | Shortened::Existing(code) => code,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, Shortened::Created(_))
    }
}

#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Returns the short code for `original_url`, allocating one if the URL
    /// has never been shortened.
    ///
    /// Calling this repeatedly, or concurrently, for the same URL always
    /// yields the same code and stores at most one record.
    async fn shorten(&self, original_url: &str) -> Result<Shortened>;

    /// Resolves a short code to its stored URL record.
    /// Returns `None` if the code does not exist.
    async fn resolve(&self, code: &ShortCode) -> Result<Option<UrlRecord>>;
}
