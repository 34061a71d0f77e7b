use crate::config::ShortenerConfig;
use crate::validator::{AbsoluteUriValidator, UrlValidator};
use async_trait::async_trait;
use snip_core::{
    Repository, ShortCode, Shortened, Shortener, ShortenerError, StorageError, UrlRecord,
};
use snip_generator::Generator;
use std::sync::Arc;
use tracing::{debug, error, trace, warn};

/// A concrete implementation of the `Shortener` trait.
///
/// This service wraps a `Repository`, a `Generator` and a `UrlValidator` to
/// handle:
/// - URL validation
/// - Duplicate detection (one code per original URL)
/// - Short code allocation with bounded retry on code collisions
///
/// No in-process lock is taken. Correctness under concurrency comes from
/// the repository's uniqueness constraints: a lookup by URL is only a fast
/// path, and an insert that loses a race on the same URL is turned into a
/// read of the winner's code.
#[derive(Debug, Clone)]
pub struct ShortenerService<R, G, V = AbsoluteUriValidator> {
    repository: Arc<R>,
    generator: Arc<G>,
    validator: Arc<V>,
    config: ShortenerConfig,
}

impl<R: Repository, G: Generator> ShortenerService<R, G> {
    /// Creates a new `ShortenerService` using [`AbsoluteUriValidator`].
    pub fn new(repository: R, generator: G) -> Self {
        Self::with_validator(repository, generator, AbsoluteUriValidator)
    }
}

impl<R: Repository, G: Generator, V: UrlValidator> ShortenerService<R, G, V> {
    /// Creates a new `ShortenerService` with a custom URL validator.
    pub fn with_validator(repository: R, generator: G, validator: V) -> Self {
        Self {
            repository: Arc::new(repository),
            generator: Arc::new(generator),
            validator: Arc::new(validator),
            config: ShortenerConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ShortenerConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns a reference to the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    fn validate_url(&self, url: &str) -> Result<(), ShortenerError> {
        if self.validator.is_valid(url) {
            Ok(())
        } else {
            Err(ShortenerError::InvalidUrl(format!(
                "not an absolute URI with scheme and host: {url:?}"
            )))
        }
    }

    async fn existing_code(&self, original_url: &str) -> Result<Option<ShortCode>, ShortenerError> {
        self.repository
            .find_code(original_url)
            .await
            .map_err(storage_unavailable)
    }

    async fn allocate(&self, original_url: &str) -> Result<Shortened, ShortenerError> {
        let max_attempts = self.config.max_attempts.max(1);

        for attempt in 1..=max_attempts {
            let code: ShortCode = self.generator.generate().into();
            let record = UrlRecord::new(original_url);

            match self.repository.insert(&code, record).await {
                Ok(()) => {
                    debug!(code = %code, attempt, "allocated short code");
                    return Ok(Shortened::Created(code));
                }
                Err(StorageError::CodeConflict(_)) => {
                    warn!(code = %code, attempt, max_attempts, "short code collision, regenerating");
                }
                Err(StorageError::UrlConflict(_)) => {
                    // Another caller stored this URL after our fast-path lookup.
                    return match self.existing_code(original_url).await? {
                        Some(winner) => {
                            debug!(code = %winner, "lost allocation race, reusing stored code");
                            Ok(Shortened::Existing(winner))
                        }
                        None => Err(storage_unavailable(StorageError::InvalidData(format!(
                            "url conflict reported but no code stored for {original_url}"
                        )))),
                    };
                }
                Err(e) => return Err(storage_unavailable(e)),
            }
        }

        error!(attempts = max_attempts, "short code allocation exhausted");
        Err(ShortenerError::AllocationExhausted {
            attempts: max_attempts,
        })
    }
}

#[async_trait]
impl<R: Repository, G: Generator, V: UrlValidator> Shortener for ShortenerService<R, G, V> {
    async fn shorten(&self, original_url: &str) -> Result<Shortened, ShortenerError> {
        if let Err(e) = self.validate_url(original_url) {
            debug!(error = %e, "rejected url");
            return Err(e);
        }

        if let Some(code) = self.existing_code(original_url).await? {
            trace!(code = %code, "url already shortened");
            return Ok(Shortened::Existing(code));
        }

        self.allocate(original_url).await
    }

    async fn resolve(&self, code: &ShortCode) -> Result<Option<UrlRecord>, ShortenerError> {
        trace!(code = %code, "resolving short code");

        let record = self
            .repository
            .get(code)
            .await
            .map_err(storage_unavailable)?;

        if record.is_none() {
            trace!(code = %code, "short code not found");
        }
        Ok(record)
    }
}

/// Converts a repository failure into `StorageUnavailable`, raising the alarm.
fn storage_unavailable(e: StorageError) -> ShortenerError {
    error!(error = %e, "storage failure");
    ShortenerError::from(e)
}
