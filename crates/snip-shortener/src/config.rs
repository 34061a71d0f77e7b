use typed_builder::TypedBuilder;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Tunables for [`ShortenerService`](crate::ShortenerService).
#[derive(Debug, Clone, TypedBuilder)]
pub struct ShortenerConfig {
    /// How many freshly generated codes to try before giving up with
    /// `AllocationExhausted`. Values below 1 are treated as 1.
    #[builder(default = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u32,
}

impl Default for ShortenerConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
