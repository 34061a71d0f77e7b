pub mod error;
pub mod random;
pub mod seq;

pub use error::GeneratorError;
pub use random::RandomGenerator;
pub use seq::SeqGenerator;

use snip_core::ShortCode;

/// Trait for generating short codes.
///
/// Implementations are pure generators that don't interact with storage.
/// Uniqueness is not required: the shortener retries on collisions, so a
/// generator only needs to draw from a space large enough that collisions
/// are rare.
pub trait Generator: Send + Sync + 'static {
    type Output: Into<ShortCode>;

    /// Generates a value that can be converted into a short code.
    fn generate(&self) -> Self::Output;
}
