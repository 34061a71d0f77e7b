//! URL shortener service implementation.
//!
//! [`ShortenerService`] is the only component that reads or writes short code
//! records. It combines a [`Repository`](snip_core::Repository), a
//! [`Generator`](snip_generator::Generator) and a [`UrlValidator`]. Core types
//! are re-exported from `snip_core`.

pub mod config;
pub mod service;
pub mod validator;

pub use config::ShortenerConfig;
pub use service::ShortenerService;
pub use snip_core::{Shortened, Shortener, ShortenerError};
pub use validator::{AbsoluteUriValidator, UrlValidator};
