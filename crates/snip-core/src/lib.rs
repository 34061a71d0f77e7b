//! Core types and traits for the snip URL shortener.
//!
//! This crate provides the types shared by the generator, storage,
//! shortener and gateway crates.

pub mod error;
pub mod repository;
pub mod shortcode;
pub mod shortener;

pub use error::{CoreError, ShortenerError, StorageError};
pub use repository::{ReadRepository, Repository, UrlRecord};
pub use shortcode::ShortCode;
pub use shortener::{Shortened, Shortener};
