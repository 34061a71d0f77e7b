use clap::{Parser, ValueEnum};
use snip_telemetry::LogFormat;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;

pub const LISTEN_ADDR_ENV: &str = "SNIP_LISTEN_ADDR";
pub const PUBLIC_BASE_URL_ENV: &str = "SNIP_PUBLIC_BASE_URL";
pub const STORAGE_BACKEND_ENV: &str = "SNIP_STORAGE_BACKEND";
pub const SQLITE_URL_ENV: &str = "SNIP_SQLITE_URL";
pub const CODE_LENGTH_ENV: &str = "SNIP_CODE_LENGTH";
pub const CODE_ALPHABET_ENV: &str = "SNIP_CODE_ALPHABET";
pub const MAX_ATTEMPTS_ENV: &str = "SNIP_MAX_ATTEMPTS";
pub const LOG_FORMAT_ENV: &str = "SNIP_LOG_FORMAT";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_SQLITE_URL: &str = "sqlite://database.db";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "sqlite")]
    Sqlite,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::InMemory => write!(f, "in-memory"),
            StorageBackendArg::Sqlite => write!(f, "sqlite"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "snip-gateway")]
pub struct CLI {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// Prefix for the `short_url` values returned to clients.
    #[arg(long, env = PUBLIC_BASE_URL_ENV, default_value = DEFAULT_PUBLIC_BASE_URL)]
    pub public_base_url: String,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::Sqlite
    )]
    pub storage: StorageBackendArg,

    #[arg(long, env = SQLITE_URL_ENV, default_value = DEFAULT_SQLITE_URL)]
    pub sqlite_url: String,

    #[arg(
        long,
        env = CODE_LENGTH_ENV,
        default_value_t = snip_generator::random::DEFAULT_LENGTH
    )]
    pub code_length: usize,

    #[arg(
        long,
        env = CODE_ALPHABET_ENV,
        default_value = snip_generator::random::DEFAULT_ALPHABET
    )]
    pub code_alphabet: String,

    /// Fresh codes to try when a generated code is already taken.
    #[arg(
        long,
        env = MAX_ATTEMPTS_ENV,
        default_value_t = snip_shortener::config::DEFAULT_MAX_ATTEMPTS
    )]
    pub max_attempts: u32,

    /// `text` or `json`.
    #[arg(long, env = LOG_FORMAT_ENV, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}
