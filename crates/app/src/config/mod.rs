//! Till configuration

use clap::Args;
use thiserror::Error;

pub mod backend;
pub mod locale;
pub mod logging;

pub use backend::BackendConfig;
pub use locale::LocaleConfig;
pub use logging::{LogFormat, LoggingConfig};

/// Errors parsing configuration values.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Not an ISO 4217 currency code.
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Not an IANA time zone name.
    #[error("unknown time zone {name}: {source}")]
    UnknownTimeZone {
        name: String,
        #[source]
        source: jiff::Error,
    },
}

/// Configuration shared by every command.
#[derive(Debug, Args)]
pub struct PosConfig {
    /// Store backend settings.
    #[command(flatten)]
    pub backend: BackendConfig,

    /// Currency and time zone settings.
    #[command(flatten)]
    pub locale: LocaleConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}
