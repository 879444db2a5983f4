//! Logging Config

use clap::Args;

/// Crates whose chatter is capped at `warn` unless `RUST_LOG` says otherwise.
const QUIET_DEPENDENCIES: [&str; 4] = ["hyper", "hyper_util", "reqwest", "rustls"];

/// How log lines are written to stderr.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// One line per event, for the operator's terminal
    Compact,

    /// Newline-delimited JSON, for log shipping
    Json,
}

/// Logging settings for the POS binary.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Level for emission crates (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Output format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

impl LoggingConfig {
    /// Filter directives used when `RUST_LOG` is not set.
    pub fn directives(&self) -> String {
        let mut directives = self.log_level.clone();

        for target in QUIET_DEPENDENCIES {
            directives.push_str(&format!(",{target}=warn"));
        }

        directives
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_quiet_http_stack() {
        let config = LoggingConfig {
            log_level: "debug".to_string(),
            log_format: LogFormat::Json,
        };

        assert_eq!(
            config.directives(),
            "debug,hyper=warn,hyper_util=warn,reqwest=warn,rustls=warn"
        );
    }
}
