//! Tracing subscriber setup.
//!
//! The engine logs through `tracing`; this module wires those events to
//! stderr for applications that have no subscriber of their own.
//!
//! # Environment Variables
//!
//! - `FIELDRULE_LOG=debug|fieldrule_validation=trace|...` - filter directives
//! - `RUST_LOG` - used when `FIELDRULE_LOG` is unset
//! - `NO_COLOR` - disable ANSI colors

use std::env;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Variable read for filter directives
pub const LOG_ENV: &str = "FIELDRULE_LOG";

const DEFAULT_DIRECTIVES: &str = "info";

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// `EnvFilter` directives, e.g. `fieldrule_validation=debug`
    pub directives: String,
    /// Whether to emit ANSI colors
    pub color: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            directives: DEFAULT_DIRECTIVES.to_string(),
            color: false,
        }
    }
}

impl LogConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let directives = env::var(LOG_ENV)
            .or_else(|_| env::var("RUST_LOG"))
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DIRECTIVES.to_string());

        let color = env::var("NO_COLOR").is_err() && env::var("TERM").is_ok();

        Self { directives, color }
    }

    /// Filter built from the directives, falling back to the default when
    /// they do not parse.
    pub fn filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.directives).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
    }
}

/// Create a subscriber for `config`.
pub fn subscriber(config: LogConfig) -> impl tracing::Subscriber + Send + Sync {
    tracing_subscriber::registry()
        .with(config.filter())
        .with(fmt::layer().with_ansi(config.color).with_writer(std::io::stderr))
}

/// Install a global subscriber configured from the environment.
///
/// Returns `false` if a global subscriber was already set.
pub fn init() -> bool {
    tracing::subscriber::set_global_default(subscriber(LogConfig::from_env())).is_ok()
}
