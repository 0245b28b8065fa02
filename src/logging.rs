//! Logging setup.
//!
//! Installs a non-blocking `tracing` subscriber on stderr, keeping stdout free
//! for command output. `RUST_LOG` wins over the declared level, and
//! `LOG_FORMAT=pretty` switches from JSON to human output.

use crate::config::LogLevel;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Output style of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    /// Reads `LOG_FORMAT`, defaulting to JSON.
    #[must_use]
    pub fn from_env() -> Self {
        std::env::var("LOG_FORMAT").map_or(Self::Json, |v| Self::from_str(&v))
    }

    fn from_str(s: &str) -> Self {
        if s.eq_ignore_ascii_case("pretty") {
            Self::Pretty
        } else {
            Self::Json
        }
    }
}

/// Builds the filter: `RUST_LOG` if set and valid, otherwise `level`.
#[must_use]
pub fn build_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str()))
}

/// Installs the global subscriber. Keep the returned guard alive for the
/// lifetime of the process so buffered lines are flushed.
#[must_use]
pub fn init(level: LogLevel, format: LogFormat) -> WorkerGuard {
    let (non_blocking, guard) = tracing_appender::non_blocking(std::io::stderr());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(build_filter(level))
        .with_writer(non_blocking);

    match format {
        LogFormat::Pretty => subscriber.init(),
        LogFormat::Json => subscriber.json().init(),
    }

    guard
}
