//! Diagnostics for the `taskrank` binary.
//!
//! Rankings and reports are written to stdout; everything emitted through
//! `tracing` goes to stderr so piped JSON output stays clean. The level comes
//! from `--log-level`, then `TASKRANK_LOG`, then defaults to `info`.

use anyhow::Result;
use clap::ValueEnum;
use tracing::Level;
use tracing_subscriber::fmt;

const LOG_ENV: &str = "TASKRANK_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(lvl: LogLevel) -> Self {
        match lvl {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

impl LogLevel {
    /// Lenient name lookup for the environment variable.
    fn from_env_value(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "error" => Some(LogLevel::Error),
            "warn" | "warning" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "trace" => Some(LogLevel::Trace),
            _ => None,
        }
    }
}

/// Pick the effective level. An unreadable env value is ignored.
fn resolve_level(flag: Option<LogLevel>, env_value: Option<&str>) -> Level {
    flag.or_else(|| env_value.and_then(LogLevel::from_env_value))
        .map(Level::from)
        .unwrap_or(Level::INFO)
}

/// Install the stderr subscriber. Fails if one is already installed.
pub fn init_logging(flag: Option<LogLevel>) -> Result<()> {
    let env_value = std::env::var(LOG_ENV).ok();
    let level = resolve_level(flag, env_value.as_deref());

    fmt()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("init logging: {e}"))?;

    tracing::debug!(%level, "logging initialised");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_wins_over_env() {
        assert_eq!(resolve_level(Some(LogLevel::Error), Some("trace")), Level::ERROR);
    }

    #[test]
    fn env_used_when_no_flag() {
        assert_eq!(resolve_level(None, Some(" Debug ")), Level::DEBUG);
        assert_eq!(resolve_level(None, Some("warning")), Level::WARN);
    }

    #[test]
    fn falls_back_to_info() {
        assert_eq!(resolve_level(None, None), Level::INFO);
        assert_eq!(resolve_level(None, Some("loud")), Level::INFO);
    }
}
