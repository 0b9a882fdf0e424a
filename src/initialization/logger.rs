//! Logger initialization.
//!
//! This module provides functions to initialize the logger with custom formatting.
//! Log output goes to stderr so that stdout carries nothing but records.

use std::io::Write;

use crate::config::LogFormat;
use crate::error_handling::InitializationError;
use colored::*;
use log::LevelFilter;

/// Level for a chatty dependency: the requested level, but never above `cap`.
fn noisy_module_level(level: LevelFilter, cap: LevelFilter) -> LevelFilter {
    level.min(cap)
}

/// Initializes the logger with the specified level and format.
///
/// Configures `env_logger` with custom formatting. Supports both plain text
/// (with colors) and JSON formats for structured logging.
///
/// The logger reads from the `RUST_LOG` environment variable by default, but
/// the provided `level` parameter will override it.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
///
/// # Examples
///
/// ```bash
/// # Only print records, no pagination summary
/// mnemonic-pdns example.com --log-level warn
///
/// # Per-module filtering via RUST_LOG
/// RUST_LOG=mnemonic_pdns=debug,reqwest=info mnemonic-pdns example.com
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    let mut builder = env_logger::Builder::from_default_env();

    builder.filter_level(level);
    builder.filter_module("reqwest", noisy_module_level(level, LevelFilter::Info));
    builder.filter_module("hyper", noisy_module_level(level, LevelFilter::Info));
    builder.filter_module("hyper_util", noisy_module_level(level, LevelFilter::Info));
    builder.filter_module("rustls", noisy_module_level(level, LevelFilter::Warn));
    builder.filter_module("mnemonic_pdns", level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{{\"ts\":{},\"level\":\"{}\",\"target\":\"{}\",\"msg\":{}}}",
                    chrono::Utc::now().timestamp_millis(),
                    record.level(),
                    record.target(),
                    serde_json::to_string(&record.args().to_string())
                        .unwrap_or_else(|_| "\"\"".into())
                )
            });
        }
        LogFormat::Plain => {
            builder.format(|buf, record| {
                let level = record.level();
                let colored_level = match level {
                    log::Level::Error => level.to_string().red(),
                    log::Level::Warn => level.to_string().yellow(),
                    log::Level::Info => level.to_string().green(),
                    log::Level::Debug => level.to_string().blue(),
                    log::Level::Trace => level.to_string().purple(),
                };

                writeln!(
                    buf,
                    "{} [{}] {}",
                    record.target().cyan(),
                    colored_level,
                    record.args()
                )
            });
        }
    }

    // try_init() so a second initialization (tests) returns an error instead of panicking
    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noisy_modules_follow_lower_levels() {
        assert_eq!(
            noisy_module_level(LevelFilter::Error, LevelFilter::Info),
            LevelFilter::Error
        );
        assert_eq!(
            noisy_module_level(LevelFilter::Off, LevelFilter::Warn),
            LevelFilter::Off
        );
    }

    #[test]
    fn test_noisy_modules_are_capped() {
        assert_eq!(
            noisy_module_level(LevelFilter::Trace, LevelFilter::Info),
            LevelFilter::Info
        );
        assert_eq!(
            noisy_module_level(LevelFilter::Debug, LevelFilter::Warn),
            LevelFilter::Warn
        );
    }

    #[test]
    fn test_init_logger_plain_format() {
        // env_logger can only be initialized once per process
        let result = init_logger_with(LevelFilter::Info, LogFormat::Plain);
        assert!(result.is_ok() || matches!(result, Err(InitializationError::LoggerError(_))));
    }

    #[test]
    fn test_init_logger_twice_reports_logger_error() {
        let _ = init_logger_with(LevelFilter::Debug, LogFormat::Json);
        let second = init_logger_with(LevelFilter::Debug, LogFormat::Json);
        assert!(matches!(second, Err(InitializationError::LoggerError(_))));
    }
}
