//! Logger initialization.

use std::io::Write;

use colored::*;
use log::{Level, LevelFilter};

use crate::config::LogFormat;
use crate::error_handling::InitializationError;

/// Dependency modules that are too chatty at the crate's own level.
const NOISY_MODULES: [(&str, LevelFilter); 4] = [
    ("reqwest", LevelFilter::Info),
    ("hyper", LevelFilter::Info),
    ("hyper_util", LevelFilter::Info),
    ("trust_dns_proto", LevelFilter::Error),
];

/// One JSON log line: `{"ts":..,"level":..,"target":..,"msg":..}`.
fn json_line(timestamp_millis: i64, level: Level, target: &str, message: &str) -> String {
    serde_json::json!({
        "ts": timestamp_millis,
        "level": level.as_str(),
        "target": target,
        "msg": message,
    })
    .to_string()
}

fn colored_level(level: Level) -> ColoredString {
    let label = level.to_string();
    match level {
        Level::Error => label.red().bold(),
        Level::Warn => label.yellow(),
        Level::Info => label.green(),
        Level::Debug => label.blue(),
        Level::Trace => label.purple(),
    }
}

/// Initializes the global logger.
///
/// `RUST_LOG` is read first and `level` overrides it, so
/// `RUST_LOG=phishscore=trace,reqwest=debug` still works for per-module
/// filtering while `--log-level` controls the default.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
/// Uses `try_init`, so repeated calls in tests never panic.
///
/// # Examples
///
/// ```bash
/// RUST_LOG=debug phishscore http://example.com
/// phishscore --log-level trace --log-format json http://example.com
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(level);
    for (module, module_level) in NOISY_MODULES {
        builder.filter_module(module, module_level.min(level));
    }
    builder.filter_module("phishscore", level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{}",
                    json_line(
                        chrono::Utc::now().timestamp_millis(),
                        record.level(),
                        record.target(),
                        &record.args().to_string(),
                    )
                )
            });
        }
        LogFormat::Plain => {
            colored::control::set_override(true);
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{} {} [{}] {}",
                    chrono::Local::now().format("%H:%M:%S%.3f").to_string().dimmed(),
                    record.target().cyan(),
                    colored_level(record.level()),
                    record.args()
                )
            });
        }
    }

    builder.try_init().map_err(InitializationError::from)?;
    Ok(())
}
