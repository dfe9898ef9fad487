// File logging for the binary. The library only talks to the `log` facade;
// installing a dispatcher is left to whoever owns the process.

use crate::config::LoggingConfig;
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use log::Level;

/// Install a global `fern` dispatcher appending to `config.file`.
///
/// Can only succeed once per process.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let file = fern::log_file(&config.file)
        .with_context(|| format!("Failed to open log file {}", config.file.display()))?;

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}",
                render_line(Local::now(), record.target(), record.level(), message)
            ))
        })
        .level(config.level)
        .chain(file)
        .apply()
        .context("A global logger is already installed")?;
    Ok(())
}

/// `2024-01-02 03:04:05,678 - target - LEVEL - message`
pub fn render_line(
    now: DateTime<Local>,
    target: &str,
    level: Level,
    message: &std::fmt::Arguments<'_>,
) -> String {
    format!(
        "{} - {} - {} - {}",
        now.format("%Y-%m-%d %H:%M:%S,%3f"),
        target,
        level,
        message
    )
}
