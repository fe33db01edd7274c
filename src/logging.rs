use anyhow::{Context, Result};
use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode, WriteLogger};
use std::fs::OpenOptions;
use std::path::Path;

/// Installs the global logger.
///
/// Records go to `log_file` (appended) when given, otherwise to standard
/// error. With `LevelFilter::Off` nothing is installed, so the interactive
/// transcript stays clean.
pub fn init(level: LevelFilter, log_file: Option<&Path>) -> Result<()> {
    if level == LevelFilter::Off {
        return Ok(());
    }

    let config = ConfigBuilder::new().set_time_format_rfc3339().build();
    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("can't open log file {}", path.display()))?;
            WriteLogger::init(level, config, file)?;
        }
        None => TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto)?,
    }
    Ok(())
}
