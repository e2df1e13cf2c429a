pub mod schema;

pub use schema::{
    CountersConfig, DisplayConfig, OutputFormat, PulseConfig, StreamConfig, ThemeConfig,
};

use chrono::format::{Item, StrftimeItems};
use pulse_core::{PulseError, Result};
use std::path::{Path, PathBuf};

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV: &str = "PULSE_CONFIG";

/// Load configuration from a TOML file.  Returns `PulseConfig::default()` if
/// the file doesn't exist so the dashboard always has sensible defaults.
pub fn load(path: impl AsRef<Path>) -> Result<PulseConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::warn!(
            "Config file not found at '{}'; using defaults.",
            path.display()
        );
        return Ok(PulseConfig::default());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| PulseError::Config(format!("cannot read '{}': {e}", path.display())))?;

    let config = parse(&raw)?;
    tracing::info!("Loaded config from '{}'", path.display());
    Ok(config)
}

/// Parse and validate a TOML document.
pub fn parse(raw: &str) -> Result<PulseConfig> {
    let config: PulseConfig =
        toml::from_str(raw).map_err(|e| PulseError::Config(format!("TOML parse error: {e}")))?;
    validate(&config)?;
    Ok(config)
}

/// Reject settings the stream cannot run with.
pub fn validate(config: &PulseConfig) -> Result<()> {
    let stream = &config.stream;
    if stream.capacity == 0 {
        return Err(PulseError::Config("stream.capacity must be at least 1".into()));
    }
    if stream.tick_interval_ms == 0 {
        return Err(PulseError::Config("stream.tick_interval_ms must be positive".into()));
    }
    if stream.backfill_spacing_ms == 0 {
        return Err(PulseError::Config("stream.backfill_spacing_ms must be positive".into()));
    }
    if config.display.render_every == 0 {
        return Err(PulseError::Config("display.render_every must be at least 1".into()));
    }

    let time_format = &config.theme.time_format;
    if StrftimeItems::new(time_format).any(|item| matches!(item, Item::Error)) {
        return Err(PulseError::Config(format!(
            "theme.time_format '{time_format}' is not a valid strftime format"
        )));
    }
    Ok(())
}

/// Return the config path: `$PULSE_CONFIG` if set, otherwise
/// `$XDG_CONFIG_HOME/pulse/pulse.toml`.
pub fn default_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        return PathBuf::from(path);
    }

    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("pulse").join("pulse.toml")
}
