//! Runtime configuration loading.
//!
//! Deliberately small: the editor itself has no configurable feature
//! surface, so the file only carries process-level knobs (log filter,
//! reserved status rows). The path comes from the CLI; when no file is given
//! or the file is absent, defaults apply. Unknown keys are tolerated so the
//! format can grow without breaking older files.

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Deserialize, Clone)]
pub struct LogSection {
    /// Tracing `EnvFilter` directive, e.g. `"info"` or `"dispatch=trace"`.
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

fn default_filter() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ViewportSection {
    /// Terminal rows reserved below the text area for the status line.
    #[serde(default = "default_reserved_rows")]
    pub reserved_rows: u16,
}

impl Default for ViewportSection {
    fn default() -> Self {
        Self {
            reserved_rows: default_reserved_rows(),
        }
    }
}

fn default_reserved_rows() -> u16 {
    1
}

/// On-disk shape of `ferrite.toml`.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct Config {
    #[serde(default)]
    pub log: LogSection,
    #[serde(default)]
    pub viewport: ViewportSection,
}

/// Load configuration from an optional explicit path. `None` and a missing
/// file both yield defaults; a present but unparsable file is an error.
pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    if !path.exists() {
        info!(target: "config", path = %path.display(), "config file absent, using defaults");
        return Ok(Config::default());
    }
    let raw = fs::read_to_string(&path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: Config =
        toml::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))?;
    info!(target: "config", path = %path.display(), filter = config.log.filter.as_str(), "config loaded");
    Ok(config)
}
