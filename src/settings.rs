//! Runtime settings.
//!
//! Settings are layered: built-in defaults, then an optional config file
//! (any format the `config` crate understands, e.g. TOML), then environment
//! variables prefixed with `GROUNDWATER_`. Command-line flags are applied on
//! top by the binary.
//!
//! ```toml
//! point_count = 1000
//! seed = 42
//! load_delay_ms = 0
//! theme = "dark"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::data::scene::DEFAULT_ROTATION_SPEED;
use crate::data::DEFAULT_POINT_COUNT;

/// Environment variable prefix for settings.
pub const ENV_PREFIX: &str = "GROUNDWATER";

/// Color theme selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    /// Pick light or dark from the terminal background.
    #[default]
    Auto,
    Dark,
    Light,
}

/// Settings for a run of the application.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Number of points the generator produces.
    pub point_count: usize,
    /// Seed for reproducible generation.
    pub seed: Option<u64>,
    /// Simulated load time before generated data appears, in milliseconds.
    pub load_delay_ms: u64,
    /// Frame interval of the UI loop, in milliseconds.
    pub tick_rate_ms: u64,
    /// Automatic globe spin, in radians per second.
    pub rotation_speed: f64,
    /// Meters the range bounds move per keypress.
    pub range_step: f64,
    pub theme: ThemeChoice,
    /// Where the TUI writes its log.
    pub log_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            point_count: DEFAULT_POINT_COUNT,
            seed: None,
            load_delay_ms: 800,
            tick_rate_ms: 50,
            rotation_speed: DEFAULT_ROTATION_SPEED,
            range_step: 1.0,
            theme: ThemeChoice::Auto,
            log_file: PathBuf::from("groundwater-globe.log"),
        }
    }
}

impl Settings {
    /// Load settings from an optional file and the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        let settings: Settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the UI cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.tick_rate_ms == 0 {
            bail!("tick_rate_ms must be greater than zero");
        }
        if !(self.range_step.is_finite() && self.range_step > 0.0) {
            bail!("range_step must be a positive number, got {}", self.range_step);
        }
        if !self.rotation_speed.is_finite() {
            bail!("rotation_speed must be finite");
        }
        Ok(())
    }

    pub fn load_delay(&self) -> Duration {
        Duration::from_millis(self.load_delay_ms)
    }

    /// A zero delay generates points in-process, without a background loader.
    pub fn loads_immediately(&self) -> bool {
        self.load_delay_ms == 0
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }
}
