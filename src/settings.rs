//! Layered runtime settings.
//!
//! Values are resolved in this order, later layers winning:
//!
//! 1. built-in defaults
//! 2. an optional TOML file (`--config`)
//! 3. `OCEANWATCH_*` environment variables (`__` separates nested keys,
//!    e.g. `OCEANWATCH_BATTERY__HIGH=70`)
//! 4. command line flags, applied by the binary
//!
//! ```toml
//! refresh_secs = 2
//! signal_policy = "strict"
//!
//! [battery]
//! high = 60
//! low = 30
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;

use crate::data::{MetricThresholds, SignalPolicy, Thresholds};

const ENV_PREFIX: &str = "OCEANWATCH";

/// Errors raised while loading or validating settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A source could not be read or deserialized.
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// Cut-offs are not ordered.
    #[error("invalid {metric} thresholds: high ({high}) must be greater than low ({low})")]
    InvalidThresholds {
        metric: &'static str,
        high: f64,
        low: f64,
    },

    #[error("refresh interval must be at least one second")]
    ZeroRefresh,
}

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    /// Seconds between polls of the data source.
    pub refresh_secs: u64,
    /// Named signal cut-offs, used unless `signal` is set.
    pub signal_policy: SignalPolicy,
    pub battery: MetricThresholds,
    /// Explicit signal cut-offs overriding `signal_policy`.
    #[serde(default)]
    pub signal: Option<MetricThresholds>,
    /// Fleet fixture to load instead of the built-in mock fleet.
    #[serde(default)]
    pub fleet_file: Option<PathBuf>,
    /// Where to write logs while the dashboard is running.
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            refresh_secs: 1,
            signal_policy: SignalPolicy::Standard,
            battery: crate::data::status::BATTERY_THRESHOLDS,
            signal: None,
            fleet_file: None,
            log_file: None,
        }
    }
}

impl Settings {
    /// Load settings from defaults, an optional file and the process
    /// environment.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        Self::load_with_env(path, None)
    }

    /// Like [`Settings::load`], reading environment variables from `env`
    /// instead of the process environment when given.
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, SettingsError> {
        let defaults = Settings::default();

        let mut builder = Config::builder()
            .set_default("refresh_secs", defaults.refresh_secs)?
            .set_default("signal_policy", "standard")?
            .set_default("battery.high", defaults.battery.high)?
            .set_default("battery.low", defaults.battery.low)?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        let environment = Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .source(env);

        let settings: Settings = builder.add_source(environment).build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check threshold ordering and the refresh interval.
    pub fn validate(&self) -> Result<(), SettingsError> {
        check_order("battery", &self.battery)?;
        check_order("signal", &self.signal_thresholds())?;
        if self.refresh_secs == 0 {
            return Err(SettingsError::ZeroRefresh);
        }
        Ok(())
    }

    pub fn signal_thresholds(&self) -> MetricThresholds {
        self.signal.unwrap_or_else(|| self.signal_policy.thresholds())
    }

    /// Thresholds used to classify buoys.
    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            battery: self.battery,
            signal: self.signal_thresholds(),
        }
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_secs)
    }

    /// Apply command line values on top of the loaded layers, then
    /// re-validate.
    ///
    /// A signal policy given here discards configured `[signal]` cut-offs.
    /// A single battery bound keeps the other configured bound.
    pub fn apply_overrides(&mut self, overrides: &Overrides) -> Result<(), SettingsError> {
        if let Some(ref file) = overrides.fleet_file {
            self.fleet_file = Some(file.clone());
        }
        if let Some(refresh) = overrides.refresh_secs {
            self.refresh_secs = refresh;
        }
        if let Some(policy) = overrides.signal_policy {
            self.signal_policy = policy;
            self.signal = None;
        }
        if let Some(high) = overrides.battery_high {
            self.battery = MetricThresholds::new(high, self.battery.low);
        }
        if let Some(low) = overrides.battery_low {
            self.battery = MetricThresholds::new(self.battery.high, low);
        }
        if let Some(ref log_file) = overrides.log_file {
            self.log_file = Some(log_file.clone());
        }
        self.validate()
    }
}

/// Command line values, the last settings layer. `None` leaves the loaded
/// value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub fleet_file: Option<PathBuf>,
    pub refresh_secs: Option<u64>,
    pub signal_policy: Option<SignalPolicy>,
    pub battery_high: Option<f64>,
    pub battery_low: Option<f64>,
    pub log_file: Option<PathBuf>,
}

fn check_order(metric: &'static str, t: &MetricThresholds) -> Result<(), SettingsError> {
    // Negated so NaN cut-offs are rejected too
    if !(t.high > t.low) {
        return Err(SettingsError::InvalidThresholds {
            metric,
            high: t.high,
            low: t.low,
        });
    }
    Ok(())
}
