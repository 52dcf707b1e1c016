//! Status classification for buoys.
//!
//! Maps a device's discrete status to its display configuration and
//! continuous metrics (battery, signal) to three-level display tiers.

use serde::{Deserialize, Serialize};

/// Discrete operating state reported by a buoy.
///
/// Variants are ordered by severity so that sorting puts healthy
/// devices first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    Online,
    Warning,
    Offline,
}

impl DeviceStatus {
    /// All statuses, in severity order.
    pub const ALL: [DeviceStatus; 3] =
        [DeviceStatus::Online, DeviceStatus::Warning, DeviceStatus::Offline];

    /// Returns the fixed display configuration for this status.
    pub fn display(self) -> StatusDisplay {
        match self {
            DeviceStatus::Online => StatusDisplay {
                indicator: Tier::Green,
                label: "Online",
                badge: BadgeVariant::Default,
            },
            DeviceStatus::Warning => StatusDisplay {
                indicator: Tier::Yellow,
                label: "Warning",
                badge: BadgeVariant::Secondary,
            },
            DeviceStatus::Offline => StatusDisplay {
                indicator: Tier::Red,
                label: "Offline",
                badge: BadgeVariant::Destructive,
            },
        }
    }

    /// Returns a short symbol for table display.
    pub fn symbol(self) -> &'static str {
        match self {
            DeviceStatus::Online => "ON",
            DeviceStatus::Warning => "WARN",
            DeviceStatus::Offline => "OFF",
        }
    }
}

/// A three-level display bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Green,
    Yellow,
    Red,
}

/// Badge emphasis used next to a status label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeVariant {
    Default,
    Secondary,
    Destructive,
}

/// Indicator color, label and badge for a [`DeviceStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusDisplay {
    pub indicator: Tier,
    pub label: &'static str,
    pub badge: BadgeVariant,
}

/// Two cut-offs splitting a percentage into three tiers.
///
/// Comparisons are strictly greater: a value equal to `high` is yellow,
/// a value equal to `low` is red.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricThresholds {
    pub high: f64,
    pub low: f64,
}

impl MetricThresholds {
    pub const fn new(high: f64, low: f64) -> Self {
        Self { high, low }
    }

    /// Classify a metric value.
    pub fn tier(&self, value: f64) -> Tier {
        if value > self.high {
            Tier::Green
        } else if value > self.low {
            Tier::Yellow
        } else {
            Tier::Red
        }
    }
}

/// Battery cut-offs.
pub const BATTERY_THRESHOLDS: MetricThresholds = MetricThresholds::new(60.0, 30.0);

/// Which set of signal cut-offs to apply.
///
/// The status card uses 60/30; the stricter 70/40 variant is kept for
/// deployments that want earlier warnings on weak links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SignalPolicy {
    #[default]
    Standard,
    Strict,
}

impl SignalPolicy {
    pub fn thresholds(self) -> MetricThresholds {
        match self {
            SignalPolicy::Standard => MetricThresholds::new(60.0, 30.0),
            SignalPolicy::Strict => MetricThresholds::new(70.0, 40.0),
        }
    }
}

/// Thresholds used to compute display tiers for every buoy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub battery: MetricThresholds,
    pub signal: MetricThresholds,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            battery: BATTERY_THRESHOLDS,
            signal: SignalPolicy::default().thresholds(),
        }
    }
}

impl Thresholds {
    pub fn with_signal_policy(policy: SignalPolicy) -> Self {
        Self {
            signal: policy.thresholds(),
            ..Self::default()
        }
    }

    pub fn battery_tier(&self, battery: f64) -> Tier {
        self.battery.tier(battery)
    }

    pub fn signal_tier(&self, signal: f64) -> Tier {
        self.signal.tier(signal)
    }
}

/// Progress-bar fill for a percentage, clamped to `0.0..=1.0`.
pub fn fill_ratio(percent: f64) -> f64 {
    if percent.is_nan() {
        return 0.0;
    }
    (percent / 100.0).clamp(0.0, 1.0)
}

/// Qualitative state of an individual sensor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorCondition {
    Normal,
    Good,
    Elevated,
    #[serde(untagged)]
    Other(String),
}

impl SensorCondition {
    pub fn tier(&self) -> Tier {
        match self {
            SensorCondition::Normal | SensorCondition::Good => Tier::Green,
            SensorCondition::Elevated => Tier::Yellow,
            SensorCondition::Other(_) => Tier::Red,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            SensorCondition::Normal => "normal",
            SensorCondition::Good => "good",
            SensorCondition::Elevated => "elevated",
            SensorCondition::Other(s) => s,
        }
    }
}
