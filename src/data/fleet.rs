//! Fleet snapshot parsing and display derivation.
//!
//! A [`FleetSnapshot`] is the raw input (built-in mock data or a JSON
//! fixture). [`FleetData`] is the same content with every status tier and
//! chart trend computed from the active [`Thresholds`].

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::status::{DeviceStatus, SensorCondition, StatusDisplay, Thresholds, Tier};
use super::trend::{derive_trend, Sample, Trend, TrendDirection};

/// Geographic position, shown as text only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

/// Environmental readings carried by a buoy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReadings {
    /// Water temperature in °C.
    pub temperature: f64,
    /// Relative humidity in %.
    pub humidity: f64,
    /// Wave height in metres.
    pub wave_height: f64,
    /// Wind speed in km/h.
    pub wind_speed: f64,
    /// Angular rate in °/s, when the buoy carries a gyroscope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gyroscope: Option<f64>,
}

/// Deployment bookkeeping shown in the inspect panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deployment {
    pub depth: String,
    pub deployed: String,
    pub last_maintenance: String,
}

/// A single buoy as it appears in a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceRecord {
    pub id: String,
    pub name: String,
    pub location: Location,
    pub status: DeviceStatus,
    /// Battery charge in percent.
    pub battery: f64,
    /// Link quality in percent.
    pub signal: f64,
    /// Human readable age of the last report (e.g. "2 min ago").
    pub last_update: String,
    pub sensors: SensorReadings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment: Option<Deployment>,
    /// Per-sensor condition keyed by sensor name ("temperature", "battery", ...).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub conditions: BTreeMap<String, SensorCondition>,
}

/// How a series should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Line,
    Area,
}

/// A titled, ordered series of samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    pub title: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub kind: ChartKind,
    #[serde(default)]
    pub samples: Vec<Sample>,
}

/// An overview tile summarizing one fleet-wide metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorCard {
    pub title: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub status: DeviceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<TrendDirection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
}

impl SensorCard {
    /// The trend badge is only shown when both direction and text are present.
    pub fn trend_badge(&self) -> Option<(TrendDirection, &str)> {
        match (self.trend, self.trend_value.as_deref()) {
            (Some(direction), Some(text)) => Some((direction, text)),
            _ => None,
        }
    }

    /// Online cards carry a progress indicator.
    pub fn shows_progress(&self) -> bool {
        self.status == DeviceStatus::Online
    }
}

/// A static banner shown above the overview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

/// Complete raw input for one render of the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FleetSnapshot {
    #[serde(default)]
    pub buoys: Vec<DeviceRecord>,
    #[serde(default)]
    pub series: Vec<TimeSeries>,
    #[serde(default)]
    pub readings: Vec<SensorCard>,
    #[serde(default)]
    pub alerts: Vec<Alert>,
}

/// Why a snapshot file could not be loaded.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Read error: {0}")]
    Read(#[from] std::io::Error),

    /// Invalid JSON or an unexpected field value. The message carries the
    /// line and column.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl SnapshotError {
    /// The file could not be found or opened.
    pub fn is_read(&self) -> bool {
        matches!(self, SnapshotError::Read(_))
    }
}

impl FleetSnapshot {
    /// Read and deserialize a JSON snapshot file.
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// A buoy with its derived display tiers.
#[derive(Debug, Clone)]
pub struct DeviceView {
    pub record: DeviceRecord,
    pub display: StatusDisplay,
    pub battery_tier: Tier,
    pub signal_tier: Tier,
}

impl DeviceView {
    pub fn new(record: DeviceRecord, thresholds: &Thresholds) -> Self {
        Self {
            display: record.status.display(),
            battery_tier: thresholds.battery_tier(record.battery),
            signal_tier: thresholds.signal_tier(record.signal),
            record,
        }
    }

    pub fn id(&self) -> &str {
        &self.record.id
    }

    pub fn name(&self) -> &str {
        &self.record.name
    }

    pub fn status(&self) -> DeviceStatus {
        self.record.status
    }
}

/// A series with its derived trend.
#[derive(Debug, Clone)]
pub struct ChartView {
    pub series: TimeSeries,
    pub trend: Trend,
}

/// Fleet data ready for display.
#[derive(Debug, Clone)]
pub struct FleetData {
    /// Devices in snapshot order. Map placement depends on this order.
    pub devices: Vec<DeviceView>,
    pub charts: Vec<ChartView>,
    pub cards: Vec<SensorCard>,
    pub alerts: Vec<Alert>,
    pub last_updated: Instant,
}

impl FleetData {
    /// Load and classify a JSON fixture file.
    pub fn load(path: &Path, thresholds: &Thresholds) -> Result<Self> {
        let snapshot = FleetSnapshot::load(path)?;
        Ok(Self::from_snapshot(snapshot, thresholds))
    }

    /// Parse and classify a JSON snapshot.
    pub fn parse(content: &str, thresholds: &Thresholds) -> Result<Self> {
        let snapshot: FleetSnapshot = serde_json::from_str(content)?;
        Ok(Self::from_snapshot(snapshot, thresholds))
    }

    /// Derive every tier and trend from a snapshot.
    pub fn from_snapshot(snapshot: FleetSnapshot, thresholds: &Thresholds) -> Self {
        let devices = snapshot.buoys.into_iter().map(|r| DeviceView::new(r, thresholds)).collect();

        let charts = snapshot
            .series
            .into_iter()
            .map(|series| ChartView {
                trend: derive_trend(&series.samples),
                series,
            })
            .collect();

        Self {
            devices,
            charts,
            cards: snapshot.readings,
            alerts: snapshot.alerts,
            last_updated: Instant::now(),
        }
    }

    pub fn device(&self, id: &str) -> Option<&DeviceView> {
        self.devices.iter().find(|d| d.id() == id)
    }

    /// Counts of online, warning and offline devices.
    pub fn status_counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for device in &self.devices {
            match device.status() {
                DeviceStatus::Online => counts.online += 1,
                DeviceStatus::Warning => counts.warning += 1,
                DeviceStatus::Offline => counts.offline += 1,
            }
        }
        counts
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub online: usize,
    pub warning: usize,
    pub offline: usize,
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::data::status::{BadgeVariant, SignalPolicy};

    const SNAPSHOT: &str = r#"{
        "buoys": [
            {
                "id": "BOY-002",
                "name": "Pacific Guardian",
                "location": { "lat": 34.0522, "lng": -118.2437 },
                "status": "warning",
                "battery": 45,
                "signal": 65,
                "last_update": "5 min ago",
                "sensors": { "temperature": 21.8, "humidity": 72, "wave_height": 2.1, "wind_speed": 16.2 }
            },
            {
                "id": "BOY-003",
                "name": "Arctic Sentinel",
                "location": { "lat": 71.0588, "lng": -8.2275 },
                "status": "offline",
                "battery": 12,
                "signal": 0,
                "last_update": "2 hours ago",
                "sensors": { "temperature": 18.5, "humidity": 85, "wave_height": 0.8, "wind_speed": 8.5 },
                "conditions": { "battery": "low" }
            }
        ],
        "series": [
            { "title": "Wave Height", "unit": "m", "samples": [
                { "time": "00:00", "value": 1.2 },
                { "time": "20:00", "value": 1.6 }
            ] }
        ]
    }"#;

    #[test]
    fn test_parse_derives_tiers() {
        let data = FleetData::parse(SNAPSHOT, &Thresholds::default()).unwrap();
        assert_eq!(data.devices.len(), 2);

        let pacific = &data.devices[0];
        assert_eq!(pacific.id(), "BOY-002");
        assert_eq!(pacific.display.label, "Warning");
        assert_eq!(pacific.display.badge, BadgeVariant::Secondary);
        assert_eq!(pacific.battery_tier, Tier::Yellow);
        assert_eq!(pacific.signal_tier, Tier::Green);

        let arctic = data.device("BOY-003").unwrap();
        assert_eq!(arctic.battery_tier, Tier::Red);
        assert_eq!(arctic.signal_tier, Tier::Red);
        assert_eq!(
            arctic.record.conditions.get("battery"),
            Some(&SensorCondition::Other("low".to_string()))
        );
    }

    #[test]
    fn test_signal_policy_changes_tier() {
        let strict = Thresholds::with_signal_policy(SignalPolicy::Strict);
        let data = FleetData::parse(SNAPSHOT, &strict).unwrap();
        assert_eq!(data.devices[0].signal_tier, Tier::Yellow);
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let data = FleetData::parse(SNAPSHOT, &Thresholds::default()).unwrap();
        assert!(data.cards.is_empty());
        assert!(data.alerts.is_empty());

        let empty = FleetData::parse("{}", &Thresholds::default()).unwrap();
        assert!(empty.devices.is_empty());
        assert!(empty.charts.is_empty());
    }

    #[test]
    fn test_series_defaults_and_trend() {
        let data = FleetData::parse(SNAPSHOT, &Thresholds::default()).unwrap();
        let chart = &data.charts[0];
        assert_eq!(chart.series.kind, ChartKind::Line);
        assert_eq!(chart.trend.direction, TrendDirection::Up);
        assert_eq!(chart.trend.percent, 33.3);
    }

    #[test]
    fn test_status_counts() {
        let data = FleetData::parse(SNAPSHOT, &Thresholds::default()).unwrap();
        assert_eq!(
            data.status_counts(),
            StatusCounts {
                online: 0,
                warning: 1,
                offline: 1
            }
        );
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SNAPSHOT.as_bytes()).unwrap();

        let data = FleetData::load(file.path(), &Thresholds::default()).unwrap();
        assert_eq!(data.devices.len(), 2);
        assert_eq!(data.charts.len(), 1);
    }

    #[test]
    fn test_load_reports_read_and_parse_errors() {
        let err = FleetSnapshot::load(Path::new("/nonexistent/fleet.json")).unwrap_err();
        assert!(err.is_read());
        assert!(err.to_string().starts_with("Read error:"));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{\n  \"buoys\": [ oops ]\n}").unwrap();
        let err = FleetSnapshot::load(file.path()).unwrap_err();
        assert!(!err.is_read());
        let message = err.to_string();
        assert!(message.starts_with("Parse error:"), "{message}");
        assert!(message.contains("line 2"), "{message}");

        assert!(FleetData::load(file.path(), &Thresholds::default()).is_err());
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let json = r#"{ "buoys": [ {
            "id": "X", "name": "X", "location": { "lat": 0, "lng": 0 },
            "status": "sleeping", "battery": 1, "signal": 1, "last_update": "now",
            "sensors": { "temperature": 0, "humidity": 0, "wave_height": 0, "wind_speed": 0 }
        } ] }"#;
        assert!(FleetData::parse(json, &Thresholds::default()).is_err());
    }

    #[test]
    fn test_sensor_card_trend_badge_needs_both_fields() {
        let mut card = SensorCard {
            title: "Humidity".to_string(),
            value: "68".to_string(),
            unit: Some("%".to_string()),
            status: DeviceStatus::Online,
            trend: Some(TrendDirection::Stable),
            trend_value: None,
            device_id: None,
        };
        assert!(card.trend_badge().is_none());

        card.trend_value = Some("±2%".to_string());
        assert_eq!(card.trend_badge(), Some((TrendDirection::Stable, "±2%")));
        assert!(card.shows_progress());

        card.status = DeviceStatus::Warning;
        assert!(!card.shows_progress());
    }
}
