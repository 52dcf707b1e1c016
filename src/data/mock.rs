//! Built-in demonstration fleet.
//!
//! Used when no fixture file is given, so the dashboard always has
//! something to show.

use std::collections::BTreeMap;

use super::fleet::{
    Alert, ChartKind, Deployment, DeviceRecord, FleetSnapshot, Location, SensorCard,
    SensorReadings, TimeSeries,
};
use super::status::{DeviceStatus, SensorCondition};
use super::trend::{Sample, TrendDirection};

/// The complete demonstration snapshot.
pub fn fleet_snapshot() -> FleetSnapshot {
    FleetSnapshot {
        buoys: buoys(),
        series: vec![temperature_series(), wave_series()],
        readings: sensor_cards(),
        alerts: vec![Alert {
            title: "Weather Alert".to_string(),
            message: "High wave conditions detected in sectors 7-9. Monitor buoy stability."
                .to_string(),
        }],
    }
}

fn buoys() -> Vec<DeviceRecord> {
    vec![
        DeviceRecord {
            id: "BOY-001".to_string(),
            name: "Atlantic Pioneer".to_string(),
            location: Location { lat: 40.7128, lng: -74.0060 },
            status: DeviceStatus::Online,
            battery: 87.0,
            signal: 92.0,
            last_update: "2 min ago".to_string(),
            sensors: readings(23.1, 65.0, 1.9, 14.8, Some(2.1)),
            deployment: Some(Deployment {
                depth: "250m".to_string(),
                deployed: "2024-01-15".to_string(),
                last_maintenance: "2024-11-01".to_string(),
            }),
            conditions: conditions(&[
                ("temperature", SensorCondition::Normal),
                ("humidity", SensorCondition::Normal),
                ("wave_height", SensorCondition::Elevated),
                ("wind_speed", SensorCondition::Normal),
                ("gyroscope", SensorCondition::Normal),
                ("battery", SensorCondition::Good),
            ]),
        },
        DeviceRecord {
            id: "BOY-002".to_string(),
            name: "Pacific Guardian".to_string(),
            location: Location { lat: 34.0522, lng: -118.2437 },
            status: DeviceStatus::Warning,
            battery: 45.0,
            signal: 78.0,
            last_update: "5 min ago".to_string(),
            sensors: readings(21.8, 72.0, 2.1, 16.2, None),
            deployment: None,
            conditions: BTreeMap::new(),
        },
        DeviceRecord {
            id: "BOY-003".to_string(),
            name: "Arctic Sentinel".to_string(),
            location: Location { lat: 71.0588, lng: -8.2275 },
            status: DeviceStatus::Offline,
            battery: 12.0,
            signal: 0.0,
            last_update: "2 hours ago".to_string(),
            sensors: readings(18.5, 85.0, 0.8, 8.5, None),
            deployment: None,
            conditions: BTreeMap::new(),
        },
        DeviceRecord {
            id: "BOY-004".to_string(),
            name: "Gulf Monitor".to_string(),
            location: Location { lat: 29.7, lng: -95.3 },
            status: DeviceStatus::Online,
            battery: 74.0,
            signal: 66.0,
            last_update: "1 min ago".to_string(),
            sensors: readings(26.4, 78.0, 1.1, 12.3, None),
            deployment: None,
            conditions: BTreeMap::new(),
        },
        DeviceRecord {
            id: "BOY-005".to_string(),
            name: "Baltic Watcher".to_string(),
            location: Location { lat: 59.3, lng: 18.0 },
            status: DeviceStatus::Online,
            battery: 58.0,
            signal: 35.0,
            last_update: "3 min ago".to_string(),
            sensors: readings(9.7, 81.0, 0.9, 19.6, None),
            deployment: None,
            conditions: BTreeMap::new(),
        },
    ]
}

fn readings(
    temperature: f64,
    humidity: f64,
    wave_height: f64,
    wind_speed: f64,
    gyroscope: Option<f64>,
) -> SensorReadings {
    SensorReadings {
        temperature,
        humidity,
        wave_height,
        wind_speed,
        gyroscope,
    }
}

fn conditions(entries: &[(&str, SensorCondition)]) -> BTreeMap<String, SensorCondition> {
    entries.iter().map(|(k, c)| (k.to_string(), c.clone())).collect()
}

fn temperature_series() -> TimeSeries {
    TimeSeries {
        title: "Temperature Trends (24h)".to_string(),
        unit: "°C".to_string(),
        kind: ChartKind::Area,
        samples: samples(&[22.1, 21.8, 22.9, 24.2, 23.8, 22.5]),
    }
}

fn wave_series() -> TimeSeries {
    TimeSeries {
        title: "Wave Height Analysis".to_string(),
        unit: "m".to_string(),
        kind: ChartKind::Line,
        samples: samples(&[1.2, 1.5, 1.8, 2.1, 1.9, 1.6]),
    }
}

/// Four-hourly samples starting at midnight.
fn samples(values: &[f64]) -> Vec<Sample> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| Sample::new(format!("{:02}:00", i * 4), *v))
        .collect()
}

fn sensor_cards() -> Vec<SensorCard> {
    let card = |title: &str,
                value: &str,
                unit: &str,
                status: DeviceStatus,
                trend: TrendDirection,
                trend_value: &str| SensorCard {
        title: title.to_string(),
        value: value.to_string(),
        unit: Some(unit.to_string()),
        status,
        trend: Some(trend),
        trend_value: Some(trend_value.to_string()),
        device_id: None,
    };

    vec![
        card("Avg Temperature", "22.5", "°C", DeviceStatus::Online, TrendDirection::Up, "+0.3°"),
        card("Humidity", "68", "%", DeviceStatus::Online, TrendDirection::Stable, "±2%"),
        card("Wave Height", "1.8", "m", DeviceStatus::Warning, TrendDirection::Up, "+0.4m"),
        card("Wind Speed", "15.2", "km/h", DeviceStatus::Online, TrendDirection::Down, "-2.1"),
        card("System Health", "94", "%", DeviceStatus::Online, TrendDirection::Up, "+2%"),
        card("Avg Gyro", "2.1", "°/s", DeviceStatus::Online, TrendDirection::Stable, "±0.1"),
    ]
}
