//! Historical tracking of battery and signal readings across reloads.

use std::collections::{HashMap, HashSet, VecDeque};

use super::fleet::FleetData;
use super::trend::{derive_from_values, Trend};

/// Maximum number of readings kept per device.
const MAX_HISTORY_SIZE: usize = 60;

/// Battery and signal readings recorded each time new fleet data arrives.
#[derive(Debug, Clone, Default)]
pub struct History {
    /// Battery readings per device id, oldest first.
    pub battery: HashMap<String, VecDeque<f64>>,
    /// Signal readings per device id, oldest first.
    pub signal: HashMap<String, VecDeque<f64>>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the current battery and signal of every device.
    ///
    /// Devices missing from `data` lose their history.
    pub fn record(&mut self, data: &FleetData) {
        let present: HashSet<&str> = data.devices.iter().map(|d| d.record.id.as_str()).collect();
        self.battery.retain(|id, _| present.contains(id.as_str()));
        self.signal.retain(|id, _| present.contains(id.as_str()));

        for device in &data.devices {
            push_capped(
                self.battery.entry(device.record.id.clone()).or_default(),
                device.record.battery,
            );
            push_capped(
                self.signal.entry(device.record.id.clone()).or_default(),
                device.record.signal,
            );
        }
    }

    /// Number of battery readings recorded for a device.
    pub fn len(&self, device_id: &str) -> usize {
        self.battery.get(device_id).map_or(0, VecDeque::len)
    }

    /// Sparkline levels (0-7) for battery readings.
    ///
    /// Returns an empty Vec until at least two readings exist.
    pub fn battery_sparkline(&self, device_id: &str) -> Vec<u8> {
        normalize_sparkline(self.battery.get(device_id))
    }

    /// Trend between the oldest and newest recorded battery reading.
    pub fn battery_trend(&self, device_id: &str) -> Trend {
        self.battery.get(device_id).map_or(Trend::STABLE, series_trend)
    }

    /// Trend between the oldest and newest recorded signal reading.
    pub fn signal_trend(&self, device_id: &str) -> Trend {
        self.signal.get(device_id).map_or(Trend::STABLE, series_trend)
    }
}

fn series_trend(values: &VecDeque<f64>) -> Trend {
    let values: Vec<f64> = values.iter().copied().collect();
    derive_from_values(&values)
}

fn push_capped(values: &mut VecDeque<f64>, value: f64) {
    values.push_back(value);
    if values.len() > MAX_HISTORY_SIZE {
        values.pop_front();
    }
}

/// Scale values to 0-7 for sparkline display.
fn normalize_sparkline(data: Option<&VecDeque<f64>>) -> Vec<u8> {
    let Some(values) = data else {
        return Vec::new();
    };

    if values.len() < 2 {
        return Vec::new();
    }

    let max = values.iter().copied().fold(f64::MIN, f64::max);
    let min = values.iter().copied().fold(f64::MAX, f64::min);
    let range = (max - min).max(1.0);

    values
        .iter()
        .map(|&v| {
            let normalized = ((v - min) / range * 7.0) as u8;
            normalized.min(7)
        })
        .collect()
}
