//! Trend derivation over ordered samples.
//!
//! A trend compares only the first and the last sample of a series; the
//! values in between are ignored.

use serde::{Deserialize, Serialize};

use super::status::Tier;

/// One time-stamped point of a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Display label for the x axis (e.g. "04:00").
    pub time: String,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Sample {
    pub fn new(time: impl Into<String>, value: f64) -> Self {
        Self {
            time: time.into(),
            value,
            label: None,
        }
    }
}

/// Direction of change between the first and last sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Stable,
}

impl TrendDirection {
    pub fn arrow(self) -> &'static str {
        match self {
            TrendDirection::Up => "↗",
            TrendDirection::Down => "↘",
            TrendDirection::Stable => "→",
        }
    }

    /// Display tier: rising is green, falling is red, flat is yellow.
    pub fn tier(self) -> Tier {
        match self {
            TrendDirection::Up => Tier::Green,
            TrendDirection::Down => Tier::Red,
            TrendDirection::Stable => Tier::Yellow,
        }
    }
}

/// Direction plus unsigned percentage change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Trend {
    pub direction: TrendDirection,
    /// Absolute percent change, rounded to one decimal.
    pub percent: f64,
}

impl Trend {
    pub const STABLE: Trend = Trend {
        direction: TrendDirection::Stable,
        percent: 0.0,
    };

    /// Arrow followed by the magnitude, e.g. `↗ 1.8%`.
    pub fn label(&self) -> String {
        format!("{} {:.1}%", self.direction.arrow(), self.percent)
    }
}

/// Derive the trend of a series from its endpoints.
///
/// An empty series is stable at 0%. When the first value is zero the
/// percentage is reported as 0 while the direction still follows the
/// endpoints.
pub fn derive_trend(samples: &[Sample]) -> Trend {
    let first = samples.first().map_or(0.0, |s| s.value);
    let last = samples.last().map_or(0.0, |s| s.value);
    from_endpoints(first, last)
}

/// Same as [`derive_trend`] for a bare sequence of values.
pub fn derive_from_values(values: &[f64]) -> Trend {
    let first = values.first().copied().unwrap_or(0.0);
    let last = values.last().copied().unwrap_or(0.0);
    from_endpoints(first, last)
}

fn from_endpoints(first: f64, last: f64) -> Trend {
    let direction = if last > first {
        TrendDirection::Up
    } else if last < first {
        TrendDirection::Down
    } else {
        TrendDirection::Stable
    };

    let change = if first != 0.0 {
        (last - first) / first * 100.0
    } else {
        0.0
    };

    let percent = round_one_decimal(change.abs());
    let percent = if percent.is_finite() { percent } else { 0.0 };

    Trend { direction, percent }
}

fn round_one_decimal(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(values: &[f64]) -> Vec<Sample> {
        values.iter().enumerate().map(|(i, v)| Sample::new(format!("{:02}:00", i * 4), *v)).collect()
    }

    #[test]
    fn test_empty_series_is_stable() {
        assert_eq!(derive_trend(&[]), Trend::STABLE);
    }

    #[test]
    fn test_rising_series() {
        let trend = derive_trend(&series(&[10.0, 15.0]));
        assert_eq!(trend.direction, TrendDirection::Up);
        assert_eq!(trend.percent, 50.0);
    }

    #[test]
    fn test_falling_series_reports_magnitude() {
        let trend = derive_trend(&series(&[10.0, 5.0]));
        assert_eq!(trend.direction, TrendDirection::Down);
        assert_eq!(trend.percent, 50.0);
    }

    #[test]
    fn test_zero_start_has_no_percentage() {
        let trend = derive_trend(&series(&[0.0, 5.0]));
        assert_eq!(trend.direction, TrendDirection::Up);
        assert_eq!(trend.percent, 0.0);
    }

    #[test]
    fn test_only_endpoints_matter() {
        let trend = derive_trend(&series(&[20.0, 90.0, 1.0, 20.0]));
        assert_eq!(trend, Trend::STABLE);
    }

    #[test]
    fn test_single_sample_is_stable() {
        assert_eq!(derive_trend(&series(&[7.5])), Trend::STABLE);
    }

    #[test]
    fn test_rounds_to_one_decimal() {
        // 22.1 -> 22.5 is +1.8099..%
        let trend = derive_trend(&series(&[22.1, 21.8, 22.9, 24.2, 23.8, 22.5]));
        assert_eq!(trend.direction, TrendDirection::Up);
        assert_eq!(trend.percent, 1.8);
        assert_eq!(trend.label(), "↗ 1.8%");
    }

    #[test]
    fn test_negative_start_value() {
        // (-5 - -10) / -10 = -50%, but the value went up
        let trend = derive_from_values(&[-10.0, -5.0]);
        assert_eq!(trend.direction, TrendDirection::Up);
        assert_eq!(trend.percent, 50.0);
    }

    #[test]
    fn test_non_finite_collapses_to_zero() {
        let trend = derive_from_values(&[1e-320, 1e300]);
        assert_eq!(trend.direction, TrendDirection::Up);
        assert_eq!(trend.percent, 0.0);
    }

    #[test]
    fn test_direction_tiers() {
        assert_eq!(TrendDirection::Up.tier(), Tier::Green);
        assert_eq!(TrendDirection::Down.tier(), Tier::Red);
        assert_eq!(TrendDirection::Stable.tier(), Tier::Yellow);
        assert_eq!(TrendDirection::Stable.arrow(), "→");
    }
}
