//! Data models and display derivation for fleet snapshots.
//!
//! ## Submodules
//!
//! - [`fleet`]: Snapshot types ([`FleetSnapshot`], [`DeviceRecord`]) and the
//!   processed [`FleetData`]
//! - [`status`]: Status lookup table and battery/signal tier thresholds
//! - [`trend`]: First-to-last trend derivation over ordered samples
//! - [`history`]: Battery/signal readings kept across reloads
//! - [`map`]: Placeholder marker placement for the network map
//! - [`mock`]: The built-in demonstration fleet
//!
//! ## Data Flow
//!
//! ```text
//! FleetSnapshot (mock or JSON)
//!        │
//!        ▼
//! FleetData::from_snapshot()
//!        │
//!        ├──▶ DeviceView (status display + tiers from Thresholds)
//!        ├──▶ ChartView (trend from first/last sample)
//!        │
//!        └──▶ History::record() (for sparklines)
//! ```

pub mod fleet;
pub mod history;
pub mod map;
pub mod mock;
pub mod status;
pub mod trend;

pub use fleet::{
    Alert, ChartKind, ChartView, Deployment, DeviceRecord, DeviceView, FleetData, FleetSnapshot,
    Location, SensorCard, SensorReadings, SnapshotError, StatusCounts, TimeSeries,
};
pub use history::History;
pub use map::{marker_position, MarkerPosition};
pub use status::{
    fill_ratio, BadgeVariant, DeviceStatus, MetricThresholds, SensorCondition, SignalPolicy,
    StatusDisplay, Thresholds, Tier,
};
pub use trend::{derive_trend, Sample, Trend, TrendDirection};
