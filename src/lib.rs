//! # oceanwatch
//!
//! A terminal dashboard and library for monitoring a fleet of marine sensor
//! buoys.
//!
//! Snapshots of the fleet (buoys, time series, overview cards and alerts)
//! come from a [`DataSource`]. Each snapshot is turned into display-ready
//! [`FleetData`]: status badges and colors, battery and signal tiers, and
//! first-to-last trends for every series.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐ │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│ │
//! │  │ (state) │    │(derivation)   │(rendering)   │         │ │
//! │  └────┬────┘    └──────────┘    └─────────┘    └─────────┘ │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  ┌─────────┐                                                │
//! │  │ source  │◀── StaticSource | FileSource | ChannelSource   │
//! │  │ (input) │                                                │
//! │  └─────────┘                                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state, view navigation and buoy inspection
//! - **[`source`]**: The [`DataSource`] trait with a built-in mock fleet,
//!   JSON file polling and channel-based input
//! - **[`data`]**: Status classification, trend derivation, map placement
//!   and battery history
//! - **[`settings`]**: Layered configuration (TOML file and `OCEANWATCH_*`
//!   environment variables)
//! - **[`export`]**: JSON export of the derived fleet state
//! - **[`ui`]**: Overview, Buoys and Map views plus the inspect overlay
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Built-in demonstration fleet
//! oceanwatch
//!
//! # Watch a snapshot file, stricter signal tiers
//! oceanwatch --file fleet.json --signal-policy strict
//!
//! # Export the derived state and exit
//! oceanwatch --file fleet.json --export fleet_export.json
//! ```
//!
//! ### As a library
//!
//! ```
//! use oceanwatch::{App, StaticSource, Thresholds};
//!
//! let source = Box::new(StaticSource::mock());
//! let mut app = App::new(source, Thresholds::default());
//! app.reload_data().unwrap();
//! assert_eq!(app.data.as_ref().map(|d| d.devices.len()), Some(5));
//! ```
//!
//! ### Feeding snapshots from another task
//!
//! ```
//! use oceanwatch::{data::mock, App, ChannelSource, Thresholds};
//!
//! let (tx, source) = ChannelSource::create("telemetry gateway");
//! let mut app = App::new(Box::new(source), Thresholds::default());
//!
//! tx.send(mock::fleet_snapshot()).unwrap();
//! assert!(app.reload_data().unwrap());
//! ```

pub mod app;
pub mod data;
pub mod events;
pub mod export;
pub mod settings;
pub mod source;
pub mod ui;

pub use app::App;
pub use data::{
    derive_trend, marker_position, DeviceRecord, DeviceStatus, DeviceView, FleetData,
    FleetSnapshot, SignalPolicy, Thresholds, Tier, Trend, TrendDirection,
};
pub use settings::{Overrides, Settings, SettingsError};
pub use source::{ChannelSource, DataSource, FileSource, StaticSource};
