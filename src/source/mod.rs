//! Data source abstraction for receiving fleet snapshots.
//!
//! The dashboard never fetches anything itself. A source hands it a
//! complete [`FleetSnapshot`] whenever there is something new to show:
//! the built-in mock fleet, a JSON fixture file, or a channel fed by an
//! embedding program.

mod channel;
mod file;
mod fixed;

pub use channel::ChannelSource;
pub use file::FileSource;
pub use fixed::StaticSource;

pub use crate::data::FleetSnapshot;

use std::fmt::Debug;

/// Trait for receiving fleet snapshots from various sources.
///
/// # Example
///
/// ```
/// use oceanwatch::{DataSource, StaticSource};
///
/// let mut source = StaticSource::mock();
/// if let Some(snapshot) = source.poll() {
///     println!("Got {} buoys", snapshot.buoys.len());
/// }
/// ```
pub trait DataSource: Send + Debug {
    /// Poll for the latest snapshot.
    ///
    /// Returns `Some(snapshot)` if new data is available, `None` otherwise.
    /// This method should be non-blocking.
    fn poll(&mut self) -> Option<FleetSnapshot>;

    /// Returns a human-readable description of the source.
    fn description(&self) -> &str;

    /// Returns the error message from the last poll, if any.
    fn error(&self) -> Option<&str>;
}
