//! In-memory data source.

use super::{DataSource, FleetSnapshot};
use crate::data::mock;

/// A source holding one fixed snapshot.
///
/// The snapshot is returned on the first poll; later polls return `None`
/// since the data never changes.
#[derive(Debug)]
pub struct StaticSource {
    snapshot: Option<FleetSnapshot>,
    description: String,
}

impl StaticSource {
    pub fn new(snapshot: FleetSnapshot, description: &str) -> Self {
        Self {
            snapshot: Some(snapshot),
            description: description.to_string(),
        }
    }

    /// The built-in demonstration fleet.
    pub fn mock() -> Self {
        Self::new(mock::fleet_snapshot(), "built-in mock fleet")
    }
}

impl DataSource for StaticSource {
    fn poll(&mut self) -> Option<FleetSnapshot> {
        self.snapshot.take()
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        None
    }
}
