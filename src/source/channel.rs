//! Channel-based data source.
//!
//! Receives fleet snapshots via a tokio watch channel, for programs that
//! embed the dashboard and push snapshots themselves.

use tokio::sync::watch;

use super::{DataSource, FleetSnapshot};

/// A data source that receives fleet snapshots via a channel.
///
/// # Example
///
/// ```
/// use oceanwatch::{ChannelSource, DataSource};
///
/// let (tx, mut source) = ChannelSource::create("simulator");
/// assert!(source.poll().is_some());
/// tx.send(oceanwatch::data::mock::fleet_snapshot()).unwrap();
/// assert_eq!(source.poll().unwrap().buoys.len(), 5);
/// ```
#[derive(Debug)]
pub struct ChannelSource {
    receiver: watch::Receiver<FleetSnapshot>,
    description: String,
    initial_returned: bool,
}

impl ChannelSource {
    /// Create a source from the receiving end of a watch channel.
    pub fn new(receiver: watch::Receiver<FleetSnapshot>, source_description: &str) -> Self {
        Self {
            receiver,
            description: format!("channel: {}", source_description),
            initial_returned: false,
        }
    }

    /// Create a channel pair; the sender pushes snapshots to the source.
    pub fn create(source_description: &str) -> (watch::Sender<FleetSnapshot>, Self) {
        let (tx, rx) = watch::channel(FleetSnapshot::default());
        (tx, Self::new(rx, source_description))
    }
}

impl DataSource for ChannelSource {
    fn poll(&mut self) -> Option<FleetSnapshot> {
        if !self.initial_returned {
            self.initial_returned = true;
            self.receiver.mark_changed();
        }

        if self.receiver.has_changed().unwrap_or(false) {
            Some(self.receiver.borrow_and_update().clone())
        } else {
            None
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::mock;

    #[test]
    fn test_channel_source_poll() {
        let (tx, mut source) = ChannelSource::create("test");
        assert_eq!(source.description(), "channel: test");

        // Initial value is the empty snapshot
        let snapshot = source.poll().unwrap();
        assert!(snapshot.buoys.is_empty());
        assert!(source.poll().is_none());

        tx.send(mock::fleet_snapshot()).unwrap();
        let snapshot = source.poll().unwrap();
        assert_eq!(snapshot.buoys.len(), 5);
        assert!(source.poll().is_none());
    }
}
