//! Channel-based data source.
//!
//! Receives datasets via a tokio watch channel. This is how the background
//! loader hands its generated points to the TUI.

use groundwater_types::Dataset;
use tokio::sync::watch;

use super::DataSource;

/// A data source that receives datasets via a channel.
///
/// Unlike the other sources, nothing is available until the producer sends
/// its first dataset; the TUI shows its loading state until then.
///
/// # Example
///
/// ```
/// use groundwater_globe::{ChannelSource, DataSource};
///
/// let (tx, mut source) = ChannelSource::create("loader");
/// assert!(source.poll().is_none());
/// ```
#[derive(Debug)]
pub struct ChannelSource {
    receiver: watch::Receiver<Dataset>,
    description: String,
    received_any: bool,
}

impl ChannelSource {
    /// Create a new channel source.
    ///
    /// # Arguments
    ///
    /// * `receiver` - The receiving end of a watch channel
    /// * `source_description` - A description of where datasets come from
    pub fn new(receiver: watch::Receiver<Dataset>, source_description: &str) -> Self {
        let description = format!("channel: {}", source_description);
        Self {
            receiver,
            description,
            received_any: false,
        }
    }

    /// Create a channel pair for sending datasets to a ChannelSource.
    ///
    /// Returns (sender, source). The initial empty dataset held by the channel
    /// is never delivered.
    pub fn create(source_description: &str) -> (watch::Sender<Dataset>, Self) {
        let (tx, rx) = watch::channel(Dataset::default());
        let source = Self::new(rx, source_description);
        (tx, source)
    }
}

impl DataSource for ChannelSource {
    fn poll(&mut self) -> Option<Dataset> {
        // Ref::has_changed still sees a value sent just before the sender closed
        let latest = self.receiver.borrow_and_update();
        if latest.has_changed() {
            self.received_any = true;
            Some(latest.clone())
        } else {
            None
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        // A closed channel only matters if nothing ever arrived
        if !self.received_any && self.receiver.has_changed().is_err() {
            Some("Data loader stopped before delivering any points")
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use groundwater_types::MonitoringPoint;

    #[test]
    fn test_channel_source_poll() {
        let (tx, mut source) = ChannelSource::create("test");

        // Nothing until the producer sends
        assert!(source.poll().is_none());
        assert!(source.error().is_none());

        let dataset = Dataset::new(vec![MonitoringPoint::builder("gw-0000").build()]);
        tx.send(dataset).unwrap();

        let received = source.poll().expect("sent dataset is delivered");
        assert_eq!(received.len(), 1);

        // No change, so poll returns None
        assert!(source.poll().is_none());
    }

    #[test]
    fn test_closed_channel_reports_error() {
        let (tx, source) = ChannelSource::create("test");
        drop(tx);
        assert!(source.error().is_some());
    }

    #[test]
    fn test_closed_after_delivery_is_not_an_error() {
        let (tx, mut source) = ChannelSource::create("test");
        tx.send(Dataset::default()).unwrap();
        drop(tx);
        assert!(source.poll().is_some());
        assert!(source.error().is_none());
    }
}
