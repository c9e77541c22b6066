//! Channel-based data source.
//!
//! Receives refresh outcomes via a tokio watch channel. Useful when the
//! snapshot is produced elsewhere in the process, and for driving the app
//! in tests.

use tokio::sync::watch;

use super::{RefreshOutcome, StatusSource};

/// A data source that receives refresh outcomes via a channel.
///
/// Refresh requests (the `r` retry key) are advisory: they are counted in
/// [`ChannelSource::refresh_requests`] and nothing more. The producer decides
/// when to publish, so it should watch that count if retries matter to it.
///
/// # Example
///
/// ```
/// use statusboard::ChannelSource;
///
/// // Create a channel pair
/// let (tx, source) = ChannelSource::create("embedded");
/// ```
#[derive(Debug)]
pub struct ChannelSource {
    receiver: watch::Receiver<Option<RefreshOutcome>>,
    description: String,
    refresh_requests: usize,
}

impl ChannelSource {
    /// Create a new channel source.
    pub fn new(receiver: watch::Receiver<Option<RefreshOutcome>>, source_description: &str) -> Self {
        let description = format!("channel: {}", source_description);
        Self {
            receiver,
            description,
            refresh_requests: 0,
        }
    }

    /// Create a channel pair for sending outcomes to a ChannelSource.
    ///
    /// Returns (sender, source). Send `Some(outcome)` to publish.
    pub fn create(source_description: &str) -> (watch::Sender<Option<RefreshOutcome>>, Self) {
        let (tx, rx) = watch::channel(None);
        let source = Self::new(rx, source_description);
        (tx, source)
    }

    /// How many times a refresh has been requested of this source.
    pub fn refresh_requests(&self) -> usize {
        self.refresh_requests
    }
}

impl StatusSource for ChannelSource {
    fn poll(&mut self) -> Option<RefreshOutcome> {
        // Check if there's a new value without blocking
        if self.receiver.has_changed().unwrap_or(false) {
            self.receiver.borrow_and_update().clone()
        } else {
            None
        }
    }

    fn request_refresh(&mut self) {
        // The producer decides when to publish; just record the request.
        self.refresh_requests += 1;
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StatusSnapshot;

    #[test]
    fn test_channel_source_poll() {
        let (tx, mut source) = ChannelSource::create("test");
        assert_eq!(source.description(), "channel: test");

        // Nothing published yet
        assert!(source.poll().is_none());

        tx.send(Some(RefreshOutcome::Failed("boom".to_string()))).unwrap();
        assert_eq!(
            source.poll(),
            Some(RefreshOutcome::Failed("boom".to_string()))
        );

        // No change, so poll returns None
        assert!(source.poll().is_none());

        tx.send(Some(RefreshOutcome::Ready(StatusSnapshot::new(vec![], vec![]))))
            .unwrap();
        assert!(matches!(source.poll(), Some(RefreshOutcome::Ready(_))));
    }

    #[test]
    fn test_channel_source_counts_refresh_requests() {
        let (_tx, mut source) = ChannelSource::create("test");
        source.request_refresh();
        source.request_refresh();
        assert_eq!(source.refresh_requests(), 2);

        // A request alone does not produce an outcome
        assert!(source.poll().is_none());
    }
}
