use super::LocationStream;
use crate::error::CoreError;
use crate::model::GeoPoint;
use std::sync::Mutex;
use tokio::sync::mpsc;

/// Requested update cadence. Providers may deliver more or less often.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationHint {
    pub min_distance_meters: f64,
    pub min_interval_ms: u64,
}

impl Default for LocationHint {
    fn default() -> Self {
        Self {
            min_distance_meters: 1.0,
            min_interval_ms: 1000,
        }
    }
}

/// Receiving end of a location subscription. Dropping it unsubscribes.
#[derive(Debug)]
pub struct LocationSubscription {
    rx: mpsc::Receiver<GeoPoint>,
}

impl LocationSubscription {
    #[must_use]
    pub fn new(rx: mpsc::Receiver<GeoPoint>) -> Self {
        Self { rx }
    }

    /// Next fix, or `None` once the provider has stopped.
    pub async fn next(&mut self) -> Option<GeoPoint> {
        self.rx.recv().await
    }
}

/// Location source fed by hand: tests, replayed tracks, or a host platform
/// bridging its own GPS callbacks.
pub struct ChannelLocationSource {
    capacity: usize,
    subscribers: Mutex<Vec<mpsc::Sender<GeoPoint>>>,
}

impl ChannelLocationSource {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Deliver a fix to every live subscriber, returning how many received
    /// it. Closed subscriptions are pruned; full ones skip this fix.
    pub fn push(&self, point: GeoPoint) -> usize {
        let Ok(mut subs) = self.subscribers.lock() else {
            return 0;
        };
        subs.retain(|tx| !tx.is_closed());
        subs.iter().filter(|tx| tx.try_send(point).is_ok()).count()
    }

    /// Drop every sender so subscribers see the end of the stream.
    pub fn close(&self) {
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.clear();
        }
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .map(|mut subs| {
                subs.retain(|tx| !tx.is_closed());
                subs.len()
            })
            .unwrap_or(0)
    }
}

impl LocationStream for ChannelLocationSource {
    fn subscribe(&self, hint: LocationHint) -> Result<LocationSubscription, CoreError> {
        let (tx, rx) = mpsc::channel(self.capacity);
        self.subscribers
            .lock()
            .map_err(|_| CoreError::ExternalService("location source lock poisoned".into()))?
            .push(tx);
        tracing::debug!(
            min_distance_meters = hint.min_distance_meters,
            min_interval_ms = hint.min_interval_ms,
            "location subscription opened"
        );
        Ok(LocationSubscription::new(rx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_push_reaches_subscriber_until_dropped() {
        let source = ChannelLocationSource::new(4);
        let mut sub = source.subscribe(LocationHint::default()).unwrap();
        assert_eq!(source.push(GeoPoint::new(1.0, 2.0)), 1);
        assert_eq!(sub.next().await, Some(GeoPoint::new(1.0, 2.0)));

        drop(sub);
        assert_eq!(source.push(GeoPoint::new(1.0, 2.0)), 0);
        assert_eq!(source.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_close_ends_stream() {
        let source = ChannelLocationSource::new(4);
        let mut sub = source.subscribe(LocationHint::default()).unwrap();
        source.close();
        assert_eq!(sub.next().await, None);
    }
}
