use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

/// Every deliberate wait (backoff, simulated payment, banner) goes through this.
pub trait Latency: Send + Sync {
    async fn pause(&self, duration: Duration);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TokioLatency;

impl Latency for TokioLatency {
    async fn pause(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Returns immediately but remembers every requested pause.
#[derive(Debug, Clone, Default)]
pub struct RecordingLatency {
    pauses: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingLatency {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pauses(&self) -> Vec<Duration> {
        self.pauses.lock().clone()
    }

    pub fn total(&self) -> Duration {
        self.pauses.lock().iter().sum()
    }
}

impl Latency for RecordingLatency {
    async fn pause(&self, duration: Duration) {
        self.pauses.lock().push(duration);
    }
}

impl<L: Latency> Latency for Arc<L> {
    async fn pause(&self, duration: Duration) {
        self.as_ref().pause(duration).await;
    }
}
