use std::time::Duration;
use tokio::time::{Instant, sleep};

/// Keeps a minimum gap between consecutive requests from one client
pub struct RateLimiter {
    delay: Duration,
    last_request: Option<Instant>,
}

impl RateLimiter {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            last_request: None,
        }
    }

    pub async fn wait(&mut self) {
        let remaining = self.remaining(Instant::now());
        if !remaining.is_zero() {
            sleep(remaining).await;
        }
        self.last_request = Some(Instant::now());
    }

    /// Time still to wait before the next request may go out
    fn remaining(&self, now: Instant) -> Duration {
        match self.last_request {
            Some(last) => self.delay.saturating_sub(now.saturating_duration_since(last)),
            None => Duration::ZERO,
        }
    }
}
