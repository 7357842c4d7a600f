//! Request pacing for the directory API
//!
//! The API enforces a fixed request cadence and answers sustained overload
//! with HTTP 403. Pacing is reactive: the throttled flag is sticky once set
//! and only a successful response clears it.

use std::time::Duration;

use log::debug;
use tokio::time::{Instant, sleep};

/// Minimum interval between consecutive requests from one client instance.
pub const MIN_REQUEST_INTERVAL: Duration = Duration::from_millis(500);

/// Backoff step once the API has signaled overload; multiplied by the
/// attempt number, so the worst-case wait is bounded by the retry ceiling.
pub const THROTTLE_STEP: Duration = Duration::from_secs(4);

/// Poll granularity while waiting out the minimum interval.
const PACING_POLL: Duration = Duration::from_millis(100);

/// Pacing state threaded through every request on a client instance.
#[derive(Debug)]
pub struct Pacing {
    min_interval: Duration,
    throttle_step: Duration,
    last_sent: Option<Instant>,
    throttled: bool,
}

impl Pacing {
    pub fn new(min_interval: Duration, throttle_step: Duration) -> Self {
        Self {
            min_interval,
            throttle_step,
            last_sent: None,
            throttled: false,
        }
    }

    /// Wait until this attempt may be sent.
    ///
    /// Throttled state takes precedence: the wait is `throttle_step` times
    /// the attempt number. Otherwise the minimum interval since the last
    /// send is enforced, polling rather than busy-spinning.
    pub async fn wait_turn(&self, attempt: u32) {
        if self.throttled {
            let backoff = self.throttle_step * attempt;
            debug!("throttled; backing off {backoff:?} before attempt {attempt}");
            sleep(backoff).await;
        } else if let Some(last) = self.last_sent {
            while last.elapsed() < self.min_interval {
                sleep(PACING_POLL).await;
            }
        }
    }

    /// Record that a request was just sent, success or not. Pacing is
    /// computed from actual request issuance.
    pub fn record_sent(&mut self) {
        self.last_sent = Some(Instant::now());
    }

    /// A successful response clears the sticky throttle.
    pub fn on_success(&mut self) {
        self.throttled = false;
    }

    /// The API signaled overload; back off until a success is observed.
    pub fn on_overload(&mut self) {
        if !self.throttled {
            debug!("API rate limit reached; throttling activated");
        }
        self.throttled = true;
    }

    #[cfg(test)]
    pub fn is_throttled(&self) -> bool {
        self.throttled
    }
}
