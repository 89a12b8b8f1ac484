//! Fixed-window, per-client request limiting.
//!
//! Each route that needs limiting owns its own [`RateLimiter`]; the
//! [`RateLimit`] middleware applies it in front of the handler.

mod middleware;
pub use middleware::RateLimit;

use serde::Deserialize;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// At most `max_requests` per client in every `window_seconds` window.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RateLimitPolicy {
    pub max_requests: u32,
    pub window_seconds: u64,
}

impl RateLimitPolicy {
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_seconds)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    Rejected {
        /// Time until the client's window resets
        retry_after: Duration,
    },
}

#[derive(Debug)]
struct Window {
    started: Instant,
    count: u32,
}

/// Thread-safe request counter shared by every worker.
#[derive(Debug)]
pub struct RateLimiter {
    policy: RateLimitPolicy,
    windows: Mutex<HashMap<String, Window>>,
}

impl RateLimiter {
    pub fn new(policy: RateLimitPolicy) -> Self {
        Self {
            policy,
            windows: Mutex::new(HashMap::new()),
        }
    }

    pub fn check(&self, client: &str) -> Decision {
        self.check_at(client, Instant::now())
    }

    /// Counts one request from `client` at `now`.
    ///
    /// The window opens on the first request from a client and closes
    /// `window_seconds` later; rejected requests are counted too.
    pub fn check_at(&self, client: &str, now: Instant) -> Decision {
        let window_length = self.policy.window();
        let mut windows = self.windows.lock().unwrap_or_else(PoisonError::into_inner);

        let window = windows.entry(client.to_owned()).or_insert(Window {
            started: now,
            count: 0,
        });
        if now.saturating_duration_since(window.started) >= window_length {
            window.started = now;
            window.count = 0;
        }

        window.count = window.count.saturating_add(1);
        if window.count > self.policy.max_requests {
            let elapsed = now.saturating_duration_since(window.started);
            Decision::Rejected {
                retry_after: window_length.saturating_sub(elapsed),
            }
        } else {
            Decision::Allowed
        }
    }

    /// Drops windows that have already closed.
    pub fn purge_expired(&self) {
        self.purge_expired_at(Instant::now())
    }

    pub fn purge_expired_at(&self, now: Instant) {
        let window_length = self.policy.window();
        let mut windows = self.windows.lock().unwrap_or_else(PoisonError::into_inner);
        let before = windows.len();
        windows.retain(|_, window| now.saturating_duration_since(window.started) < window_length);
        tracing::debug!(
            purged = before - windows.len(),
            remaining = windows.len(),
            "Purged expired rate limit windows"
        );
    }

    pub fn tracked_clients(&self) -> usize {
        self.windows
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
