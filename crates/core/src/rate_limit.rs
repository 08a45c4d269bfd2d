//! Token bucket rate limiter for per-client request limiting.
//!
//! Each client address gets its own bucket, created on first sight. A bucket
//! holds up to `requests_per_minute` tokens and refills continuously over a
//! one minute window.

use std::collections::HashMap;
use std::net::IpAddr;
use tokio::sync::RwLock;
use tokio::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RateLimitError {
    #[error("Rate limit exceeded, retry in {retry_after_ms}ms")]
    Exceeded { retry_after_ms: u64 },
}

/// Token bucket rate limiter for a single client.
///
/// Tokens are added at a constant rate and consumed when requests are made.
/// If no tokens are available, the request is rejected with the time until
/// the next token.
pub struct TokenBucket {
    /// Max tokens (= requests per minute).
    capacity: f32,
    /// Current available tokens.
    tokens: f32,
    /// Tokens added per second.
    refill_rate: f32,
    /// Last refill time.
    last_refill: Instant,
    /// Last time a token was requested.
    last_seen: Instant,
}

impl TokenBucket {
    /// Create a new token bucket with the given rate limit.
    ///
    /// The bucket starts full, allowing immediate requests up to the capacity.
    pub fn new(requests_per_minute: u32) -> Self {
        let capacity = requests_per_minute as f32;
        let now = Instant::now();
        Self {
            capacity,
            tokens: capacity, // Start full
            refill_rate: capacity / 60.0,
            last_refill: now,
            last_seen: now,
        }
    }

    /// Try to acquire a token.
    ///
    /// Returns `Err(wait_duration)` if rate limited, with the duration to wait.
    pub fn try_acquire(&mut self) -> Result<(), Duration> {
        self.refill();
        self.last_seen = self.last_refill;

        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            Ok(())
        } else {
            // Calculate wait time until 1 token available
            let tokens_needed = 1.0 - self.tokens;
            let wait_secs = tokens_needed / self.refill_rate;
            Err(Duration::from_secs_f32(wait_secs))
        }
    }

    /// Whether the bucket is full and has not been used for `max_idle`.
    fn is_idle(&mut self, max_idle: Duration) -> bool {
        self.refill();
        self.tokens >= self.capacity && self.last_seen.elapsed() >= max_idle
    }

    /// Refill tokens based on elapsed time.
    fn refill(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_refill).as_secs_f32();
        self.tokens = (self.tokens + elapsed * self.refill_rate).min(self.capacity);
        self.last_refill = now;
    }
}

/// Pool of rate limiters, one per client address.
///
/// Thread-safe and async-compatible. A pool built with zero requests per
/// minute admits everything.
pub struct RateLimiterPool {
    requests_per_minute: u32,
    limiters: RwLock<HashMap<IpAddr, TokenBucket>>,
}

impl RateLimiterPool {
    pub fn new(requests_per_minute: u32) -> Self {
        Self {
            requests_per_minute,
            limiters: RwLock::new(HashMap::new()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.requests_per_minute > 0
    }

    pub fn requests_per_minute(&self) -> u32 {
        self.requests_per_minute
    }

    /// Try to acquire a token for `client`, creating its bucket if needed.
    pub async fn try_acquire(&self, client: IpAddr) -> Result<(), RateLimitError> {
        if !self.is_enabled() {
            return Ok(());
        }

        let mut limiters = self.limiters.write().await;
        let bucket = limiters
            .entry(client)
            .or_insert_with(|| TokenBucket::new(self.requests_per_minute));

        bucket.try_acquire().map_err(|wait| RateLimitError::Exceeded {
            // Round up to the next whole millisecond.
            retry_after_ms: wait.as_millis() as u64 + 1,
        })
    }

    /// Drop buckets that are full again and untouched for `max_idle`.
    ///
    /// Returns the number of buckets removed. A dropped bucket is
    /// indistinguishable from a fresh one, so this never changes decisions.
    pub async fn prune_idle(&self, max_idle: Duration) -> usize {
        let mut limiters = self.limiters.write().await;
        let before = limiters.len();
        limiters.retain(|_, bucket| !bucket.is_idle(max_idle));
        before - limiters.len()
    }

    /// Number of clients currently tracked.
    pub async fn tracked_clients(&self) -> usize {
        self.limiters.read().await.len()
    }
}
