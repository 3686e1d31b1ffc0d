//! Request pacing
//!
//! The client consults a [`Pacer`] at two points: before every request it
//! issues ([`Pacer::acquire`]) and between the pages of a full fetch
//! ([`Pacer::pause`]). A fixed delay only spaces out pages; a token bucket
//! (via the governor crate) gates every request.

use crate::config::PacingConfig;
use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::middleware::NoOpMiddleware;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as Governor};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

/// Spaces out the requests a client issues
#[async_trait]
pub trait Pacer: Send + Sync + std::fmt::Debug {
    /// Wait before any request is sent
    async fn acquire(&self) {}

    /// Wait between two pages of a full fetch
    async fn pause(&self) {}
}

/// Build the pacer described by a config
pub fn pacer_for(config: &PacingConfig) -> Arc<dyn Pacer> {
    match config {
        PacingConfig::None => Arc::new(NoPacing),
        PacingConfig::FixedDelay { delay_ms } => {
            Arc::new(FixedDelay::new(Duration::from_millis(*delay_ms)))
        }
        PacingConfig::RateLimit(limits) => Arc::new(RateLimiter::new(limits)),
    }
}

// ============================================================================
// No Pacing
// ============================================================================

/// Never waits
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPacing;

impl Pacer for NoPacing {}

// ============================================================================
// Fixed Delay
// ============================================================================

/// Sleeps the same delay before every follow-up request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    /// Delay used when nothing else is configured
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(100);

    /// Create a fixed delay pacer
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// The configured delay
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for FixedDelay {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}

#[async_trait]
impl Pacer for FixedDelay {
    async fn pause(&self) {
        tokio::time::sleep(self.delay).await;
    }
}

// ============================================================================
// Token Bucket
// ============================================================================

/// Period a rate quota is measured over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatePeriod {
    #[default]
    Second,
    Minute,
    Hour,
}

/// Configuration for rate limiting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimiterConfig {
    /// Requests allowed per period
    pub quota: u32,
    /// Period the quota applies to
    #[serde(default)]
    pub period: RatePeriod,
    /// Burst size (max tokens in bucket)
    pub burst_size: u32,
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self {
            quota: 10,
            period: RatePeriod::Second,
            burst_size: 10,
        }
    }
}

impl RateLimiterConfig {
    /// Create a new rate limiter config
    pub fn new(quota: u32, period: RatePeriod, burst_size: u32) -> Self {
        Self {
            quota,
            period,
            burst_size,
        }
    }

    /// Requests per second with an equal burst
    pub fn per_second(quota: u32) -> Self {
        Self::new(quota, RatePeriod::Second, quota)
    }

    /// The public tier's allowance: 100 requests an hour per key
    pub fn public_tier() -> Self {
        Self::new(100, RatePeriod::Hour, 10)
    }

    fn to_quota(&self) -> Quota {
        let quota = NonZeroU32::new(self.quota).unwrap_or(NonZeroU32::MIN);
        let burst = NonZeroU32::new(self.burst_size).unwrap_or(NonZeroU32::MIN);
        let base = match self.period {
            RatePeriod::Second => Quota::per_second(quota),
            RatePeriod::Minute => Quota::per_minute(quota),
            RatePeriod::Hour => Quota::per_hour(quota),
        };
        base.allow_burst(burst)
    }
}

/// Token bucket rate limiter
#[derive(Clone)]
pub struct RateLimiter {
    limiter: Arc<Governor<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>>,
}

impl RateLimiter {
    /// Create a new rate limiter with the given config
    pub fn new(config: &RateLimiterConfig) -> Self {
        Self {
            limiter: Arc::new(Governor::direct(config.to_quota())),
        }
    }

    /// Wait until a request can be made
    pub async fn wait(&self) {
        self.limiter.until_ready().await;
    }

    /// Try to acquire a permit, returning immediately
    pub fn try_acquire(&self) -> bool {
        self.limiter.check().is_ok()
    }

    /// Wait with a timeout
    pub async fn wait_with_timeout(&self, timeout: Duration) -> bool {
        tokio::time::timeout(timeout, self.limiter.until_ready())
            .await
            .is_ok()
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(&RateLimiterConfig::default())
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter").finish()
    }
}

/// Takes one token per request, so pages need no extra pause
#[async_trait]
impl Pacer for RateLimiter {
    async fn acquire(&self) {
        self.wait().await;
    }
}
