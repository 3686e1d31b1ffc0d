//! HTTP module
//!
//! Provides the transport, response classification and request pacing.
//!
//! # Features
//!
//! - **Single-shot requests**: one attempt per call, JSON body read regardless of status
//! - **Envelope classification**: application error codes take precedence over HTTP status
//! - **Pacing**: fixed delay or token bucket (governor) between pages

mod client;
mod envelope;
mod query;
mod rate_limit;

pub use client::{HttpClient, RawResponse};
pub use envelope::ApiOutcome;
pub use query::{QueryParams, API_KEY_PARAM};
pub use rate_limit::{
    pacer_for, FixedDelay, NoPacing, Pacer, RateLimiter, RateLimiterConfig, RatePeriod,
};

#[cfg(test)]
mod tests;
