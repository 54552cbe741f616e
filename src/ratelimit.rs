//! In-memory fixed-window rate limiter for authentication endpoints.
//!
//! Windows are per identifier (usually the client IP). The first request
//! after a window expires opens a new one. Time is passed in by the
//! caller in Unix milliseconds; the limiter never reads a clock.

use std::collections::HashMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use tracing::debug;

pub const DEFAULT_LIMIT: u32 = 5;
pub const DEFAULT_WINDOW_MS: u64 = 60_000;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct RateLimitResult {
    pub success: bool,
    pub remaining: u32,
    /// Unix milliseconds at which the current window ends.
    pub reset: u64,
}

#[derive(Debug, Copy, Clone)]
struct Window {
    count: u32,
    reset_at: u64,
}

#[derive(Debug, Clone)]
pub struct RateLimiter {
    limit: u32,
    window_ms: u64,
    windows: HashMap<String, Window>,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT, DEFAULT_WINDOW_MS)
    }
}

impl RateLimiter {
    pub fn new(limit: u32, window_ms: u64) -> Self {
        Self { limit, window_ms, windows: HashMap::new() }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Count one request from `identifier` at `now_ms`.
    pub fn check(&mut self, identifier: &str, now_ms: u64) -> RateLimitResult {
        let window_ms = self.window_ms;
        let window = self
            .windows
            .entry(identifier.to_string())
            .or_insert(Window { count: 0, reset_at: now_ms.saturating_add(window_ms) });

        if window.reset_at < now_ms {
            *window = Window { count: 0, reset_at: now_ms.saturating_add(window_ms) };
        }
        window.count = window.count.saturating_add(1);

        let success = window.count <= self.limit;
        if !success {
            debug!(identifier, count = window.count, limit = self.limit, "rate limit exceeded");
        }

        RateLimitResult {
            success,
            remaining: self.limit.saturating_sub(window.count),
            reset: window.reset_at,
        }
    }

    /// Forget windows that ended before `now_ms`.
    pub fn purge_expired(&mut self, now_ms: u64) -> usize {
        let before = self.windows.len();
        self.windows.retain(|_, w| w.reset_at >= now_ms);
        before - self.windows.len()
    }

    pub fn tracked(&self) -> usize {
        self.windows.len()
    }
}

/// Best-effort client address from proxy headers.
///
/// Order: `cf-connecting-ip`, first entry of `x-forwarded-for`, `x-real-ip`.
/// Empty values are skipped. `header` looks up a header by lower-case name.
pub fn client_ip<'a>(header: impl Fn(&str) -> Option<&'a str>) -> String {
    let present = |name: &str| header(name).map(str::trim).filter(|v| !v.is_empty());

    if let Some(ip) = present("cf-connecting-ip") {
        return ip.to_string();
    }
    if let Some(first) = present("x-forwarded-for").and_then(|v| v.split(',').next()) {
        let first = first.trim();
        if !first.is_empty() {
            return first.to_string();
        }
    }
    if let Some(ip) = present("x-real-ip") {
        return ip.to_string();
    }
    "unknown".to_string()
}

/// RFC 3339 UTC with milliseconds, e.g. `2023-11-14T22:14:20.000Z`.
/// Instants past chrono's range clamp to its maximum.
pub fn format_reset(reset_ms: u64) -> String {
    i64::try_from(reset_ms)
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Response headers describing the caller's current window.
pub fn rate_limit_headers(result: &RateLimitResult, limit: u32) -> Vec<(&'static str, String)> {
    vec![
        ("X-RateLimit-Limit", limit.to_string()),
        ("X-RateLimit-Remaining", result.remaining.to_string()),
        ("X-RateLimit-Reset", format_reset(result.reset)),
    ]
}
