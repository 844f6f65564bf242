// src/limit.rs — Per-client request limiting

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use axum::http::HeaderMap;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Rate limit exceeded")]
pub struct RateLimited;

/// Admission check applied before any solve work starts. Implementations
/// are shared across handler tasks.
pub trait RateLimiter: Send + Sync {
    fn check(&self, key: &str) -> Result<(), RateLimited>;
}

/// Fixed-window counters: each key gets `per_minute` requests per
/// window, and the counter resets once the window has fully elapsed.
pub struct FixedWindowLimiter {
    per_minute: u32,
    window: Duration,
    windows: Mutex<HashMap<String, (Instant, u32)>>,
}

impl FixedWindowLimiter {
    pub fn new(per_minute: u32) -> Self {
        Self::with_window(per_minute, Duration::from_secs(60))
    }

    /// Custom window length, for tests that need fast resets.
    pub fn with_window(per_minute: u32, window: Duration) -> Self {
        Self {
            per_minute: per_minute.max(1),
            window,
            windows: Mutex::new(HashMap::new()),
        }
    }
}

impl RateLimiter for FixedWindowLimiter {
    fn check(&self, key: &str) -> Result<(), RateLimited> {
        let mut windows = self.windows.lock().unwrap_or_else(|e| e.into_inner());
        let now = Instant::now();
        let entry = windows.entry(key.to_string()).or_insert((now, 0));
        if now.duration_since(entry.0) >= self.window {
            *entry = (now, 0);
        }
        if entry.1 >= self.per_minute {
            return Err(RateLimited);
        }
        entry.1 += 1;
        Ok(())
    }
}

/// Accepts everything. Used when limiting is disabled in config.
pub struct NoopLimiter;

impl RateLimiter for NoopLimiter {
    fn check(&self, _key: &str) -> Result<(), RateLimited> {
        Ok(())
    }
}

/// Client identity for limiting: the first X-Forwarded-For entry when
/// present, otherwise a shared bucket.
pub fn client_key(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}
