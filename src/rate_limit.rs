//! Sliding-window request limiter for HTTP front ends.
//!
//! The renderer itself never consults this; a server constructs one limiter, keeps it next to
//! its router and checks each request before handing the dataset to the renderer.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant, interval};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub window: Duration,
    pub max_requests: usize,
    pub cleanup_interval: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window: Duration::from_secs(60),
            max_requests: 100,
            cleanup_interval: Duration::from_secs(60),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub remaining: usize,
    /// Whole seconds until a slot frees up; only set when denied.
    pub retry_after: Option<u64>,
}

impl RateLimitDecision {
    /// Response headers describing this decision.
    pub fn headers(&self, config: &RateLimitConfig, now: DateTime<Utc>) -> Vec<(&'static str, String)> {
        let reset_in = match self.retry_after {
            Some(secs) => Duration::from_secs(secs),
            None => config.window,
        };
        let reset_at = chrono::Duration::from_std(reset_in)
            .ok()
            .and_then(|delta| now.checked_add_signed(delta))
            .unwrap_or(now);
        let mut headers = vec![
            ("X-RateLimit-Limit", config.max_requests.to_string()),
            ("X-RateLimit-Remaining", self.remaining.to_string()),
            ("X-RateLimit-Reset", reset_at.to_rfc3339()),
        ];
        if let Some(secs) = self.retry_after {
            headers.push(("Retry-After", secs.to_string()));
        }
        headers
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitStatus {
    pub request_count: usize,
    pub remaining: usize,
}

type Store = Arc<Mutex<HashMap<String, VecDeque<Instant>>>>;

pub struct SlidingWindowRateLimiter {
    config: RateLimitConfig,
    store: Store,
    cleanup_task: Option<JoinHandle<()>>,
}

impl SlidingWindowRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            store: Arc::new(Mutex::new(HashMap::new())),
            cleanup_task: None,
        }
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    pub fn check_request(&self, client: &str) -> RateLimitDecision {
        self.check_request_at(client, Instant::now())
    }

    pub fn check_request_at(&self, client: &str, now: Instant) -> RateLimitDecision {
        let mut store = lock(&self.store);
        let timestamps = store.entry(client.to_string()).or_default();
        prune(timestamps, now, self.config.window);

        if timestamps.len() >= self.config.max_requests {
            let retry_after = timestamps
                .front()
                .map(|oldest| (*oldest + self.config.window).saturating_duration_since(now))
                .map(ceil_secs)
                .unwrap_or(1)
                .max(1);
            debug!(client, retry_after, "rate limit exceeded");
            return RateLimitDecision {
                allowed: false,
                remaining: 0,
                retry_after: Some(retry_after),
            };
        }

        timestamps.push_back(now);
        RateLimitDecision {
            allowed: true,
            remaining: self.config.max_requests - timestamps.len(),
            retry_after: None,
        }
    }

    /// Current usage for `client` without recording a request.
    pub fn status(&self, client: &str) -> RateLimitStatus {
        self.status_at(client, Instant::now())
    }

    pub fn status_at(&self, client: &str, now: Instant) -> RateLimitStatus {
        let store = lock(&self.store);
        let window_start = now.checked_sub(self.config.window);
        let request_count = store.get(client).map_or(0, |timestamps| {
            timestamps
                .iter()
                .filter(|ts| window_start.is_none_or(|start| **ts > start))
                .count()
        });
        RateLimitStatus {
            request_count,
            remaining: self.config.max_requests.saturating_sub(request_count),
        }
    }

    pub fn reset(&self, client: &str) {
        lock(&self.store).remove(client);
    }

    pub fn reset_all(&self) {
        lock(&self.store).clear();
    }

    pub fn tracked_clients(&self) -> usize {
        lock(&self.store).len()
    }

    /// Drops clients that have been quiet for two windows.
    pub fn cleanup(&self) -> usize {
        cleanup_store(&self.store, Instant::now(), self.config.window)
    }

    /// Starts the periodic cleanup on the current tokio runtime. Calling it again restarts it.
    pub fn start_cleanup(&mut self) {
        self.stop_cleanup();
        let store = Arc::clone(&self.store);
        let window = self.config.window;
        let period = self.config.cleanup_interval;
        info!(interval_secs = period.as_secs(), "starting rate limiter cleanup task");
        self.cleanup_task = Some(tokio::spawn(async move {
            let mut ticker = interval(period);
            // The first tick completes immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let removed = cleanup_store(&store, Instant::now(), window);
                if removed > 0 {
                    debug!(removed, "pruned idle rate limit records");
                }
            }
        }));
    }

    fn stop_cleanup(&mut self) {
        if let Some(task) = self.cleanup_task.take() {
            task.abort();
        }
    }

    /// Stops the cleanup task and forgets every client.
    pub fn shutdown(&mut self) {
        self.stop_cleanup();
        self.reset_all();
    }
}

impl Drop for SlidingWindowRateLimiter {
    fn drop(&mut self) {
        self.stop_cleanup();
    }
}

fn lock(store: &Store) -> MutexGuard<'_, HashMap<String, VecDeque<Instant>>> {
    store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn prune(timestamps: &mut VecDeque<Instant>, now: Instant, window: Duration) {
    let Some(window_start) = now.checked_sub(window) else {
        return;
    };
    while timestamps.front().is_some_and(|ts| *ts <= window_start) {
        timestamps.pop_front();
    }
}

fn cleanup_store(store: &Store, now: Instant, window: Duration) -> usize {
    let mut store = lock(store);
    let before = store.len();
    let cutoff = now.checked_sub(window * 2);
    store.retain(|_, timestamps| match (timestamps.back(), cutoff) {
        (None, _) => false,
        (Some(last), Some(cutoff)) => *last >= cutoff,
        (Some(_), None) => true,
    });
    before - store.len()
}

fn ceil_secs(duration: Duration) -> u64 {
    let secs = duration.as_secs();
    if duration.subsec_nanos() > 0 { secs + 1 } else { secs }
}

/// Picks the client identity from forwarding headers, falling back to `"unknown"`.
pub fn client_identity<'a, I>(headers: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let headers: Vec<(&str, &str)> = headers.into_iter().collect();
    let find = |name: &str| {
        headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.trim())
            .filter(|value| !value.is_empty())
    };

    if let Some(forwarded) = find("x-forwarded-for") {
        if let Some(first) = forwarded.split(',').next() {
            return first.trim().to_string();
        }
    }
    find("x-real-ip")
        .or_else(|| find("cf-connecting-ip"))
        .unwrap_or("unknown")
        .to_string()
}
