use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

/// Sliding-window limiter: at most `max_per_window` requests go out in any
/// `window`. `reserve` books a slot and says how long to wait for it.
#[derive(Debug)]
pub struct RateLimiter {
    max_per_window: usize,
    window: Duration,
    /// Send times of the most recent `max_per_window` reservations.
    sent: VecDeque<Instant>,
}

impl RateLimiter {
    pub fn new(max_per_window: usize, window: Duration) -> Self {
        let max_per_window = max_per_window.max(1);
        Self {
            max_per_window,
            window,
            sent: VecDeque::with_capacity(max_per_window),
        }
    }

    pub fn per_second(max: usize) -> Self {
        Self::new(max, Duration::from_secs(1))
    }

    pub fn reserve(&mut self, now: Instant) -> Duration {
        let send_at = if self.sent.len() >= self.max_per_window {
            // The slot frees up one window after the request `max` places back
            let anchor = self.sent[self.sent.len() - self.max_per_window];
            (anchor + self.window).max(now)
        } else {
            now
        };

        self.sent.push_back(send_at);
        while self.sent.len() > self.max_per_window {
            self.sent.pop_front();
        }
        send_at.saturating_duration_since(now)
    }
}

/// URL-keyed JSON cache with a fixed time-to-live.
#[derive(Debug)]
pub struct ResponseCache {
    ttl: Duration,
    capacity: usize,
    entries: HashMap<String, (Instant, Value)>,
}

impl ResponseCache {
    pub const DEFAULT_CAPACITY: usize = 256;

    pub fn new(ttl: Duration) -> Self {
        Self::with_capacity(ttl, Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(ttl: Duration, capacity: usize) -> Self {
        Self {
            ttl,
            capacity: capacity.max(1),
            entries: HashMap::new(),
        }
    }

    pub fn get(&mut self, key: &str, now: Instant) -> Option<Value> {
        let fresh = match self.entries.get(key) {
            Some((stored, _)) => now.saturating_duration_since(*stored) < self.ttl,
            None => return None,
        };
        if fresh {
            self.entries.get(key).map(|(_, v)| v.clone())
        } else {
            self.entries.remove(key);
            None
        }
    }

    pub fn put(&mut self, key: String, value: Value, now: Instant) {
        if self.entries.len() >= self.capacity && !self.entries.contains_key(&key) {
            let ttl = self.ttl;
            self.entries
                .retain(|_, (stored, _)| now.saturating_duration_since(*stored) < ttl);
            if self.entries.len() >= self.capacity {
                let oldest = self
                    .entries
                    .iter()
                    .min_by_key(|(_, (stored, _))| *stored)
                    .map(|(k, _)| k.clone());
                if let Some(k) = oldest {
                    self.entries.remove(&k);
                }
            }
        }
        self.entries.insert(key, (now, value));
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Bounded retries with exponential backoff.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Wait after failed attempt `attempt` (1-based): `base * 2^attempt`.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(2u32.saturating_pow(attempt))
    }
}
