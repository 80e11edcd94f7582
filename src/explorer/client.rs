use actix_web::rt::time::sleep;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Mutex;
use std::time::Instant;

use super::throttle::{RateLimiter, ResponseCache, RetryPolicy};
use crate::config::ExplorerSettings;
use crate::error::ExplorerError;

/// Read-only client for a WhatsOnChain-style REST API. Owns its own rate
/// limiter and response cache; nothing is shared between instances.
pub struct ExplorerClient {
    http: reqwest::Client,
    base_url: String,
    limiter: Mutex<RateLimiter>,
    cache: Mutex<ResponseCache>,
    retry: RetryPolicy,
}

impl ExplorerClient {
    pub fn new(settings: &ExplorerSettings) -> Result<Self, ExplorerError> {
        let http = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|source| ExplorerError::Transport {
                url: settings.base_url.clone(),
                source,
            })?;

        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            limiter: Mutex::new(RateLimiter::per_second(settings.max_requests_per_sec)),
            cache: Mutex::new(ResponseCache::new(settings.cache_ttl)),
            retry: RetryPolicy {
                max_attempts: settings.max_attempts.max(1),
                base_delay: settings.backoff_base,
            },
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// GET `path` as JSON: cache first, then rate-limited attempts with backoff.
    pub async fn get_json(&self, path: &str) -> Result<Value, ExplorerError> {
        let url = self.url(path);

        let cached = {
            let mut cache = self.cache.lock().expect("mutex poisoned");
            cache.get(&url, Instant::now())
        };
        if let Some(v) = cached {
            debug!("EXPLORER - cache hit {url}");
            return Ok(v);
        }

        let mut attempt = 0;
        loop {
            attempt += 1;

            let wait = {
                let mut limiter = self.limiter.lock().expect("mutex poisoned");
                limiter.reserve(Instant::now())
            };
            if !wait.is_zero() {
                debug!("EXPLORER - throttling {url} for {} ms", wait.as_millis());
                sleep(wait).await;
            }

            match self.fetch_once(&url).await {
                Ok(v) => {
                    let mut cache = self.cache.lock().expect("mutex poisoned");
                    cache.put(url, v.clone(), Instant::now());
                    return Ok(v);
                }
                Err(e) if attempt >= self.retry.max_attempts => {
                    return Err(ExplorerError::RetriesExhausted {
                        url,
                        attempts: attempt,
                        last: Box::new(e),
                    });
                }
                Err(e) => {
                    let delay = self.retry.delay_after(attempt);
                    warn!(
                        "EXPLORER - attempt {attempt}/{} failed: {e}; retrying in {} ms",
                        self.retry.max_attempts,
                        delay.as_millis()
                    );
                    sleep(delay).await;
                }
            }
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ExplorerError> {
        let value = self.get_json(path).await?;
        serde_json::from_value(value).map_err(|source| ExplorerError::Decode {
            url: self.url(path),
            source,
        })
    }

    async fn fetch_once(&self, url: &str) -> Result<Value, ExplorerError> {
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| ExplorerError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ExplorerError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = resp.bytes().await.map_err(|source| ExplorerError::Transport {
            url: url.to_string(),
            source,
        })?;
        serde_json::from_slice(&body).map_err(|source| ExplorerError::Decode {
            url: url.to_string(),
            source,
        })
    }

    #[cfg(test)]
    pub(crate) fn prime_cache(&self, path: &str, value: Value) {
        let mut cache = self.cache.lock().expect("mutex poisoned");
        cache.put(self.url(path), value, Instant::now());
    }
}
