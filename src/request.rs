use std::time::Duration;

use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::time::{sleep_until, Instant};
use tracing::debug;

/// Hard ceiling on a single request. The pacer below only spaces requests out, it does not bound
/// how long one may take.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("unexpected response body from {url}")]
    MalformedBody {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A JSON GET client that enforces a minimum interval between outbound requests. Explorer APIs
/// rate limit per IP, so every request a driver makes has to flow through one of these.
pub struct RateLimitedClient {
    client: reqwest::Client,
    min_interval: Duration,
    next_slot: Mutex<Option<Instant>>,
}

impl RateLimitedClient {
    pub fn new(min_interval: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build reqwest client");

        Self {
            client,
            min_interval,
            next_slot: Mutex::new(None),
        }
    }

    /// Reserves the next free send slot, then sleeps outside the lock. Concurrent callers queue
    /// up spaced `min_interval` apart in reservation order.
    async fn pace(&self) {
        let send_at = {
            let mut next_slot = self.next_slot.lock().await;
            let now = Instant::now();
            let send_at = next_slot.map_or(now, |slot| slot.max(now));
            *next_slot = Some(send_at + self.min_interval);
            send_at
        };
        sleep_until(send_at).await;
    }

    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, RequestError> {
        self.pace().await;

        debug!("sending request to {url}");

        let body = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|res| res.error_for_status())
            .map_err(|source| RequestError::Transport {
                url: url.to_string(),
                source,
            })?
            .text()
            .await
            .map_err(|source| RequestError::Transport {
                url: url.to_string(),
                source,
            })?;

        serde_json::from_str(&body).map_err(|source| RequestError::MalformedBody {
            url: url.to_string(),
            source,
        })
    }
}
