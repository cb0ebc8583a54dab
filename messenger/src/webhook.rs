//! Outbound webhook delivery.
//!
//! A delivery is a single `POST <url>` with a one-field JSON body. The
//! HTTP channel is fire-and-forget: `submit` hands the request to a
//! spawned task and returns immediately; transport failures and non-2xx
//! responses are logged there and never reach the dispatch path.

use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::MessengerError;

/// Default timeout for a webhook request.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default connection timeout.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// A single outbound webhook delivery.
#[derive(Clone, Debug)]
pub struct Delivery {
    pub url: String,
    /// One-key JSON object: `{ "<field>": "<message>" }`.
    pub payload: Value,
}

impl Delivery {
    /// Build a delivery with the message under the given payload field.
    pub fn new(url: impl Into<String>, field: &str, message: &str) -> Self {
        Self {
            url: url.into(),
            payload: serde_json::json!({ field: message }),
        }
    }
}

/// Hands deliveries off for transmission.
///
/// `submit` must not block the caller on network I/O.
pub trait DeliveryChannel: Send + Sync {
    fn submit(&self, delivery: Delivery);
}

/// Delivery channel that POSTs over HTTP (reusable connection pool).
pub struct HttpChannel {
    http_client: reqwest::Client,
}

impl HttpChannel {
    /// Create a channel with default timeout settings.
    pub fn new() -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self { http_client }
    }

    /// Create a channel with a custom request timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self { http_client }
    }
}

impl DeliveryChannel for HttpChannel {
    fn submit(&self, delivery: Delivery) {
        let client = self.http_client.clone();
        tokio::spawn(async move {
            match post_delivery(&client, &delivery).await {
                Ok(()) => debug!(url = %delivery.url, "webhook delivered"),
                Err(e) => warn!(url = %delivery.url, "webhook delivery failed: {e}"),
            }
        });
    }
}

impl Default for HttpChannel {
    fn default() -> Self {
        Self::new()
    }
}

/// Perform a single webhook POST.
///
/// Extracted as a standalone function to avoid lifetime issues with
/// `tokio::spawn` and `&self`.
async fn post_delivery(
    client: &reqwest::Client,
    delivery: &Delivery,
) -> Result<(), MessengerError> {
    let response = client
        .post(&delivery.url)
        .json(&delivery.payload)
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                MessengerError::Unreachable(format!("request timed out: {e}"))
            } else if e.is_connect() {
                MessengerError::Unreachable(format!("connection failed: {e}"))
            } else {
                MessengerError::RequestFailed(e.to_string())
            }
        })?;

    if !response.status().is_success() {
        return Err(MessengerError::RequestFailed(format!(
            "HTTP status {}",
            response.status()
        )));
    }

    Ok(())
}

/// A delivery channel that records submissions instead of sending them.
///
/// Thread-safe so spawned listener tasks can share it with asserting
/// tests.
#[derive(Default)]
pub struct NullChannel {
    submitted: std::sync::Mutex<Vec<Delivery>>,
}

impl NullChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// All deliveries "sent" so far (for assertions).
    pub fn submitted(&self) -> Vec<Delivery> {
        self.submitted.lock().expect("channel lock").clone()
    }

    /// Clear recorded deliveries.
    pub fn reset(&self) {
        self.submitted.lock().expect("channel lock").clear();
    }
}

impl DeliveryChannel for NullChannel {
    fn submit(&self, delivery: Delivery) {
        self.submitted.lock().expect("channel lock").push(delivery);
    }
}
