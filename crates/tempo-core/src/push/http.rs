//! HTTP push transport.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::StatusCode;

use super::{DeliveryOutcome, PushTransport};
use crate::{
    error::{Result, TempoError},
    models::Subscription,
};

/// Default time-to-live the push service should keep an undelivered message.
pub const DEFAULT_TTL: Duration = Duration::from_secs(30);

/// Transport that POSTs the plaintext payload to the subscription endpoint.
///
/// Suited to a relay gateway that holds the VAPID identity and encrypts on
/// the way out. Browsers' push services need [`super::VapidPushTransport`].
///
/// Push services answer 404 or 410 for endpoints that were unsubscribed or
/// expired; those map to [`DeliveryOutcome::Gone`]. Every other failure,
/// including network errors, is transient.
#[derive(Debug, Clone)]
pub struct HttpPushTransport {
    client: reqwest::Client,
    ttl: Duration,
}

impl HttpPushTransport {
    /// Creates a transport that asks push services to keep messages for `ttl`.
    pub fn new(ttl: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client()?,
            ttl,
        })
    }
}

pub(crate) fn build_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(concat!("tempo/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| TempoError::Configuration {
            message: format!("Failed to build HTTP client: {e}"),
        })
}

/// Maps a push service response status to a delivery outcome.
pub(crate) fn classify(status: StatusCode) -> DeliveryOutcome {
    if status.is_success() {
        DeliveryOutcome::Delivered
    } else if status == StatusCode::NOT_FOUND || status == StatusCode::GONE {
        DeliveryOutcome::Gone
    } else {
        DeliveryOutcome::Transient(format!("push service responded with {status}"))
    }
}

/// Sends a prepared request and classifies the answer.
pub(crate) async fn deliver(request: reqwest::RequestBuilder, endpoint: &str) -> DeliveryOutcome {
    match request.send().await {
        Ok(response) => {
            let status = response.status();
            debug!("push to {endpoint} returned {status}");
            classify(status)
        }
        Err(e) => DeliveryOutcome::Transient(e.to_string()),
    }
}

#[async_trait]
impl PushTransport for HttpPushTransport {
    async fn send(&self, payload: &[u8], subscription: &Subscription) -> DeliveryOutcome {
        let request = self
            .client
            .post(&subscription.endpoint)
            .header("TTL", self.ttl.as_secs().to_string())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(payload.to_vec());

        deliver(request, &subscription.endpoint).await
    }
}
