//! Web Push transport with VAPID signing and aes128gcm payload encryption.

use std::time::Duration;

use async_trait::async_trait;
use log::warn;
use web_push::{
    ContentEncoding, SubscriptionInfo, VapidSignatureBuilder, WebPushError, WebPushMessage,
    WebPushMessageBuilder,
};

use super::{http, DeliveryOutcome, PushTransport};
use crate::{
    error::{Result, TempoError},
    models::Subscription,
};

/// Application server identity presented to push services.
#[derive(Debug, Clone)]
pub struct VapidConfig {
    /// Raw P-256 private key, base64url encoded
    pub private_key: String,
    /// Contact URI for the `sub` claim, such as `mailto:ops@example.com`
    pub subject: String,
}

/// Transport that encrypts each payload for the receiving device and signs
/// the request with the VAPID key, as browsers' push services require.
///
/// A subscription whose keys cannot be used for encryption is reported as
/// [`DeliveryOutcome::Gone`]: no later attempt could succeed with them.
#[derive(Debug, Clone)]
pub struct VapidPushTransport {
    client: reqwest::Client,
    vapid: VapidConfig,
    ttl: Duration,
}

impl VapidPushTransport {
    /// Creates a transport after checking that the VAPID key parses.
    pub fn new(vapid: VapidConfig, ttl: Duration) -> Result<Self> {
        if vapid.subject.trim().is_empty() {
            return Err(TempoError::Configuration {
                message: "VAPID subject is required".to_string(),
            });
        }
        VapidSignatureBuilder::from_base64_no_sub(&vapid.private_key).map_err(|e| {
            TempoError::Configuration {
                message: format!("Invalid VAPID private key: {e}"),
            }
        })?;

        Ok(Self {
            client: http::build_client()?,
            vapid,
            ttl,
        })
    }

    fn seal(
        &self,
        payload: &[u8],
        subscription: &Subscription,
    ) -> std::result::Result<WebPushMessage, WebPushError> {
        let info = SubscriptionInfo::new(
            subscription.endpoint.as_str(),
            subscription.keys.p256dh.as_str(),
            subscription.keys.auth.as_str(),
        );

        let mut signature = VapidSignatureBuilder::from_base64(&self.vapid.private_key, &info)?;
        signature.add_claim("sub", self.vapid.subject.as_str());

        let mut message = WebPushMessageBuilder::new(&info);
        message.set_ttl(u32::try_from(self.ttl.as_secs()).unwrap_or(u32::MAX));
        message.set_payload(ContentEncoding::Aes128Gcm, payload);
        message.set_vapid_signature(signature.build()?);
        message.build()
    }
}

#[async_trait]
impl PushTransport for VapidPushTransport {
    async fn send(&self, payload: &[u8], subscription: &Subscription) -> DeliveryOutcome {
        // The VAPID key was checked in `new`, so sealing can only fail on the
        // subscription's endpoint or keys
        let message = match self.seal(payload, subscription) {
            Ok(message) => message,
            Err(e) => {
                warn!("unusable subscription {}: {e}", subscription.endpoint);
                return DeliveryOutcome::Gone;
            }
        };

        let mut request = self
            .client
            .post(&subscription.endpoint)
            .header("TTL", self.ttl.as_secs().to_string());
        if let Some(sealed) = message.payload {
            request = request
                .header(reqwest::header::CONTENT_ENCODING, "aes128gcm")
                .header(reqwest::header::CONTENT_TYPE, "application/octet-stream");
            for (name, value) in sealed.crypto_headers {
                request = request.header(name, value);
            }
            request = request.body(sealed.content);
        }

        http::deliver(request, &subscription.endpoint).await
    }
}
