//! Push delivery transport abstraction.
//!
//! The dispatcher only needs one capability from the outside world: hand a
//! payload to a device endpoint and learn whether it arrived, whether the
//! endpoint is permanently gone, or whether the attempt failed for a reason
//! that might clear up later. [`PushTransport`] is that seam; message
//! encryption and signing are the implementation's business.

use async_trait::async_trait;

use crate::models::Subscription;

pub mod http;
pub mod vapid;

pub use http::HttpPushTransport;
pub use vapid::{VapidConfig, VapidPushTransport};

/// Result of a single delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The push service accepted the message
    Delivered,
    /// The endpoint no longer exists; its subscription should be removed
    Gone,
    /// The attempt failed but the endpoint may still be valid
    Transient(String),
}

impl DeliveryOutcome {
    /// Whether the message was accepted.
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered)
    }
}

/// Capability to deliver a payload to one device.
#[async_trait]
pub trait PushTransport: Send + Sync {
    /// Deliver `payload` to the subscription's endpoint.
    async fn send(&self, payload: &[u8], subscription: &Subscription) -> DeliveryOutcome;
}
