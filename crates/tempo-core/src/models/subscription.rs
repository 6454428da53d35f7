//! Push subscription model.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Keys a device hands out when it subscribes; the delivery transport needs
/// both to encrypt a message for that device.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct PushKeys {
    /// Device public key (P-256, base64url)
    pub p256dh: String,
    /// Authentication secret (base64url)
    pub auth: String,
}

/// One device's push channel, registered for a user.
///
/// The endpoint is the identity: re-subscribing with the same endpoint
/// replaces the record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Subscription {
    pub user_id: String,
    pub endpoint: String,
    pub keys: PushKeys,
    pub created_at: Timestamp,
}
