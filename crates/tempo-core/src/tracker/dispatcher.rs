//! Notification fan-out to every registered device of a user.

use std::{path::PathBuf, sync::Arc, time::Duration};

use log::{debug, info, warn};
use tokio::time;

use super::with_database;
use crate::{
    error::Result,
    models::{Notification, Subscription},
    push::{DeliveryOutcome, PushTransport},
};

/// Summary of one [`Dispatcher::notify`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchReport {
    /// The user has no registered devices
    Skipped,
    /// Every device accepted the notification
    Delivered { delivered: usize },
    /// At least one device did not receive it. `gone` endpoints were
    /// removed from the registry, `failed` ones were kept.
    PartialFailure {
        delivered: usize,
        gone: usize,
        failed: usize,
    },
}

impl DispatchReport {
    /// Number of devices that accepted the notification.
    pub fn delivered(&self) -> usize {
        match self {
            Self::Skipped => 0,
            Self::Delivered { delivered } | Self::PartialFailure { delivered, .. } => *delivered,
        }
    }

    fn from_counts(delivered: usize, gone: usize, failed: usize) -> Self {
        if gone == 0 && failed == 0 {
            Self::Delivered { delivered }
        } else {
            Self::PartialFailure {
                delivered,
                gone,
                failed,
            }
        }
    }
}

/// Sends notifications through a [`PushTransport`] and prunes endpoints the
/// transport reports as gone.
///
/// The dispatcher does not look inside notifications; it serializes them once
/// and sends the same bytes to every device.
#[derive(Clone)]
pub struct Dispatcher {
    db_path: PathBuf,
    transport: Arc<dyn PushTransport>,
    delivery_timeout: Duration,
}

impl Dispatcher {
    pub(crate) fn new(
        db_path: PathBuf,
        transport: Arc<dyn PushTransport>,
        delivery_timeout: Duration,
    ) -> Self {
        Self {
            db_path,
            transport,
            delivery_timeout,
        }
    }

    /// Delivers `notification` to every subscription of `user_id`.
    ///
    /// Each subscription gets exactly one attempt. A failing endpoint never
    /// stops the fan-out; only a failure to read the registry is returned as
    /// an error.
    pub async fn notify(&self, user_id: &str, notification: &Notification) -> Result<DispatchReport> {
        let user = user_id.to_string();
        let subscriptions =
            with_database(&self.db_path, move |db| db.subscriptions_for_user(&user)).await?;

        if subscriptions.is_empty() {
            debug!("no subscriptions for user {user_id}, skipping {} push", notification.kind());
            return Ok(DispatchReport::Skipped);
        }

        let payload = notification.to_bytes()?;
        let (mut delivered, mut gone, mut failed) = (0, 0, 0);

        for subscription in &subscriptions {
            match self.deliver(&payload, subscription).await {
                DeliveryOutcome::Delivered => delivered += 1,
                DeliveryOutcome::Gone => {
                    gone += 1;
                    self.prune(subscription).await;
                }
                DeliveryOutcome::Transient(reason) => {
                    failed += 1;
                    warn!(
                        "transient delivery failure to {}: {reason}",
                        subscription.endpoint
                    );
                }
            }
        }

        let report = DispatchReport::from_counts(delivered, gone, failed);
        debug!("{} push to user {user_id}: {report:?}", notification.kind());
        Ok(report)
    }

    async fn deliver(&self, payload: &[u8], subscription: &Subscription) -> DeliveryOutcome {
        match time::timeout(
            self.delivery_timeout,
            self.transport.send(payload, subscription),
        )
        .await
        {
            Ok(outcome) => outcome,
            Err(_) => DeliveryOutcome::Transient(format!(
                "timed out after {:?}",
                self.delivery_timeout
            )),
        }
    }

    async fn prune(&self, subscription: &Subscription) {
        let endpoint = subscription.endpoint.clone();
        let keys = subscription.keys.clone();
        let removed =
            with_database(&self.db_path, move |db| db.delete_subscription(&endpoint, &keys)).await;

        match removed {
            Ok(true) => info!("removed dead subscription {}", subscription.endpoint),
            Ok(false) => debug!(
                "subscription {} changed since delivery, keeping it",
                subscription.endpoint
            ),
            Err(e) => warn!(
                "failed to remove dead subscription {}: {e}",
                subscription.endpoint
            ),
        }
    }
}
