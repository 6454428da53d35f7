//! Subscription registry operations for the Tracker.

use log::info;

use super::{with_database, Tracker};
use crate::{
    display::Subscriptions,
    error::Result,
    models::Subscription,
    params::{Subscribe, UserId},
};

impl Tracker {
    /// Registers a device endpoint for a user. Subscribing again with the same
    /// endpoint replaces the previous record.
    pub async fn subscribe(&self, params: &Subscribe) -> Result<Subscription> {
        params.validate()?;

        let user_id = params.user_id.clone();
        let endpoint = params.endpoint.clone();
        let keys = params.keys.clone();

        let subscription = with_database(&self.db_path, move |db| {
            db.upsert_subscription(&user_id, &endpoint, &keys)
        })
        .await?;

        info!("registered push endpoint for user {}", subscription.user_id);
        Ok(subscription)
    }

    /// Lists the endpoints registered for a user.
    pub async fn list_subscriptions(&self, params: &UserId) -> Result<Subscriptions> {
        let user_id = params.user_id.clone();
        let subscriptions =
            with_database(&self.db_path, move |db| db.subscriptions_for_user(&user_id)).await?;
        Ok(Subscriptions(subscriptions))
    }
}
