//! Push subscription registry queries.

use jiff::Timestamp;
use rusqlite::{params, types::Type};

use crate::{
    error::{DatabaseResultExt, Result},
    models::{PushKeys, Subscription},
};

const UPSERT_SUBSCRIPTION_SQL: &str = "INSERT INTO subscriptions (endpoint, user_id, p256dh_key, auth_key, created_at) VALUES (?1, ?2, ?3, ?4, ?5) ON CONFLICT(endpoint) DO UPDATE SET user_id = excluded.user_id, p256dh_key = excluded.p256dh_key, auth_key = excluded.auth_key, created_at = excluded.created_at";
const SELECT_SUBSCRIPTIONS_BY_USER_SQL: &str = "SELECT user_id, endpoint, p256dh_key, auth_key, created_at FROM subscriptions WHERE user_id = ?1 ORDER BY created_at, endpoint";
const DELETE_SUBSCRIPTION_SQL: &str =
    "DELETE FROM subscriptions WHERE endpoint = ?1 AND p256dh_key = ?2 AND auth_key = ?3";

impl super::Database {
    /// Helper function to construct a Subscription from a database row
    fn build_subscription_from_row(row: &rusqlite::Row) -> rusqlite::Result<Subscription> {
        Ok(Subscription {
            user_id: row.get(0)?,
            endpoint: row.get(1)?,
            keys: PushKeys {
                p256dh: row.get(2)?,
                auth: row.get(3)?,
            },
            created_at: row.get::<_, String>(4)?.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e))
            })?,
        })
    }

    /// Registers an endpoint for a user, replacing any record with the same
    /// endpoint.
    pub fn upsert_subscription(
        &self,
        user_id: &str,
        endpoint: &str,
        keys: &PushKeys,
    ) -> Result<Subscription> {
        let now = Timestamp::now();

        self.connection
            .execute(
                UPSERT_SUBSCRIPTION_SQL,
                params![endpoint, user_id, &keys.p256dh, &keys.auth, now.to_string()],
            )
            .db_context("Failed to upsert subscription")?;

        Ok(Subscription {
            user_id: user_id.to_string(),
            endpoint: endpoint.to_string(),
            keys: keys.clone(),
            created_at: now,
        })
    }

    /// Lists every endpoint registered for a user, oldest first.
    pub fn subscriptions_for_user(&self, user_id: &str) -> Result<Vec<Subscription>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_SUBSCRIPTIONS_BY_USER_SQL)
            .db_context("Failed to prepare subscription query")?;

        let subscriptions = stmt
            .query_map(params![user_id], Self::build_subscription_from_row)
            .db_context("Failed to query subscriptions")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read subscription row")?;

        Ok(subscriptions)
    }

    /// Deletes a subscription, but only while it still carries `keys`.
    ///
    /// Returns whether a record was removed. A device that re-subscribed with
    /// new keys after the failed delivery keeps its registration.
    pub fn delete_subscription(&self, endpoint: &str, keys: &PushKeys) -> Result<bool> {
        let deleted = self
            .connection
            .execute(
                DELETE_SUBSCRIPTION_SQL,
                params![endpoint, &keys.p256dh, &keys.auth],
            )
            .db_context("Failed to delete subscription")?;
        Ok(deleted > 0)
    }
}
