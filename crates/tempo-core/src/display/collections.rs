//! Collection wrapper types.

use std::fmt;

use crate::models::Subscription;

/// Newtype wrapper for displaying the subscriptions of a user.
pub struct Subscriptions(pub Vec<Subscription>);

impl Subscriptions {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of subscriptions in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over the subscriptions.
    pub fn iter(&self) -> std::slice::Iter<'_, Subscription> {
        self.0.iter()
    }
}

impl fmt::Display for Subscriptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No push subscriptions registered.");
        }
        for subscription in &self.0 {
            write!(f, "{subscription}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::models::PushKeys;

    #[test]
    fn test_subscriptions_display() {
        assert!(Subscriptions(vec![])
            .to_string()
            .contains("No push subscriptions"));

        let subs = Subscriptions(vec![Subscription {
            user_id: "u1".to_string(),
            endpoint: "https://push.example.com/a".to_string(),
            keys: PushKeys::default(),
            created_at: Timestamp::UNIX_EPOCH,
        }]);
        assert_eq!(subs.len(), 1);
        assert!(subs.to_string().contains("- https://push.example.com/a"));
    }
}
