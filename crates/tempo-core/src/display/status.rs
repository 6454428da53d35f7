//! One-line confirmations for operations that have no richer result view.

use std::fmt;

use crate::{models::Subscription, tracker::DispatchReport};

/// Confirmation printed after a registry change or a diagnostic push.
pub enum Confirmation<'a> {
    Subscribed(&'a Subscription),
    TestPush(&'a DispatchReport),
}

impl fmt::Display for Confirmation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Subscribed(subscription) => writeln!(
                f,
                "Success: Registered {} for user {}",
                subscription.endpoint, subscription.user_id
            ),
            Self::TestPush(report) => writeln!(f, "Success: Test notification {report}"),
        }
    }
}
