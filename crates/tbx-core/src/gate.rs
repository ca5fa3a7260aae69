//! Subscription gate: "must be in the updates channel" check.

use std::sync::Arc;

use tracing::warn;

use crate::{
    domain::UserId,
    ports::MembershipPort,
};

/// Wraps a [`MembershipPort`] with the fixed gating channel and the
/// fail-closed policy.
pub struct SubscriptionGate {
    channel: String,
    membership: Arc<dyn MembershipPort>,
}

impl SubscriptionGate {
    pub fn new(channel: impl Into<String>, membership: Arc<dyn MembershipPort>) -> Self {
        Self {
            channel: channel.into(),
            membership,
        }
    }

    /// Live query, never cached. Any query failure counts as not subscribed:
    /// an error in checking access must never grant access.
    pub async fn is_subscribed(&self, user: UserId) -> bool {
        match self.membership.member_status(&self.channel, user).await {
            Ok(status) => status.grants_access(),
            Err(e) => {
                warn!(user_id = user.0, error = %e, "membership query failed, treating as not subscribed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domain::MemberStatus, Error, Result};
    use async_trait::async_trait;

    struct FixedMembership(Result<MemberStatus>);

    #[async_trait]
    impl MembershipPort for FixedMembership {
        async fn member_status(&self, _channel: &str, _user: UserId) -> Result<MemberStatus> {
            match &self.0 {
                Ok(s) => Ok(*s),
                Err(_) => Err(Error::Messaging("query failed".to_string())),
            }
        }
    }

    fn gate(outcome: Result<MemberStatus>) -> SubscriptionGate {
        SubscriptionGate::new("@updates", Arc::new(FixedMembership(outcome)))
    }

    #[tokio::test]
    async fn member_admin_creator_grant_access() {
        for status in [
            MemberStatus::Member,
            MemberStatus::Administrator,
            MemberStatus::Creator,
        ] {
            assert!(gate(Ok(status)).is_subscribed(UserId(1)).await);
        }
    }

    #[tokio::test]
    async fn other_statuses_deny_access() {
        for status in [
            MemberStatus::Restricted,
            MemberStatus::Left,
            MemberStatus::Banned,
            MemberStatus::Unknown,
        ] {
            assert!(!gate(Ok(status)).is_subscribed(UserId(1)).await);
        }
    }

    #[tokio::test]
    async fn query_failure_fails_closed() {
        let g = gate(Err(Error::Messaging("boom".to_string())));
        assert!(!g.is_subscribed(UserId(1)).await);
    }
}
