use chrono::{DateTime, Utc};

/// Telegram user id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

/// Telegram chat id (numeric). For private chats this equals the user id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChatId(pub i64);

/// Telegram message id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageId(pub i32);

/// A stable reference to a sent message (for edits and deletions).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageRef {
    pub chat_id: ChatId,
    pub message_id: MessageId,
}

/// One memoized resolution: the exact text the user sent and the direct URL
/// the resolver returned for it. Immutable once stored; `original` is unique
/// within a user's history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkRecord {
    pub original: String,
    pub resolved: String,
    pub resolved_at: DateTime<Utc>,
}

impl LinkRecord {
    pub fn new(original: impl Into<String>, resolved: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            resolved: resolved.into(),
            resolved_at: Utc::now(),
        }
    }
}

/// Membership status in the gating channel, as reported by the transport.
///
/// Ephemeral: computed fresh on every gated interaction, never cached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemberStatus {
    Creator,
    Administrator,
    Member,
    Restricted,
    Left,
    Banned,
    Unknown,
}

impl MemberStatus {
    /// The statuses that count as "subscribed" for gating purposes.
    pub fn grants_access(self) -> bool {
        matches!(
            self,
            MemberStatus::Creator | MemberStatus::Administrator | MemberStatus::Member
        )
    }
}
