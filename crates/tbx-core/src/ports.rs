use async_trait::async_trait;

use crate::{
    domain::{ChatId, LinkRecord, MemberStatus, MessageRef, UserId},
    Result,
};

/// Inline keyboard of URL buttons, row-major.
#[derive(Clone, Debug, Default)]
pub struct InlineKeyboard {
    pub rows: Vec<Vec<UrlButton>>,
}

#[derive(Clone, Debug)]
pub struct UrlButton {
    pub label: String,
    pub url: String,
}

impl InlineKeyboard {
    /// One button per row, which is the only layout this bot uses.
    pub fn one_per_row<I, L, U>(buttons: I) -> Self
    where
        I: IntoIterator<Item = (L, U)>,
        L: Into<String>,
        U: Into<String>,
    {
        Self {
            rows: buttons
                .into_iter()
                .map(|(label, url)| {
                    vec![UrlButton {
                        label: label.into(),
                        url: url.into(),
                    }]
                })
                .collect(),
        }
    }
}

/// Outbound messaging port.
///
/// Telegram is the first implementation; all text is HTML parse mode.
#[async_trait]
pub trait MessagingPort: Send + Sync {
    async fn send_html(
        &self,
        chat_id: ChatId,
        html: &str,
        keyboard: Option<InlineKeyboard>,
    ) -> Result<MessageRef>;

    /// Send a photo by URL with an HTML caption.
    async fn send_photo_url(
        &self,
        chat_id: ChatId,
        photo_url: &str,
        caption: &str,
        keyboard: Option<InlineKeyboard>,
    ) -> Result<MessageRef>;

    async fn send_sticker(&self, chat_id: ChatId, file_id: &str) -> Result<MessageRef>;

    async fn edit_html(
        &self,
        msg: MessageRef,
        html: &str,
        keyboard: Option<InlineKeyboard>,
    ) -> Result<()>;

    async fn delete_message(&self, msg: MessageRef) -> Result<()>;
}

/// Live membership query against a channel.
#[async_trait]
pub trait MembershipPort: Send + Sync {
    async fn member_status(&self, channel: &str, user: UserId) -> Result<MemberStatus>;
}

/// One call to the external resolution service.
///
/// Returns the direct access URL; any non-success outcome (transport failure,
/// non-2xx, malformed body) is `Error::Resolve`. No retries.
#[async_trait]
pub trait LinkResolverPort: Send + Sync {
    async fn resolve(&self, link: &str) -> Result<String>;
}

/// Durable per-user link history.
#[async_trait]
pub trait LinkStorePort: Send + Sync {
    /// Look up a previously resolved link by its exact original text.
    async fn find(&self, user: UserId, original: &str) -> Result<Option<LinkRecord>>;

    /// Append a record to the user's history, creating the user on first use.
    ///
    /// Uniqueness of `original` is enforced here: returns `false` (and stores
    /// nothing) when a record with the same `original` already exists. The
    /// check and the insert are one atomic operation in the store.
    async fn append(&self, user: UserId, record: LinkRecord) -> Result<bool>;

    /// Number of distinct users with at least one stored record.
    async fn count_users(&self) -> Result<u64>;

    /// Total number of records across all users.
    async fn count_links(&self) -> Result<u64>;

    /// All known user ids, for broadcast.
    async fn user_ids(&self) -> Result<Vec<UserId>>;
}
