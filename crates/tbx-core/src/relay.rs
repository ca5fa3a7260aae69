//! The conversation relay: one method per inbound event kind.
//!
//! Events are independent; there is no per-user session state. Every branch
//! terminates in exactly one outbound reply (or one edit of the interim
//! "processing" message), and no event triggers more than one resolution
//! attempt.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::{
    config::Config,
    domain::{ChatId, LinkRecord, UserId},
    gate::SubscriptionGate,
    links::is_terabox_link,
    ports::{LinkResolverPort, LinkStorePort, MembershipPort, MessagingPort},
    texts, Result,
};

pub struct Relay {
    cfg: Arc<Config>,
    gate: SubscriptionGate,
    store: Arc<dyn LinkStorePort>,
    resolver: Arc<dyn LinkResolverPort>,
    messenger: Arc<dyn MessagingPort>,
}

impl Relay {
    pub fn new(
        cfg: Arc<Config>,
        messenger: Arc<dyn MessagingPort>,
        membership: Arc<dyn MembershipPort>,
        store: Arc<dyn LinkStorePort>,
        resolver: Arc<dyn LinkResolverPort>,
    ) -> Self {
        let gate = SubscriptionGate::new(cfg.gate_channel.clone(), membership);
        Self {
            cfg,
            gate,
            store,
            resolver,
            messenger,
        }
    }

    /// `/start`: welcome back, or prompt to subscribe.
    pub async fn handle_start(&self, chat: ChatId, user: UserId) -> Result<()> {
        if self.gate.is_subscribed(user).await {
            self.messenger
                .send_photo_url(
                    chat,
                    texts::READY_PHOTO_URL,
                    texts::WELCOME_BACK_CAPTION,
                    Some(texts::welcome_back_keyboard()),
                )
                .await?;
            return Ok(());
        }

        self.send_transient_sticker(chat).await;
        self.messenger
            .send_photo_url(
                chat,
                texts::SUBSCRIBE_PHOTO_URL,
                texts::SUBSCRIBE_CAPTION,
                Some(texts::subscribe_keyboard()),
            )
            .await?;
        Ok(())
    }

    /// `/stat`: aggregate counts. Open to all users.
    pub async fn handle_stat(&self, chat: ChatId) -> Result<()> {
        let users = self.store.count_users().await;
        let links = self.store.count_links().await;

        match (users, links) {
            (Ok(users), Ok(links)) => {
                self.messenger
                    .send_photo_url(
                        chat,
                        texts::STATS_PHOTO_URL,
                        &texts::stats_caption(users, links),
                        Some(texts::stats_keyboard()),
                    )
                    .await?;
            }
            (users, links) => {
                if let Err(e) = users.and(links) {
                    error!(error = %e, "failed to read stats from store");
                }
                self.messenger
                    .send_html(chat, texts::STATS_ERROR, None)
                    .await?;
            }
        }
        Ok(())
    }

    /// `/broad <text>`: owner-only broadcast to every known user.
    ///
    /// Per-recipient failures are logged and skipped; the sender gets exactly
    /// one completion ack regardless of how many deliveries failed.
    pub async fn handle_broadcast(&self, chat: ChatId, user: UserId, text: &str) -> Result<()> {
        if user.0 != self.cfg.owner_id {
            self.messenger
                .send_html(chat, texts::BROADCAST_DENIED, None)
                .await?;
            return Ok(());
        }

        let recipients = match self.store.user_ids().await {
            Ok(ids) => ids,
            Err(e) => {
                error!(error = %e, "failed to enumerate broadcast recipients");
                self.messenger
                    .send_html(chat, texts::BROADCAST_ERROR, None)
                    .await?;
                return Ok(());
            }
        };

        let body = texts::broadcast_body(text);
        let mut failed = 0usize;
        for recipient in &recipients {
            if let Err(e) = self
                .messenger
                .send_html(ChatId(recipient.0), &body, None)
                .await
            {
                warn!(user_id = recipient.0, error = %e, "broadcast delivery failed");
                failed += 1;
            }
        }
        info!(
            recipients = recipients.len(),
            failed, "broadcast finished"
        );

        self.messenger
            .send_html(chat, texts::BROADCAST_DONE, None)
            .await?;
        Ok(())
    }

    /// Plain message: the gated link-resolution pipeline.
    pub async fn handle_text(&self, chat: ChatId, user: UserId, text: &str) -> Result<()> {
        if !self.gate.is_subscribed(user).await {
            self.send_transient_sticker(chat).await;
            return Ok(());
        }

        if !is_terabox_link(text) {
            self.messenger
                .send_html(
                    chat,
                    texts::NOT_A_TERABOX_LINK,
                    Some(texts::rejection_keyboard()),
                )
                .await?;
            return Ok(());
        }

        // Memoized? Reply from the store, no resolver call.
        match self.store.find(user, text).await {
            Ok(Some(record)) => {
                self.messenger
                    .send_photo_url(
                        chat,
                        texts::READY_PHOTO_URL,
                        texts::READY_CAPTION,
                        Some(texts::ready_keyboard(&record.resolved)),
                    )
                    .await?;
                return Ok(());
            }
            Ok(None) => {}
            Err(e) => {
                error!(user_id = user.0, error = %e, "store lookup failed");
                self.messenger
                    .send_html(chat, texts::GENERIC_ERROR, None)
                    .await?;
                return Ok(());
            }
        }

        let interim = self
            .messenger
            .send_html(chat, texts::PROCESSING, None)
            .await?;

        let resolved = match self.resolver.resolve(text).await {
            Ok(url) => url,
            Err(e) => {
                warn!(user_id = user.0, error = %e, "link resolution failed");
                let _ = self
                    .messenger
                    .edit_html(interim, texts::RESOLUTION_FAILED, None)
                    .await;
                return Ok(());
            }
        };

        // Commit before reporting success. On store failure the resolved URL
        // is dropped; the user may retry the same link later.
        match self.store.append(user, LinkRecord::new(text, resolved.clone())).await {
            Ok(inserted) => {
                if !inserted {
                    debug!(user_id = user.0, "record already present, concurrent resolution");
                }
            }
            Err(e) => {
                error!(user_id = user.0, error = %e, "store append failed");
                let _ = self
                    .messenger
                    .edit_html(interim, texts::RESOLUTION_FAILED, None)
                    .await;
                return Ok(());
            }
        }

        // Best-effort decorative photo ahead of the success edit.
        if let Err(e) = self
            .messenger
            .send_photo_url(chat, texts::READY_PHOTO_URL, "", None)
            .await
        {
            warn!(chat_id = chat.0, error = %e, "failed to send ready photo");
        }

        self.messenger
            .edit_html(
                interim,
                texts::READY_CAPTION,
                Some(texts::success_keyboard(&resolved)),
            )
            .await?;
        Ok(())
    }

    /// Send the "not subscribed" sticker and delete it after the configured
    /// delay. Fire-and-forget: the deletion task's failure is logged only.
    async fn send_transient_sticker(&self, chat: ChatId) {
        let sticker = match self
            .messenger
            .send_sticker(chat, texts::NOT_SUBSCRIBED_STICKER_ID)
            .await
        {
            Ok(msg) => msg,
            Err(e) => {
                warn!(chat_id = chat.0, error = %e, "failed to send sticker");
                return;
            }
        };

        let messenger = self.messenger.clone();
        let ttl = self.cfg.sticker_ttl;
        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            if let Err(e) = messenger.delete_message(sticker).await {
                warn!(chat_id = sticker.chat_id.0, error = %e, "failed to delete sticker message");
            }
        });
    }
}
