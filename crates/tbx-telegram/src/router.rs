use std::sync::Arc;

use teloxide::{dispatching::Dispatcher, dptree, prelude::*};
use tracing::info;

use tbx_core::{
    config::Config,
    ports::{LinkResolverPort, LinkStorePort, MembershipPort, MessagingPort},
    relay::Relay,
};

use crate::handlers;
use crate::TelegramMessenger;

#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<Config>,
    pub relay: Arc<Relay>,
    pub messenger: Arc<dyn MessagingPort>,
}

/// Build the bot, wire the relay to its Telegram-backed ports and run long
/// polling until shutdown.
pub async fn run_polling(
    cfg: Arc<Config>,
    store: Arc<dyn LinkStorePort>,
    resolver: Arc<dyn LinkResolverPort>,
) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.telegram_bot_token.clone());

    if let Ok(me) = bot.get_me().await {
        info!(username = me.username(), "bot started");
    }
    info!(channel = %cfg.gate_channel, "gating on channel membership");

    let telegram = Arc::new(TelegramMessenger::new(bot.clone()));
    let messenger: Arc<dyn MessagingPort> = telegram.clone();
    let membership: Arc<dyn MembershipPort> = telegram;

    let relay = Arc::new(Relay::new(
        cfg.clone(),
        messenger.clone(),
        membership,
        store,
        resolver,
    ));

    let state = Arc::new(AppState {
        cfg,
        relay,
        messenger,
    });

    let handler =
        dptree::entry().branch(Update::filter_message().endpoint(handlers::handle_message));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .build()
        .dispatch()
        .await;

    Ok(())
}
