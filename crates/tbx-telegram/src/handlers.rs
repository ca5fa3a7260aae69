//! Update handlers: parse the incoming message and dispatch to the relay.
//!
//! Only text messages are handled; everything else is ignored. A handler
//! failure is logged and answered with the generic error reply — it never
//! takes the process down.

use std::sync::Arc;

use teloxide::{prelude::*, types::Message};
use tracing::error;

use tbx_core::{
    domain::{ChatId, UserId},
    texts,
};

use crate::router::AppState;

/// Telegram may send `/cmd@botname arg1 ...`; returns the lowercased command
/// name and its argument string. `None` for non-command text.
fn parse_command(text: &str) -> Option<(String, String)> {
    if !text.starts_with('/') {
        return None;
    }

    let mut parts = text.trim().splitn(2, char::is_whitespace);
    let first = parts.next().unwrap_or("").trim();
    let rest = parts.next().unwrap_or("").trim().to_string();

    let cmd = first
        .trim_start_matches('/')
        .split('@')
        .next()
        .unwrap_or("")
        .to_lowercase();

    Some((cmd, rest))
}

pub async fn handle_message(_bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(user) = msg.from() else {
        return Ok(());
    };
    let Some(text) = msg.text() else {
        return Ok(());
    };

    let chat = ChatId(msg.chat.id.0);
    let user_id = UserId(user.id.0 as i64);

    let outcome = match parse_command(text).as_ref().map(|(c, a)| (c.as_str(), a)) {
        Some(("start", _)) => state.relay.handle_start(chat, user_id).await,
        Some(("stat", _)) => state.relay.handle_stat(chat).await,
        Some(("broad", args)) if !args.is_empty() => {
            state.relay.handle_broadcast(chat, user_id, args).await
        }
        // `/broad` with no message text does nothing, matching the observed
        // command shape (`/broad <text>`).
        Some(("broad", _)) => Ok(()),
        // Unknown commands fall through the normal pipeline and get the
        // "not a TeraBox link" treatment.
        _ => state.relay.handle_text(chat, user_id, text).await,
    };

    if let Err(e) = outcome {
        error!(chat_id = chat.0, error = %e, "handler failed");
        let _ = state
            .messenger
            .send_html(chat, texts::GENERIC_ERROR, None)
            .await;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_commands() {
        assert_eq!(
            parse_command("/start"),
            Some(("start".to_string(), String::new()))
        );
        assert_eq!(
            parse_command("/broad hello everyone"),
            Some(("broad".to_string(), "hello everyone".to_string()))
        );
    }

    #[test]
    fn parses_botname_suffix() {
        assert_eq!(
            parse_command("/stat@terabox_bot"),
            Some(("stat".to_string(), String::new()))
        );
        assert_eq!(
            parse_command("/BROAD@terabox_bot hi"),
            Some(("broad".to_string(), "hi".to_string()))
        );
    }

    #[test]
    fn non_commands_are_none() {
        assert_eq!(parse_command("https://terabox.com/s/abc"), None);
        assert_eq!(parse_command("hello /start"), None);
    }
}
