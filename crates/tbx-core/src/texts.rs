//! User-facing message copy, photo URLs, sticker id and inline keyboards.
//!
//! All text is Telegram HTML parse mode. Failure copy is deliberately generic:
//! no error detail ever reaches end users.

use crate::ports::InlineKeyboard;

// Channels / links
pub const UPDATES_CHANNEL_URL: &str = "https://t.me/Opleech_WD";
pub const HOW_TO_USE_URL: &str = "https://t.me/WOODcraft_Mirror_Zone/43";
pub const READ_MESSAGE_URL: &str = "https://t.me/WOODcraft_Mirror_Zone/44";
pub const HELP_GROUP_URL: &str = "https://t.me/+XfmrBSzTyRFlZTI9";

// Media
pub const SUBSCRIBE_PHOTO_URL: &str = "https://i.imgur.com/6cUMqLc.jpeg";
pub const READY_PHOTO_URL: &str = "https://i.imgur.com/rzorSxY.jpeg";
pub const STATS_PHOTO_URL: &str = "https://i.imgur.com/H91ehBY.jpeg";
pub const NOT_SUBSCRIBED_STICKER_ID: &str =
    "CAACAgIAAxkBAAEM0yZm6Xz0hczRb-S5YkRIck7cjvQyNQACCh0AAsGoIEkIjTf-YvDReDYE";

// /start
pub const WELCOME_BACK_CAPTION: &str =
    "🎉 <b>Welcome back!</b> 😊\n\n<b>Send a TeraBox link to watch or download your video.</b> 🍿";

pub const SUBSCRIBE_CAPTION: &str = "👋 <b>Welcome to TeraBox Video Player Bot!</b>\n\n\
<b>Paste your TeraBox link and watch your video instantly—no TeraBox app needed!</b>\n\n\
Please subscribe to our <a href=\"https://t.me/Opleech_WD\">Updates Channel</a> \
and click /start again to begin using the bot.";

// Link flow
pub const PROCESSING: &str = "🔄 <b>Processing your link...</b>";
pub const READY_CAPTION: &str =
    "✅ <b>Your video is ready!</b>\n\n📥 <b>Click the button below to view or download it.</b>";
pub const NOT_A_TERABOX_LINK: &str = "❌ <b>That is not a valid TeraBox link.</b>";
pub const RESOLUTION_FAILED: &str =
    "❌ <b>There was an error processing your link. Please try again later.</b>";

// Failures
pub const GENERIC_ERROR: &str = "❌ <b>An error occurred. Please try again later.</b>";
pub const STATS_ERROR: &str =
    "❌ <b>An error occurred while retrieving statistics. Please try again later.</b>";
pub const BROADCAST_ERROR: &str =
    "❌ <b>An error occurred while sending the broadcast message.</b>";

// /broad
pub const BROADCAST_DENIED: &str = "❌ <b>You do not have permission to use this command.</b>";
pub const BROADCAST_DONE: &str = "✅ <b>Broadcast message sent to all users.</b>";

pub fn broadcast_body(text: &str) -> String {
    format!("📢 <b>Broadcast Message:</b>\n\n{text}")
}

// /stat
pub fn stats_caption(users: u64, links: u64) -> String {
    format!(
        "📊 <b>Current Bot Stats:</b>\n\n👥 <b>Total Users:</b> {users}\n🔗 <b>Links Processed:</b> {links}"
    )
}

pub fn subscribe_keyboard() -> InlineKeyboard {
    InlineKeyboard::one_per_row([
        ("〇 𝐉𝐨𝐢𝐧 𝐂𝐡𝐚𝐧𝐧𝐞𝐥 𝐓𝐨 𝐔𝐬𝐞 𝐌𝐞 〇", UPDATES_CHANNEL_URL),
        ("🔗 How to use Bot 🔗", HOW_TO_USE_URL),
    ])
}

pub fn welcome_back_keyboard() -> InlineKeyboard {
    InlineKeyboard::one_per_row([("✨ Any Help? ✨", HELP_GROUP_URL)])
}

pub fn stats_keyboard() -> InlineKeyboard {
    InlineKeyboard::one_per_row([("✨ Dear my friend✨", "tg://settings")])
}

pub fn rejection_keyboard() -> InlineKeyboard {
    InlineKeyboard::one_per_row([("✨ Read the message ✨", READ_MESSAGE_URL)])
}

pub fn ready_keyboard(resolved_url: &str) -> InlineKeyboard {
    InlineKeyboard::one_per_row([("ᢱ Watch / Download ⎙", resolved_url)])
}

pub fn success_keyboard(resolved_url: &str) -> InlineKeyboard {
    InlineKeyboard::one_per_row([
        ("ᢱ Watch/Download ⎙", resolved_url),
        ("✨ Read the message ✨", READ_MESSAGE_URL),
    ])
}
