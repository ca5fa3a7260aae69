use std::{env, fs, path::Path, time::Duration};

use crate::{errors::Error, Result};

/// Production resolution endpoint. Overridable with `RESOLVER_API_URL`.
const DEFAULT_RESOLVER_API_URL: &str = "https://mavimods.serv00.net/Mavialt";
/// Key for the production deployment. Overridable with `RESOLVER_API_KEY`.
const DEFAULT_RESOLVER_API_KEY: &str = "0b010c132e2cbd862cbd8a6ae430dd51d3a0d5ea";

/// Typed configuration, loaded from the environment (with `.env` support).
///
/// The four required variables fail fast at startup; everything else has a
/// production default.
#[derive(Clone, Debug)]
pub struct Config {
    // Required
    pub telegram_bot_token: String,
    pub owner_id: i64,
    pub gate_channel: String,
    pub mongodb_uri: String,

    // Optional
    pub mongodb_db: String,
    pub resolver_api_url: String,
    pub resolver_api_key: String,
    pub http_port: u16,
    pub sticker_ttl: Duration,
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));

        let telegram_bot_token = required("TELEGRAM_BOT_TOKEN")?;
        let owner_id = required("BOT_OWNER_ID")?
            .parse::<i64>()
            .map_err(|_| Error::Config("BOT_OWNER_ID must be a numeric chat id".to_string()))?;
        let gate_channel = required("GATE_CHANNEL")?;
        let mongodb_uri = required("MONGODB_URI")?;

        let mongodb_db = env_str("MONGODB_DB").unwrap_or_else(|| "terabox_bot".to_string());
        let resolver_api_url =
            env_str("RESOLVER_API_URL").unwrap_or_else(|| DEFAULT_RESOLVER_API_URL.to_string());
        let resolver_api_key =
            env_str("RESOLVER_API_KEY").unwrap_or_else(|| DEFAULT_RESOLVER_API_KEY.to_string());
        let http_port = env_u16("PORT").unwrap_or(3000);
        let sticker_ttl = Duration::from_secs(env_u64("STICKER_TTL_SECS").unwrap_or(30));

        Ok(Self {
            telegram_bot_token,
            owner_id,
            gate_channel,
            mongodb_uri,
            mongodb_db,
            resolver_api_url,
            resolver_api_key,
            http_port,
            sticker_ttl,
        })
    }
}

fn required(key: &str) -> Result<String> {
    match env_str(key).map(|s| s.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(Error::Config(format!(
            "{key} environment variable is required"
        ))),
    }
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn env_u64(key: &str) -> Option<u64> {
    env_str(key).and_then(|s| s.trim().parse::<u64>().ok())
}

fn env_u16(key: &str) -> Option<u16> {
    env_str(key).and_then(|s| s.trim().parse::<u16>().ok())
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }
        if env::var_os(key).is_some() {
            continue; // do not override existing env
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        env::set_var(key, val);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_rejects_missing_and_blank() {
        env::remove_var("TBX_TEST_MISSING");
        assert!(required("TBX_TEST_MISSING").is_err());

        env::set_var("TBX_TEST_BLANK", "   ");
        assert!(required("TBX_TEST_BLANK").is_err());
        env::remove_var("TBX_TEST_BLANK");
    }

    #[test]
    fn dotenv_parses_comments_quotes_and_respects_existing_env() {
        let path = std::path::PathBuf::from(format!("/tmp/tbx-dotenv-{}", std::process::id()));
        fs::write(
            &path,
            "# comment\nTBX_TEST_A=plain\nTBX_TEST_B=\"quoted\"\nTBX_TEST_C=kept\n",
        )
        .unwrap();

        env::remove_var("TBX_TEST_A");
        env::remove_var("TBX_TEST_B");
        env::set_var("TBX_TEST_C", "preexisting");

        load_dotenv_if_present(&path);

        assert_eq!(env::var("TBX_TEST_A").unwrap(), "plain");
        assert_eq!(env::var("TBX_TEST_B").unwrap(), "quoted");
        assert_eq!(env::var("TBX_TEST_C").unwrap(), "preexisting");

        env::remove_var("TBX_TEST_A");
        env::remove_var("TBX_TEST_B");
        env::remove_var("TBX_TEST_C");
        let _ = fs::remove_file(&path);
    }
}
