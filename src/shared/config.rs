//! Application configuration. Bot token, storage path, poll timings.

use serde::Deserialize;

/// Long-poll window the API holds a getUpdates request open for.
pub const DEFAULT_POLL_TIMEOUT_SECS: u64 = 100;

/// Pause between loop iterations so a fast-returning gateway does not
/// turn the loop into a busy spin.
pub const DEFAULT_IDLE_PAUSE_MS: u64 = 2000;

/// Delay before retrying the same cursor after a transport failure.
pub const DEFAULT_RETRY_DELAY_MS: u64 = 2000;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Bot token from @BotFather. Read from TG_NOTES_BOT_TOKEN.
    pub bot_token: Option<String>,

    /// SQLite database path. Read from TG_NOTES_DB_PATH. Default ./notes.db.
    #[serde(default)]
    pub db_path: Option<String>,

    /// Override for the Bot API base URL (self-hosted servers, tests).
    /// Read from TG_NOTES_API_URL. Default https://api.telegram.org.
    #[serde(default)]
    pub api_url: Option<String>,

    /// Long-poll timeout in seconds. Read from TG_NOTES_POLL_TIMEOUT_SECS.
    #[serde(default)]
    pub poll_timeout_secs: Option<u64>,

    /// Pause between poll iterations in ms. Read from TG_NOTES_IDLE_PAUSE_MS.
    #[serde(default)]
    pub idle_pause_ms: Option<u64>,

    /// Retry delay after a transport failure in ms. Read from TG_NOTES_RETRY_DELAY_MS.
    #[serde(default)]
    pub retry_delay_ms: Option<u64>,

    /// Run against an in-memory store instead of SQLite (notes are lost on
    /// exit). Read from TG_NOTES_EPHEMERAL.
    #[serde(default)]
    pub ephemeral: Option<bool>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("TG_NOTES"));
        if let Ok(path) = std::env::var("TG_NOTES_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        let cfg: Self = c.build()?.try_deserialize()?;
        Ok(cfg)
    }

    /// Bot token from config or TG_NOTES_BOT_TOKEN env.
    pub fn bot_token(&self) -> Option<String> {
        self.bot_token
            .clone()
            .or_else(|| std::env::var("TG_NOTES_BOT_TOKEN").ok())
    }

    /// Database path. Defaults to ./notes.db if unset.
    pub fn db_path_or_default(&self) -> String {
        self.db_path
            .clone()
            .unwrap_or_else(|| "./notes.db".to_string())
    }

    /// Bot API base URL. Defaults to the public Telegram endpoint.
    pub fn api_url_or_default(&self) -> String {
        self.api_url
            .clone()
            .unwrap_or_else(|| "https://api.telegram.org".to_string())
    }

    /// Long-poll timeout in seconds. Defaults to 100 if unset.
    pub fn poll_timeout_secs_or_default(&self) -> u64 {
        self.poll_timeout_secs.unwrap_or(DEFAULT_POLL_TIMEOUT_SECS)
    }

    /// Idle pause between iterations in ms. Defaults to 2000 if unset.
    pub fn idle_pause_ms_or_default(&self) -> u64 {
        self.idle_pause_ms.unwrap_or(DEFAULT_IDLE_PAUSE_MS)
    }

    /// Retry delay after transport failure in ms. Defaults to 2000 if unset.
    pub fn retry_delay_ms_or_default(&self) -> u64 {
        self.retry_delay_ms.unwrap_or(DEFAULT_RETRY_DELAY_MS)
    }

    /// True when the in-memory store was requested.
    pub fn is_ephemeral(&self) -> bool {
        self.ephemeral.unwrap_or(false)
    }
}
