//! Telegram Bot API adapter. Implements BotGateway over HTTPS with reqwest.
//!
//! Wire structs stay private to this module; responses are mapped into
//! domain types before crossing the port. Updates without a text message
//! map to `message: None` so the loop can skip them.

use crate::domain::{DomainError, IncomingMessage, OutgoingMessage, Update, UpdatesPage};
use crate::ports::BotGateway;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Headroom added to the long-poll window for the HTTP request timeout, so
/// the client does not cut a poll short that the server is still holding.
const REQUEST_TIMEOUT_HEADROOM_SECS: u64 = 10;

#[derive(Debug, Deserialize)]
struct WireResponse {
    ok: bool,
    #[serde(default)]
    result: Vec<WireUpdate>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireUpdate {
    update_id: i64,
    #[serde(default)]
    message: Option<WireMessage>,
}

#[derive(Debug, Deserialize)]
struct WireMessage {
    #[serde(default)]
    text: Option<String>,
    chat: WireChat,
}

#[derive(Debug, Deserialize)]
struct WireChat {
    id: i64,
}

fn map_update(wire: WireUpdate) -> Update {
    let message = wire.message.and_then(|m| {
        m.text.map(|text| IncomingMessage {
            chat_id: m.chat.id,
            text,
        })
    });
    Update {
        update_id: wire.update_id,
        message,
    }
}

/// Bot API gateway. Base URL is `{api_url}/bot{token}`.
pub struct BotApiGateway {
    client: Client,
    base_url: String,
}

impl BotApiGateway {
    /// Create a gateway for the given API host and bot token.
    /// `api_url` is the host only (e.g. `https://api.telegram.org`).
    pub fn new(api_url: &str, token: &str, poll_timeout_secs: u64) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(
                poll_timeout_secs + REQUEST_TIMEOUT_HEADROOM_SECS,
            ))
            .build()
            .map_err(|e| DomainError::Gateway(e.to_string()))?;
        Ok(Self {
            client,
            base_url: format!("{}/bot{}", api_url.trim_end_matches('/'), token),
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/{}", self.base_url, method)
    }
}

#[async_trait::async_trait]
impl BotGateway for BotApiGateway {
    async fn fetch_updates(
        &self,
        offset: Option<i64>,
        timeout_secs: u64,
    ) -> Result<UpdatesPage, DomainError> {
        let mut body = serde_json::json!({ "timeout": timeout_secs });
        if let Some(offset) = offset {
            body["offset"] = serde_json::Value::from(offset);
        }

        let res = self
            .client
            .post(self.method_url("getUpdates"))
            .json(&body)
            .send()
            .await
            .map_err(|e| DomainError::Gateway(format!("getUpdates request failed: {}", e)))?;

        let wire: WireResponse = res
            .json()
            .await
            .map_err(|e| DomainError::Gateway(format!("getUpdates decode failed: {}", e)))?;

        debug!(
            ok = wire.ok,
            count = wire.result.len(),
            "getUpdates response"
        );

        Ok(UpdatesPage {
            ok: wire.ok,
            updates: wire.result.into_iter().map(map_update).collect(),
            description: wire.description,
        })
    }

    async fn send_message(&self, msg: &OutgoingMessage) -> Result<(), DomainError> {
        let mut body = serde_json::json!({
            "chat_id": msg.chat_id,
            "text": msg.text,
        });
        if let Some(ref keyboard) = msg.keyboard {
            body["reply_markup"] = serde_json::to_value(keyboard)
                .map_err(|e| DomainError::Gateway(e.to_string()))?;
        }

        let res = self
            .client
            .post(self.method_url("sendMessage"))
            .json(&body)
            .send()
            .await
            .map_err(|e| DomainError::Gateway(format!("sendMessage request failed: {}", e)))?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_else(|_| "unknown".to_string());
            return Err(DomainError::Gateway(format!(
                "sendMessage error {}: {}",
                status,
                text.chars().take(200).collect::<String>()
            )));
        }

        Ok(())
    }
}
