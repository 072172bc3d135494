use std::fmt;
use std::time::Duration;

use jobwatch_logging::{watch_debug, watch_info};
use serde::Deserialize;
use thiserror::Error;

use crate::config::{ConfigError, CHAT_ID_VAR, TOKEN_VAR};
use crate::types::body_excerpt;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("telegram request failed: {0}")]
    Transport(String),
    #[error("telegram answered http status {status}; body: {excerpt}")]
    Status { status: u16, excerpt: String },
    #[error("telegram refused the message: {0}")]
    Refused(String),
}

#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, text: &str) -> Result<(), NotifyError>;
}

/// Bot token and destination chat, both required and non-empty.
#[derive(Clone)]
pub struct TelegramCredentials {
    bot_token: String,
    chat_id: String,
}

impl TelegramCredentials {
    pub fn new(bot_token: Option<&str>, chat_id: Option<&str>) -> Result<Self, ConfigError> {
        let bot_token = required(bot_token, TOKEN_VAR)?;
        let chat_id = required(chat_id, CHAT_ID_VAR)?;
        Ok(Self { bot_token, chat_id })
    }

    pub fn chat_id(&self) -> &str {
        &self.chat_id
    }
}

// Keeps the token out of logs.
impl fmt::Debug for TelegramCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramCredentials")
            .field("bot_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

fn required(value: Option<&str>, name: &'static str) -> Result<String, ConfigError> {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(ConfigError::Missing(name)),
    }
}

#[derive(Debug, Deserialize)]
struct TelegramReply {
    ok: bool,
    description: Option<String>,
}

/// Sends messages through the Telegram Bot API `sendMessage` method.
#[derive(Debug, Clone)]
pub struct TelegramNotifier {
    api_base: String,
    credentials: TelegramCredentials,
    timeout: Duration,
}

impl TelegramNotifier {
    pub fn new(api_base: impl Into<String>, credentials: TelegramCredentials, timeout: Duration) -> Self {
        Self {
            api_base: api_base.into(),
            credentials,
            timeout,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.api_base.trim_end_matches('/'),
            self.credentials.bot_token
        )
    }
}

#[async_trait::async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, text: &str) -> Result<(), NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(map_reqwest_error)?;

        let response = client
            .post(self.endpoint())
            .form(&[("chat_id", self.credentials.chat_id()), ("text", text)])
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let body = response.text().await.map_err(map_reqwest_error)?;
        if !status.is_success() {
            return Err(NotifyError::Status {
                status: status.as_u16(),
                excerpt: body_excerpt(&body),
            });
        }

        match serde_json::from_str::<TelegramReply>(&body) {
            Ok(reply) if !reply.ok => {
                return Err(NotifyError::Refused(
                    reply
                        .description
                        .unwrap_or_else(|| body_excerpt(&body)),
                ));
            }
            Ok(_) => {}
            Err(err) => watch_debug!("Unrecognised telegram reply ({}): {}", err, body_excerpt(&body)),
        }

        watch_info!(
            "Delivered notification ({} chars) to chat {}",
            text.chars().count(),
            self.credentials.chat_id()
        );
        Ok(())
    }
}

// The request URL embeds the bot token, so it is stripped from every error.
fn map_reqwest_error(err: reqwest::Error) -> NotifyError {
    NotifyError::Transport(err.without_url().to_string())
}
