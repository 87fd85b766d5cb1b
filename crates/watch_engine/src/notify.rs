use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use watch_logging::watch_debug;

pub const DEFAULT_TELEGRAM_API: &str = "https://api.telegram.org";

#[derive(Debug, Clone)]
pub struct NotifySettings {
    pub api_base: String,
    pub request_timeout: Duration,
}

impl Default for NotifySettings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_TELEGRAM_API.to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotifyError {
    #[error("network error: {0}")]
    Network(String),
    #[error("notification api answered {status}: {description}")]
    HttpStatus { status: u16, description: String },
    #[error("notification api rejected the message: {description}")]
    Rejected { description: String },
}

#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    /// Delivers `text` to the chat identified by `target`.
    async fn send(&self, target: &str, text: &str) -> Result<(), NotifyError>;
}

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
struct ApiReply {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Sends messages through the Telegram Bot API `sendMessage` method.
#[derive(Clone)]
pub struct TelegramNotifier {
    send_url: String,
    client: reqwest::Client,
}

impl TelegramNotifier {
    pub fn new(settings: NotifySettings, bot_token: &str) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| NotifyError::Network(err.to_string()))?;
        let send_url = format!(
            "{}/bot{}/sendMessage",
            settings.api_base.trim_end_matches('/'),
            bot_token
        );
        Ok(Self { send_url, client })
    }
}

#[async_trait::async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, target: &str, text: &str) -> Result<(), NotifyError> {
        let body = serde_json::to_vec(&SendMessage {
            chat_id: target,
            text,
        })
        .map_err(|err| NotifyError::Network(err.to_string()))?;

        let response = self
            .client
            .post(&self.send_url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|err| NotifyError::Network(err.to_string()))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|err| NotifyError::Network(err.to_string()))?;
        let reply: Option<ApiReply> = serde_json::from_slice(&bytes).ok();

        if !status.is_success() {
            return Err(NotifyError::HttpStatus {
                status: status.as_u16(),
                description: reply
                    .and_then(|reply| reply.description)
                    .unwrap_or_else(|| status.to_string()),
            });
        }

        match reply {
            Some(reply) if reply.ok => {
                watch_debug!("notification delivered to chat {}", target);
                Ok(())
            }
            Some(reply) => Err(NotifyError::Rejected {
                description: reply
                    .description
                    .unwrap_or_else(|| "no description".to_string()),
            }),
            None => Err(NotifyError::Rejected {
                description: "unreadable reply".to_string(),
            }),
        }
    }
}
