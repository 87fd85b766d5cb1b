//! Startup configuration read from the environment (and an optional `.env` file).

use std::fmt;
use std::time::Duration;

use log::LevelFilter;
use thiserror::Error;
use url::Url;
use watch_engine::{DEFAULT_ENDPOINT, DEFAULT_TELEGRAM_API};

use crate::logging::LogDestination;

pub const API_TOKEN_VAR: &str = "PRACTICUM_TOKEN";
pub const NOTIFIER_TOKEN_VAR: &str = "TELEGRAM_TOKEN";
pub const CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";

const ENDPOINT_VAR: &str = "WATCH_ENDPOINT";
const TELEGRAM_API_VAR: &str = "WATCH_TELEGRAM_API";
const RETRY_PERIOD_VAR: &str = "WATCH_RETRY_PERIOD_SECS";
const REQUEST_TIMEOUT_VAR: &str = "WATCH_REQUEST_TIMEOUT_SECS";
const GREETING_VAR: &str = "WATCH_GREETING";
const LOG_DEST_VAR: &str = "WATCH_LOG_DEST";
const LOG_LEVEL_VAR: &str = "WATCH_LOG_LEVEL";

const DEFAULT_RETRY_PERIOD: Duration = Duration::from_secs(600);
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required credentials: {}", .0.join(", "))]
    MissingCredentials(Vec<&'static str>),
    #[error("{var} must be a valid url: {source}")]
    InvalidUrl {
        var: &'static str,
        source: url::ParseError,
    },
    #[error("{var} must be a positive whole number of seconds, got `{value}`")]
    InvalidSeconds { var: &'static str, value: String },
    #[error("{var} must be one of {expected}, got `{value}`")]
    InvalidChoice {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// The three secrets the bot cannot start without.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_token: String,
    pub notifier_token: String,
    pub chat_id: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_token", &"<redacted>")
            .field("notifier_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub destination: LogDestination,
    pub level: LevelFilter,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchConfig {
    pub credentials: Credentials,
    pub endpoint: Url,
    pub telegram_api: Url,
    pub retry_period: Duration,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub greeting: bool,
}

/// Loads `.env` into the process environment; a missing file is fine.
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

impl LogSettings {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let destination = match lookup(LOG_DEST_VAR).as_deref().map(str::trim) {
            None | Some("") => LogDestination::Terminal,
            Some(value) => match value.to_ascii_lowercase().as_str() {
                "terminal" => LogDestination::Terminal,
                "file" => LogDestination::File,
                "both" => LogDestination::Both,
                _ => {
                    return Err(ConfigError::InvalidChoice {
                        var: LOG_DEST_VAR,
                        expected: "terminal, file, both",
                        value: value.to_string(),
                    })
                }
            },
        };
        let level = match lookup(LOG_LEVEL_VAR).as_deref().map(str::trim) {
            None | Some("") => LevelFilter::Info,
            Some(value) => value
                .parse::<LevelFilter>()
                .map_err(|_| ConfigError::InvalidChoice {
                    var: LOG_LEVEL_VAR,
                    expected: "off, error, warn, info, debug, trace",
                    value: value.to_string(),
                })?,
        };
        Ok(Self { destination, level })
    }
}

impl WatchConfig {
    /// Builds the configuration from `lookup`. Credentials are checked first and
    /// every missing one is reported at once.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let credentials = read_credentials(&lookup)?;

        Ok(Self {
            credentials,
            endpoint: read_url(&lookup, ENDPOINT_VAR, DEFAULT_ENDPOINT)?,
            telegram_api: read_url(&lookup, TELEGRAM_API_VAR, DEFAULT_TELEGRAM_API)?,
            retry_period: read_seconds(&lookup, RETRY_PERIOD_VAR, DEFAULT_RETRY_PERIOD)?,
            connect_timeout: CONNECT_TIMEOUT,
            request_timeout: read_seconds(
                &lookup,
                REQUEST_TIMEOUT_VAR,
                DEFAULT_REQUEST_TIMEOUT,
            )?,
            greeting: read_flag(&lookup, GREETING_VAR)?,
        })
    }
}

fn read_credentials(lookup: &impl Fn(&str) -> Option<String>) -> Result<Credentials, ConfigError> {
    let present = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());

    let api_token = present(API_TOKEN_VAR);
    let notifier_token = present(NOTIFIER_TOKEN_VAR);
    let chat_id = present(CHAT_ID_VAR);

    match (api_token, notifier_token, chat_id) {
        (Some(api_token), Some(notifier_token), Some(chat_id)) => Ok(Credentials {
            api_token,
            notifier_token,
            chat_id: chat_id.trim().to_string(),
        }),
        (api_token, notifier_token, chat_id) => {
            let missing = [
                (API_TOKEN_VAR, api_token.is_none()),
                (NOTIFIER_TOKEN_VAR, notifier_token.is_none()),
                (CHAT_ID_VAR, chat_id.is_none()),
            ]
            .into_iter()
            .filter_map(|(var, absent)| absent.then_some(var))
            .collect();
            Err(ConfigError::MissingCredentials(missing))
        }
    }
}

fn read_url(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: &str,
) -> Result<Url, ConfigError> {
    let raw = lookup(var).unwrap_or_else(|| default.to_string());
    Url::parse(raw.trim()).map_err(|source| ConfigError::InvalidUrl { var, source })
}

fn read_seconds(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: Duration,
) -> Result<Duration, ConfigError> {
    let Some(raw) = lookup(var) else {
        return Ok(default);
    };
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidSeconds { var, value: raw }),
    }
}

fn read_flag(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<bool, ConfigError> {
    match lookup(var).as_deref().map(str::trim) {
        None | Some("") => Ok(false),
        Some(value) => match value.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::InvalidChoice {
                var,
                expected: "true, false",
                value: value.to_string(),
            }),
        },
    }
}
