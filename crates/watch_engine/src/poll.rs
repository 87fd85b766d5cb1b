use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::AUTHORIZATION;
use watch_logging::watch_debug;

use crate::{FailureKind, FetchError, PollOutput};

pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Query parameter carrying the checkpoint.
const CHECKPOINT_PARAM: &str = "from_date";

#[derive(Debug, Clone)]
pub struct PollSettings {
    pub endpoint: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 1024 * 1024,
        }
    }
}

#[async_trait::async_trait]
pub trait Poller: Send + Sync {
    /// Asks for homework updates since `checkpoint`.
    async fn fetch(&self, checkpoint: i64) -> Result<PollOutput, FetchError>;
}

/// Polls the review service over HTTPS with an OAuth token.
#[derive(Clone)]
pub struct ReqwestPoller {
    settings: PollSettings,
    endpoint: reqwest::Url,
    authorization: String,
    client: reqwest::Client,
}

impl ReqwestPoller {
    pub fn new(settings: PollSettings, api_token: &str) -> Result<Self, FetchError> {
        let endpoint = reqwest::Url::parse(&settings.endpoint)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            settings,
            endpoint,
            authorization: format!("OAuth {api_token}"),
            client,
        })
    }

    fn request_url(&self, checkpoint: i64) -> reqwest::Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair(CHECKPOINT_PARAM, &checkpoint.to_string());
        url
    }
}

#[async_trait::async_trait]
impl Poller for ReqwestPoller {
    async fn fetch(&self, checkpoint: i64) -> Result<PollOutput, FetchError> {
        let response = self
            .client
            .get(self.request_url(checkpoint))
            .header(AUTHORIZATION, &self.authorization)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }
        watch_debug!(
            "review endpoint answered status={} bytes={} from_date={}",
            status.as_u16(),
            bytes.len(),
            checkpoint
        );

        let payload = serde_json::from_slice(&bytes)
            .map_err(|err| FetchError::new(FailureKind::InvalidJson, err.to_string()))?;

        Ok(PollOutput {
            payload,
            status: status.as_u16(),
            byte_len: bytes.len() as u64,
        })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
