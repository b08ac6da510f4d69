use std::time::Duration;

use engine_logging::engine_debug;
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE, PRAGMA, USER_AGENT};

use crate::fetch::map_reqwest_error;
use crate::{FailureKind, FetchError, ProbeResult};

/// Tuning for candidate probing.
#[derive(Debug, Clone)]
pub struct ProbeSettings {
    /// Number of concurrent probe workers.
    pub workers: usize,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
    /// Ceiling on the whole probing phase; stragglers are dropped after it.
    pub deadline: Duration,
    /// Inclusive lower bound on Content-Length.
    pub min_bytes: u64,
    /// Inclusive upper bound on Content-Length.
    pub max_bytes: u64,
    /// Content-Type must contain this token, or be absent/empty.
    pub mime_token: String,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            workers: 6,
            connect_timeout: Duration::from_secs(3),
            read_timeout: Duration::from_secs(5),
            deadline: Duration::from_secs(30),
            min_bytes: 9_050,
            max_bytes: 786_432,
            mime_token: "image/jpeg".to_string(),
        }
    }
}

impl ProbeSettings {
    /// Applies the type and size filters to a response's declared headers.
    /// Returns the accepted size, or 0.
    pub fn accepted_size(&self, content_type: Option<&str>, content_length: Option<u64>) -> u64 {
        let type_ok = match content_type.map(str::trim) {
            None | Some("") => true,
            Some(ct) => ct.contains(self.mime_token.as_str()),
        };
        if !type_ok {
            return 0;
        }
        match content_length {
            Some(len) if (self.min_bytes..=self.max_bytes).contains(&len) => len,
            _ => 0,
        }
    }
}

/// One lightweight round-trip per candidate. Implementations never fail;
/// every problem resolves to a zero size.
#[async_trait::async_trait]
pub trait Prober: Send + Sync {
    async fn probe_one(&self, url: &str, user_agent: &str) -> ProbeResult;
}

/// Probes with a GET whose body is never read.
#[derive(Debug, Clone)]
pub struct ReqwestProber {
    client: reqwest::Client,
    settings: ProbeSettings,
}

impl ReqwestProber {
    pub fn new(settings: ProbeSettings) -> Result<Self, FetchError> {
        // No redirects and no idle pool: each probe is one exchange on one
        // connection, closed when the response is dropped.
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .read_timeout(settings.read_timeout)
            .redirect(reqwest::redirect::Policy::none())
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { client, settings })
    }

    pub fn settings(&self) -> &ProbeSettings {
        &self.settings
    }

    async fn declared_size(&self, url: reqwest::Url, user_agent: &str) -> Result<u64, FetchError> {
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, user_agent)
            .header(CACHE_CONTROL, "no-cache")
            .header(PRAGMA, "no-cache")
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok());
        Ok(self
            .settings
            .accepted_size(content_type, response.content_length()))
        // `response` drops here with its body unread, releasing the connection.
    }
}

#[async_trait::async_trait]
impl Prober for ReqwestProber {
    async fn probe_one(&self, url: &str, user_agent: &str) -> ProbeResult {
        let Ok(parsed) = reqwest::Url::parse(url) else {
            engine_debug!("probe skipped, malformed url={}", url);
            return ProbeResult::rejected(url);
        };

        match self.declared_size(parsed, user_agent).await {
            Ok(size) => {
                engine_debug!("probe url={} size={}", url, size);
                ProbeResult::new(url, size)
            }
            Err(err) => {
                engine_debug!("probe failed url={} error={}", url, err);
                ProbeResult::rejected(url)
            }
        }
    }
}
