//! Client configuration.
//!
//! Built explicitly with `ClientConfig::new` or read from the environment
//! with `ClientConfig::from_env`.

use std::env;
use std::fmt;
use std::time::Duration;

use url::Url;

use crate::error::{ApiError, ApiResult};

/// Production API root. Endpoints are appended to it verbatim.
pub const DEFAULT_BASE_URL: &str = "https://api.webmaster.yandex.net/v4/";

/// Default bound on a single request round-trip.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const TOKEN_ENV: &str = "YANDEX_WEBMASTER_TOKEN";
pub const BASE_URL_ENV: &str = "YANDEX_WEBMASTER_API_URL";
pub const TIMEOUT_ENV: &str = "YANDEX_WEBMASTER_TIMEOUT_SECS";

/// Settings for a `WebmasterClient`.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// OAuth token sent as `Authorization: OAuth <token>`.
    pub token: String,
    /// API root; always ends with `/` once normalized.
    pub base_url: String,
    /// Default deadline for every request made through the client.
    pub timeout: Duration,
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: concat!("webmaster-core/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Read configuration from the environment.
    ///
    /// - `YANDEX_WEBMASTER_TOKEN`: OAuth token (required)
    /// - `YANDEX_WEBMASTER_API_URL`: API root override
    /// - `YANDEX_WEBMASTER_TIMEOUT_SECS`: request timeout in seconds
    pub fn from_env() -> ApiResult<Self> {
        let token = env::var(TOKEN_ENV)
            .map_err(|_| ApiError::config(format!("missing environment variable {TOKEN_ENV}")))?;
        let mut config = Self::new(token);

        if let Ok(base_url) = env::var(BASE_URL_ENV) {
            config = config.with_base_url(base_url);
        }
        if let Ok(raw) = env::var(TIMEOUT_ENV) {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|_| ApiError::config(format!("{TIMEOUT_ENV} must be whole seconds, got {raw:?}")))?;
            config = config.with_timeout(Duration::from_secs(secs));
        }

        config.validate()?;
        Ok(config)
    }

    /// Point the client at a different API root, e.g. a local mock server.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        self.base_url = base_url;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn validate(&self) -> ApiResult<()> {
        if self.token.trim().is_empty() {
            return Err(ApiError::config("token must not be empty"));
        }
        if self.timeout.is_zero() {
            return Err(ApiError::config("timeout must be greater than zero"));
        }
        Url::parse(&self.base_url).map_err(|e| ApiError::InvalidUrl {
            url: self.base_url.clone(),
            message: e.to_string(),
        })?;
        Ok(())
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("token", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
