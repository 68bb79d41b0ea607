//! Client handle and the request pipeline shared by every resource accessor.
//!
//! # Design
//! `WebmasterClient` is a cheap-to-clone handle over shared state: the
//! configuration, the transport (and with it the connection pool) and the
//! user-id cache. Each call goes through the same three steps:
//!
//! 1. `build_request` turns a method, relative endpoint and optional body
//!    into an `HttpRequest` carrying the OAuth header and the handle's
//!    deadline.
//! 2. The `Transport` performs the blocking round-trip.
//! 3. `parse_response` classifies the status and decodes the body.
//!
//! Steps 1 and 3 are pure, so they are tested without any network. The user
//! id is resolved while the handle is constructed; a handle that exists has
//! always resolved it.

use std::fmt;
use std::num::NonZeroU64;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use crate::config::ClientConfig;
use crate::endpoints::{
    DiagnosticsApi, HostsApi, ImportantUrlsApi, IndexingApi, RecrawlApi, SearchQueriesApi,
    SearchUrlsApi, SitemapsApi,
};
use crate::error::{ApiError, ApiResult};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
use crate::identity::UserIdCache;
use crate::query::{build_endpoint, QueryParams};
use crate::types::NoContent;

const USER_ENDPOINT: &str = "user";

#[derive(Deserialize)]
struct UserResponse {
    user_id: NonZeroU64,
}

struct Inner {
    config: ClientConfig,
    transport: Box<dyn Transport>,
    user_id: UserIdCache,
}

/// Synchronous client for the Yandex Webmaster API.
#[derive(Clone)]
pub struct WebmasterClient {
    inner: Arc<Inner>,
    timeout: Duration,
}

impl WebmasterClient {
    /// Create a client for `token` against the production API.
    pub fn new(token: impl Into<String>) -> ApiResult<Self> {
        Self::with_config(ClientConfig::new(token))
    }

    /// Create a client from `YANDEX_WEBMASTER_*` environment variables.
    pub fn from_env() -> ApiResult<Self> {
        Self::with_config(ClientConfig::from_env()?)
    }

    pub fn with_config(config: ClientConfig) -> ApiResult<Self> {
        let transport = UreqTransport::new(&config);
        Self::with_transport(config, transport)
    }

    /// Create a client that sends every request through `transport`.
    ///
    /// Resolves the user id before returning; if that lookup fails the
    /// client is discarded and `ApiError::Construction` is returned.
    pub fn with_transport<T>(config: ClientConfig, transport: T) -> ApiResult<Self>
    where
        T: Transport + 'static,
    {
        config.validate()?;
        let client = Self {
            timeout: config.timeout,
            inner: Arc::new(Inner {
                config,
                transport: Box::new(transport),
                user_id: UserIdCache::new(),
            }),
        };
        client
            .user_id()
            .map_err(|e| ApiError::Construction(Box::new(e)))?;
        Ok(client)
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Deadline applied to each request made through this handle.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// A handle sharing this client's transport and user id whose requests
    /// are each bounded by `timeout`.
    #[must_use]
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            timeout,
        }
    }

    /// The account id embedded in every resource path.
    pub fn user_id(&self) -> ApiResult<u64> {
        self.inner.user_id.get_or_resolve(|| self.fetch_user_id())
    }

    fn fetch_user_id(&self) -> ApiResult<u64> {
        let response: UserResponse = self.send(HttpMethod::Get, USER_ENDPOINT, None::<&()>)?;
        let user_id = response.user_id.get();
        info!(user_id, "resolved webmaster user id");
        Ok(user_id)
    }

    /// `user/{user_id}/{suffix}`
    pub(crate) fn user_path(&self, suffix: &str) -> ApiResult<String> {
        Ok(format!("user/{}/{suffix}", self.user_id()?))
    }

    /// `user/{user_id}/hosts/{host_id}/{suffix}`, or the host itself when
    /// `suffix` is empty.
    pub(crate) fn host_path(&self, host_id: &str, suffix: &str) -> ApiResult<String> {
        if suffix.is_empty() {
            self.user_path(&format!("hosts/{host_id}"))
        } else {
            self.user_path(&format!("hosts/{host_id}/{suffix}"))
        }
    }

    // -------------------------------------------------------------------------
    // Resource accessors
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn hosts(&self) -> HostsApi {
        HostsApi::new(self.clone())
    }

    #[must_use]
    pub fn sitemaps(&self) -> SitemapsApi {
        SitemapsApi::new(self.clone())
    }

    #[must_use]
    pub fn indexing(&self) -> IndexingApi {
        IndexingApi::new(self.clone())
    }

    #[must_use]
    pub fn important_urls(&self) -> ImportantUrlsApi {
        ImportantUrlsApi::new(self.clone())
    }

    #[must_use]
    pub fn search_urls(&self) -> SearchUrlsApi {
        SearchUrlsApi::new(self.clone())
    }

    #[must_use]
    pub fn recrawl(&self) -> RecrawlApi {
        RecrawlApi::new(self.clone())
    }

    #[must_use]
    pub fn search_queries(&self) -> SearchQueriesApi {
        SearchQueriesApi::new(self.clone())
    }

    #[must_use]
    pub fn diagnostics(&self) -> DiagnosticsApi {
        DiagnosticsApi::new(self.clone())
    }

    // -------------------------------------------------------------------------
    // Request pipeline
    // -------------------------------------------------------------------------

    /// Describe a request to `endpoint` (relative to the API root) without
    /// sending it.
    pub fn build_request<B>(
        &self,
        method: HttpMethod,
        endpoint: &str,
        body: Option<&B>,
    ) -> ApiResult<HttpRequest>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{endpoint}", self.inner.config.base_url);
        Url::parse(&url).map_err(|e| ApiError::InvalidUrl {
            url: url.clone(),
            message: e.to_string(),
        })?;

        let mut headers = vec![(
            "authorization".to_string(),
            format!("OAuth {}", self.inner.config.token),
        )];
        // serde_json never HTML-escapes, so `&`, `<` and `>` go out verbatim.
        let body = body
            .map(|b| serde_json::to_string(b).map_err(|e| ApiError::Serialization(e.to_string())))
            .transpose()?;
        if body.is_some() {
            headers.push(("content-type".to_string(), "application/json".to_string()));
        }

        Ok(HttpRequest {
            method,
            url,
            endpoint: endpoint.to_string(),
            headers,
            body,
            timeout: Some(self.timeout),
        })
    }

    /// Send one request and decode the response body into `T`.
    pub fn send<T, B>(&self, method: HttpMethod, endpoint: &str, body: Option<&B>) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.build_request(method, endpoint, body)?;
        debug!(%method, endpoint, "sending request");
        let response = self
            .inner
            .transport
            .execute(&request)
            .map_err(|e| ApiError::Transport {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
            })?;
        debug!(%method, endpoint, status = response.status, "received response");
        parse_response(endpoint, response)
    }

    /// GET `path` with `params` encoded into the query string.
    pub fn get<T: DeserializeOwned>(&self, path: &str, params: &QueryParams) -> ApiResult<T> {
        let endpoint = build_endpoint(path, params)?;
        self.send(HttpMethod::Get, &endpoint, None::<&()>)
    }

    pub fn post<T, B>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(HttpMethod::Post, path, Some(body))
    }

    pub fn delete(&self, path: &str) -> ApiResult<NoContent> {
        self.send(HttpMethod::Delete, path, None::<&()>)
    }
}

impl fmt::Debug for WebmasterClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebmasterClient")
            .field("config", &self.inner.config)
            .field("user_id", &self.inner.user_id.get())
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// Classify `response` and decode its body into `T`.
///
/// An empty 2xx body decodes as JSON `null`.
pub fn parse_response<T: DeserializeOwned>(endpoint: &str, response: HttpResponse) -> ApiResult<T> {
    check_status(endpoint, &response)?;
    let body = if response.body.trim().is_empty() {
        "null"
    } else {
        response.body.as_str()
    };
    serde_json::from_str(body).map_err(|e| ApiError::Decode {
        status: response.status,
        endpoint: endpoint.to_string(),
        message: e.to_string(),
        body: response.body.clone(),
    })
}

/// Map non-2xx status codes to `ApiError::HttpStatus`.
fn check_status(endpoint: &str, response: &HttpResponse) -> ApiResult<()> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::HttpStatus {
        status: response.status,
        endpoint: endpoint.to_string(),
        body: response.body.clone(),
    })
}
