//! Synchronous client for the Yandex Webmaster API.
//!
//! # Overview
//! Turns method calls into authenticated HTTPS requests against
//! `https://api.webmaster.yandex.net/v4/` and decodes the JSON responses into
//! typed structures. Resource families (hosts, sitemaps, indexing, recrawl,
//! search queries, diagnostics and more) are reached through accessors on
//! [`WebmasterClient`].
//!
//! ```no_run
//! use webmaster_core::WebmasterClient;
//!
//! let client = WebmasterClient::new("oauth-token")?;
//! for host in client.hosts().list()? {
//!     println!("{} verified={}", host.host_id, host.verified);
//! }
//! # Ok::<(), webmaster_core::ApiError>(())
//! ```
//!
//! # Design
//! - Every call blocks until the full response has been read, bounded by the
//!   handle's timeout (`WebmasterClient::with_timeout` narrows it per handle).
//! - The account id is resolved once, while the handle is built, and shared
//!   by all clones of that handle.
//! - The HTTP round-trip sits behind the [`Transport`] trait; the default is a
//!   pooled ureq agent.
//! - Errors keep the status, endpoint and raw body. Nothing is retried or
//!   logged on the caller's behalf.

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod http;
pub mod identity;
pub mod query;
pub mod types;

pub use client::{parse_response, WebmasterClient};
pub use config::ClientConfig;
pub use error::{ApiError, ApiResult, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
pub use query::{build_endpoint, QueryParams};
pub use types::{DateRange, HistoryPoint, NoContent, Page};

pub use endpoints::diagnostics::{DiagnosticProblem, ProblemState, Severity};
pub use endpoints::hosts::{AddedHost, Host, MainMirror};
pub use endpoints::important_urls::{ImportantUrl, PageIndexingStatus, PageSearchStatus};
pub use endpoints::indexing::{IndexingHistory, IndexingSample, IndexingSamples};
pub use endpoints::recrawl::{RecrawlQuota, RecrawlState, RecrawlTask, RecrawlTaskCreated};
pub use endpoints::search_queries::{
    DeviceType, PopularQueries, PopularQueriesPage, PopularQuery, QueryHistory, QueryIndicator,
    QueryOrder, SingleQueryHistory,
};
pub use endpoints::search_urls::{
    InSearchSample, InSearchSamples, SearchEventSample, SearchEventSamples, SearchEventsHistory,
};
pub use endpoints::sitemaps::{AddedSitemap, Sitemap, SitemapQuery, UserAddedSitemap};
