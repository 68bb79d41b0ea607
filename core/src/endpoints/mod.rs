//! Typed accessors for each Webmaster resource family.
//!
//! Each accessor formats a path under `user/{user_id}/` and hands it to the
//! shared request pipeline in `client`.
//!
//! | Module | Paths | Description |
//! |--------|-------|-------------|
//! | `hosts` | `hosts`, `hosts/{host}` | Sites registered to the account |
//! | `sitemaps` | `…/sitemaps`, `…/user-added-sitemaps` | Discovered and user-submitted sitemaps |
//! | `indexing` | `…/indexing/*` | Crawl history and sampled pages |
//! | `important_urls` | `…/important-urls` | Monitored pages |
//! | `search_urls` | `…/search-urls/*` | Pages in search and appear/remove events |
//! | `recrawl` | `…/recrawl/*` | Recrawl queue and daily quota |
//! | `search_queries` | `…/search-queries/*` | Query popularity and history |
//! | `diagnostics` | `…/diagnostics` | Site problems reported by the service |

pub mod diagnostics;
pub mod hosts;
pub mod important_urls;
pub mod indexing;
pub mod recrawl;
pub mod search_queries;
pub mod search_urls;
pub mod sitemaps;

pub use diagnostics::DiagnosticsApi;
pub use hosts::HostsApi;
pub use important_urls::ImportantUrlsApi;
pub use indexing::IndexingApi;
pub use recrawl::RecrawlApi;
pub use search_queries::SearchQueriesApi;
pub use search_urls::SearchUrlsApi;
pub use sitemaps::SitemapsApi;
