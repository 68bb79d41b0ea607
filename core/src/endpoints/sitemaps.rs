//! Sitemap endpoints: sitemaps the crawler discovered and the ones the
//! account submitted itself ("user-added").

use serde::{Deserialize, Serialize};

use crate::client::WebmasterClient;
use crate::error::ApiResult;
use crate::query::QueryParams;
use crate::types::NoContent;

/// Page size used when `SitemapQuery::limit` is unset.
pub const DEFAULT_SITEMAP_LIMIT: u32 = 10;

/// Sitemap API interface
#[derive(Debug, Clone)]
pub struct SitemapsApi {
    client: WebmasterClient,
}

impl SitemapsApi {
    pub(crate) fn new(client: WebmasterClient) -> Self {
        Self { client }
    }

    pub fn list(&self, host_id: &str, query: &SitemapQuery) -> ApiResult<Vec<Sitemap>> {
        let path = self.client.host_path(host_id, "sitemaps")?;
        let list: SitemapList = self.client.get(&path, &query.to_params())?;
        Ok(list.sitemaps)
    }

    pub fn get(&self, host_id: &str, sitemap_id: &str) -> ApiResult<Sitemap> {
        let path = self
            .client
            .host_path(host_id, &format!("sitemaps/{sitemap_id}"))?;
        self.client.get(&path, &QueryParams::new())
    }

    pub fn get_user_added(&self, host_id: &str, sitemap_id: &str) -> ApiResult<UserAddedSitemap> {
        let path = self
            .client
            .host_path(host_id, &format!("user-added-sitemaps/{sitemap_id}"))?;
        self.client.get(&path, &QueryParams::new())
    }

    /// Submit the sitemap at `url` for `host_id`.
    pub fn add(&self, host_id: &str, url: &str) -> ApiResult<AddedSitemap> {
        let path = self.client.host_path(host_id, "user-added-sitemaps")?;
        self.client.post(&path, &AddSitemapRequest { url })
    }

    /// Remove a user-added sitemap.
    pub fn delete(&self, host_id: &str, sitemap_id: &str) -> ApiResult<NoContent> {
        let path = self
            .client
            .host_path(host_id, &format!("user-added-sitemaps/{sitemap_id}"))?;
        self.client.delete(&path)
    }
}

/// Filters for `SitemapsApi::list`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SitemapQuery {
    /// Defaults to [`DEFAULT_SITEMAP_LIMIT`].
    pub limit: Option<u32>,
    /// List the children of this sitemap index instead of the top level.
    pub parent_id: Option<String>,
    /// Continue after this sitemap id.
    pub from: Option<String>,
}

impl SitemapQuery {
    fn to_params(&self) -> QueryParams {
        QueryParams::new()
            .with("limit", self.limit.unwrap_or(DEFAULT_SITEMAP_LIMIT))
            .with_opt("parent_id", self.parent_id.as_deref())
            .with_opt("from", self.from.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sitemap {
    pub sitemap_id: String,
    pub sitemap_url: String,
    #[serde(default)]
    pub last_access_date: Option<String>,
    #[serde(default)]
    pub errors_count: u64,
    #[serde(default)]
    pub urls_count: u64,
    #[serde(default)]
    pub children_count: u64,
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default)]
    pub sitemap_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAddedSitemap {
    pub sitemap_id: String,
    pub sitemap_url: String,
    #[serde(default)]
    pub added_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddedSitemap {
    pub sitemap_id: String,
}

#[derive(Deserialize)]
struct SitemapList {
    #[serde(default)]
    sitemaps: Vec<Sitemap>,
}

#[derive(Serialize)]
struct AddSitemapRequest<'a> {
    url: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_query_only_sets_limit() {
        let params = SitemapQuery::default().to_params();
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("limit"), Some("10"));
    }

    #[test]
    fn query_passes_paging_fields_through() {
        let params = SitemapQuery {
            limit: Some(50),
            parent_id: Some("p1".to_string()),
            from: Some("s9".to_string()),
        }
        .to_params();
        assert_eq!(params.get("limit"), Some("50"));
        assert_eq!(params.get("parent_id"), Some("p1"));
        assert_eq!(params.get("from"), Some("s9"));
    }

    #[test]
    fn sitemap_tolerates_missing_counters() {
        let sitemap: Sitemap = serde_json::from_str(
            r#"{"sitemap_id":"abc","sitemap_url":"https://example.com/sitemap.xml"}"#,
        )
        .unwrap();
        assert_eq!(sitemap.urls_count, 0);
        assert!(sitemap.sources.is_empty());
    }
}
