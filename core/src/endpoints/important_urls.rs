//! Monitoring of important pages

use serde::{Deserialize, Serialize};

use crate::client::WebmasterClient;
use crate::error::ApiResult;
use crate::query::QueryParams;

#[derive(Debug, Clone)]
pub struct ImportantUrlsApi {
    client: WebmasterClient,
}

impl ImportantUrlsApi {
    pub(crate) fn new(client: WebmasterClient) -> Self {
        Self { client }
    }

    /// Latest state of every monitored page.
    pub fn list(&self, host_id: &str) -> ApiResult<Vec<ImportantUrl>> {
        let path = self.client.host_path(host_id, "important-urls")?;
        let list: ImportantUrlList = self.client.get(&path, &QueryParams::new())?;
        Ok(list.urls)
    }

    /// Recorded changes of one monitored page.
    pub fn history(&self, host_id: &str, url: &str) -> ApiResult<Vec<ImportantUrl>> {
        let path = self.client.host_path(host_id, "important-urls/history")?;
        let history: ImportantUrlHistory =
            self.client.get(&path, &QueryParams::new().with("url", url))?;
        Ok(history.history)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportantUrl {
    pub url: String,
    #[serde(default)]
    pub update_date: Option<String>,
    /// What changed since the previous check, e.g. `TITLE`, `INDEXING_HTTP_CODE`.
    #[serde(default)]
    pub change_indicators: Vec<String>,
    #[serde(default)]
    pub indexing_status: Option<PageIndexingStatus>,
    #[serde(default)]
    pub search_status: Option<PageSearchStatus>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageIndexingStatus {
    pub status: String,
    #[serde(default)]
    pub http_code: Option<u16>,
    #[serde(default)]
    pub access_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSearchStatus {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub last_access: Option<String>,
    #[serde(default)]
    pub excluded_url_status: Option<String>,
    #[serde(default)]
    pub bad_http_status: Option<u16>,
    pub searchable: bool,
    #[serde(default)]
    pub target_url: Option<String>,
}

#[derive(Deserialize)]
struct ImportantUrlList {
    #[serde(default)]
    urls: Vec<ImportantUrl>,
}

#[derive(Deserialize)]
struct ImportantUrlHistory {
    #[serde(default)]
    history: Vec<ImportantUrl>,
}
