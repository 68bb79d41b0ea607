//! Indexing statistics endpoints

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::client::WebmasterClient;
use crate::error::ApiResult;
use crate::query::QueryParams;
use crate::types::{DateRange, HistoryPoint, Page};

/// Indexing API interface
#[derive(Debug, Clone)]
pub struct IndexingApi {
    client: WebmasterClient,
}

impl IndexingApi {
    pub(crate) fn new(client: WebmasterClient) -> Self {
        Self { client }
    }

    /// Daily counts of crawled pages grouped by HTTP status class.
    pub fn history(&self, host_id: &str, range: DateRange) -> ApiResult<IndexingHistory> {
        let path = self.client.host_path(host_id, "indexing/history")?;
        self.client.get(&path, &QueryParams::new().with_range(range))
    }

    pub fn samples(&self, host_id: &str, page: Page) -> ApiResult<IndexingSamples> {
        let path = self.client.host_path(host_id, "indexing/samples")?;
        self.client.get(&path, &QueryParams::new().with_page(page))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexingHistory {
    /// Keyed by status class, e.g. `HTTP_2XX`, `HTTP_4XX`, `OTHER`.
    #[serde(default)]
    pub indicators: BTreeMap<String, Vec<HistoryPoint>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexingSamples {
    pub count: u64,
    #[serde(default)]
    pub samples: Vec<IndexingSample>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexingSample {
    pub url: String,
    pub status: String,
    #[serde(default)]
    pub http_code: Option<u16>,
    #[serde(default)]
    pub access_date: Option<String>,
}
