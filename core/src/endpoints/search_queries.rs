//! Search query analytics endpoints

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::client::WebmasterClient;
use crate::error::ApiResult;
use crate::query::QueryParams;
use crate::types::{DateRange, HistoryPoint, Page};

/// Search query API interface
#[derive(Debug, Clone)]
pub struct SearchQueriesApi {
    client: WebmasterClient,
}

impl SearchQueriesApi {
    pub(crate) fn new(client: WebmasterClient) -> Self {
        Self { client }
    }

    /// Most popular queries leading to the host.
    pub fn popular(&self, host_id: &str, request: &PopularQueries) -> ApiResult<PopularQueriesPage> {
        let path = self.client.host_path(host_id, "search-queries/popular")?;
        self.client.get(&path, &request.to_params())
    }

    /// Aggregate history of `indicator` across all queries.
    pub fn all_history(
        &self,
        host_id: &str,
        range: DateRange,
        indicator: QueryIndicator,
        device: DeviceType,
    ) -> ApiResult<QueryHistory> {
        let path = self.client.host_path(host_id, "search-queries/all/history")?;
        self.client
            .get(&path, &history_params(range, indicator, device))
    }

    /// History of `indicator` for a single query.
    pub fn query_history(
        &self,
        host_id: &str,
        query_id: &str,
        range: DateRange,
        indicator: QueryIndicator,
        device: DeviceType,
    ) -> ApiResult<SingleQueryHistory> {
        let path = self
            .client
            .host_path(host_id, &format!("search-queries/{query_id}/history"))?;
        self.client
            .get(&path, &history_params(range, indicator, device))
    }
}

fn history_params(range: DateRange, indicator: QueryIndicator, device: DeviceType) -> QueryParams {
    QueryParams::new()
        .with_range(range)
        .with("query_indicator", indicator)
        .with("device_type_indicator", device)
}

/// Metric reported for a search query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueryIndicator {
    TotalShows,
    TotalClicks,
    AvgShowPosition,
    AvgClickPosition,
}

impl QueryIndicator {
    pub fn as_str(self) -> &'static str {
        match self {
            QueryIndicator::TotalShows => "TOTAL_SHOWS",
            QueryIndicator::TotalClicks => "TOTAL_CLICKS",
            QueryIndicator::AvgShowPosition => "AVG_SHOW_POSITION",
            QueryIndicator::AvgClickPosition => "AVG_CLICK_POSITION",
        }
    }
}

impl fmt::Display for QueryIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeviceType {
    #[default]
    All,
    Desktop,
    MobileAndTablet,
    Mobile,
    Tablet,
}

impl DeviceType {
    pub fn as_str(self) -> &'static str {
        match self {
            DeviceType::All => "ALL",
            DeviceType::Desktop => "DESKTOP",
            DeviceType::MobileAndTablet => "MOBILE_AND_TABLET",
            DeviceType::Mobile => "MOBILE",
            DeviceType::Tablet => "TABLET",
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort key for popular queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueryOrder {
    #[default]
    TotalShows,
    TotalClicks,
}

impl QueryOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            QueryOrder::TotalShows => "TOTAL_SHOWS",
            QueryOrder::TotalClicks => "TOTAL_CLICKS",
        }
    }
}

impl fmt::Display for QueryOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters for `SearchQueriesApi::popular`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopularQueries {
    pub range: DateRange,
    pub indicator: QueryIndicator,
    pub order_by: QueryOrder,
    pub device: DeviceType,
    pub page: Page,
}

impl PopularQueries {
    /// Ordered by total shows across all devices, first page of 100.
    pub fn new(range: DateRange, indicator: QueryIndicator) -> Self {
        Self {
            range,
            indicator,
            order_by: QueryOrder::default(),
            device: DeviceType::default(),
            page: Page::default(),
        }
    }

    #[must_use]
    pub fn order_by(mut self, order_by: QueryOrder) -> Self {
        self.order_by = order_by;
        self
    }

    #[must_use]
    pub fn device(mut self, device: DeviceType) -> Self {
        self.device = device;
        self
    }

    #[must_use]
    pub fn page(mut self, page: Page) -> Self {
        self.page = page;
        self
    }

    fn to_params(&self) -> QueryParams {
        QueryParams::new()
            .with_range(self.range)
            .with("query_indicator", self.indicator)
            .with("order_by", self.order_by)
            .with("device_type_indicator", self.device)
            .with_page(self.page)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopularQueriesPage {
    #[serde(default)]
    pub queries: Vec<PopularQuery>,
    pub date_from: String,
    pub date_to: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopularQuery {
    pub query_id: String,
    pub query_text: String,
    /// Only the requested indicators are present. A value is `None` when the
    /// service reports `null`, e.g. `AVG_CLICK_POSITION` without clicks.
    #[serde(default)]
    pub indicators: BTreeMap<QueryIndicator, Option<f64>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryHistory {
    #[serde(default)]
    pub indicators: BTreeMap<QueryIndicator, Vec<HistoryPoint>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleQueryHistory {
    pub query_id: String,
    pub query_text: String,
    #[serde(default)]
    pub indicators: BTreeMap<QueryIndicator, Vec<HistoryPoint>>,
}
