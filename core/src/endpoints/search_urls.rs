//! Pages in search results and the events that add or remove them.

use serde::{Deserialize, Serialize};

use crate::client::WebmasterClient;
use crate::error::ApiResult;
use crate::query::QueryParams;
use crate::types::{DateRange, HistoryPoint, Page};

#[derive(Debug, Clone)]
pub struct SearchUrlsApi {
    client: WebmasterClient,
}

impl SearchUrlsApi {
    pub(crate) fn new(client: WebmasterClient) -> Self {
        Self { client }
    }

    /// Daily number of pages present in search.
    pub fn in_search_history(&self, host_id: &str, range: DateRange) -> ApiResult<Vec<HistoryPoint>> {
        let path = self
            .client
            .host_path(host_id, "search-urls/in-search/history")?;
        let history: InSearchHistory = self.client.get(&path, &QueryParams::new().with_range(range))?;
        Ok(history.history)
    }

    pub fn in_search_samples(&self, host_id: &str, page: Page) -> ApiResult<InSearchSamples> {
        let path = self
            .client
            .host_path(host_id, "search-urls/in-search/samples")?;
        self.client.get(&path, &QueryParams::new().with_page(page))
    }

    /// Daily counts of pages that appeared in or dropped out of search.
    pub fn events_history(&self, host_id: &str, range: DateRange) -> ApiResult<SearchEventsHistory> {
        let path = self.client.host_path(host_id, "search-urls/events/history")?;
        let response: EventsHistoryResponse =
            self.client.get(&path, &QueryParams::new().with_range(range))?;
        Ok(response.indicators)
    }

    pub fn event_samples(&self, host_id: &str, page: Page) -> ApiResult<SearchEventSamples> {
        let path = self.client.host_path(host_id, "search-urls/events/samples")?;
        self.client.get(&path, &QueryParams::new().with_page(page))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InSearchSamples {
    pub count: u64,
    #[serde(default)]
    pub samples: Vec<InSearchSample>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InSearchSample {
    pub url: String,
    #[serde(default)]
    pub last_access: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchEventsHistory {
    #[serde(rename = "APPEARED_IN_SEARCH", default)]
    pub appeared: Vec<HistoryPoint>,
    #[serde(rename = "REMOVED_FROM_SEARCH", default)]
    pub removed: Vec<HistoryPoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchEventSamples {
    pub count: u64,
    #[serde(default)]
    pub samples: Vec<SearchEventSample>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchEventSample {
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub event_date: Option<String>,
    #[serde(default)]
    pub last_access: Option<String>,
    /// `APPEARED_IN_SEARCH` or `REMOVED_FROM_SEARCH`.
    pub event: String,
    #[serde(default)]
    pub excluded_url_status: Option<String>,
    #[serde(default)]
    pub bad_http_status: Option<u16>,
    #[serde(default)]
    pub target_url: Option<String>,
}

#[derive(Deserialize)]
struct InSearchHistory {
    #[serde(default)]
    history: Vec<HistoryPoint>,
}

#[derive(Deserialize)]
struct EventsHistoryResponse {
    #[serde(default)]
    indicators: SearchEventsHistory,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_history_reads_upper_case_keys() {
        let json = r#"{
            "indicators": {
                "APPEARED_IN_SEARCH": [{"date": "2023-01-01T00:00:00,000+0300", "value": 4}],
                "REMOVED_FROM_SEARCH": []
            }
        }"#;
        let response: EventsHistoryResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.indicators.appeared.len(), 1);
        assert!(response.indicators.removed.is_empty());
    }

    #[test]
    fn event_samples_decode() {
        let json = r#"{
            "count": 1,
            "samples": [{
                "url": "https://example.com/old",
                "event": "REMOVED_FROM_SEARCH",
                "excluded_url_status": "HTTP_ERROR",
                "bad_http_status": 404
            }]
        }"#;
        let samples: SearchEventSamples = serde_json::from_str(json).unwrap();
        assert_eq!(samples.samples[0].bad_http_status, Some(404));
        assert_eq!(samples.samples[0].event, "REMOVED_FROM_SEARCH");
    }
}
