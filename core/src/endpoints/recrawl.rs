//! Recrawl queue endpoints

use serde::{Deserialize, Serialize};

use crate::client::WebmasterClient;
use crate::error::ApiResult;
use crate::query::QueryParams;
use crate::types::{DateRange, Page};

/// Recrawl API interface
#[derive(Debug, Clone)]
pub struct RecrawlApi {
    client: WebmasterClient,
}

impl RecrawlApi {
    pub(crate) fn new(client: WebmasterClient) -> Self {
        Self { client }
    }

    /// Queue `url` for recrawling. Consumes one unit of the daily quota.
    pub fn enqueue(&self, host_id: &str, url: &str) -> ApiResult<RecrawlTaskCreated> {
        let path = self.client.host_path(host_id, "recrawl/queue")?;
        self.client.post(&path, &RecrawlRequest { url })
    }

    pub fn task(&self, host_id: &str, task_id: &str) -> ApiResult<RecrawlTask> {
        let path = self
            .client
            .host_path(host_id, &format!("recrawl/queue/{task_id}"))?;
        self.client.get(&path, &QueryParams::new())
    }

    /// Tasks queued within `range`.
    pub fn tasks(&self, host_id: &str, range: DateRange, page: Page) -> ApiResult<Vec<RecrawlTask>> {
        let path = self.client.host_path(host_id, "recrawl/queue")?;
        let params = QueryParams::new().with_range(range).with_page(page);
        let list: RecrawlTaskList = self.client.get(&path, &params)?;
        Ok(list.tasks)
    }

    pub fn quota(&self, host_id: &str) -> ApiResult<RecrawlQuota> {
        let path = self.client.host_path(host_id, "recrawl/quota")?;
        self.client.get(&path, &QueryParams::new())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecrawlTaskCreated {
    pub task_id: String,
    #[serde(default)]
    pub quota_remainder: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecrawlTask {
    pub task_id: String,
    pub url: String,
    #[serde(default)]
    pub added_time: Option<String>,
    pub state: RecrawlState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecrawlState {
    InProgress,
    Done,
    Failed,
    /// A state this client does not know about yet.
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecrawlQuota {
    pub daily_quota: u64,
    pub quota_remainder: u64,
}

#[derive(Deserialize)]
struct RecrawlTaskList {
    #[serde(default)]
    tasks: Vec<RecrawlTask>,
}

#[derive(Serialize)]
struct RecrawlRequest<'a> {
    url: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_state_decodes() {
        let task: RecrawlTask = serde_json::from_str(
            r#"{"task_id":"t1","url":"https://example.com/","added_time":"2023-01-01T00:00:00,000+0300","state":"IN_PROGRESS"}"#,
        )
        .unwrap();
        assert_eq!(task.state, RecrawlState::InProgress);
    }

    #[test]
    fn unknown_state_is_tolerated() {
        let task: RecrawlTask =
            serde_json::from_str(r#"{"task_id":"t1","url":"u","state":"POSTPONED"}"#).unwrap();
        assert_eq!(task.state, RecrawlState::Unknown);
    }

    #[test]
    fn quota_decodes() {
        let quota: RecrawlQuota =
            serde_json::from_str(r#"{"daily_quota":20,"quota_remainder":17}"#).unwrap();
        assert_eq!(quota.quota_remainder, 17);
    }
}
