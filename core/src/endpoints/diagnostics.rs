//! Site diagnostics endpoint
//!
//! The service reports problems as an object keyed by problem type. The
//! accessor flattens it into a list ordered by type, with each entry keeping
//! its key in `problem_type`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::client::WebmasterClient;
use crate::error::ApiResult;
use crate::query::QueryParams;

#[derive(Debug, Clone)]
pub struct DiagnosticsApi {
    client: WebmasterClient,
}

impl DiagnosticsApi {
    pub(crate) fn new(client: WebmasterClient) -> Self {
        Self { client }
    }

    pub fn problems(&self, host_id: &str) -> ApiResult<Vec<DiagnosticProblem>> {
        let path = self.client.host_path(host_id, "diagnostics")?;
        let response: DiagnosticsResponse = self.client.get(&path, &QueryParams::new())?;
        Ok(response.into_problems())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticProblem {
    /// e.g. `NO_SITEMAPS`, `DNS_ERROR`, `DOCUMENTS_MISSING_TITLE`.
    pub problem_type: String,
    pub severity: Severity,
    pub state: ProblemState,
    #[serde(default)]
    pub last_state_update: Option<String>,
}

impl DiagnosticProblem {
    pub fn is_present(&self) -> bool {
        self.state == ProblemState::Present
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Fatal,
    Critical,
    PossibleProblem,
    Recommendation,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProblemState {
    Present,
    Absent,
    NotApplicable,
    Undefined,
    #[serde(other)]
    Unknown,
}

#[derive(Deserialize)]
struct DiagnosticsResponse {
    #[serde(default)]
    problems: BTreeMap<String, RawProblem>,
}

#[derive(Deserialize)]
struct RawProblem {
    severity: Severity,
    state: ProblemState,
    #[serde(default)]
    last_state_update: Option<String>,
}

impl DiagnosticsResponse {
    fn into_problems(self) -> Vec<DiagnosticProblem> {
        self.problems
            .into_iter()
            .map(|(problem_type, raw)| DiagnosticProblem {
                problem_type,
                severity: raw.severity,
                state: raw.state,
                last_state_update: raw.last_state_update,
            })
            .collect()
    }
}
