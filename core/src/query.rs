//! Query-string building for GET endpoints.
//!
//! Parameters are collected as already-stringified values keyed by name, so
//! every conversion (dates, enums, paging) happens at the call site where the
//! type is known. Keys are unique and kept sorted; order carries no meaning
//! on the wire.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use url::{Position, Url};

use crate::error::{ApiError, ApiResult};
use crate::types::{DateRange, Page};

/// Wire format for every date-valued parameter.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Root used only to resolve relative endpoints during encoding.
const RESOLUTION_ROOT: &str = "http://localhost/";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    values: BTreeMap<String, String>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name`, replacing any earlier value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl fmt::Display) -> &mut Self {
        self.values.insert(name.into(), value.to_string());
        self
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl fmt::Display) -> Self {
        self.insert(name, value);
        self
    }

    #[must_use]
    pub fn with_opt(self, name: impl Into<String>, value: Option<impl fmt::Display>) -> Self {
        match value {
            Some(value) => self.with(name, value),
            None => self,
        }
    }

    #[must_use]
    pub fn with_date(self, name: impl Into<String>, date: NaiveDate) -> Self {
        self.with(name, date.format(DATE_FORMAT))
    }

    /// Adds `date_from` and `date_to`.
    #[must_use]
    pub fn with_range(self, range: DateRange) -> Self {
        self.with_date("date_from", range.from())
            .with_date("date_to", range.to())
    }

    /// Adds `limit` and `offset`.
    #[must_use]
    pub fn with_page(self, page: Page) -> Self {
        self.with("limit", page.limit).with("offset", page.offset)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: fmt::Display> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}

/// Append `params` to the relative `path` as a percent-encoded query string.
///
/// The result is still relative to the API root, e.g.
/// `user/1/hosts/h/indexing/history?date_from=2023-01-01&date_to=2023-01-31`.
pub fn build_endpoint(path: &str, params: &QueryParams) -> ApiResult<String> {
    let invalid = |e: url::ParseError| ApiError::InvalidUrl {
        url: path.to_string(),
        message: e.to_string(),
    };
    let mut url = Url::parse(RESOLUTION_ROOT)
        .and_then(|root| root.join(path))
        .map_err(invalid)?;
    if !params.is_empty() {
        url.query_pairs_mut().extend_pairs(params.iter());
    }
    Ok(url[Position::BeforePath..].trim_start_matches('/').to_string())
}
