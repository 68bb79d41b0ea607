//! Value types shared by several resource families.
//!
//! # Design
//! Parameters are validated here, when they are constructed, so the request
//! layer only ever sees well-formed values. Response DTOs that belong to a
//! single resource family live next to their accessor in `endpoints`.

use std::fmt;

use chrono::NaiveDate;
use serde::de::{Deserializer, IgnoredAny};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};

/// Inclusive calendar range sent as `date_from` / `date_to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    from: NaiveDate,
    to: NaiveDate,
}

impl DateRange {
    /// Fails when `from` is after `to`.
    pub fn new(from: NaiveDate, to: NaiveDate) -> ApiResult<Self> {
        if from > to {
            return Err(ApiError::invalid_parameter(format!(
                "date range starts after it ends: {from} > {to}"
            )));
        }
        Ok(Self { from, to })
    }

    pub fn from(&self) -> NaiveDate {
        self.from
    }

    pub fn to(&self) -> NaiveDate {
        self.to
    }
}

/// `limit` / `offset` pair passed through to paged endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Page {
    pub limit: u32,
    pub offset: u32,
}

impl Page {
    pub fn new(limit: u32, offset: u32) -> Self {
        Self { limit, offset }
    }

    /// First page of `limit` items.
    pub fn first(limit: u32) -> Self {
        Self::new(limit, 0)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::first(100)
    }
}

/// Result of operations whose response carries no meaningful payload.
///
/// Decodes from an empty body and from any JSON value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoContent;

impl<'de> Deserialize<'de> for NoContent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        IgnoredAny::deserialize(deserializer)?;
        Ok(NoContent)
    }
}

/// One dated sample of a time series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub date: String,
    /// `None` when the service reports `null`, e.g. an average position on a
    /// day without clicks.
    #[serde(default)]
    pub value: Option<f64>,
}

impl fmt::Display for HistoryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(value) => write!(f, "{}={value}", self.date),
            None => write!(f, "{}=-", self.date),
        }
    }
}
