//! Lazily resolved account identifier.
//!
//! # Design
//! Every resource path embeds the numeric user id, which the API only
//! reveals through `GET user`. `UserIdCache` resolves it once per client
//! handle and then serves it without locking. Concurrent first callers are
//! serialized behind a single in-flight fetch: whoever arrives while a fetch
//! is running waits for it and reuses its result instead of issuing another.
//! A failed fetch leaves the cache empty so a later call can try again.

use once_cell::sync::OnceCell;

use crate::error::ApiResult;

#[derive(Debug, Default)]
pub struct UserIdCache {
    cell: OnceCell<u64>,
}

impl UserIdCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The resolved id, or `None` before the first successful fetch.
    pub fn get(&self) -> Option<u64> {
        self.cell.get().copied()
    }

    /// Return the cached id, running `fetch` only if nothing is cached yet.
    pub fn get_or_resolve<F>(&self, fetch: F) -> ApiResult<u64>
    where
        F: FnOnce() -> ApiResult<u64>,
    {
        self.cell.get_or_try_init(fetch).copied()
    }
}
