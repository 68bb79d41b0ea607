//! Host management endpoints

use serde::{Deserialize, Serialize};

use crate::client::WebmasterClient;
use crate::error::ApiResult;
use crate::query::QueryParams;
use crate::types::NoContent;

/// Host API interface
#[derive(Debug, Clone)]
pub struct HostsApi {
    client: WebmasterClient,
}

impl HostsApi {
    pub(crate) fn new(client: WebmasterClient) -> Self {
        Self { client }
    }

    /// All hosts added to the account.
    pub fn list(&self) -> ApiResult<Vec<Host>> {
        let path = self.client.user_path("hosts")?;
        let list: HostList = self.client.get(&path, &QueryParams::new())?;
        Ok(list.hosts)
    }

    pub fn get(&self, host_id: &str) -> ApiResult<Host> {
        let path = self.client.host_path(host_id, "")?;
        self.client.get(&path, &QueryParams::new())
    }

    /// Register `host_url` (e.g. `https://example.com`) with the account.
    pub fn add(&self, host_url: &str) -> ApiResult<AddedHost> {
        let path = self.client.user_path("hosts")?;
        self.client.post(&path, &AddHostRequest { host_url })
    }

    pub fn delete(&self, host_id: &str) -> ApiResult<NoContent> {
        let path = self.client.host_path(host_id, "")?;
        self.client.delete(&path)
    }
}

/// A site registered with the account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Host {
    /// Identifier used in every per-host path, e.g. `https:example.com:443`.
    pub host_id: String,
    pub ascii_host_url: String,
    pub unicode_host_url: String,
    pub verified: bool,
    #[serde(default)]
    pub main_mirror: Option<MainMirror>,
}

/// The main mirror of a host, when the host is itself a mirror.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MainMirror {
    pub host_id: String,
    pub ascii_host_url: String,
    pub unicode_host_url: String,
    pub verified: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddedHost {
    pub host_id: String,
}

#[derive(Deserialize)]
struct HostList {
    #[serde(default)]
    hosts: Vec<Host>,
}

#[derive(Serialize)]
struct AddHostRequest<'a> {
    host_url: &'a str,
}
