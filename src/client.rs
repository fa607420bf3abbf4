//! HTTP binding for the Plugboard plugin-management backend.
//!
//! Every backend operation maps to exactly one method on [`PluginApi`], and
//! every method issues exactly one request. The client validates nothing,
//! retries nothing, and transforms nothing: responses are decoded into the
//! shapes in [`crate::plugin`] and handed straight back, and failures
//! propagate as [`crate::Error`].
//!
//! Methods may be called concurrently; independent calls carry no ordering
//! guarantee between each other, the backend is free to interleave them.

use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::error::Result;
use crate::plugin::{MarketItem, PluginItem, PluginPatch};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for a Plugboard backend.
///
/// Cheap to clone and shareable across tasks; the underlying
/// `reqwest::Client` pools connections internally.
#[derive(Debug, Clone)]
pub struct PluginApi {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
struct ToggleRequest<'a> {
    id: &'a str,
    enable: bool,
}

#[derive(Serialize)]
struct NameRequest<'a> {
    name: &'a str,
}

impl PluginApi {
    /// Create a client with default timeouts for the backend at `base_url`.
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self::with_client(client, base_url)
    }

    /// Wrap an externally configured transport (custom timeouts, headers,
    /// proxies). The client is used as-is and never reconfigured.
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Base URL this client talks to, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List the plugins the backend knows about, installed or builtin.
    pub async fn list_plugins(&self) -> Result<Vec<PluginItem>> {
        self.get_json("/plugins").await
    }

    /// Flip a plugin's enabled flag. `id` is the stable plugin identifier.
    pub async fn toggle_plugin(&self, id: &str, enable: bool) -> Result<Value> {
        self.post_ack("/plugins/toggle", &ToggleRequest { id, enable })
            .await
    }

    /// Install a plugin by name (a marketplace `fullName` works too, the
    /// backend resolves either).
    pub async fn install_plugin(&self, name: &str) -> Result<Value> {
        self.post_ack("/plugins/install", &NameRequest { name }).await
    }

    /// Uninstall a plugin by name.
    pub async fn uninstall_plugin(&self, name: &str) -> Result<Value> {
        self.post_ack("/plugins/uninstall", &NameRequest { name })
            .await
    }

    /// List the remote marketplace registry.
    pub async fn list_market_plugins(&self) -> Result<Vec<MarketItem>> {
        self.get_json("/market/plugins").await
    }

    /// Search installed and available plugins by keyword. The keyword is
    /// sent as a percent-encoded `q` query parameter.
    pub async fn search_plugins(&self, keyword: &str) -> Result<Vec<PluginItem>> {
        let url = self.url("/plugins/search");
        debug!(keyword, "searching plugins");
        let response = self
            .client
            .get(&url)
            .query(&[("q", keyword)])
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    /// Activate a plugin in the backend runtime.
    pub async fn load_plugin(&self, name: &str) -> Result<Value> {
        self.post_ack("/plugins/load", &NameRequest { name }).await
    }

    /// Deactivate a plugin in the backend runtime.
    pub async fn unload_plugin(&self, name: &str) -> Result<Value> {
        self.post_ack("/plugins/unload", &NameRequest { name }).await
    }

    /// Unload and re-load a plugin in one backend-side step.
    pub async fn reload_plugin(&self, name: &str) -> Result<Value> {
        self.post_ack("/plugins/reload", &NameRequest { name }).await
    }

    /// Save a partial plugin update, typically configuration values.
    pub async fn save_plugin(&self, patch: &PluginPatch) -> Result<Value> {
        self.post_ack("/plugins/save", patch).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        debug!(%url, "fetching plugin list");
        let response = self.client.get(&url).send().await?.error_for_status()?;
        Ok(response.json().await?)
    }

    /// POST a JSON body and return the backend's untyped acknowledgment.
    /// An empty ack body decodes to `Value::Null`.
    async fn post_ack<B: Serialize>(&self, path: &str, body: &B) -> Result<Value> {
        let url = self.url(path);
        debug!(%url, "posting plugin operation");
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await?
            .error_for_status()?;
        if response.content_length() == Some(0) {
            return Ok(Value::Null);
        }
        Ok(response.json().await?)
    }
}
