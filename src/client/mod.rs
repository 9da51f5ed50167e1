mod transport;

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use reqwest::Method;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::error::{Error, Result};
use crate::mcp::{self, Environment, LaunchDescriptor, Launcher, ServerConfig, TransformedMcpData};

pub use transport::{
    HttpRequest, HttpResponse, HttpTransport, RequestMode, RequestOptions, ReqwestTransport,
    TransportError,
};

/// Path of the MCP configuration resource.
pub const MCP_ENDPOINT: &str = "/v1/mcp";

/// Client for the MCP configuration API.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    api_key: String,
    launcher: Launcher,
    transport: Arc<dyn HttpTransport>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_transport(base_url, api_key, Arc::new(ReqwestTransport::new()))
    }

    pub fn with_transport(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            launcher: Launcher::detect(),
            transport,
        }
    }

    /// Replace the detected package runner used by [`Self::transform_servers`].
    pub fn with_launcher(mut self, launcher: Launcher) -> Self {
        self.launcher = launcher;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn launcher(&self) -> &Launcher {
        &self.launcher
    }

    /// Issue a request against `path` resolved on the base URL and decode the
    /// JSON body. Use `serde_json::Value` as `T` to get the raw document.
    pub async fn request<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T> {
        let url = Url::parse(&self.base_url)?.join(path)?;
        let resp = self.send(url, options).await?;

        if !resp.is_success() {
            warn!(status = resp.status, path, "API request failed");
            return Err(Error::ApiRequest {
                status: resp.status,
                status_text: resp.status_text,
            });
        }

        Ok(resp.json()?)
    }

    pub async fn fetch_config(&self) -> Result<TransformedMcpData> {
        self.request(MCP_ENDPOINT, RequestOptions::default()).await
    }

    /// POST `data` to the MCP endpoint and return what the server sends back.
    pub async fn update_config(&self, data: &TransformedMcpData) -> Result<TransformedMcpData> {
        let url = Url::parse(&format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            MCP_ENDPOINT
        ))?;
        let options = RequestOptions::new()
            .method(Method::POST)
            .body(serde_json::to_string(data)?);
        let resp = self.send(url, options).await?;

        if !resp.is_success() {
            let body = resp.text();
            warn!(status = resp.status, "MCP config update rejected");
            return Err(Error::UpdateFailed {
                status: resp.status,
                status_text: resp.status_text,
                body,
            });
        }

        Ok(resp.json()?)
    }

    /// See [`mcp::transform_servers`]; uses this client's launcher.
    pub fn transform_servers<E>(
        &self,
        servers: &IndexMap<String, ServerConfig>,
        env: &E,
    ) -> IndexMap<String, LaunchDescriptor>
    where
        E: Environment + ?Sized,
    {
        mcp::transform_servers(servers, &self.launcher, env)
    }

    fn default_headers(&self) -> IndexMap<String, String> {
        IndexMap::from([
            ("Content-Type".to_string(), "application/json".to_string()),
            ("api-key".to_string(), self.api_key.clone()),
        ])
    }

    /// Caller headers win over defaults; names compare case-insensitively.
    fn merge_headers(&self, extra: IndexMap<String, String>) -> IndexMap<String, String> {
        let mut headers = self.default_headers();
        for (name, value) in extra {
            if !headers.contains_key(&name) {
                headers.retain(|k, _| !k.eq_ignore_ascii_case(&name));
            }
            headers.insert(name, value);
        }
        headers
    }

    async fn send(&self, url: Url, options: RequestOptions) -> Result<HttpResponse> {
        let RequestOptions {
            method,
            headers,
            body,
            mode,
        } = options;

        let request = HttpRequest {
            url,
            method: method.unwrap_or(Method::GET),
            headers: self.merge_headers(headers),
            body,
            mode,
        };

        debug!(method = %request.method, url = %request.url, "sending request");
        self.transport.send(request).await.map_err(Error::Transport)
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("launcher", &self.launcher)
            .finish_non_exhaustive()
    }
}
