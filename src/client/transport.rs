use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use indexmap::IndexMap;
use reqwest::Method;
use serde::de::DeserializeOwned;
use url::Url;

/// Error type produced by a transport. Kept boxed so the original error
/// (and its concrete type) reaches the caller untouched.
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

/// Fetch-style request mode. Carried through to the transport as given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMode {
    Cors,
    NoCors,
    SameOrigin,
    Navigate,
}

impl RequestMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestMode::Cors => "cors",
            RequestMode::NoCors => "no-cors",
            RequestMode::SameOrigin => "same-origin",
            RequestMode::Navigate => "navigate",
        }
    }
}

impl fmt::Display for RequestMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cors" => Ok(RequestMode::Cors),
            "no-cors" => Ok(RequestMode::NoCors),
            "same-origin" => Ok(RequestMode::SameOrigin),
            "navigate" => Ok(RequestMode::Navigate),
            other => Err(format!("unknown request mode: {other}")),
        }
    }
}

/// Caller-supplied options for [`ApiClient::request`](super::ApiClient::request).
///
/// Headers are merged over the client's defaults; everything else is passed
/// to the transport as-is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub method: Option<Method>,
    pub headers: IndexMap<String, String>,
    pub body: Option<String>,
    pub mode: Option<RequestMode>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn mode(mut self, mode: RequestMode) -> Self {
        self.mode = Some(mode);
        self
    }
}

/// A fully built request, ready for the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub url: Url,
    pub method: Method,
    pub headers: IndexMap<String, String>,
    pub body: Option<String>,
    pub mode: Option<RequestMode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, status_text: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            body: body.into(),
        }
    }

    /// 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_slice(&self.body)
    }
}

#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> std::result::Result<HttpResponse, TransportError>;
}

/// Transport backed by a shared `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> std::result::Result<HttpResponse, TransportError> {
        if let Some(mode) = request.mode {
            tracing::trace!(%mode, "request mode has no effect outside a browser");
        }

        let mut builder = self.client.request(request.method, request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let resp = builder.send().await?;
        let status = resp.status();
        let body = resp.bytes().await?;

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body: body.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_mode_round_trip() {
        for mode in ["cors", "no-cors", "same-origin", "navigate"] {
            assert_eq!(mode.parse::<RequestMode>().unwrap().as_str(), mode);
        }
        assert!("websocket".parse::<RequestMode>().is_err());
    }

    #[test]
    fn test_response_status_range() {
        assert!(HttpResponse::new(200, "OK", "").is_success());
        assert!(HttpResponse::new(204, "No Content", "").is_success());
        assert!(!HttpResponse::new(199, "", "").is_success());
        assert!(!HttpResponse::new(302, "Found", "").is_success());
        assert!(!HttpResponse::new(500, "Internal Server Error", "").is_success());
    }

    #[test]
    fn test_response_text_is_lossy() {
        let resp = HttpResponse::new(400, "Bad Request", vec![b'o', b'k', 0xff]);
        assert_eq!(resp.text(), "ok\u{fffd}");
    }
}
