use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use tracing::debug;

use super::request::{ApiRequest, RequestBody};
use crate::modules::system::ensure_secure_addr;

/// Sends gateway requests. Responses come back unexamined.
#[async_trait]
pub(crate) trait Transport: Send + Sync {
    fn server_address(&self) -> &str;

    async fn send(&self, request: ApiRequest) -> anyhow::Result<reqwest::Response>;
}

pub(crate) struct HttpTransport {
    client: reqwest::Client,
    addr: String,
    access_token: Option<String>,
}

impl HttpTransport {
    /// Fails for an `http://` address unless `allow_insecure` is set.
    pub(crate) fn new(
        client: reqwest::Client,
        addr: impl Into<String>,
        allow_insecure: bool,
    ) -> anyhow::Result<Self> {
        let addr = addr.into();
        ensure_secure_addr(&addr, allow_insecure)?;
        Ok(Self {
            client,
            addr,
            access_token: None,
        })
    }

    pub(crate) fn with_access_token(mut self, access_token: Option<String>) -> Self {
        self.access_token = access_token;
        self
    }
}

pub(crate) fn auth_headers(token: &str) -> anyhow::Result<HeaderMap> {
    if token.trim().is_empty() {
        anyhow::bail!("token is required (BIBLIOTHECA_TOKEN, --token, or `bibliotheca login`)");
    }
    let mut headers = HeaderMap::new();
    let value = HeaderValue::from_str(&format!("Bearer {token}"))?;
    headers.insert(AUTHORIZATION, value);
    Ok(headers)
}

#[async_trait]
impl Transport for HttpTransport {
    fn server_address(&self) -> &str {
        &self.addr
    }

    async fn send(&self, request: ApiRequest) -> anyhow::Result<reqwest::Response> {
        let url = request.url(&self.addr);
        let method = request.method.clone();
        let mut builder = self.client.request(method.clone(), &url);
        if let Some(token) = self.access_token.as_deref() {
            builder = builder.headers(auth_headers(token)?);
        }
        if let Some(accept) = request.accept {
            builder = builder.header(ACCEPT, accept);
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(payload) => builder.json(&payload),
            RequestBody::Raw(body) => builder.header(CONTENT_TYPE, "text/plain").body(body),
        };

        debug!(method = %method, url = %url, "http request");
        let start = std::time::Instant::now();
        let response = builder.send().await?;
        debug!(
            method = %method,
            url = %url,
            status = %response.status(),
            elapsed_ms = start.elapsed().as_millis(),
            "http response"
        );
        Ok(response)
    }
}
