use reqwest::Method;
use serde::Serialize;

/// Percent-encoded request path, always rooted at `/api`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ApiPath {
    encoded: String,
}

impl ApiPath {
    pub(crate) fn api() -> Self {
        Self {
            encoded: "/api".to_string(),
        }
    }

    /// Appends a fixed path component.
    pub(crate) fn literal(mut self, name: &'static str) -> Self {
        self.encoded.push('/');
        self.encoded.push_str(name);
        self
    }

    /// Appends one caller-supplied segment; `/` inside `value` is encoded, not
    /// treated as a separator. `.` and `..` are refused since URL parsing would
    /// resolve them against the preceding path.
    pub(crate) fn segment(mut self, value: &str) -> anyhow::Result<Self> {
        if value == "." || value == ".." {
            anyhow::bail!("'{value}' is not a valid path segment");
        }
        self.encoded.push('/');
        self.encoded.push_str(&urlencoding::encode(value));
        Ok(self)
    }

    /// Appends a slash-separated relative path, encoding each part on its own.
    /// One leading `/` is dropped; empty parts are kept as they are.
    pub(crate) fn nested(self, path: &str) -> anyhow::Result<Self> {
        let path = path.strip_prefix('/').unwrap_or(path);
        path.split('/').try_fold(self, |acc, part| acc.segment(part))
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.encoded
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RequestBody {
    Empty,
    Json(serde_json::Value),
    /// Sent verbatim, e.g. a GraphQL document.
    Raw(String),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ApiRequest {
    pub method: Method,
    pub path: ApiPath,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
    pub accept: Option<&'static str>,
}

impl ApiRequest {
    pub(crate) fn new(method: Method, path: ApiPath) -> Self {
        Self {
            method,
            path,
            query: Vec::new(),
            body: RequestBody::Empty,
            accept: None,
        }
    }

    pub(crate) fn get(path: ApiPath) -> Self {
        Self::new(Method::GET, path)
    }

    pub(crate) fn delete(path: ApiPath) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub(crate) fn param(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    pub(crate) fn params<I>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.query.extend(params);
        self
    }

    pub(crate) fn json<T: Serialize + ?Sized>(mut self, payload: &T) -> anyhow::Result<Self> {
        self.body = RequestBody::Json(serde_json::to_value(payload)?);
        Ok(self)
    }

    pub(crate) fn raw(mut self, body: impl Into<String>) -> Self {
        self.body = RequestBody::Raw(body.into());
        self
    }

    pub(crate) fn accept(mut self, content_type: &'static str) -> Self {
        self.accept = Some(content_type);
        self
    }

    pub(crate) fn path_and_query(&self) -> String {
        let mut target = self.path.as_str().to_string();
        append_params(&mut target, &self.query);
        target
    }

    pub(crate) fn url(&self, addr: &str) -> String {
        format!("{}{}", addr.trim_end_matches('/'), self.path_and_query())
    }
}

/// First pair goes after `?`, every later one after `&`; values are encoded.
pub(crate) fn append_params(url: &mut String, params: &[(String, String)]) {
    if params.is_empty() {
        return;
    }
    let query = params
        .iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect::<Vec<String>>()
        .join("&");
    url.push('?');
    url.push_str(&query);
}
