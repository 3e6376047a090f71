//! Generic HTTP request sender.
//!
//! [`Gateway`] is the seam between session state and the network: a single
//! `send` parameterized by method, route, query parameters, optional JSON
//! body, and optional bearer token. [`HttpGateway`] is the production
//! implementation over `reqwest`; tests substitute the recording
//! [`testing::FakeGateway`].

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ApiError;

/// Fixed per-request timeout. The only bound on how long a caller waits.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// HTTP methods used by the account service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

/// A query parameter value: string, number, or boolean.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    Str(String),
    Int(i64),
    Bool(bool),
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryValue::Str(s) => write!(f, "{}", s),
            QueryValue::Int(n) => write!(f, "{}", n),
            QueryValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Str(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Str(value)
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        QueryValue::Int(value)
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        QueryValue::Bool(value)
    }
}

/// One outgoing request, fully described.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, QueryValue)>,
    pub body: Option<Value>,
    pub token: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            token: None,
        }
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}

/// Serialize query parameters as `?key=value&key2=value2`, percent-encoding
/// keys and values. Empty input yields an empty string.
pub fn query_string(params: &[(String, QueryValue)]) -> String {
    if params.is_empty() {
        return String::new();
    }
    let encoded: Vec<String> = params
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(&value.to_string())
            )
        })
        .collect();
    format!("?{}", encoded.join("&"))
}

/// Request sender. Consumed by the session only.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Send one request and return the parsed JSON response body.
    /// An empty 2xx body parses as JSON null.
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError>;
}

/// Production gateway over a pooled [`reqwest::Client`].
///
/// Base URL and the 20-second timeout are fixed at construction. The
/// `Authorization: Bearer <token>` header is attached only when the
/// request carries a token.
pub struct HttpGateway {
    http: reqwest::Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, request: &ApiRequest) -> String {
        format!(
            "{}{}{}",
            self.base_url,
            request.path,
            query_string(&request.query)
        )
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let url = self.url(&request);
        let mut builder = match request.method {
            Method::Get => self.http.get(&url),
            Method::Post => self.http.post(&url),
            Method::Patch => self.http.patch(&url),
            Method::Delete => self.http.delete(&url),
        };
        if let Some(token) = &request.token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        tracing::debug!(method = ?request.method, %url, "sending request");
        let response = builder.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(server_error(status.as_u16(), &body));
        }

        let body = response.text().await?;
        if body.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(format!("response body: {}", e)))
    }
}

/// Decode a non-2xx body. The server reports failures as
/// `{"code": ..., "message": ...}`; anything else is kept verbatim as the
/// message, with no code.
fn server_error(status: u16, body: &str) -> ApiError {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        code: Option<String>,
        message: Option<String>,
    }

    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => ApiError::Server {
            status,
            code: parsed.code,
            message: parsed.message.unwrap_or_else(|| body.to_string()),
        },
        Err(_) => ApiError::Server {
            status,
            code: None,
            message: body.to_string(),
        },
    }
}

#[cfg(any(test, feature = "testing"))]
pub mod testing {
    //! Recording gateway for tests.

    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    /// Gateway that records every request and replays a queue of canned
    /// results. With no canned result queued, `send` answers JSON null.
    #[derive(Default)]
    pub struct FakeGateway {
        requests: Mutex<Vec<ApiRequest>>,
        replies: Mutex<VecDeque<Result<Value, ApiError>>>,
    }

    impl FakeGateway {
        pub fn new() -> Self {
            Self::default()
        }

        /// Queue the result of the next `send`.
        pub fn push_reply(&self, reply: Result<Value, ApiError>) {
            self.replies.lock().unwrap().push_back(reply);
        }

        /// Shorthand for queuing a remote rejection with a server code.
        pub fn push_rejection(&self, status: u16, code: &str) {
            self.push_reply(Err(ApiError::Server {
                status,
                code: Some(code.to_string()),
                message: String::new(),
            }));
        }

        /// Everything sent so far, in order.
        pub fn requests(&self) -> Vec<ApiRequest> {
            self.requests.lock().unwrap().clone()
        }

        pub fn request_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl Gateway for FakeGateway {
        async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
            self.requests.lock().unwrap().push(request);
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Ok(Value::Null))
        }
    }
}
