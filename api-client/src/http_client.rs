// HTTP client for the Drowsiness Monitor API

use crate::config::ApiConfig;
use crate::errors::ApiError;
use drowsiness_monitor_core::{
    Credentials, NoToken, PredictRequest, Registration, TokenProvider,
};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use std::fmt::Display;
use tracing::{debug, warn};

/// Number of sessions fetched when the caller has no preference
pub const DEFAULT_SESSION_LIMIT: u32 = 10;

/// Request payload
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// JSON value, serialized once right before sending
    Json(Value),
    /// Pre-serialized text, sent as-is
    Text(String),
}

impl RequestBody {
    /// Convert any serializable value into a JSON body
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, ApiError> {
        Ok(RequestBody::Json(serde_json::to_value(value)?))
    }

    fn into_text(self) -> Result<String, ApiError> {
        match self {
            RequestBody::Json(value) => Ok(serde_json::to_string(&value)?),
            RequestBody::Text(text) => Ok(text),
        }
    }
}

impl From<Value> for RequestBody {
    fn from(value: Value) -> Self {
        RequestBody::Json(value)
    }
}

impl From<String> for RequestBody {
    fn from(text: String) -> Self {
        RequestBody::Text(text)
    }
}

impl From<&str> for RequestBody {
    fn from(text: &str) -> Self {
        RequestBody::Text(text.to_string())
    }
}

/// Per-request settings for [`ApiClient::request`]
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// HTTP verb (GET when not set)
    pub method: Method,
    /// Extra headers, applied over `Content-Type: application/json`
    pub headers: Vec<(String, String)>,
    pub body: Option<RequestBody>,
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn body(mut self, body: impl Into<RequestBody>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Attach a serializable value as JSON body
    pub fn json<T: Serialize + ?Sized>(self, value: &T) -> Result<Self, ApiError> {
        Ok(self.body(RequestBody::json(value)?))
    }
}

/// Client for the prediction and session API
///
/// One instance is meant to be created at startup and handed to whatever
/// needs it. The bearer token is asked from `P` on every request.
#[derive(Debug, Clone)]
pub struct ApiClient<P = NoToken> {
    http: reqwest::Client,
    config: ApiConfig,
    tokens: P,
}

impl ApiClient<NoToken> {
    /// Client that never sends an `Authorization` header
    pub fn anonymous(config: ApiConfig) -> Self {
        Self::new(config, NoToken)
    }
}

impl<P: TokenProvider> ApiClient<P> {
    /// Create a client for the given configuration and token source
    pub fn new(config: ApiConfig, tokens: P) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            tokens,
        }
    }

    /// Create a client whose base URL comes from `API_BASE_URL`
    pub fn from_env(tokens: P) -> Self {
        Self::new(ApiConfig::from_env(), tokens)
    }

    /// Replace the underlying HTTP client (proxy settings, TLS, ...)
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }

    /// Send a request and return the decoded JSON response
    ///
    /// # Arguments
    /// * `path` - Appended verbatim to the base URL (e.g. `/health`)
    /// * `options` - Method, extra headers and body
    ///
    /// # Returns
    /// Parsed response body, `Value::Null` when the body is empty or not JSON
    pub async fn request(&self, path: &str, options: RequestOptions) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.config.base_url(), path);
        let token = self.tokens.token();
        let headers = build_headers(&options.headers, token.as_deref())?;

        debug!(
            method = %options.method,
            url = %url,
            authenticated = token.is_some(),
            "sending API request"
        );

        let mut builder = self.http.request(options.method, &url).headers(headers);
        if let Some(body) = options.body {
            builder = builder.body(body.into_text()?);
        }

        let response = builder.send().await?;
        let status = response.status();
        debug!(status = status.as_u16(), url = %url, "received API response");

        let data = match response.bytes().await {
            Ok(bytes) => parse_body(&bytes),
            Err(err) => {
                debug!(error = %err, "response body could not be read, treating as null");
                Value::Null
            }
        };

        if !status.is_success() {
            let error = ApiError::from_response(status, data);
            warn!(status = status.as_u16(), url = %url, error = %error, "API request failed");
            return Err(error);
        }

        Ok(data)
    }

    /// Submit an image for drowsiness prediction
    ///
    /// # Arguments
    /// * `image` - Base64 image, bare or as a `data:` URL
    pub async fn predict(&self, image: impl Into<String>) -> Result<Value, ApiError> {
        self.post("/predict", &PredictRequest::new(image)).await
    }

    /// Submit raw image bytes for prediction, encoded as a `data:` URL
    pub async fn predict_bytes(&self, bytes: &[u8], mime: &str) -> Result<Value, ApiError> {
        self.post("/predict", &PredictRequest::from_bytes(bytes, mime)).await
    }

    /// Persist a monitoring session
    ///
    /// The session is sent as given; [`drowsiness_monitor_core::SessionRecord`]
    /// is the shape the server expects.
    pub async fn save_session<T: Serialize + ?Sized>(&self, session: &T) -> Result<Value, ApiError> {
        self.post("/save_session", session).await
    }

    /// Fetch the `limit` most recent sessions
    pub async fn get_sessions(&self, limit: u32) -> Result<Value, ApiError> {
        self.get(&format!("/get_sessions?limit={}", limit)).await
    }

    /// Delete one session; the id is percent-encoded into a single path
    /// segment (a no-op for the numeric ids the server uses)
    pub async fn delete_session(&self, id: impl Display) -> Result<Value, ApiError> {
        self.delete(&format!("/delete_session/{}", path_segment(id))).await
    }

    /// Remove every session of the signed-in user
    pub async fn clear_sessions(&self) -> Result<Value, ApiError> {
        self.delete("/clear_sessions").await
    }

    /// Liveness probe
    pub async fn health(&self) -> Result<Value, ApiError> {
        self.get("/health").await
    }

    /// Store one captured frame
    pub async fn save_frame<T: Serialize + ?Sized>(&self, frame: &T) -> Result<Value, ApiError> {
        self.post("/save_frame", frame).await
    }

    pub async fn get_session_frames(&self, id: impl Display) -> Result<Value, ApiError> {
        self.get(&format!("/get_session_frames/{}", path_segment(id))).await
    }

    /// Exchange credentials for a bearer token
    ///
    /// The token is returned in the response body; storing it is up to the
    /// caller (see `TokenStore::store_from_login` in the storage service).
    pub async fn login(&self, credentials: &Credentials) -> Result<Value, ApiError> {
        self.post("/auth/login", credentials).await
    }

    pub async fn register(&self, registration: &Registration) -> Result<Value, ApiError> {
        self.post("/auth/register", registration).await
    }

    /// Profile of the user owning the current token
    pub async fn profile(&self) -> Result<Value, ApiError> {
        self.get("/auth/profile").await
    }

    pub async fn model_info(&self) -> Result<Value, ApiError> {
        self.get("/model_info").await
    }

    pub async fn performance(&self) -> Result<Value, ApiError> {
        self.get("/performance").await
    }

    /// Run face detection only, without a drowsiness prediction
    pub async fn face_detection_test(&self, image: impl Into<String>) -> Result<Value, ApiError> {
        self.post("/face_detection_test", &PredictRequest::new(image)).await
    }

    /// List all users (admin token required)
    pub async fn admin_users(&self) -> Result<Value, ApiError> {
        self.get("/admin/users").await
    }

    pub async fn admin_user_sessions(&self, user_id: impl Display) -> Result<Value, ApiError> {
        self.get(&format!("/admin/users/{}/sessions", path_segment(user_id))).await
    }

    /// Delete a user account and its sessions (admin token required)
    pub async fn admin_delete_user(&self, user_id: impl Display) -> Result<Value, ApiError> {
        self.delete(&format!("/admin/users/{}", path_segment(user_id))).await
    }

    async fn get(&self, path: &str) -> Result<Value, ApiError> {
        self.request(path, RequestOptions::new(Method::GET)).await
    }

    async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.request(path, RequestOptions::new(Method::DELETE)).await
    }

    async fn post<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<Value, ApiError> {
        self.request(path, RequestOptions::new(Method::POST).json(body)?).await
    }
}

/// Assemble outgoing headers.
///
/// Caller headers override the JSON content type; the bearer token is
/// applied last so an authenticated client always identifies itself.
fn build_headers(extra: &[(String, String)], token: Option<&str>) -> Result<HeaderMap, ApiError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    for (name, value) in extra {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| ApiError::InvalidHeader(name.clone()))?;
        let value = HeaderValue::from_str(value)
            .map_err(|_| ApiError::InvalidHeader(name.to_string()))?;
        headers.insert(name, value);
    }

    if let Some(token) = token {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| ApiError::InvalidHeader(AUTHORIZATION.to_string()))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    Ok(headers)
}

fn parse_body(bytes: &[u8]) -> Value {
    match serde_json::from_slice(bytes) {
        Ok(value) => value,
        Err(err) => {
            if !bytes.is_empty() {
                debug!(error = %err, "response body is not JSON, treating as null");
            }
            Value::Null
        }
    }
}

fn path_segment(id: impl Display) -> String {
    urlencoding::encode(&id.to_string()).into_owned()
}
