//! API Gateway
//!
//! The single point of egress for backend calls. Owns credential attachment,
//! payload shaping, failure classification and envelope decoding.
//!
//! Nothing here retries or navigates. A 401 comes back as
//! `ApiError::Unauthorized` and the UI decides what to do with it.

use std::sync::Arc;

use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::envelope::{self, ApiResponse};
use crate::error::{ApiError, ApiResult, FailureBody};
use crate::session::SessionStore;
use crate::transport::{
    HttpTransport, MultipartForm, OutgoingRequest, RawResponse, RequestBody, Transport, TransportError,
};

/// Routes where a 401 means "wrong credentials", not "session expired"
const AUTH_ROUTES: [&str; 2] = ["/login", "/register"];

#[derive(Debug, Clone, PartialEq)]
enum Target {
    /// Relative to the API root
    Api(String),
    /// Absolute URL outside the API root
    Absolute(String),
}

/// A request as a facade describes it, before interception
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    target: Target,
    query: Vec<(String, String)>,
    body: RequestBody,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            target: Target::Api(path.into()),
            query: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Request to a URL outside the API root
    pub fn absolute(method: Method, url: impl Into<String>) -> Self {
        Self { target: Target::Absolute(url.into()), ..Self::new(method, String::new()) }
    }

    pub fn query<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.query.extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> ApiResult<Self> {
        let value = serde_json::to_value(body).map_err(|e| ApiError::Request(e.to_string()))?;
        self.body = RequestBody::Json(value);
        Ok(self)
    }

    pub fn multipart(mut self, form: MultipartForm) -> Self {
        self.body = RequestBody::Multipart(form);
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Path or URL as given by the facade
    pub fn route(&self) -> &str {
        match &self.target {
            Target::Api(path) | Target::Absolute(path) => path,
        }
    }

    fn is_auth_route(&self) -> bool {
        let route = self.route();
        AUTH_ROUTES.iter().any(|auth| route.contains(auth))
    }
}

/// Shared, cheaply cloned handle to the backend
#[derive(Clone)]
pub struct Gateway {
    config: Arc<ClientConfig>,
    session: Arc<dyn SessionStore>,
    transport: Arc<dyn Transport>,
}

impl Gateway {
    pub fn new(
        config: ClientConfig,
        session: Arc<dyn SessionStore>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self { config: Arc::new(config), session, transport }
    }

    /// Gateway over real HTTP
    pub fn connect(config: ClientConfig, session: Arc<dyn SessionStore>) -> ApiResult<Self> {
        let transport = HttpTransport::new(&config)?;
        tracing::info!(base_url = %config.base_url, "API gateway configured");
        Ok(Self::new(config, session, Arc::new(transport)))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &dyn SessionStore {
        self.session.as_ref()
    }

    /// Outgoing interceptor: turn a facade request into what goes on the wire.
    ///
    /// Synchronous and unconditional. Attaches the bearer token when one is
    /// stored and drops `Content-Type` for multipart bodies so the transport
    /// can write the boundary.
    pub fn intercept(&self, request: ApiRequest) -> OutgoingRequest {
        let ApiRequest { method, target, query, body } = request;

        let url = match target {
            Target::Api(path) => self.config.api_url(&path),
            Target::Absolute(url) => url,
        };

        let mut headers = self.config.default_headers.clone();
        if let Some(token) = self.session.token() {
            match HeaderValue::from_str(&format!("Bearer {token}")) {
                Ok(value) => {
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => tracing::warn!("session token is not a valid header value, sending without it"),
            }
        }
        if body.is_multipart() {
            headers.remove(CONTENT_TYPE);
        }

        OutgoingRequest {
            method,
            url,
            query,
            headers,
            body,
            timeout: self.config.timeout,
            with_credentials: self.config.with_credentials,
        }
    }

    /// Incoming interceptor: pass successes through, classify failures.
    fn classify(
        &self,
        url: &str,
        auth_route: bool,
        outcome: Result<RawResponse, TransportError>,
    ) -> ApiResult<RawResponse> {
        let response = match outcome {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(
                    url,
                    code = err.kind.code(),
                    error = %err.message,
                    "network error, check that the backend is running at {}",
                    self.config.base_url
                );
                return Err(ApiError::Network {
                    url: url.to_string(),
                    code: err.kind.code(),
                    message: err.message,
                });
            }
        };

        if response.status.is_success() {
            return Ok(response);
        }

        let status = response.status;
        let failure = FailureBody::parse(&response.body);
        tracing::debug!(url, status = status.as_u16(), "request failed");

        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized {
                message: failure.message,
                login_required: !auth_route,
            });
        }

        if status == StatusCode::UNPROCESSABLE_ENTITY
            || (status.is_client_error() && !failure.errors.is_empty())
        {
            return Err(ApiError::Validation {
                status: status.as_u16(),
                message: failure.message,
                errors: failure.errors,
            });
        }

        Err(ApiError::Server { status: status.as_u16(), message: failure.message })
    }

    /// Send one request through both interceptors
    pub async fn execute(&self, request: ApiRequest) -> ApiResult<RawResponse> {
        let auth_route = request.is_auth_route();
        let outgoing = self.intercept(request);
        let url = outgoing.url.clone();
        tracing::debug!(method = %outgoing.method, url = %url, "sending request");

        let outcome = self.transport.send(outgoing).await;
        self.classify(&url, auth_route, outcome)
    }

    /// Send and decode a single enveloped payload
    pub async fn fetch<T: DeserializeOwned>(&self, request: ApiRequest) -> ApiResult<ApiResponse<T>> {
        let response = self.execute(request).await?;
        envelope::decode(&response.body)
    }

    /// Send and decode an enveloped list
    pub async fn fetch_list<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> ApiResult<ApiResponse<Vec<T>>> {
        let response = self.execute(request).await?;
        envelope::decode_list(&response.body)
    }

    /// Send and keep only the server message
    pub async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse<()>> {
        let response = self.execute(request).await?;
        envelope::decode_message(&response.body)
    }
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("base_url", &self.config.base_url)
            .field("authenticated", &self.session.is_authenticated())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemorySession;
    use crate::testing::{gateway_with, MockTransport};
    use crate::transport::TransportErrorKind;
    use reqwest::header::ACCEPT;

    #[test]
    fn test_bearer_token_attached_when_present() {
        let (gateway, _) = gateway_with(MemorySession::with_token("tok-42"), MockTransport::new());
        let outgoing = gateway.intercept(ApiRequest::get("/user/items"));
        assert_eq!(outgoing.headers.get(AUTHORIZATION).unwrap(), "Bearer tok-42");
        assert_eq!(outgoing.url, "http://localhost:8000/api/user/items");
        assert!(outgoing.with_credentials);
    }

    #[test]
    fn test_no_authorization_header_without_token() {
        let (gateway, _) = gateway_with(MemorySession::new(), MockTransport::new());
        let outgoing = gateway.intercept(ApiRequest::get("/user/items"));
        assert!(outgoing.headers.get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_multipart_drops_content_type() {
        let (gateway, _) = gateway_with(MemorySession::with_token("tok"), MockTransport::new());
        let form = MultipartForm::new().text("name", "Drill");
        let outgoing = gateway.intercept(ApiRequest::post("/admin/items").multipart(form));
        assert!(outgoing.headers.get(CONTENT_TYPE).is_none());
        assert_eq!(outgoing.headers.get(ACCEPT).unwrap(), "application/json");
        assert_eq!(outgoing.headers.get(AUTHORIZATION).unwrap(), "Bearer tok");
    }

    #[test]
    fn test_json_keeps_content_type() {
        let (gateway, _) = gateway_with(MemorySession::new(), MockTransport::new());
        let request = ApiRequest::post("/admin/categories")
            .json(&serde_json::json!({ "name": "Tools" }))
            .unwrap();
        let outgoing = gateway.intercept(request);
        assert_eq!(outgoing.headers.get(CONTENT_TYPE).unwrap(), "application/json");
        assert_eq!(outgoing.timeout, std::time::Duration::from_secs(30));
    }

    #[test]
    fn test_absolute_target_bypasses_api_root() {
        let (gateway, _) = gateway_with(MemorySession::new(), MockTransport::new());
        let url = gateway.config().server_endpoint("/sanctum/csrf-cookie");
        let outgoing = gateway.intercept(ApiRequest::absolute(Method::GET, url));
        assert_eq!(outgoing.url, "http://localhost:8000/sanctum/csrf-cookie");
    }

    #[tokio::test]
    async fn test_401_on_resource_route_requires_login() {
        let transport = MockTransport::new().respond(401, r#"{"message":"Unauthenticated."}"#);
        let (gateway, _) = gateway_with(MemorySession::with_token("stale"), transport);

        let err = gateway.fetch_list::<crate::Item>(ApiRequest::get("/user/items")).await.unwrap_err();
        assert!(err.requires_login());
        assert_eq!(err.server_message(), Some("Unauthenticated."));
    }

    #[tokio::test]
    async fn test_401_on_login_route_does_not_require_login() {
        let transport = MockTransport::new()
            .respond(401, r#"{"message":"Invalid credentials"}"#)
            .respond(401, "{}");
        let (gateway, _) = gateway_with(MemorySession::new(), transport);

        let err = gateway.send(ApiRequest::post("/login")).await.unwrap_err();
        assert_eq!(err, ApiError::Unauthorized { message: Some("Invalid credentials".into()), login_required: false });

        let err = gateway.send(ApiRequest::post("/register")).await.unwrap_err();
        assert!(!err.requires_login());
    }

    #[tokio::test]
    async fn test_network_failure_propagates_without_retry() {
        let transport = MockTransport::new().fail(TransportErrorKind::Network, "connection refused");
        let (gateway, sent) = gateway_with(MemorySession::new(), transport);

        let err = gateway.send(ApiRequest::get("/health")).await.unwrap_err();
        match err {
            ApiError::Network { url, code, .. } => {
                assert_eq!(url, "http://localhost:8000/api/health");
                assert_eq!(code, "ERR_NETWORK");
            }
            other => panic!("expected network error, got {other:?}"),
        }
        assert_eq!(sent.count(), 1);
    }

    #[tokio::test]
    async fn test_timeout_is_a_network_failure() {
        let transport = MockTransport::new().fail(TransportErrorKind::Timeout, "timed out");
        let (gateway, _) = gateway_with(MemorySession::new(), transport);
        let err = gateway.send(ApiRequest::get("/user/items")).await.unwrap_err();
        assert!(matches!(err, ApiError::Network { code: "ECONNABORTED", .. }));
    }

    #[tokio::test]
    async fn test_validation_and_server_failures() {
        let transport = MockTransport::new()
            .respond(422, r#"{"message":null,"errors":{"name":["The name has already been taken."]}}"#)
            .respond(500, r#"{"message":"Server Error"}"#)
            .respond(404, "");
        let (gateway, _) = gateway_with(MemorySession::new(), transport);

        let err = gateway.send(ApiRequest::post("/admin/categories")).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation { status: 422, .. }));
        assert_eq!(err.user_message("Failed"), "The name has already been taken.");

        let err = gateway.send(ApiRequest::get("/user/items")).await.unwrap_err();
        assert_eq!(err, ApiError::Server { status: 500, message: Some("Server Error".into()) });

        let err = gateway.send(ApiRequest::get("/user/items/999")).await.unwrap_err();
        assert_eq!(err.user_message("Failed to load item data"), "Failed to load item data");
    }

    #[tokio::test]
    async fn test_success_passes_through_and_decodes_once() {
        let transport = MockTransport::new()
            .respond(200, r#"{"status":true,"data":[{"id":1,"name":"Tools"},{"id":2,"name":"Audio"}]}"#);
        let (gateway, _) = gateway_with(MemorySession::new(), transport);

        let categories = gateway
            .fetch_list::<crate::Category>(ApiRequest::get("/user/categories"))
            .await
            .unwrap()
            .data;
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[1].name, "Audio");
    }
}
