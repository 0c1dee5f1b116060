//! Transport Layer
//!
//! The gateway decides *what* to send; a `Transport` only moves bytes.
//! `HttpTransport` wraps reqwest (fetch in the browser). Tests plug in an
//! in-memory transport instead.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};

use crate::config::ClientConfig;
use crate::error::ApiError;

/// One part of a multipart body
#[derive(Debug, Clone, PartialEq)]
pub enum FormField {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        mime: String,
        bytes: Vec<u8>,
    },
}

/// A multipart form body, kept as plain data until it reaches the transport
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultipartForm {
    fields: Vec<FormField>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(FormField::Text { name: name.into(), value: value.into() });
        self
    }

    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        mime: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        self.fields.push(FormField::File {
            name: name.into(),
            file_name: file_name.into(),
            mime: mime.into(),
            bytes,
        });
        self
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    /// Value of the first text field named `name`
    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.fields.iter().find_map(|field| match field {
            FormField::Text { name: n, value } if n == name => Some(value.as_str()),
            _ => None,
        })
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|field| match field {
            FormField::Text { name: n, .. } | FormField::File { name: n, .. } => n == name,
        })
    }

    fn into_reqwest(self) -> Result<reqwest::multipart::Form, ApiError> {
        let mut form = reqwest::multipart::Form::new();
        for field in self.fields {
            form = match field {
                FormField::Text { name, value } => form.text(name, value),
                FormField::File { name, file_name, mime, bytes } => {
                    let part = reqwest::multipart::Part::bytes(bytes)
                        .file_name(file_name)
                        .mime_str(&mime)
                        .map_err(|e| ApiError::Request(format!("invalid mime type {mime}: {e}")))?;
                    form.part(name, part)
                }
            };
        }
        Ok(form)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(serde_json::Value),
    Multipart(MultipartForm),
}

impl RequestBody {
    pub fn is_multipart(&self) -> bool {
        matches!(self, RequestBody::Multipart(_))
    }
}

/// A fully intercepted request, ready for the wire
#[derive(Debug, Clone)]
pub struct OutgoingRequest {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
    pub body: RequestBody,
    pub timeout: Duration,
    pub with_credentials: bool,
}

/// Status and body of whatever the server answered
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            body: body.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    Timeout,
    Network,
    /// The request could not be built or encoded
    Request,
}

impl TransportErrorKind {
    /// Short code used in logs
    pub fn code(&self) -> &'static str {
        match self {
            TransportErrorKind::Timeout => "ECONNABORTED",
            TransportErrorKind::Network => "ERR_NETWORK",
            TransportErrorKind::Request => "ERR_BAD_REQUEST",
        }
    }
}

/// Failure before any response arrived
#[derive(Debug, Clone)]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into() }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            TransportErrorKind::Timeout
        } else if err.is_builder() {
            TransportErrorKind::Request
        } else {
            TransportErrorKind::Network
        };
        Self::new(kind, err.to_string())
    }
}

/// Moves one request to the server and back.
///
/// Futures are not `Send`: in the browser everything runs on one event loop.
#[async_trait(?Send)]
pub trait Transport: Send + Sync {
    async fn send(&self, request: OutgoingRequest) -> Result<RawResponse, TransportError>;
}

/// reqwest-backed transport (browser fetch on wasm32)
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(_config: &ClientConfig) -> Result<Self, ApiError> {
        let builder = reqwest::Client::builder();

        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.cookie_store(_config.with_credentials);

        let client = builder
            .build()
            .map_err(|e| ApiError::Request(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait(?Send)]
impl Transport for HttpTransport {
    async fn send(&self, request: OutgoingRequest) -> Result<RawResponse, TransportError> {
        let OutgoingRequest { method, url, query, headers, body, timeout, with_credentials } = request;

        let mut builder = self
            .client
            .request(method, &url)
            .headers(headers)
            .timeout(timeout);
        if !query.is_empty() {
            builder = builder.query(&query);
        }

        #[cfg(target_arch = "wasm32")]
        if with_credentials {
            builder = builder.fetch_credentials_include();
        }
        #[cfg(not(target_arch = "wasm32"))]
        let _ = with_credentials;

        builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(form) => {
                let form = form
                    .into_reqwest()
                    .map_err(|e| TransportError::new(TransportErrorKind::Request, e.to_string()))?;
                builder.multipart(form)
            }
        };

        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        Ok(RawResponse { status, body: bytes.to_vec() })
    }
}
