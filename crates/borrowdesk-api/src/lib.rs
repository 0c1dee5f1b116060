//! Borrowdesk API Client
//!
//! Layered the same way front to back:
//! - config: where the backend lives and the request defaults
//! - session: bearer token storage behind a trait
//! - transport: the wire (reqwest in production, in-memory in tests)
//! - gateway: interceptors, failure classification and envelope decoding
//! - services: one facade per backend resource

pub mod config;
pub mod envelope;
pub mod error;
pub mod gateway;
pub mod models;
pub mod services;
pub mod session;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use config::ClientConfig;
pub use envelope::ApiResponse;
pub use error::{ApiError, ApiResult, FieldErrors};
pub use gateway::{ApiRequest, Gateway};
pub use models::{
    Category, Item, ItemStatus, Notification, NotificationStatus, Transaction, TransactionStatus,
    User, UserRole,
};
pub use session::{LocalStorageSession, MemorySession, SessionStore, TOKEN_STORAGE_KEY};
pub use transport::{
    FormField, HttpTransport, MultipartForm, OutgoingRequest, RawResponse, RequestBody, Transport,
    TransportError, TransportErrorKind,
};
