//! Service Facades
//!
//! One facade per backend resource, one method per route. Each method issues
//! exactly one request through the gateway; no retries, no validation.

mod auth;
mod category;
mod health;
mod item;
mod notification;
mod transaction;
mod user;

pub use auth::{AuthService, AuthSession, Credentials, PasswordChange, ProfileUpdate, Registration};
pub use category::{CategoryForm, CategoryService};
pub use health::HealthService;
pub use item::{ImageUpload, ItemForm, ItemService, MAX_IMAGE_BYTES, ALLOWED_IMAGE_TYPES};
pub use notification::NotificationService;
pub use transaction::{BorrowRequest, TransactionService, DEFAULT_LOAN_DAYS};
pub use user::UserService;

use crate::gateway::Gateway;

impl Gateway {
    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(self)
    }

    pub fn categories(&self) -> CategoryService<'_> {
        CategoryService::new(self)
    }

    pub fn items(&self) -> ItemService<'_> {
        ItemService::new(self)
    }

    pub fn transactions(&self) -> TransactionService<'_> {
        TransactionService::new(self)
    }

    pub fn notifications(&self) -> NotificationService<'_> {
        NotificationService::new(self)
    }

    pub fn users(&self) -> UserService<'_> {
        UserService::new(self)
    }

    pub fn health(&self) -> HealthService<'_> {
        HealthService::new(self)
    }
}
