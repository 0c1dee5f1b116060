//! Pages
//!
//! One component per route. Page data lives in page signals and is dropped
//! when the user navigates away.

mod about;
mod categories;
mod contact;
mod dashboard;
mod inventory;
mod item_detail;
mod item_edit;
mod login;
mod not_found;
mod register;
mod transactions;
mod users;

pub use about::AboutPage;
pub use categories::CategoriesPage;
pub use contact::ContactPage;
pub use dashboard::DashboardPage;
pub use inventory::InventoryPage;
pub use item_detail::ItemDetailPage;
pub use item_edit::ItemEditPage;
pub use login::LoginPage;
pub use not_found::NotFoundPage;
pub use register::RegisterPage;
pub use transactions::TransactionsPage;
pub use users::UsersPage;
