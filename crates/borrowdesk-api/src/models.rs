//! Backend Models
//!
//! Read-only snapshots of what the server last returned.

use serde::{Deserialize, Deserializer, Serialize};

/// Items below this quantity count as low stock
pub const LOW_STOCK_THRESHOLD: u32 = 10;

// ========================
// Status Enums
// ========================

/// Generates a string-backed status enum that keeps unknown values around
/// instead of failing the whole page.
macro_rules! string_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            Other(String),
        }

        impl $name {
            pub fn as_str(&self) -> &str {
                match self {
                    $($name::$variant => $text,)+
                    $name::Other(s) => s.as_str(),
                }
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                match s.as_str() {
                    $($text => $name::$variant,)+
                    _ => $name::Other(s),
                }
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> String {
                value.as_str().to_string()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

string_enum! {
    /// Availability of an inventory item
    ItemStatus {
        Available => "available",
        Borrowed => "borrowed",
        Maintenance => "maintenance",
    }
}

string_enum! {
    /// Borrow lifecycle state
    TransactionStatus {
        Borrowed => "borrowed",
        Returned => "returned",
        Cancelled => "cancelled",
    }
}

string_enum! {
    NotificationStatus {
        Unread => "unread",
        Read => "read",
    }
}

string_enum! {
    UserRole {
        Admin => "admin",
        User => "user",
    }
}

impl Default for ItemStatus {
    fn default() -> Self {
        ItemStatus::Available
    }
}

impl Default for UserRole {
    fn default() -> Self {
        UserRole::User
    }
}

impl ItemStatus {
    /// Values offered by the item forms
    pub const CHOICES: [ItemStatus; 3] =
        [ItemStatus::Available, ItemStatus::Borrowed, ItemStatus::Maintenance];
}

// ========================
// Entities
// ========================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u32,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_restricted: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub status: ItemStatus,
    #[serde(default, deserialize_with = "lenient_id")]
    pub category_id: Option<u32>,
    #[serde(default)]
    pub category: Option<Category>,
    /// Storage path relative to `<server>/storage/`
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Item {
    /// Whether a borrow request makes sense for this item
    pub fn is_borrowable(&self) -> bool {
        self.status == ItemStatus::Available && self.quantity >= 1
    }

    pub fn is_low_stock(&self) -> bool {
        self.quantity < LOW_STOCK_THRESHOLD
    }

    /// Embedded category name, if the server included it
    pub fn category_name(&self) -> Option<&str> {
        self.category.as_ref().map(|c| c.name.as_str())
    }

    /// Public URL of the item image under `<server_url>/storage/`
    pub fn image_url(&self, server_url: &str) -> Option<String> {
        let image = self.image.as_deref().filter(|path| !path.is_empty())?;
        Some(format!(
            "{}/storage/{}",
            server_url.trim_end_matches('/'),
            image.trim_start_matches('/')
        ))
    }
}

/// Minimal item shape embedded in a transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSummary {
    pub id: u32,
    pub name: String,
}

/// Minimal user shape embedded in a transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: u32,
    #[serde(deserialize_with = "required_lenient_id")]
    pub item_id: u32,
    #[serde(default)]
    pub item: Option<ItemSummary>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub user_id: Option<u32>,
    #[serde(default)]
    pub user: Option<UserSummary>,
    pub status: TransactionStatus,
    #[serde(default)]
    pub borrow_date: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub return_date: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Transaction {
    /// Timestamp shown in lists: creation time, falling back to borrow date
    pub fn display_timestamp(&self) -> Option<&str> {
        self.created_at.as_deref().or(self.borrow_date.as_deref())
    }

    pub fn item_name(&self) -> &str {
        self.item.as_ref().map(|i| i.name.as_str()).unwrap_or("Item")
    }

    pub fn is_open(&self) -> bool {
        self.status == TransactionStatus::Borrowed
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: u32,
    pub message: String,
    pub status: NotificationStatus,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Notification {
    pub fn is_unread(&self) -> bool {
        self.status == NotificationStatus::Unread
    }
}

// ========================
// Lenient Field Decoders
// ========================

/// Ids sometimes arrive as numeric strings
#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Number(u32),
    Text(String),
}

fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    let repr = Option::<IdRepr>::deserialize(deserializer)?;
    Ok(match repr {
        Some(IdRepr::Number(n)) => Some(n),
        Some(IdRepr::Text(s)) => s.trim().parse().ok(),
        None => None,
    })
}

fn required_lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    lenient_id(deserializer)?.ok_or_else(|| serde::de::Error::custom("missing or invalid id"))
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Laravel serializes booleans as `0`/`1` on some drivers
fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolRepr {
        Bool(bool),
        Int(i64),
    }
    Ok(match Option::<BoolRepr>::deserialize(deserializer)? {
        Some(BoolRepr::Bool(b)) => b,
        Some(BoolRepr::Int(n)) => n != 0,
        None => false,
    })
}
