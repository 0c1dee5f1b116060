//! View Filters
//!
//! Pure helpers that turn fetched lists into what a page shows.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use borrowdesk_api::{Item, Transaction, TransactionStatus, User};

/// Number of transactions on the dashboard
pub const RECENT_TRANSACTIONS: usize = 5;

// ========================
// Items
// ========================

/// Category choice on the inventory page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Id(u32),
}

impl CategoryFilter {
    /// Parse a `<select>` value: `"all"` or a category id
    pub fn from_value(value: &str) -> Self {
        value.parse().map(CategoryFilter::Id).unwrap_or(CategoryFilter::All)
    }

    pub fn value(&self) -> String {
        match self {
            CategoryFilter::All => "all".into(),
            CategoryFilter::Id(id) => id.to_string(),
        }
    }

    fn matches(&self, item: &Item) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Id(id) => item.category_id == Some(*id),
        }
    }
}

/// Items in the chosen category whose name or description contains `search`,
/// ignoring case
pub fn filter_items(items: &[Item], category: CategoryFilter, search: &str) -> Vec<Item> {
    let needle = search.trim().to_lowercase();
    items
        .iter()
        .filter(|item| category.matches(item))
        .filter(|item| {
            needle.is_empty()
                || item.name.to_lowercase().contains(&needle)
                || item.description.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

pub fn low_stock(items: &[Item]) -> Vec<Item> {
    items.iter().filter(|item| item.is_low_stock()).cloned().collect()
}

// ========================
// Transactions
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransactionFilter {
    #[default]
    All,
    Borrowed,
    Returned,
}

impl TransactionFilter {
    pub const ALL: [TransactionFilter; 3] =
        [TransactionFilter::All, TransactionFilter::Borrowed, TransactionFilter::Returned];

    pub fn label(&self) -> &'static str {
        match self {
            TransactionFilter::All => "All",
            TransactionFilter::Borrowed => "Borrowed",
            TransactionFilter::Returned => "Returned",
        }
    }

    pub fn matches(&self, tx: &Transaction) -> bool {
        match self {
            TransactionFilter::All => true,
            TransactionFilter::Borrowed => tx.status == TransactionStatus::Borrowed,
            TransactionFilter::Returned => tx.status == TransactionStatus::Returned,
        }
    }
}

pub fn filter_transactions(transactions: &[Transaction], filter: TransactionFilter) -> Vec<Transaction> {
    transactions.iter().filter(|tx| filter.matches(tx)).cloned().collect()
}

pub fn count_transactions(transactions: &[Transaction], filter: TransactionFilter) -> usize {
    transactions.iter().filter(|tx| filter.matches(tx)).count()
}

/// Transactions that belong to one item
pub fn transactions_for_item(transactions: &[Transaction], item_id: u32) -> Vec<Transaction> {
    transactions.iter().filter(|tx| tx.item_id == item_id).cloned().collect()
}

// ========================
// Dashboard
// ========================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardStats {
    pub total_items: usize,
    pub total_categories: usize,
    pub total_users: usize,
    pub recent_transactions: Vec<Transaction>,
    pub low_stock_items: Vec<Item>,
}

impl DashboardStats {
    /// Counts are the lengths of what was fetched. `users` is empty for
    /// non-admins.
    pub fn compute(items: &[Item], category_count: usize, transactions: &[Transaction], users: &[User]) -> Self {
        Self {
            total_items: items.len(),
            total_categories: category_count,
            total_users: users.len(),
            recent_transactions: transactions.iter().take(RECENT_TRANSACTIONS).cloned().collect(),
            low_stock_items: low_stock(items),
        }
    }
}

// ========================
// Dates
// ========================

/// Render a backend timestamp as e.g. `Oct 1, 2026`.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS` and plain dates. Anything else is
/// shown as received.
pub fn format_date(raw: &str) -> String {
    const DISPLAY: &str = "%b %-d, %Y";
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return ts.format(DISPLAY).to_string();
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return ts.format(DISPLAY).to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format(DISPLAY).to_string();
    }
    raw.to_string()
}

pub fn format_optional_date(raw: Option<&str>) -> String {
    raw.map(format_date).unwrap_or_else(|| "-".to_string())
}

/// `YYYY-MM-DD` for a date input
pub fn input_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_input_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(id: u32, name: &str, description: &str, quantity: u32, category_id: u32) -> Item {
        serde_json::from_value(json!({
            "id": id,
            "name": name,
            "description": description,
            "quantity": quantity,
            "status": "available",
            "category_id": category_id
        }))
        .unwrap()
    }

    fn tx(id: u32, item_id: u32, status: &str) -> Transaction {
        serde_json::from_value(json!({
            "id": id,
            "item_id": item_id,
            "status": status,
            "borrow_date": "2026-10-01"
        }))
        .unwrap()
    }

    fn inventory() -> Vec<Item> {
        vec![
            item(1, "Cordless Drill", "18V with two batteries", 12, 1),
            item(2, "Projector", "HDMI, 3000 lumens", 2, 2),
            item(3, "Extension cord", "For the drill station", 30, 1),
        ]
    }

    #[test]
    fn test_filter_items_by_category_and_search() {
        let items = inventory();
        assert_eq!(filter_items(&items, CategoryFilter::All, "").len(), 3);
        assert_eq!(filter_items(&items, CategoryFilter::Id(1), "").len(), 2);

        // Search hits name or description, case-insensitive
        let found = filter_items(&items, CategoryFilter::All, "DRILL");
        assert_eq!(found.iter().map(|i| i.id).collect::<Vec<_>>(), vec![1, 3]);

        let found = filter_items(&items, CategoryFilter::Id(2), "drill");
        assert!(found.is_empty());
    }

    #[test]
    fn test_category_filter_value() {
        assert_eq!(CategoryFilter::from_value("all"), CategoryFilter::All);
        assert_eq!(CategoryFilter::from_value("7"), CategoryFilter::Id(7));
        assert_eq!(CategoryFilter::Id(7).value(), "7");
    }

    #[test]
    fn test_dashboard_stats() {
        let items = inventory();
        let transactions: Vec<Transaction> = (1..=7).map(|id| tx(id, 1, "borrowed")).collect();
        let stats = DashboardStats::compute(&items, 2, &transactions, &[]);

        assert_eq!(stats.total_items, 3);
        assert_eq!(stats.total_categories, 2);
        assert_eq!(stats.total_users, 0);
        assert_eq!(stats.recent_transactions.len(), RECENT_TRANSACTIONS);
        assert_eq!(stats.recent_transactions[0].id, 1);
        assert_eq!(stats.low_stock_items.iter().map(|i| i.id).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_transaction_filter_counts() {
        let transactions = vec![tx(1, 1, "borrowed"), tx(2, 1, "returned"), tx(3, 2, "cancelled")];
        assert_eq!(count_transactions(&transactions, TransactionFilter::All), 3);
        assert_eq!(count_transactions(&transactions, TransactionFilter::Borrowed), 1);
        assert_eq!(count_transactions(&transactions, TransactionFilter::Returned), 1);
        assert_eq!(filter_transactions(&transactions, TransactionFilter::Returned)[0].id, 2);
        assert_eq!(transactions_for_item(&transactions, 1).len(), 2);
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2026-10-01"), "Oct 1, 2026");
        assert_eq!(format_date("2026-10-01T08:30:00.000000Z"), "Oct 1, 2026");
        assert_eq!(format_date("2026-10-01 08:30:00"), "Oct 1, 2026");
        assert_eq!(format_date("yesterday"), "yesterday");
        assert_eq!(format_optional_date(None), "-");
    }

    #[test]
    fn test_input_date() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
        assert_eq!(input_date(date), "2026-03-09");
        assert_eq!(parse_input_date("2026-03-09"), Some(date));
        assert_eq!(parse_input_date(""), None);
    }
}
