//! Transaction Facade
//!
//! Borrow creates a transaction; return and cancel move it along. The client
//! never edits a transaction itself, it re-fetches after every mutation.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::envelope::ApiResponse;
use crate::error::ApiResult;
use crate::gateway::{ApiRequest, Gateway};
use crate::models::Transaction;

/// Loan length used when the user leaves the due date empty
pub const DEFAULT_LOAN_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BorrowRequest {
    pub item_id: u32,
    /// Serialized as `YYYY-MM-DD`
    pub borrow_date: NaiveDate,
    pub due_date: NaiveDate,
}

impl BorrowRequest {
    /// Fill missing dates: borrow today, due a week later
    pub fn new(
        item_id: u32,
        borrow_date: Option<NaiveDate>,
        due_date: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Self {
        Self {
            item_id,
            borrow_date: borrow_date.unwrap_or(today),
            due_date: due_date.unwrap_or(today + Duration::days(DEFAULT_LOAN_DAYS)),
        }
    }
}

pub struct TransactionService<'a> {
    gateway: &'a Gateway,
}

impl<'a> TransactionService<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    // ========================
    // User Routes
    // ========================

    pub async fn list(&self, query: &[(&str, &str)]) -> ApiResult<Vec<Transaction>> {
        let request = ApiRequest::get("/user/transactions").query(query.iter().copied());
        Ok(self.gateway.fetch_list(request).await?.data)
    }

    /// Every call sends a request; nothing de-duplicates rapid repeats.
    pub async fn borrow(&self, request: &BorrowRequest) -> ApiResult<ApiResponse<Transaction>> {
        self.gateway
            .fetch(ApiRequest::post("/user/transactions/borrow").json(request)?)
            .await
    }

    pub async fn return_item(&self, id: u32) -> ApiResult<ApiResponse<()>> {
        self.gateway
            .send(ApiRequest::put(format!("/user/transactions/{id}/return")))
            .await
    }

    // ========================
    // Admin Routes
    // ========================

    pub async fn admin_list(&self, query: &[(&str, &str)]) -> ApiResult<Vec<Transaction>> {
        let request = ApiRequest::get("/admin/transactions").query(query.iter().copied());
        Ok(self.gateway.fetch_list(request).await?.data)
    }

    pub async fn cancel(&self, id: u32) -> ApiResult<ApiResponse<()>> {
        self.gateway
            .send(ApiRequest::put(format!("/admin/transactions/{id}/cancel")))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionStatus;
    use crate::session::MemorySession;
    use crate::testing::{gateway_with, MockTransport};
    use crate::transport::RequestBody;
    use reqwest::Method;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_borrow_request_defaults() {
        let request = BorrowRequest::new(4, None, None, date(2026, 10, 16));
        assert_eq!(request.borrow_date, date(2026, 10, 16));
        assert_eq!(request.due_date, date(2026, 10, 23));

        let request = BorrowRequest::new(4, Some(date(2026, 11, 1)), Some(date(2026, 11, 3)), date(2026, 10, 16));
        assert_eq!(request.borrow_date, date(2026, 11, 1));
        assert_eq!(request.due_date, date(2026, 11, 3));
    }

    #[tokio::test]
    async fn test_borrow_then_return_round_trip() {
        let transport = MockTransport::new()
            .respond(201, r#"{"status":true,"message":"Item borrowed successfully","data":{"id":31,"item_id":4,"user_id":5,"status":"borrowed","borrow_date":"2026-10-16","due_date":"2026-10-23"}}"#)
            .respond(200, r#"{"status":true,"message":"Item returned successfully"}"#)
            .respond(200, r#"{"status":true,"data":[{"id":31,"item_id":4,"user_id":5,"status":"returned","borrow_date":"2026-10-16","due_date":"2026-10-23"}]}"#);
        let (gateway, sent) = gateway_with(MemorySession::with_token("tok"), transport);

        let borrowed = gateway
            .transactions()
            .borrow(&BorrowRequest::new(4, None, None, date(2026, 10, 16)))
            .await
            .unwrap();
        assert_eq!(borrowed.data.status, TransactionStatus::Borrowed);
        assert_eq!(
            sent.get(0).body,
            RequestBody::Json(serde_json::json!({
                "item_id": 4,
                "borrow_date": "2026-10-16",
                "due_date": "2026-10-23"
            }))
        );

        let returned = gateway.transactions().return_item(borrowed.data.id).await.unwrap();
        assert_eq!(returned.message.as_deref(), Some("Item returned successfully"));
        assert_eq!(sent.get(1).method, Method::PUT);
        assert_eq!(sent.get(1).url, "http://localhost:8000/api/user/transactions/31/return");

        let after = gateway.transactions().list(&[]).await.unwrap();
        assert_eq!(after[0].status, TransactionStatus::Returned);
    }

    #[tokio::test]
    async fn test_rapid_borrows_are_not_deduplicated() {
        let body = r#"{"data":{"id":1,"item_id":4,"status":"borrowed"}}"#;
        let transport = MockTransport::new().respond(201, body).respond(201, body);
        let (gateway, sent) = gateway_with(MemorySession::with_token("tok"), transport);

        let request = BorrowRequest::new(4, None, None, date(2026, 10, 16));
        let service = gateway.transactions();
        let (first, second) = tokio::join!(service.borrow(&request), service.borrow(&request));
        assert!(first.is_ok() && second.is_ok());
        assert_eq!(sent.count(), 2);
    }

    #[tokio::test]
    async fn test_admin_cancel_route() {
        let (gateway, sent) = gateway_with(MemorySession::with_token("admin"), MockTransport::new());
        gateway.transactions().cancel(9).await.unwrap();
        assert_eq!(sent.last().url, "http://localhost:8000/api/admin/transactions/9/cancel");
    }
}
