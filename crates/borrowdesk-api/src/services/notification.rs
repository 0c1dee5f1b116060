//! Notification Facade

use serde::Deserialize;

use crate::envelope::ApiResponse;
use crate::error::ApiResult;
use crate::gateway::{ApiRequest, Gateway};
use crate::models::Notification;

#[derive(Debug, Deserialize)]
struct UnreadCount {
    #[serde(default)]
    count: u32,
}

pub struct NotificationService<'a> {
    gateway: &'a Gateway,
}

impl<'a> NotificationService<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    pub async fn list(&self) -> ApiResult<Vec<Notification>> {
        Ok(self.gateway.fetch_list(ApiRequest::get("/user/notifications")).await?.data)
    }

    /// Reads `data.count`, then a top-level `count`, then 0
    pub async fn unread_count(&self) -> ApiResult<u32> {
        let response = self
            .gateway
            .fetch::<Option<UnreadCount>>(ApiRequest::get("/user/notifications/unread-count"))
            .await?;
        Ok(response.data.map(|c| c.count).unwrap_or(0))
    }

    pub async fn mark_read(&self, id: u32) -> ApiResult<ApiResponse<()>> {
        self.gateway
            .send(ApiRequest::put(format!("/user/notifications/{id}/read")))
            .await
    }

    pub async fn mark_all_read(&self) -> ApiResult<ApiResponse<()>> {
        self.gateway
            .send(ApiRequest::put("/user/notifications/mark-all-read"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::session::MemorySession;
    use crate::testing::{gateway_with, MockTransport};

    #[tokio::test]
    async fn test_unread_count_shapes() {
        let transport = MockTransport::new()
            .respond(200, r#"{"status":true,"data":{"count":4}}"#)
            .respond(200, r#"{"count":2}"#)
            .respond(200, r#"{"status":true,"data":null}"#);
        let (gateway, _) = gateway_with(MemorySession::with_token("tok"), transport);

        assert_eq!(gateway.notifications().unread_count().await.unwrap(), 4);
        assert_eq!(gateway.notifications().unread_count().await.unwrap(), 2);
        assert_eq!(gateway.notifications().unread_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_and_mark_routes() {
        let transport = MockTransport::new()
            .respond(200, r#"{"data":[{"id":1,"message":"Tripod is overdue","status":"unread","created_at":"2026-10-15T08:00:00Z"}]}"#);
        let (gateway, sent) = gateway_with(MemorySession::with_token("tok"), transport);

        let notifications = gateway.notifications().list().await.unwrap();
        assert!(notifications[0].is_unread());

        gateway.notifications().mark_read(1).await.unwrap();
        assert_eq!(sent.last().url, "http://localhost:8000/api/user/notifications/1/read");
        gateway.notifications().mark_all_read().await.unwrap();
        assert_eq!(sent.last().url, "http://localhost:8000/api/user/notifications/mark-all-read");
    }
}
