//! User Facade (admin only)

use crate::envelope::ApiResponse;
use crate::error::ApiResult;
use crate::gateway::{ApiRequest, Gateway};
use crate::models::User;

pub struct UserService<'a> {
    gateway: &'a Gateway,
}

impl<'a> UserService<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    pub async fn list(&self, query: &[(&str, &str)]) -> ApiResult<Vec<User>> {
        let request = ApiRequest::get("/admin/users").query(query.iter().copied());
        Ok(self.gateway.fetch_list(request).await?.data)
    }

    /// Flip the user's restricted flag; the server decides the new value
    pub async fn toggle_restriction(&self, id: u32) -> ApiResult<ApiResponse<()>> {
        self.gateway
            .send(ApiRequest::put(format!("/admin/users/{id}/toggle-restriction")))
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::session::MemorySession;
    use crate::testing::{gateway_with, MockTransport};
    use reqwest::Method;

    #[tokio::test]
    async fn test_list_and_toggle() {
        let transport = MockTransport::new()
            .respond(200, r#"{"data":[{"id":2,"name":"Lee","email":"lee@example.com","is_restricted":false}]}"#)
            .respond(200, r#"{"message":"User restricted"}"#);
        let (gateway, sent) = gateway_with(MemorySession::with_token("admin"), transport);

        let users = gateway.users().list(&[("search", "lee")]).await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(sent.get(0).query, vec![("search".to_string(), "lee".to_string())]);

        let toggled = gateway.users().toggle_restriction(2).await.unwrap();
        assert_eq!(toggled.message.as_deref(), Some("User restricted"));
        assert_eq!(sent.get(1).method, Method::PUT);
        assert_eq!(sent.get(1).url, "http://localhost:8000/api/admin/users/2/toggle-restriction");
    }
}
