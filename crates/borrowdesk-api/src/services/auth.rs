//! Auth Facade
//!
//! Sign-in, sign-up and profile routes. Login and register write the token
//! into the session store; logout always clears it.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::envelope::ApiResponse;
use crate::error::ApiResult;
use crate::gateway::{ApiRequest, Gateway};
use crate::models::User;

#[derive(Debug, Serialize)]
pub struct Credentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct Registration<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub password_confirmation: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ProfileUpdate<'a> {
    pub name: &'a str,
    pub email: &'a str,
}

#[derive(Debug, Serialize)]
pub struct PasswordChange<'a> {
    pub current_password: &'a str,
    pub password: &'a str,
    pub password_confirmation: &'a str,
}

/// Payload of a successful login or registration
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthSession {
    pub user: User,
    #[serde(alias = "access_token")]
    pub token: String,
}

pub struct AuthService<'a> {
    gateway: &'a Gateway,
}

impl<'a> AuthService<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// Prime the CSRF cookie. Lives outside the API root.
    pub async fn csrf_cookie(&self) -> ApiResult<()> {
        let url = self.gateway.config().server_endpoint("/sanctum/csrf-cookie");
        self.gateway.execute(ApiRequest::absolute(Method::GET, url)).await?;
        Ok(())
    }

    pub async fn login(&self, credentials: &Credentials<'_>) -> ApiResult<ApiResponse<AuthSession>> {
        let response = self
            .gateway
            .fetch::<AuthSession>(ApiRequest::post("/login").json(credentials)?)
            .await?;
        self.gateway.session().set_token(&response.data.token);
        tracing::info!(user_id = response.data.user.id, "signed in");
        Ok(response)
    }

    pub async fn register(&self, registration: &Registration<'_>) -> ApiResult<ApiResponse<AuthSession>> {
        let response = self
            .gateway
            .fetch::<AuthSession>(ApiRequest::post("/register").json(registration)?)
            .await?;
        self.gateway.session().set_token(&response.data.token);
        tracing::info!(user_id = response.data.user.id, "registered");
        Ok(response)
    }

    /// Sign out. The local token is cleared whether or not the server agrees.
    pub async fn logout(&self) -> ApiResult<ApiResponse<()>> {
        let result = self.gateway.send(ApiRequest::post("/logout")).await;
        self.gateway.session().clear();
        if let Err(err) = &result {
            tracing::warn!(error = %err, "logout request failed, local session cleared anyway");
        }
        result
    }

    pub async fn current_user(&self) -> ApiResult<User> {
        Ok(self.gateway.fetch::<User>(ApiRequest::get("/user")).await?.data)
    }

    pub async fn update_profile(&self, update: &ProfileUpdate<'_>) -> ApiResult<ApiResponse<User>> {
        self.gateway.fetch(ApiRequest::put("/user/profile").json(update)?).await
    }

    pub async fn change_password(&self, change: &PasswordChange<'_>) -> ApiResult<ApiResponse<()>> {
        self.gateway.send(ApiRequest::put("/user/password").json(change)?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::session::MemorySession;
    use crate::testing::{gateway_with, MockTransport};
    use crate::transport::{RequestBody, TransportErrorKind};
    use reqwest::header::AUTHORIZATION;

    const LOGIN_OK: &str = r#"{"status":true,"message":"Login successful","data":{"user":{"id":5,"name":"Sam","email":"sam@example.com","role":"user"},"token":"5|abcdef"}}"#;

    #[tokio::test]
    async fn test_login_stores_token_and_later_requests_carry_it() {
        let transport = MockTransport::new()
            .respond(204, "")
            .respond(200, LOGIN_OK)
            .respond(200, r#"{"status":true,"data":[]}"#);
        let (gateway, sent) = gateway_with(MemorySession::new(), transport);

        gateway.auth().csrf_cookie().await.unwrap();
        assert_eq!(sent.get(0).url, "http://localhost:8000/sanctum/csrf-cookie");

        let session = gateway
            .auth()
            .login(&Credentials { email: "sam@example.com", password: "secret123" })
            .await
            .unwrap();
        assert_eq!(session.data.user.name, "Sam");
        assert_eq!(session.message.as_deref(), Some("Login successful"));
        assert_eq!(gateway.session().token().as_deref(), Some("5|abcdef"));

        let login = sent.get(1);
        assert_eq!(login.method, Method::POST);
        assert!(login.headers.get(AUTHORIZATION).is_none());
        assert_eq!(
            login.body,
            RequestBody::Json(serde_json::json!({ "email": "sam@example.com", "password": "secret123" }))
        );

        gateway.items().list(&[]).await.unwrap();
        assert_eq!(sent.last().headers.get(AUTHORIZATION).unwrap(), "Bearer 5|abcdef");
    }

    #[tokio::test]
    async fn test_failed_login_leaves_session_empty() {
        let transport = MockTransport::new().respond(401, r#"{"message":"Invalid credentials"}"#);
        let (gateway, _) = gateway_with(MemorySession::new(), transport);

        let err = gateway
            .auth()
            .login(&Credentials { email: "sam@example.com", password: "wrong" })
            .await
            .unwrap_err();
        assert!(!err.requires_login());
        assert_eq!(err.user_message("Login failed"), "Invalid credentials");
        assert!(!gateway.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_register_accepts_access_token_alias() {
        let transport = MockTransport::new().respond(
            201,
            r#"{"data":{"user":{"id":8,"name":"Kim","email":"kim@example.com"},"access_token":"8|xyz"}}"#,
        );
        let (gateway, sent) = gateway_with(MemorySession::new(), transport);

        gateway
            .auth()
            .register(&Registration {
                name: "Kim",
                email: "kim@example.com",
                password: "password1",
                password_confirmation: "password1",
            })
            .await
            .unwrap();
        assert_eq!(gateway.session().token().as_deref(), Some("8|xyz"));
        assert_eq!(sent.last().url, "http://localhost:8000/api/register");
    }

    #[tokio::test]
    async fn test_logout_clears_token_even_on_failure() {
        let transport = MockTransport::new().fail(TransportErrorKind::Network, "offline");
        let (gateway, _) = gateway_with(MemorySession::with_token("tok"), transport);

        let result = gateway.auth().logout().await;
        assert!(matches!(result, Err(ApiError::Network { .. })));
        assert!(!gateway.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_current_user_unwraps_envelope() {
        let transport = MockTransport::new()
            .respond(200, r#"{"status":true,"data":{"id":1,"name":"Ada","email":"ada@example.com","role":"admin"}}"#);
        let (gateway, _) = gateway_with(MemorySession::with_token("tok"), transport);

        let user = gateway.auth().current_user().await.unwrap();
        assert!(user.is_admin());
    }
}
