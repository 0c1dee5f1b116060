//! Client-Side Routes
//!
//! Pages are addressed by `Route`. Navigation is an explicit state change in
//! the app store, mirrored into the browser history.

use borrowdesk_api::{ApiError, SessionStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    Login,
    Register,
    #[default]
    Dashboard,
    Inventory,
    ItemDetail(u32),
    ItemEdit(u32),
    Categories,
    Transactions,
    Users,
    About,
    Contact,
    NotFound,
}

impl Route {
    pub fn from_path(path: &str) -> Self {
        let segments: Vec<&str> = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        match segments.as_slice() {
            [] | ["dashboard"] => Route::Dashboard,
            ["login"] => Route::Login,
            ["register"] => Route::Register,
            ["inventory"] => Route::Inventory,
            ["inventory", "edit", id] => id.parse().map(Route::ItemEdit).unwrap_or(Route::NotFound),
            ["inventory", id] => id.parse().map(Route::ItemDetail).unwrap_or(Route::NotFound),
            ["categories"] => Route::Categories,
            ["transactions"] => Route::Transactions,
            ["users"] => Route::Users,
            ["about"] => Route::About,
            ["contact"] => Route::Contact,
            _ => Route::NotFound,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".into(),
            Route::Register => "/register".into(),
            Route::Dashboard => "/dashboard".into(),
            Route::Inventory => "/inventory".into(),
            Route::ItemDetail(id) => format!("/inventory/{id}"),
            Route::ItemEdit(id) => format!("/inventory/edit/{id}"),
            Route::Categories => "/categories".into(),
            Route::Transactions => "/transactions".into(),
            Route::Users => "/users".into(),
            Route::About => "/about".into(),
            Route::Contact => "/contact".into(),
            Route::NotFound => "/404".into(),
        }
    }

    /// Reachable without signing in
    pub fn is_public(&self) -> bool {
        matches!(self, Route::Login | Route::Register | Route::About | Route::Contact | Route::NotFound)
    }

    pub fn admin_only(&self) -> bool {
        matches!(self, Route::ItemEdit(_) | Route::Categories | Route::Users)
    }

    /// The route actually shown for a requested one
    pub fn guard(self, signed_in: bool, is_admin: bool) -> Route {
        if !signed_in && !self.is_public() {
            return Route::Login;
        }
        if signed_in && matches!(self, Route::Login | Route::Register) {
            return Route::Dashboard;
        }
        if self.admin_only() && !is_admin {
            return Route::Dashboard;
        }
        self
    }

    /// Where a failed call sends the user, if anywhere.
    ///
    /// Only an expired session on a non-auth request redirects, and never
    /// while already on the login page.
    pub fn after_error(err: &ApiError, current: Route) -> Option<Route> {
        (err.requires_login() && current != Route::Login).then_some(Route::Login)
    }
}

/// Apply an expired session to the token store.
///
/// Clears the token and returns the page to show when `err` forces a trip
/// to Login. Any other failure leaves the session alone.
pub fn expire_session(err: &ApiError, current: Route, session: &dyn SessionStore) -> Option<Route> {
    let target = Route::after_error(err, current)?;
    session.clear();
    Some(target)
}

/// Startup lookup of the stored token: only a rejection by the server
/// discards it. Network and server failures keep the user signed in.
pub fn discard_rejected_token(err: &ApiError, session: &dyn SessionStore) -> bool {
    if err.requires_login() {
        session.clear();
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use borrowdesk_api::MemorySession;

    #[test]
    fn test_paths_round_trip() {
        let routes = [
            Route::Login,
            Route::Register,
            Route::Dashboard,
            Route::Inventory,
            Route::ItemDetail(42),
            Route::ItemEdit(42),
            Route::Categories,
            Route::Transactions,
            Route::Users,
            Route::About,
            Route::Contact,
        ];
        for route in routes {
            assert_eq!(Route::from_path(&route.path()), route);
        }
    }

    #[test]
    fn test_from_path_edge_cases() {
        assert_eq!(Route::from_path("/"), Route::Dashboard);
        assert_eq!(Route::from_path("/inventory/"), Route::Inventory);
        assert_eq!(Route::from_path("/inventory?filter=low-stock"), Route::Inventory);
        assert_eq!(Route::from_path("/inventory/abc"), Route::NotFound);
        assert_eq!(Route::from_path("/nope"), Route::NotFound);
    }

    #[test]
    fn test_guard() {
        assert_eq!(Route::Inventory.guard(false, false), Route::Login);
        assert_eq!(Route::About.guard(false, false), Route::About);
        assert_eq!(Route::Login.guard(true, false), Route::Dashboard);
        assert_eq!(Route::Users.guard(true, false), Route::Dashboard);
        assert_eq!(Route::Users.guard(true, true), Route::Users);
        assert_eq!(Route::ItemDetail(3).guard(true, false), Route::ItemDetail(3));
    }

    #[test]
    fn test_expired_session_redirects_to_login() {
        let expired = ApiError::Unauthorized { message: None, login_required: true };
        assert_eq!(Route::after_error(&expired, Route::Inventory), Some(Route::Login));
        assert_eq!(Route::after_error(&expired, Route::Login), None);
    }

    #[test]
    fn test_background_401_clears_session() {
        // e.g. the unread-count poll after the token has expired
        let session = MemorySession::with_token("stale");
        let expired = ApiError::Unauthorized { message: None, login_required: true };

        assert_eq!(expire_session(&expired, Route::Transactions, &session), Some(Route::Login));
        assert_eq!(session.token(), None);
    }

    #[test]
    fn test_401_on_login_page_keeps_session() {
        let session = MemorySession::with_token("abc");
        let expired = ApiError::Unauthorized { message: None, login_required: true };

        assert_eq!(expire_session(&expired, Route::Login, &session), None);
        assert_eq!(session.token().as_deref(), Some("abc"));
    }

    #[test]
    fn test_other_failures_keep_session() {
        let session = MemorySession::with_token("abc");
        let server = ApiError::Server { status: 500, message: None };
        let bad_credentials = ApiError::Unauthorized { message: None, login_required: false };

        assert_eq!(expire_session(&server, Route::Dashboard, &session), None);
        assert_eq!(expire_session(&bad_credentials, Route::Login, &session), None);
        assert!(session.is_authenticated());
    }

    #[test]
    fn test_startup_lookup_only_discards_rejected_token() {
        let session = MemorySession::with_token("abc");
        let offline = ApiError::Network {
            url: "http://localhost:8000/api/user".into(),
            code: "ERR_NETWORK",
            message: "connection refused".into(),
        };
        assert!(!discard_rejected_token(&offline, &session));
        assert!(!discard_rejected_token(&ApiError::Server { status: 503, message: None }, &session));
        assert_eq!(session.token().as_deref(), Some("abc"));

        let rejected = ApiError::Unauthorized { message: None, login_required: true };
        assert!(discard_rejected_token(&rejected, &session));
        assert_eq!(session.token(), None);
    }

    #[test]
    fn test_failed_login_does_not_redirect() {
        let bad_credentials = ApiError::Unauthorized { message: None, login_required: false };
        assert_eq!(Route::after_error(&bad_credentials, Route::Register), None);

        let server = ApiError::Server { status: 500, message: None };
        assert_eq!(Route::after_error(&server, Route::Dashboard), None);
    }
}
