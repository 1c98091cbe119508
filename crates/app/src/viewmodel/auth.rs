//! Authentication view model

use portal_net::ApiClient;
use tracing::warn;

/// Login view: credentials plus the last error shown under the form
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub error: Option<String>,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            error: None,
        }
    }

    /// Exchange the credentials for a stored token. Returns whether the
    /// user is now signed in; on failure the message lands in `error`.
    pub async fn submit(&mut self, api: &ApiClient) -> bool {
        self.error = None;
        match api.login(self.email.trim(), &self.password).await {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "Login failed");
                let message = e.to_string();
                self.error = Some(if message.is_empty() {
                    "Login failed".to_string()
                } else {
                    message
                });
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewmodel::test_support::spawn_server;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use portal_core::{MemoryTokenStore, TokenStore};
    use serde_json::{json, Value};
    use std::sync::Arc;

    async fn login_api() -> (ApiClient, Arc<MemoryTokenStore>) {
        let app = Router::new().route(
            "/api/login",
            post(|Json(body): Json<Value>| async move {
                if body["email"] == "john.doe@tecnics.com" && body["password"] == "secret" {
                    (StatusCode::OK, Json(json!({"token": "tok"})))
                } else {
                    (StatusCode::UNAUTHORIZED, Json(json!("Invalid credentials")))
                }
            }),
        );
        let base = spawn_server(app).await;
        let tokens = Arc::new(MemoryTokenStore::new());
        (ApiClient::new(base, tokens.clone()).unwrap(), tokens)
    }

    #[tokio::test]
    async fn test_successful_login_stores_token() {
        let (api, tokens) = login_api().await;
        let mut form = LoginForm::new(" john.doe@tecnics.com ", "secret");
        assert!(form.submit(&api).await);
        assert!(form.error.is_none());
        assert_eq!(tokens.token().unwrap().as_deref(), Some("tok"));
    }

    #[tokio::test]
    async fn test_rejected_login_shows_message() {
        let (api, tokens) = login_api().await;
        let mut form = LoginForm::new("john.doe@tecnics.com", "nope");
        assert!(!form.submit(&api).await);
        assert_eq!(form.error.as_deref(), Some("Login failed: \"Invalid credentials\""));
        assert!(tokens.token().unwrap().is_none());
    }
}
