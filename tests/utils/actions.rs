#![allow(dead_code)] // Test utilities may not all be used in every test

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::Value;
use tower::ServiceExt;

use super::setup::TestSetup;

// ============================================================================
// Action Helpers
// ============================================================================

pub struct TestResponse {
    pub status: StatusCode,
    pub set_cookie: Option<String>,
    pub body: Value,
}

impl TestResponse {
    /// Value of the cookie named `name` in the Set-Cookie header
    pub fn cookie_value(&self, name: &str) -> Option<String> {
        let set_cookie = self.set_cookie.as_ref()?;
        let first = set_cookie.split(';').next()?;
        let (cookie_name, value) = first.split_once('=')?;
        (cookie_name == name).then(|| value.to_string())
    }
}

impl TestSetup {
    /// Send a request through the full router
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        form: Option<&str>,
        session_id: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if form.is_some() {
            builder = builder.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        }
        if let Some(session_id) = session_id {
            builder = builder.header(
                header::COOKIE,
                format!("{}={}", self.config.session_name, session_id),
            );
        }
        let request = builder
            .body(Body::from(form.unwrap_or_default().to_string()))
            .unwrap();

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse {
            status,
            set_cookie,
            body,
        }
    }

    // ============================================================================
    // Convenience Action Methods
    // ============================================================================

    pub async fn register(&self, email: &str, password: &str) -> TestResponse {
        let form = format!("email={}&password={}", encode(email), encode(password));
        self.send("POST", "/register", Some(&form), None).await
    }

    pub async fn login(&self, email: &str, password: &str) -> TestResponse {
        let form = format!("email={}&password={}", encode(email), encode(password));
        self.send("POST", "/auth/login", Some(&form), None).await
    }

    /// Log in and return the issued session id
    pub async fn login_session(&self, email: &str, password: &str) -> String {
        let response = self.login(email, password).await;
        assert_eq!(response.status, StatusCode::OK, "login failed: {}", response.body);
        response
            .cookie_value(&self.config.session_name)
            .expect("login should set the session cookie")
    }

    pub async fn profile(&self, session_id: Option<&str>) -> TestResponse {
        self.send("GET", "/profile", None, session_id).await
    }

    pub async fn logout(&self, session_id: Option<&str>) -> TestResponse {
        self.send("GET", "/auth/logout", None, session_id).await
    }
}

/// Minimal form encoding for the characters used in test data
fn encode(value: &str) -> String {
    value.replace('%', "%25").replace('@', "%40").replace('&', "%26").replace('+', "%2B")
}
