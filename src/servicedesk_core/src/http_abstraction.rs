//! Framework-neutral HTTP traits used by the handlers.
//!
//! Handlers never see a concrete web framework. The axum crate implements
//! these traits on newtype wrappers of its own request and response types:
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  servicedesk_core: AuthRequest,          │
//! │  AuthResponseBuilder                     │
//! └──────────────┬───────────────────────────┘
//!                │
//!                ▼
//! ┌──────────────────────────────────────────┐
//! │  servicedesk_axum: PartsRequest,         │
//! │  AxumResponseBuilder                     │
//! └──────────────┬───────────────────────────┘
//!                │
//!                ▼
//! ┌──────────────────────────────────────────┐
//! │  servicedesk_adapters::handlers          │
//! │  (generic over the builder)              │
//! └──────────────────────────────────────────┘
//! ```

/// Read access to the parts of a request that session handling needs.
pub trait AuthRequest {
    /// Header lookup. Case-insensitive; `None` when missing or not valid UTF-8.
    fn header(&self, name: &str) -> Option<&str>;

    /// Value of the named cookie from the `Cookie` header.
    fn cookie(&self, name: &str) -> Option<&str> {
        let cookie_header = self.header("cookie")?;
        cookie_header.split(';').find_map(|pair| {
            let (key, value) = pair.trim().split_once('=')?;
            (key == name).then_some(value)
        })
    }

    fn method(&self) -> &str;

    fn path(&self) -> &str;
}

/// Builder for framework responses, used with method chaining:
///
/// ```ignore
/// builder
///     .status(303)
///     .header("location", "/account/login")
///     .cookie("sid=token; HttpOnly; SameSite=Lax; Path=/")
///     .build()
/// ```
pub trait AuthResponseBuilder: Sized {
    /// The final response type produced by this builder
    type Response;

    fn status(self, code: u16) -> Self;

    fn header(self, name: &str, value: &str) -> Self;

    /// Add a Set-Cookie header. `cookie_value` is a complete cookie string.
    fn cookie(self, cookie_value: &str) -> Self {
        self.header("set-cookie", cookie_value)
    }

    /// Set a JSON body together with its Content-Type header.
    fn json_body(self, body: serde_json::Value) -> Self;

    fn build(self) -> Self::Response;
}

/// Shorthands for the responses the account routes produce.
///
/// Implemented for every [`AuthResponseBuilder`].
pub trait AuthResponseHelpers: AuthResponseBuilder {
    /// Create a 200 OK JSON response
    fn ok_json(self, body: serde_json::Value) -> Self::Response {
        self.status(200).json_body(body).build()
    }

    /// Create a 303 See Other redirect with an optional JSON body
    fn see_other(self, location: &str, body: Option<serde_json::Value>) -> Self::Response {
        let builder = self.status(303).header("location", location);
        match body {
            Some(body) => builder.json_body(body).build(),
            None => builder.build(),
        }
    }

    /// Create a 400 Bad Request response
    fn bad_request(self, message: &str) -> Self::Response {
        self.status(400)
            .json_body(serde_json::json!({ "error": message }))
            .build()
    }

    /// Create a 401 Unauthorized response
    fn unauthorized(self, message: &str) -> Self::Response {
        self.status(401)
            .json_body(serde_json::json!({ "error": message }))
            .build()
    }

    /// Create a 403 Forbidden response
    fn forbidden(self, message: &str) -> Self::Response {
        self.status(403)
            .json_body(serde_json::json!({ "error": message }))
            .build()
    }

    /// Create a 404 Not Found response
    fn not_found(self, message: &str) -> Self::Response {
        self.status(404)
            .json_body(serde_json::json!({ "error": message }))
            .build()
    }

    /// Create a 500 Internal Server Error response
    fn internal_error(self, message: &str) -> Self::Response {
        self.status(500)
            .json_body(serde_json::json!({ "error": message }))
            .build()
    }
}

// Blanket implementation for all AuthResponseBuilder types
impl<T: AuthResponseBuilder> AuthResponseHelpers for T {}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockRequest {
        headers: std::collections::HashMap<String, String>,
        method: String,
        path: String,
    }

    impl AuthRequest for MockRequest {
        fn header(&self, name: &str) -> Option<&str> {
            let name_lower = name.to_lowercase();
            self.headers
                .iter()
                .find(|(k, _)| k.to_lowercase() == name_lower)
                .map(|(_, v)| v.as_str())
        }

        fn method(&self) -> &str {
            &self.method
        }

        fn path(&self) -> &str {
            &self.path
        }
    }

    #[derive(Default)]
    struct MockResponse {
        status: u16,
        headers: Vec<(String, String)>,
        body: Option<serde_json::Value>,
    }

    impl AuthResponseBuilder for MockResponse {
        type Response = MockResponse;

        fn status(mut self, code: u16) -> Self {
            self.status = code;
            self
        }

        fn header(mut self, name: &str, value: &str) -> Self {
            self.headers.push((name.to_string(), value.to_string()));
            self
        }

        fn json_body(mut self, body: serde_json::Value) -> Self {
            self.body = Some(body);
            self
        }

        fn build(self) -> Self::Response {
            self
        }
    }

    #[test]
    fn test_cookie_lookup_from_header() {
        let mut headers = std::collections::HashMap::new();
        headers.insert(
            "Cookie".to_string(),
            "theme=dark; sid=abc123; other=x".to_string(),
        );
        let req = MockRequest {
            headers,
            method: "GET".to_string(),
            path: "/account/profile".to_string(),
        };

        assert_eq!(req.method(), "GET");
        assert_eq!(req.path(), "/account/profile");
        assert_eq!(req.cookie("sid"), Some("abc123"));
        assert_eq!(req.cookie("missing"), None);
    }

    #[test]
    fn test_see_other_sets_location() {
        let resp = MockResponse::default().see_other("/account/login", None);
        assert_eq!(resp.status, 303);
        assert_eq!(
            resp.headers,
            vec![("location".to_string(), "/account/login".to_string())]
        );
        assert!(resp.body.is_none());
    }

    #[test]
    fn test_error_helpers_wrap_message() {
        let resp = MockResponse::default().not_found("gone");
        assert_eq!(resp.status, 404);
        assert_eq!(resp.body, Some(serde_json::json!({ "error": "gone" })));
    }
}
