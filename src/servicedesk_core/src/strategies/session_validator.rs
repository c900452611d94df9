use async_trait::async_trait;

/// Validates the session carried by a request for protected routes.
///
/// The validator receives the request parts (headers, method, URI,
/// extensions) rather than the full request, so non-`Sync` bodies never
/// cross the await point.
#[async_trait]
pub trait SessionValidator: Clone + Send + Sync + 'static {
    /// Session data made available to route handlers via extractors.
    type Claims: Clone + Send + Sync + 'static;

    /// Typically `http::request::Parts`.
    type RequestParts;

    type Error: std::error::Error + Send + Sync + 'static;

    /// Extracts the session token, checks its signature and expiry and
    /// rejects revoked tokens.
    async fn validate(&self, parts: &Self::RequestParts) -> Result<Self::Claims, Self::Error>;
}
