use axum::{
    extract::{Request, State},
    http::{HeaderValue, header::SET_COOKIE},
    middleware::Next,
    response::Response,
};
use servicedesk_adapters::AppState;

use crate::adapters::PartsRequest;

/// Sliding expiration: once half of a valid session's lifetime has passed,
/// the response carries a re-signed cookie. Responses that already set the
/// session cookie themselves, such as logout, are left alone.
pub async fn refresh_session(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();

    let token = state
        .sessions
        .extract_token(&PartsRequest(&parts))
        .map(str::to_owned);
    let refreshed = match token {
        Some(token) => match state.sessions.validate_token(&token).await {
            Ok(claims) if state.sessions.needs_refresh(&claims, state.clock.now()) => {
                state.sessions.refresh(&claims).ok()
            }
            _ => None,
        },
        None => None,
    };

    let mut response = next.run(Request::from_parts(parts, body)).await;

    if let Some(cookie) = refreshed {
        let prefix = format!("{}=", cookie.name());
        let already_set = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .any(|value| value.to_str().is_ok_and(|v| v.starts_with(&prefix)));
        if !already_set {
            match HeaderValue::from_str(&cookie.to_string()) {
                Ok(value) => {
                    response.headers_mut().append(SET_COOKIE, value);
                }
                Err(e) => tracing::warn!(error = %e, "Could not encode refreshed session"),
            }
        }
    }

    response
}
