use std::sync::Arc;

use async_trait::async_trait;
use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use servicedesk_core::{AuthRequest, BannedTokenStore, SessionValidator, UserId};
use thiserror::Error;

use crate::config::SessionSettings;

#[derive(Clone)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub jwt_secret: Secret<String>,
    pub expiry_in_seconds: i64,
    pub sliding: bool,
    pub secure_cookie: bool,
}

impl From<&SessionSettings> for SessionConfig {
    fn from(settings: &SessionSettings) -> Self {
        Self {
            cookie_name: settings.cookie_name.clone(),
            jwt_secret: settings.jwt_secret.clone(),
            expiry_in_seconds: settings.expiry_in_seconds,
            sliding: settings.sliding,
            secure_cookie: settings.secure_cookie,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    #[serde(default)]
    pub persistent: bool,
    /// Issue time in milliseconds, finer than `iat` for revocation checks.
    #[serde(default)]
    pub iat_ms: i64,
}

impl Claims {
    pub fn user_id(&self) -> Result<UserId, SessionError> {
        self.sub.parse().map_err(|_| SessionError::InvalidSubject)
    }

    fn issued_at_millis(&self) -> i64 {
        if self.iat_ms > 0 {
            self.iat_ms
        } else {
            self.iat.saturating_mul(1000)
        }
    }
}

/// A validated session: the raw token, needed to revoke it, and its claims.
#[derive(Debug, Clone)]
pub struct AuthenticatedSession {
    pub token: String,
    pub claims: Claims,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Missing session")]
    MissingToken,
    #[error("Invalid session")]
    InvalidToken(#[source] jsonwebtoken::errors::Error),
    #[error("Invalid session subject")]
    InvalidSubject,
    #[error("Session has been revoked")]
    TokenIsBanned,
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

/// Issues, validates, refreshes and revokes JWT session cookies.
#[derive(Clone)]
pub struct JwtSessionManager {
    banned_token_store: Arc<dyn BannedTokenStore>,
    config: SessionConfig,
}

impl JwtSessionManager {
    pub fn new(banned_token_store: Arc<dyn BannedTokenStore>, config: SessionConfig) -> Self {
        Self {
            banned_token_store,
            config,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Signs a new session for `user_id`. Remembered sessions get a
    /// `Max-Age` cookie, others a browser-session cookie.
    pub fn issue(&self, user_id: &UserId, persistent: bool) -> Result<Cookie<'static>, SessionError> {
        let token = self.generate_token(user_id, persistent, Utc::now())?;
        Ok(self.session_cookie(token, persistent))
    }

    /// Re-signs an existing session with a fresh expiry.
    pub fn refresh(&self, claims: &Claims) -> Result<Cookie<'static>, SessionError> {
        let user_id = claims.user_id()?;
        self.issue(&user_id, claims.persistent)
    }

    /// True once at least half of the session lifetime has elapsed.
    pub fn needs_refresh(&self, claims: &Claims, now: DateTime<Utc>) -> bool {
        if !self.config.sliding {
            return false;
        }
        let lifetime = claims.exp - claims.iat;
        now.timestamp() - claims.iat >= lifetime / 2
    }

    pub async fn validate_token(&self, token: &str) -> Result<Claims, SessionError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let claims = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(SessionError::InvalidToken)?;

        let is_banned = self
            .banned_token_store
            .contains_token(token)
            .await
            .map_err(|e| SessionError::UnexpectedError(e.to_string()))?;

        if is_banned {
            return Err(SessionError::TokenIsBanned);
        }

        let revoked_before = self
            .banned_token_store
            .sessions_revoked_before(&claims.user_id()?)
            .await
            .map_err(|e| SessionError::UnexpectedError(e.to_string()))?;

        if revoked_before.is_some_and(|before| claims.issued_at_millis() < before.timestamp_millis())
        {
            return Err(SessionError::TokenIsBanned);
        }

        Ok(claims)
    }

    #[tracing::instrument(name = "Revoking session", skip_all)]
    pub async fn revoke(&self, token: &str) -> Result<(), SessionError> {
        self.banned_token_store
            .ban_token(token.to_owned())
            .await
            .map_err(|e| SessionError::UnexpectedError(e.to_string()))
    }

    /// Invalidates every session of `user_id` issued until now, on any device.
    #[tracing::instrument(name = "Revoking all sessions", skip_all, fields(user_id = %user_id))]
    pub async fn revoke_all(&self, user_id: &UserId) -> Result<(), SessionError> {
        self.banned_token_store
            .revoke_sessions_before(user_id, Utc::now())
            .await
            .map_err(|e| SessionError::UnexpectedError(e.to_string()))
    }

    pub fn extract_token<'r, R: AuthRequest>(&self, request: &'r R) -> Option<&'r str> {
        request
            .cookie(&self.config.cookie_name)
            .filter(|token| !token.is_empty())
    }

    pub fn removal_cookie(&self) -> Cookie<'static> {
        let mut cookie = self.session_cookie(String::new(), false);
        cookie.make_removal();
        cookie
    }

    fn session_cookie(&self, token: String, persistent: bool) -> Cookie<'static> {
        let mut builder = Cookie::build((self.config.cookie_name.clone(), token))
            .path("/")
            .http_only(true)
            .secure(self.config.secure_cookie)
            .same_site(SameSite::Lax);
        if persistent {
            builder = builder.max_age(time::Duration::seconds(self.config.expiry_in_seconds));
        }
        builder.build()
    }

    fn generate_token(
        &self,
        user_id: &UserId,
        persistent: bool,
        now: DateTime<Utc>,
    ) -> Result<String, SessionError> {
        let iat = now.timestamp();
        let exp = iat
            .checked_add(self.config.expiry_in_seconds)
            .ok_or_else(|| SessionError::UnexpectedError("Duration out of range".to_string()))?;
        let claims = Claims {
            sub: user_id.to_string(),
            iat,
            exp,
            persistent,
            iat_ms: now.timestamp_millis(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret()),
        )
        .map_err(SessionError::InvalidToken)
    }

    fn secret(&self) -> &[u8] {
        self.config.jwt_secret.expose_secret().as_bytes()
    }
}

#[async_trait]
impl SessionValidator for JwtSessionManager {
    type Claims = AuthenticatedSession;
    type RequestParts = http::request::Parts;
    type Error = SessionError;

    async fn validate(&self, parts: &Self::RequestParts) -> Result<Self::Claims, Self::Error> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(&self.config.cookie_name)
            .map(|cookie| cookie.value().to_owned())
            .filter(|token| !token.is_empty())
            .ok_or(SessionError::MissingToken)?;

        let claims = self.validate_token(&token).await?;
        Ok(AuthenticatedSession { token, claims })
    }
}
