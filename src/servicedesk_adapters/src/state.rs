use std::sync::Arc;

use servicedesk_core::{
    BannedTokenStore, Clock, EmailSender, LinkGenerator, PaymentGateway, RoleStore, TokenProvider,
    UserStore,
};

use crate::{config::IdentitySettings, session::JwtSessionManager};

/// Everything a request needs, shared across handlers. Ports are trait
/// objects so the binary and the tests can plug in different adapters.
#[derive(Clone)]
pub struct AppState {
    pub user_store: Arc<dyn UserStore>,
    pub role_store: Arc<dyn RoleStore>,
    pub token_provider: Arc<dyn TokenProvider>,
    pub banned_token_store: Arc<dyn BannedTokenStore>,
    pub email_sender: Arc<dyn EmailSender>,
    pub link_generator: Arc<dyn LinkGenerator>,
    pub payment_gateway: Arc<dyn PaymentGateway>,
    pub clock: Arc<dyn Clock>,
    pub sessions: JwtSessionManager,
    pub identity: Arc<IdentitySettings>,
    pub payment_locale: Arc<str>,
}
