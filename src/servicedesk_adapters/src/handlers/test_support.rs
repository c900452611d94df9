use std::sync::Arc;

use async_trait::async_trait;
use secrecy::Secret;
use servicedesk_core::{
    AuthResponseBuilder, EmailMessage, GatewayError, InstallmentInfoRequest,
    InstallmentInfoResponse, PaymentGateway, SystemClock,
};

use crate::{
    config::IdentitySettings,
    email::MockEmailSender,
    links::BaseUrlLinkGenerator,
    persistence::{
        DashMapTokenProvider, HashMapRoleStore, HashMapUserStore, HashSetBannedTokenStore,
    },
    session::{JwtSessionManager, SessionConfig},
    state::AppState,
};

#[derive(Debug, Default)]
pub struct TestResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl TestResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn body(&self) -> &serde_json::Value {
        self.body.as_ref().expect("response has a body")
    }
}

#[derive(Default)]
pub struct TestResponseBuilder(TestResponse);

impl AuthResponseBuilder for TestResponseBuilder {
    type Response = TestResponse;

    fn status(mut self, code: u16) -> Self {
        self.0.status = code;
        self
    }

    fn header(mut self, name: &str, value: &str) -> Self {
        self.0.headers.push((name.to_string(), value.to_string()));
        self
    }

    fn json_body(mut self, body: serde_json::Value) -> Self {
        self.0.body = Some(body);
        self
    }

    fn build(self) -> Self::Response {
        self.0
    }
}

pub fn builder() -> TestResponseBuilder {
    TestResponseBuilder::default()
}

/// Echoes the request's conversation id with a single installment tier.
pub struct EchoGateway;

#[async_trait]
impl PaymentGateway for EchoGateway {
    async fn retrieve_installment_info(
        &self,
        request: &InstallmentInfoRequest,
    ) -> Result<InstallmentInfoResponse, GatewayError> {
        Ok(serde_json::from_value(serde_json::json!({
            "status": "success",
            "conversationId": request.conversation_id,
            "installmentDetails": [{
                "binNumber": request.bin_number.as_str(),
                "price": 1000.0,
                "installmentPrices": [
                    {"installmentNumber": 1, "installmentPrice": 1000.0, "totalPrice": 1000.0}
                ]
            }]
        }))
        .expect("valid canned response"))
    }
}

pub fn test_state() -> (AppState, MockEmailSender) {
    let clock = Arc::new(SystemClock);
    let banned_token_store = Arc::new(HashSetBannedTokenStore::new());
    let email_sender = MockEmailSender::new();
    let sessions = JwtSessionManager::new(
        banned_token_store.clone(),
        SessionConfig {
            cookie_name: "servicedesk_session".to_string(),
            jwt_secret: Secret::new("secret".to_string()),
            expiry_in_seconds: 300,
            sliding: true,
            secure_cookie: false,
        },
    );
    let state = AppState {
        user_store: Arc::new(HashMapUserStore::new()),
        role_store: Arc::new(HashMapRoleStore::new()),
        token_provider: Arc::new(DashMapTokenProvider::new(
            chrono::Duration::hours(24),
            clock.clone(),
        )),
        banned_token_store,
        email_sender: Arc::new(email_sender.clone()),
        link_generator: Arc::new(
            BaseUrlLinkGenerator::new("http://localhost:3000").expect("valid base url"),
        ),
        payment_gateway: Arc::new(EchoGateway),
        clock,
        sessions,
        identity: Arc::new(IdentitySettings::default()),
        payment_locale: Arc::from("tr"),
    };
    (state, email_sender)
}

/// Reads a query parameter out of the link embedded in a sent email.
pub fn link_param(message: &EmailMessage, name: &str) -> String {
    let key = format!("{name}=");
    let start = message.body().find(&key).expect("link has the parameter") + key.len();
    let rest = &message.body()[start..];
    let end = rest
        .find(|c: char| c == '&' || c == '\'')
        .unwrap_or(rest.len());
    rest[..end].to_string()
}
