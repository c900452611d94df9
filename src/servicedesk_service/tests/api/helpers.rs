use std::{sync::Arc, time::Duration};

use reqwest::cookie::{CookieStore, Jar};
use secrecy::Secret;
use serde_json::{Value, json};
use servicedesk_adapters::{
    AppState, BaseUrlLinkGenerator, IyzicoPaymentGateway, JwtSessionManager, MockEmailSender,
    SessionConfig,
    config::{IdentitySettings, test},
    persistence::{
        DashMapTokenProvider, HashMapRoleStore, HashMapUserStore, HashSetBannedTokenStore,
    },
};
use servicedesk_core::{Clock, EmailMessage, SystemClock};
use servicedesk_service::AccountService;
use tokio::net::TcpListener;
use wiremock::MockServer;

pub const COOKIE_NAME: &str = "servicedesk_session";

pub struct TestApp {
    pub address: String,
    pub cookie_jar: Arc<Jar>,
    pub http_client: reqwest::Client,
    pub email_sender: MockEmailSender,
    pub payment_server: MockServer,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_session_expiry(600).await
    }

    pub async fn with_session_expiry(expiry_in_seconds: i64) -> Self {
        let payment_server = MockServer::start().await;
        let listener = TcpListener::bind(test::APP_ADDRESS).await.unwrap();
        let address = format!("http://{}", listener.local_addr().unwrap());

        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let banned_token_store = Arc::new(HashSetBannedTokenStore::new());
        let email_sender = MockEmailSender::new();
        let payment_gateway = IyzicoPaymentGateway::new(
            payment_server.uri(),
            Secret::new("api-key".to_string()),
            Secret::new("secret-key".to_string()),
            reqwest::Client::builder()
                .timeout(Duration::from_millis(500))
                .build()
                .unwrap(),
        );

        let state = AppState {
            user_store: Arc::new(HashMapUserStore::new()),
            role_store: Arc::new(HashMapRoleStore::new()),
            token_provider: Arc::new(DashMapTokenProvider::new(
                chrono::Duration::hours(24),
                clock.clone(),
            )),
            banned_token_store: banned_token_store.clone(),
            email_sender: Arc::new(email_sender.clone()),
            link_generator: Arc::new(BaseUrlLinkGenerator::new(&address).unwrap()),
            payment_gateway: Arc::new(payment_gateway),
            clock,
            sessions: JwtSessionManager::new(
                banned_token_store,
                SessionConfig {
                    cookie_name: COOKIE_NAME.to_string(),
                    jwt_secret: Secret::new("test-secret".to_string()),
                    expiry_in_seconds,
                    sliding: true,
                    secure_cookie: false,
                },
            ),
            identity: Arc::new(IdentitySettings::default()),
            payment_locale: Arc::from("tr"),
        };

        let service = AccountService::bootstrap(state).await.unwrap();
        tokio::spawn(service.run_standalone(listener, None));

        let cookie_jar = Arc::new(Jar::default());
        let http_client = reqwest::Client::builder()
            .cookie_provider(cookie_jar.clone())
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap();

        Self {
            address,
            cookie_jar,
            http_client,
            email_sender,
            payment_server,
        }
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> reqwest::Response {
        self.http_client
            .post(format!("{}{}", self.address, path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.http_client
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn register(&self, user_name: &str, email: &str, password: &str) -> reqwest::Response {
        self.post_json(
            "/account/register",
            &json!({
                "userName": user_name,
                "email": email,
                "name": "Test",
                "surname": "User",
                "password": password,
                "confirmPassword": password,
            }),
        )
        .await
    }

    pub async fn login(&self, user_name: &str, password: &str) -> reqwest::Response {
        self.post_json(
            "/account/login",
            &json!({ "userName": user_name, "password": password }),
        )
        .await
    }

    /// Registers and signs in, leaving the session cookie in the jar.
    pub async fn signed_in(&self, user_name: &str, email: &str) {
        assert_eq!(self.register(user_name, email, "pass1").await.status(), 303);
        assert_eq!(self.login(user_name, "pass1").await.status(), 303);
    }

    pub fn session_cookie(&self) -> Option<String> {
        let url = self.address.parse().unwrap();
        let header = self.cookie_jar.cookies(&url)?;
        header
            .to_str()
            .unwrap()
            .split("; ")
            .find_map(|pair| pair.strip_prefix(&format!("{COOKIE_NAME}=")))
            .map(str::to_string)
    }

    pub async fn last_email(&self) -> EmailMessage {
        self.email_sender.last().await.expect("an email was sent")
    }
}

/// Path and query of the callback link inside an email body.
pub fn callback_path(message: &EmailMessage, address: &str) -> String {
    let body = message.body();
    let start = body.find(address).expect("link points at the app") + address.len();
    let rest = &body[start..];
    let end = rest.find('\'').expect("link is quoted");
    html_escape::decode_html_entities(&rest[..end]).into_owned()
}

pub fn query_param(path: &str, name: &str) -> String {
    let url = reqwest::Url::parse(&format!("http://localhost{path}")).unwrap();
    url.query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
        .expect("parameter present")
}
