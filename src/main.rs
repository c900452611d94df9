use std::sync::Arc;

use color_eyre::eyre::Result;
use reqwest::Client as HttpClient;
use servicedesk::{
    AccountService, AppState, BaseUrlLinkGenerator, Email, IyzicoPaymentGateway,
    JwtSessionManager, PostgresRoleStore, PostgresUserStore, PostmarkEmailClient,
    RedisBannedTokenStore, RedisTokenProvider, Secret, SessionConfig,
    adapters::config::AppSettings,
    configure_postgresql,
    ports::{Clock, SystemClock},
    redis_connection,
};
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let settings = AppSettings::load()?;

    let pg_pool = configure_postgresql(&settings.postgres).await?;
    let redis_conn = redis_connection(&settings.redis)?;

    let session_config = SessionConfig::from(&settings.session);
    let banned_token_store = Arc::new(RedisBannedTokenStore::new(
        redis_conn.clone(),
        settings.session.expiry_in_seconds.unsigned_abs(),
    ));
    let token_provider = RedisTokenProvider::new(
        redis_conn,
        settings.identity.token_lifetime_in_seconds.unsigned_abs(),
    );

    let email_http_client = HttpClient::builder()
        .timeout(settings.email_client.timeout())
        .build()?;
    let email_sender = PostmarkEmailClient::new(
        settings.email_client.base_url.clone(),
        Email::try_from(Secret::new(settings.email_client.sender.clone()))?,
        settings.email_client.auth_token.clone(),
        email_http_client,
    );

    let payment_http_client = HttpClient::builder()
        .timeout(settings.payment.timeout())
        .build()?;
    let payment_gateway = IyzicoPaymentGateway::new(
        settings.payment.base_url.clone(),
        settings.payment.api_key.clone(),
        settings.payment.secret_key.clone(),
        payment_http_client,
    );

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let state = AppState {
        user_store: Arc::new(PostgresUserStore::new(pg_pool.clone())),
        role_store: Arc::new(PostgresRoleStore::new(pg_pool)),
        token_provider: Arc::new(token_provider),
        banned_token_store: banned_token_store.clone(),
        email_sender: Arc::new(email_sender),
        link_generator: Arc::new(BaseUrlLinkGenerator::new(&settings.application.base_url)?),
        payment_gateway: Arc::new(payment_gateway),
        clock,
        sessions: JwtSessionManager::new(banned_token_store, session_config),
        identity: Arc::new(settings.identity.clone()),
        payment_locale: Arc::from(settings.payment.locale.as_str()),
    };

    let service = AccountService::bootstrap(state).await?;

    let listener = tokio::net::TcpListener::bind(&settings.application.address).await?;
    tracing::info!("Starting servicedesk...");

    service
        .run_standalone(listener, Some(settings.allowed_origins.clone()))
        .await?;

    Ok(())
}

pub fn init_tracing() -> Result<()> {
    let fmt_layer = fmt::layer().compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}
