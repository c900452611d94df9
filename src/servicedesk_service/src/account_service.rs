use axum::{
    Router,
    http::{HeaderValue, Method, request},
    middleware,
    routing::{get, post},
};
use servicedesk_adapters::{
    AppState,
    config::{AllowedOrigins, paths},
};
use servicedesk_application::{AccountError, EnsureRolesUseCase};
use servicedesk_axum::{
    refresh_session,
    routes::{
        access_denied, confirm_email, confirm_reset_password, confirm_reset_password_form,
        installments, login, logout, manage, manage_users, profile, register, resend_confirmation,
        reset_password, update_password, update_profile,
    },
};
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::tracing::{make_span_with_request_id, on_request, on_response};

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("Failed to ensure roles: {0}")]
    Roles(#[from] AccountError),
}

/// The account and payment HTTP service.
pub struct AccountService {
    router: Router,
}

impl AccountService {
    /// Makes sure every role exists, then builds the service.
    pub async fn bootstrap(state: AppState) -> Result<Self, BootstrapError> {
        let created = EnsureRolesUseCase::new(&*state.role_store).execute().await?;
        if !created.is_empty() {
            tracing::info!(?created, "Bootstrapped roles");
        }
        Ok(Self::new(state))
    }

    pub fn new(state: AppState) -> Self {
        let router = Router::new()
            .route("/account/register", post(register))
            .route(paths::CONFIRM_EMAIL, get(confirm_email))
            .route(paths::LOGIN, post(login))
            .route("/account/logout", post(logout))
            .route("/account/profile", get(profile).post(update_profile))
            .route("/account/resend-confirmation", post(resend_confirmation))
            .route("/account/update-password", post(update_password))
            .route("/account/reset-password", post(reset_password))
            .route(
                paths::CONFIRM_RESET_PASSWORD,
                get(confirm_reset_password_form).post(confirm_reset_password),
            )
            .route(paths::ACCESS_DENIED, get(access_denied))
            .route("/admin/manage", get(manage))
            .route("/admin/manage/users", get(manage_users))
            .route("/payment/installments", post(installments))
            .layer(middleware::from_fn_with_state(state.clone(), refresh_session))
            .with_state(state);

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Router that can be mounted on another application. Credentialed CORS
    /// is enabled for the given origins.
    pub fn as_nested_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins.filter(|origins| !origins.is_empty()) {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        allowed_origins.contains(origin)
                    },
                ));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = self.as_nested_router(allowed_origins);

        tracing::info!("Servicedesk listening on {}", listener.local_addr()?);

        axum::serve(listener, router).await
    }
}
