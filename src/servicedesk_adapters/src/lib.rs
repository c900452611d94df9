//! Adapters for the servicedesk account workflow: persistence, email, payment
//! gateway, sessions, configuration and the framework-agnostic handlers.

pub mod config;
pub mod email;
pub mod handlers;
pub mod links;
pub mod payment;
pub mod persistence;
pub mod session;
pub mod state;

pub use email::{MockEmailSender, PostmarkEmailClient};
pub use links::BaseUrlLinkGenerator;
pub use payment::IyzicoPaymentGateway;
pub use session::{AuthenticatedSession, Claims, JwtSessionManager, SessionConfig, SessionError};
pub use state::AppState;
