pub mod jwt_session;

pub use jwt_session::{AuthenticatedSession, Claims, JwtSessionManager, SessionConfig, SessionError};
