//! Axum integration for the servicedesk account workflow.
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  servicedesk_core: HTTP trait definitions│
//! └──────────────┬───────────────────────────┘
//!                │
//!                ▼
//! ┌──────────────────────────────────────────┐
//! │  servicedesk_axum: Axum implementations  │
//! │  - PartsRequest / AxumResponseBuilder    │
//! │  - CurrentUser / AdminUser extractors    │
//! │  - sliding session middleware            │
//! │  - routes and ApiError                   │
//! └──────────────────────────────────────────┘
//! ```

pub mod adapters;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod routes;

pub use adapters::{AxumResponseBuilder, PartsRequest, response_builder};
pub use error::ApiError;
pub use extractors::{AdminUser, CurrentUser};
pub use middleware::refresh_session;
