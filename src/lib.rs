//! # Servicedesk - Account Lifecycle Library
//!
//! Facade crate that re-exports the public APIs of the servicedesk
//! components: registration, email confirmation, sign-in with lockout,
//! profile upkeep, password reset, role administration and the iyzico
//! installment lookup.
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Username`, `Password`, `User`, `Role`, `Price`, etc.
//! - **Ports**: `UserStore`, `RoleStore`, `TokenProvider`, `EmailSender`, `PaymentGateway`
//! - **Use cases**: `RegisterUseCase`, `LoginUseCase`, `CheckInstallmentsUseCase`, etc.
//! - **Adapters**: `PostgresUserStore`, `RedisTokenProvider`, `PostmarkEmailClient`,
//!   `IyzicoPaymentGateway`, etc.
//! - **Service**: `AccountService` - the HTTP entry point

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use servicedesk_core::*;
}

pub use servicedesk_core::{
    BinNumber, Email, InstallmentModel, LockoutPolicy, Password, PasswordPolicy, Price, Role,
    SignInResult, TokenPurpose, User, UserId, Username,
};

// ============================================================================
// Ports
// ============================================================================

/// Repository and service trait definitions
pub mod ports {
    pub use servicedesk_core::{
        BannedTokenStore, BannedTokenStoreError, Clock, EmailSender, EmailSenderError,
        LinkGenerator, PaymentGateway, RoleStore, RoleStoreError, SystemClock, TokenProvider,
        TokenProviderError, UserStore, UserStoreError,
    };
}

pub use ports::{
    BannedTokenStore, Clock, EmailSender, LinkGenerator, PaymentGateway, RoleStore, TokenProvider,
    UserStore,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use servicedesk_application::*;
}

pub use servicedesk_application::{
    AccountError, ChangePasswordUseCase, CheckInstallmentsUseCase, ConfirmEmailUseCase,
    EnsureRolesUseCase, LoginUseCase, LogoutUseCase, RegisterUseCase,
    RequestPasswordResetUseCase, ResetPasswordUseCase, UpdateProfileUseCase,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// Framework-agnostic request handlers
    pub mod handlers {
        pub use servicedesk_adapters::handlers::*;
    }

    /// Persistence implementations
    pub mod persistence {
        pub use servicedesk_adapters::persistence::*;
    }

    /// Email sender implementations
    pub mod email {
        pub use servicedesk_adapters::email::*;
    }

    /// Payment gateway implementations
    pub mod payment {
        pub use servicedesk_adapters::payment::*;
    }

    /// Cookie sessions
    pub mod session {
        pub use servicedesk_adapters::session::*;
    }

    /// Configuration
    pub mod config {
        pub use servicedesk_adapters::config::*;
    }
}

pub use servicedesk_adapters::{
    AppState, BaseUrlLinkGenerator, IyzicoPaymentGateway, JwtSessionManager, MockEmailSender,
    PostmarkEmailClient, SessionConfig,
    persistence::{
        DashMapTokenProvider, HashMapRoleStore, HashMapUserStore, HashSetBannedTokenStore,
        PostgresRoleStore, PostgresUserStore, RedisBannedTokenStore, RedisTokenProvider,
    },
};

// ============================================================================
// Account Service (Main Entry Point)
// ============================================================================

pub use servicedesk_service::{AccountService, configure_postgresql, redis_connection};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing the ports
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use http;
