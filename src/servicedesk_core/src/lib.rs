pub mod domain;
pub mod http_abstraction;
pub mod ports;
pub mod strategies;

// Re-export commonly used types for convenience
pub use domain::{
    email::{Email, EmailError},
    email_message::{EmailMessage, EmailMessageError},
    installment::{
        BinNumber, GatewayError, InstallmentDetail, InstallmentError, InstallmentInfoRequest,
        InstallmentInfoResponse, InstallmentModel, InstallmentPrice, Price,
    },
    password::{Password, PasswordPolicy, PasswordPolicyError, PasswordViolation},
    role::{Role, RoleError},
    sign_in::{LockoutPolicy, SignInResult},
    token::{TokenError, TokenPurpose, decode_token, encode_token},
    user::User,
    user_id::{UserId, UserIdError},
    username::{Username, UsernameError},
};

pub use ports::{
    repositories::{
        BannedTokenStore, BannedTokenStoreError, RoleStore, RoleStoreError, UserStore,
        UserStoreError,
    },
    services::{
        Clock, EmailSender, EmailSenderError, LinkGenerator, PaymentGateway, SystemClock,
        TokenProvider, TokenProviderError,
    },
};

pub use strategies::session_validator::SessionValidator;

pub use http_abstraction::{AuthRequest, AuthResponseBuilder, AuthResponseHelpers};
