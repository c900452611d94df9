pub mod env {
    pub const APP_ENVIRONMENT_ENV_VAR: &str = "APP_ENVIRONMENT";
    pub const APP_CONFIG_DIR_ENV_VAR: &str = "APP_CONFIG_DIR";
    pub const ENV_VAR_PREFIX: &str = "APP";
    pub const ENV_VAR_SEPARATOR: &str = "__";
}

pub mod paths {
    pub const HOME: &str = "/";
    pub const LOGIN: &str = "/account/login";
    pub const ACCESS_DENIED: &str = "/account/access-denied";
    pub const CONFIRM_EMAIL: &str = "/account/confirm-email";
    pub const CONFIRM_RESET_PASSWORD: &str = "/account/confirm-reset-password";
}

pub mod prod {
    pub const APP_ADDRESS: &str = "0.0.0.0:3000";
    pub mod email_client {
        use std::time::Duration;

        pub const BASE_URL: &str = "https://api.postmarkapp.com/";
        pub const TIMEOUT: Duration = std::time::Duration::from_secs(10);
    }
    pub mod payment {
        use std::time::Duration;

        pub const BASE_URL: &str = "https://sandbox-api.iyzipay.com";
        pub const TIMEOUT: Duration = std::time::Duration::from_secs(15);
    }
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";
    pub mod email_client {
        use std::time::Duration;

        pub const SENDER: &str = "test@email.com";
        pub const TIMEOUT: Duration = std::time::Duration::from_millis(200);
    }
}

/// Raw confirmation and reset tokens are this many alphanumeric characters.
pub const TOKEN_LENGTH: usize = 48;
