/// Origin used when neither the environment nor the config file names one.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Persisted key holding the bearer token.
pub const AUTH_TOKEN_KEY: &str = "auth_token";

/// Persisted key holding the numeric user id, stored as text.
pub const USER_ID_KEY: &str = "user_id";

pub mod endpoints {
    pub const REGISTER: &str = "/users";
    pub const VERIFY_REGISTRATION: &str = "/users/verify-otp";
    pub const LOGIN: &str = "/auth/login";
    pub const VERIFY_LOGIN_OTP: &str = "/auth/verify-otp";
    pub const VAULTS: &str = "/vaults";
    pub const VAULTS_CREATE: &str = "/vaults/create";
    pub const VAULTS_DELETE: &str = "/vaults/delete";
    pub const THUMBNAIL: &str = "/thumbnail";
    pub const FILES_UPLOAD: &str = "/files/upload";
    pub const FILES_DELETE: &str = "/files/delete";
}
