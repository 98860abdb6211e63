use tracing::warn;

/// The two logical keys of the persisted session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionKey {
    AuthToken,
    UserId,
}

impl SessionKey {
    pub const ALL: [SessionKey; 2] = [SessionKey::AuthToken, SessionKey::UserId];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AuthToken => crate::AUTH_TOKEN_KEY,
            Self::UserId => crate::USER_ID_KEY,
        }
    }
}

impl std::fmt::Display for SessionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a persisted user id. Anything that is not a base-10 integer is
/// treated as "no session" rather than an error.
#[must_use]
pub fn parse_user_id(raw: &str) -> Option<i64> {
    match raw.trim().parse::<i64>() {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(event = "user_id_malformed", value = %raw, error = %err);
            None
        }
    }
}

/// Snapshot of the in-memory session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub user_id: Option<i64>,
    pub bootstrapped: bool,
}

impl Session {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user_id.is_some()
    }
}
