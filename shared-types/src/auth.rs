use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Email and password pair used for sign-in and sign-up
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AuthCredentials {
    pub email: String,
    pub password: String,
}

/// Signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AuthUser {
    pub id: i64,
    pub email: String,
}

/// Returned by sign-in and sign-up
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AuthSession {
    pub token: String,
    pub user: AuthUser,
    /// Unix timestamp after which the token is rejected
    pub expires_at: i64,
}
