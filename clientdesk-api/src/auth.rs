//! Email/password accounts with in-memory bearer sessions.

use chrono::{DateTime, Duration, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use shared_types::{AuthCredentials, AuthSession, AuthUser, ValidationErrors};
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::info;

use crate::database::{users, AsyncDbConnection};
use crate::helpers::listeners::{Listeners, Subscription};
use crate::helpers::password::{hash_password, verify_password};

const TOKEN_LEN: usize = 48;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("An account with this email already exists")]
    EmailInUse,

    #[error("Invalid credentials: {0}")]
    Validation(ValidationErrors),

    #[error("Authentication storage error: {0}")]
    Storage(String),
}

impl From<anyhow::Error> for AuthError {
    fn from(e: anyhow::Error) -> Self {
        AuthError::Storage(e.to_string())
    }
}

#[derive(Clone)]
struct ActiveSession {
    user: AuthUser,
    expires_at: DateTime<Utc>,
}

pub struct AuthService {
    conn: AsyncDbConnection,
    sessions: Mutex<HashMap<String, ActiveSession>>,
    session_ttl: Duration,
    listeners: Listeners<Option<AuthUser>>,
}

impl AuthService {
    pub fn new(conn: AsyncDbConnection, session_ttl: Duration) -> Self {
        Self {
            conn,
            sessions: Mutex::new(HashMap::new()),
            session_ttl,
            listeners: Listeners::new(),
        }
    }

    /// Create an account and sign it in
    pub async fn sign_up(&self, credentials: AuthCredentials) -> Result<AuthSession, AuthError> {
        let credentials = views::validate_credentials(credentials).map_err(AuthError::Validation)?;

        if users::find_user_by_email(self.conn.clone(), &credentials.email)
            .await?
            .is_some()
        {
            return Err(AuthError::EmailInUse);
        }

        let password_hash = hash_password(&credentials.password)?;
        let user = users::insert_user(self.conn.clone(), &credentials.email, &password_hash)
            .await?
            .ok_or(AuthError::EmailInUse)?;
        info!("Created account {} ({})", user.id, user.email);

        Ok(self.start_session(user).await)
    }

    pub async fn sign_in(&self, credentials: AuthCredentials) -> Result<AuthSession, AuthError> {
        let credentials = views::validate_credentials(credentials).map_err(AuthError::Validation)?;

        let stored = users::find_user_by_email(self.conn.clone(), &credentials.email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(&credentials.password, &stored.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(self.start_session(stored.user).await)
    }

    /// End the session behind `token`. Unknown tokens are ignored.
    pub async fn sign_out(&self, token: &str) {
        let removed = self.sessions.lock().await.remove(token);
        if let Some(session) = removed {
            info!("User {} signed out", session.user.id);
            self.listeners.notify(&None);
        }
    }

    /// User behind a live session. Expired sessions are evicted.
    pub async fn current_user(&self, token: &str) -> Option<AuthUser> {
        let mut sessions = self.sessions.lock().await;
        match sessions.get(token) {
            Some(session) if session.expires_at > Utc::now() => Some(session.user.clone()),
            Some(_) => {
                sessions.remove(token);
                None
            }
            None => None,
        }
    }

    /// Be told about every sign-in (`Some`) and sign-out (`None`)
    pub fn on_auth_change<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&Option<AuthUser>) + Send + Sync + 'static,
    {
        self.listeners.subscribe(listener)
    }

    async fn start_session(&self, user: AuthUser) -> AuthSession {
        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(TOKEN_LEN)
            .map(char::from)
            .collect();
        let expires_at = Utc::now() + self.session_ttl;

        {
            let mut sessions = self.sessions.lock().await;
            sessions.retain(|_, session| session.expires_at > Utc::now());
            sessions.insert(
                token.clone(),
                ActiveSession {
                    user: user.clone(),
                    expires_at,
                },
            );
        }

        self.listeners.notify(&Some(user.clone()));

        AuthSession {
            token,
            user,
            expires_at: expires_at.timestamp(),
        }
    }
}
