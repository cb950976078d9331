//! services/api/src/adapters/session_memory.rs
//!
//! This module contains the in-memory implementation of the `SessionStore` port.
//! Tokens live only as long as the process; a restart logs everyone out.
//!
//! There is no rate limiting or lockout on failed logins. Every failure returns the
//! same `Unauthorized` error so a caller cannot tell a bad username from a bad password.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;
use std::collections::HashSet;
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;
use weekly_planner_core::domain::SessionToken;
use weekly_planner_core::ports::{PortError, PortResult, SessionStore};

//=========================================================================================
// Admin Credential
//=========================================================================================

/// The single configured admin login. Only an argon2 hash of the password is kept.
#[derive(Clone)]
pub struct AdminCredential {
    username: String,
    password_hash: String,
}

impl AdminCredential {
    pub fn new(username: impl Into<String>, password: &str) -> PortResult<Self> {
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| PortError::Unexpected(format!("failed to hash admin password: {}", e)))?
            .to_string();

        Ok(Self {
            username: username.into(),
            password_hash,
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    fn matches(&self, username: &str, password: &str) -> bool {
        // The password is always verified so both failure cases cost the same.
        let password_ok = PasswordHash::new(&self.password_hash)
            .map(|hash| {
                Argon2::default()
                    .verify_password(password.as_bytes(), &hash)
                    .is_ok()
            })
            .unwrap_or(false);
        password_ok && username == self.username
    }
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

pub struct InMemorySessionStore {
    admin: AdminCredential,
    tokens: RwLock<HashSet<SessionToken>>,
}

impl InMemorySessionStore {
    pub fn new(admin: AdminCredential) -> Self {
        Self {
            admin,
            tokens: RwLock::new(HashSet::new()),
        }
    }

    /// Number of currently valid tokens.
    pub async fn active_sessions(&self) -> usize {
        self.tokens.read().await.len()
    }
}

//=========================================================================================
// `SessionStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn login(&self, username: &str, password: &str) -> PortResult<SessionToken> {
        // Argon2 verification is CPU-bound and runs on the blocking pool.
        let admin = self.admin.clone();
        let (user, pass) = (username.to_owned(), password.to_owned());
        let accepted = tokio::task::spawn_blocking(move || admin.matches(&user, &pass))
            .await
            .map_err(|e| PortError::Unexpected(format!("password check failed: {}", e)))?;

        if !accepted {
            warn!("Rejected login attempt for user '{}'", username);
            return Err(PortError::Unauthorized);
        }

        let mut tokens = self.tokens.write().await;
        loop {
            let token = SessionToken::new(Uuid::new_v4().to_string());
            if tokens.insert(token.clone()) {
                info!("Admin session opened ({} active)", tokens.len());
                return Ok(token);
            }
        }
    }

    async fn logout(&self, token: &SessionToken) {
        if self.tokens.write().await.remove(token) {
            info!("Admin session closed");
        }
    }

    async fn validate(&self, token: &SessionToken) -> bool {
        self.tokens.read().await.contains(token)
    }
}
