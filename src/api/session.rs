//! Session context shared by every outgoing request.
//!
//! The token is handed to the [`crate::api::client::ApiClient`] when it is
//! built; login and logout swap the value in place and the next request picks
//! up whatever is current.

use std::sync::{Arc, RwLock};

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use thiserror::Error;

use crate::domain::auth::AuthenticatedUser;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("no session token")]
    Missing,

    #[error("invalid session token: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, Default)]
pub struct SessionContext {
    token: Arc<RwLock<Option<String>>>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        let session = Self::new();
        session.set_token(token);
        session
    }

    /// Replaces the current bearer token.
    pub fn set_token(&self, token: impl Into<String>) {
        let token = Some(token.into()).filter(|t| !t.trim().is_empty());
        match self.token.write() {
            Ok(mut guard) => *guard = token,
            Err(poisoned) => *poisoned.into_inner() = token,
        }
    }

    pub fn clear(&self) {
        match self.token.write() {
            Ok(mut guard) => *guard = None,
            Err(poisoned) => *poisoned.into_inner() = None,
        }
    }

    pub fn token(&self) -> Option<String> {
        match self.token.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Decodes the claims of the current token with the shared HS256 secret.
    pub fn user(&self, secret: &str) -> Result<AuthenticatedUser, SessionError> {
        let token = self.token().ok_or(SessionError::Missing)?;
        let data = decode::<AuthenticatedUser>(
            &token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|err| SessionError::Invalid(err.to_string()))?;
        Ok(data.claims)
    }
}
