// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::backend::{FileBackend, MemoryBackend, SessionBackend};
use crate::error::PersistenceError;
use crate::session::Session;
use brewbox_domain::RoleSet;
use secrecy::{ExposeSecret, SecretString};
use std::path::PathBuf;
use tracing::{info, warn};

/// Storage key for the bearer token.
pub const TOKEN_KEY: &str = "jwtToken";

/// Storage key for the comma-joined role list.
pub const ROLES_KEY: &str = "userRoles";

/// The session store.
///
/// Every read goes to the backend, so a login or logout performed by another
/// process sharing the same file is observed on the next call.
#[derive(Debug)]
pub struct SessionStore {
    backend: Box<dyn SessionBackend>,
}

impl SessionStore {
    /// Creates a store over the given backend.
    #[must_use]
    pub fn new(backend: impl SessionBackend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    /// Creates a store that lives only as long as the process.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }

    /// Creates a store backed by the JSON file at `path`.
    #[must_use]
    pub fn open_file(path: impl Into<PathBuf>) -> Self {
        Self::new(FileBackend::new(path))
    }

    /// Returns true if a token is persisted.
    ///
    /// No expiry check is made. A storage failure is logged and reported as
    /// not authenticated.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        match self.token() {
            Ok(token) => token.is_some(),
            Err(e) => {
                warn!(error = %e, "Failed to read session; treating as logged out");
                false
            }
        }
    }

    /// Persists a new session, replacing any existing one.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    pub fn set_session(&self, token: &SecretString, roles: &RoleSet) -> Result<(), PersistenceError> {
        let joined: String = roles.to_joined();
        self.backend.set_many(&[
            (TOKEN_KEY, token.expose_secret()),
            (ROLES_KEY, joined.as_str()),
        ])?;
        info!(roles = %joined, "Session stored");
        Ok(())
    }

    /// Removes the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    pub fn clear(&self) -> Result<(), PersistenceError> {
        self.backend.remove_many(&[TOKEN_KEY, ROLES_KEY])?;
        info!("Session cleared");
        Ok(())
    }

    /// Reads the persisted token. An empty value counts as absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    pub fn token(&self) -> Result<Option<SecretString>, PersistenceError> {
        Ok(self
            .backend
            .get(TOKEN_KEY)?
            .filter(|token| !token.is_empty())
            .map(SecretString::from))
    }

    /// Reads the persisted roles.
    ///
    /// A missing or empty role list reads as Customer.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    pub fn roles(&self) -> Result<RoleSet, PersistenceError> {
        let joined: String = self.backend.get(ROLES_KEY)?.unwrap_or_default();
        Ok(RoleSet::from_joined(&joined).effective())
    }

    /// Reads the current session, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    pub fn session(&self) -> Result<Option<Session>, PersistenceError> {
        let Some(token) = self.token()? else {
            return Ok(None);
        };
        let roles: RoleSet = self.roles()?;
        Ok(Some(Session::new(token, &roles)))
    }
}
