// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::{ApiError, AuthError};
use crate::transport::BrewBoxApi;
use brewbox_core::OrderBook;
use brewbox_domain::Order;
use brewbox_persistence::{Session, SessionStore};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, warn};

/// The BrewBox client.
///
/// Cloning is cheap; clones share the transport, the session store and the
/// local order book. Authentication operations live in `auth`, order
/// operations in `orders`.
#[derive(Clone)]
pub struct BrewBoxClient {
    pub(crate) api: Arc<dyn BrewBoxApi>,
    pub(crate) session: Arc<SessionStore>,
    pub(crate) book: Arc<Mutex<OrderBook>>,
}

impl std::fmt::Debug for BrewBoxClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrewBoxClient")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl BrewBoxClient {
    /// Creates a client over a transport and a session store.
    #[must_use]
    pub fn new(api: Arc<dyn BrewBoxApi>, session: Arc<SessionStore>) -> Self {
        Self {
            api,
            session,
            book: Arc::new(Mutex::new(OrderBook::new())),
        }
    }

    /// The session store this client reads and writes.
    #[must_use]
    pub fn session_store(&self) -> &SessionStore {
        &self.session
    }

    /// Returns true if a token is stored.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Reads the current session.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` if there is no session, or
    /// `ApiError::Session` if the store cannot be read.
    pub fn session(&self) -> Result<Session, ApiError> {
        self.session
            .session()?
            .ok_or_else(|| ApiError::from(AuthError::NotAuthenticated))
    }

    /// A copy of the locally known orders.
    pub async fn local_orders(&self) -> Vec<Order> {
        self.book.lock().await.orders().to_vec()
    }

    /// Drops the stored session after the server refused it.
    pub(crate) fn end_session(&self) {
        if let Err(e) = self.session.clear() {
            error!(error = %e, "Failed to clear session");
        }
    }

    /// Passes a result through, ending the session on `Unauthorized`.
    pub(crate) fn check<T>(&self, result: Result<T, ApiError>) -> Result<T, ApiError> {
        if let Err(ApiError::Unauthorized) = &result {
            warn!("Session rejected by the server; logging out");
            self.end_session();
        }
        result
    }
}
