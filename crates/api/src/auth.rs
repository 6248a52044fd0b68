// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization.

use crate::client::BrewBoxClient;
use crate::error::{ApiError, AuthError};
use crate::forms::{LoginForm, RegistrationForm};
use crate::request_response::{Envelope, LoginRequest, LoginResult, MfaRequest, RegisterRequest};
use crate::transport::MfaProvider;
use brewbox_domain::{Role, RoleSet};
use brewbox_persistence::Session;
use secrecy::SecretString;
use tracing::{info, instrument, warn};

/// Outcome of a login or MFA verification the server accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// A session was stored.
    LoggedIn {
        /// The roles granted to the session.
        roles: RoleSet,
    },
    /// A second factor must be verified before a session is issued.
    MfaRequired,
}

/// Authorization service for enforcing role-based access control.
///
/// Roles come from the stored session and are only advisory; the server
/// makes the final decision.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks if a session may place orders.
    ///
    /// Only Customer sessions may place orders.
    ///
    /// # Errors
    ///
    /// Returns an error if the session does not hold the Customer role.
    pub fn authorize_create_order(session: &Session) -> Result<(), AuthError> {
        Self::require(session, Role::Customer, "create_order")
    }

    /// Checks if a session may act as `role` on an order.
    ///
    /// # Errors
    ///
    /// Returns an error if the session does not hold `role`.
    pub fn authorize_transition(session: &Session, role: Role) -> Result<(), AuthError> {
        Self::require(session, role, "update_order_status")
    }

    /// Checks if a session may mark orders paid.
    ///
    /// Only Barista sessions may mark orders paid.
    ///
    /// # Errors
    ///
    /// Returns an error if the session does not hold the Barista role.
    pub fn authorize_set_paid(session: &Session) -> Result<(), AuthError> {
        Self::require(session, Role::Barista, "set_paid")
    }

    fn require(session: &Session, role: Role, action: &str) -> Result<(), AuthError> {
        if session.has_role(role) {
            Ok(())
        } else {
            Err(AuthError::Forbidden {
                action: action.to_string(),
                required_role: role.to_string(),
            })
        }
    }
}

impl BrewBoxClient {
    /// Creates an account.
    ///
    /// The form is validated locally first. Registration does not log in.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidInput` for invalid form input, or the
    /// server's rejection.
    #[instrument(skip(self, form), fields(email = %form.email))]
    pub async fn register(&self, form: &RegistrationForm) -> Result<(), ApiError> {
        let request: RegisterRequest = form.validate()?;
        self.api.register(&request).await?;
        info!(role = %request.role, "Account registered");
        Ok(())
    }

    /// Logs in with email and password.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidInput` for blank fields, `ApiError::Rejected`
    /// if the server refuses the credentials, or a transport/session error.
    #[instrument(skip(self, form), fields(email = %form.email))]
    pub async fn login(&self, form: &LoginForm) -> Result<LoginOutcome, ApiError> {
        let request: LoginRequest = form.validate()?;
        let reply: Envelope<LoginResult> = self.api.login(&request).await?;
        self.complete_login(reply, "Login failed")
    }

    /// Completes a login with a second factor.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidInput` for a blank token, `ApiError::Rejected`
    /// if the server refuses it, or a transport/session error.
    #[instrument(skip(self, token))]
    pub async fn verify_mfa(
        &self,
        provider: MfaProvider,
        token: &str,
    ) -> Result<LoginOutcome, ApiError> {
        let token: &str = token.trim();
        if token.is_empty() {
            return Err(ApiError::InvalidInput {
                field: String::from("token"),
                message: String::from("MFA token is required"),
            });
        }
        let request: MfaRequest = MfaRequest {
            token: token.to_string(),
        };
        let reply: Envelope<LoginResult> = self.api.verify_mfa(provider, &request).await?;
        self.complete_login(reply, "MFA verification failed")
    }

    /// Removes the stored session and forgets locally known orders.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be written.
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.session.clear()?;
        *self.book.lock().await = brewbox_core::OrderBook::new();
        info!("Logged out");
        Ok(())
    }

    fn complete_login(
        &self,
        reply: Envelope<LoginResult>,
        fallback: &str,
    ) -> Result<LoginOutcome, ApiError> {
        let result: LoginResult = reply.result.unwrap_or_default();

        if let Some(token) = result.token().filter(|_| reply.success) {
            let roles: RoleSet = RoleSet::from_names(&result.roles).effective();
            self.session
                .set_session(&SecretString::from(token.to_string()), &roles)?;
            info!(roles = %roles, "Logged in");
            return Ok(LoginOutcome::LoggedIn { roles });
        }

        if result.requires_mfa {
            info!("Second factor required");
            return Ok(LoginOutcome::MfaRequired);
        }

        let message: String = if reply.errors.is_empty() {
            result
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| fallback.to_string())
        } else {
            reply.errors.join("; ")
        };
        warn!(%message, "Login refused");
        Err(ApiError::Rejected { message })
    }
}
