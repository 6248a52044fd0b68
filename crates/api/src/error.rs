// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use brewbox_core::CoreError;
use brewbox_domain::DomainError;
use brewbox_persistence::PersistenceError;
use thiserror::Error;

/// Authorization errors raised before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// There is no stored session.
    #[error("Not logged in")]
    NotAuthenticated,
    /// The session does not hold the role an action requires.
    #[error("Unauthorized: '{action}' requires {required_role} role")]
    Forbidden {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent what the caller
/// is shown. `Display` is the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Form input failed local validation. Nothing was sent.
    #[error("{message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The server refused the request and said why.
    #[error("{message}")]
    Rejected {
        /// The message reported by the server.
        message: String,
    },
    /// The request could not be completed or its response not understood.
    #[error("{message}")]
    Transport {
        /// What failed, followed by the underlying cause.
        message: String,
    },
    /// The session is missing or the server no longer accepts it.
    #[error("Your session has ended. Please log in again.")]
    Unauthorized,
    /// The session does not hold the role an action requires.
    #[error("Unauthorized: '{action}' requires {required_role} role")]
    Forbidden {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// A domain rule was violated.
    #[error("{message}")]
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// A requested resource was not found.
    #[error("{resource_type} not found: {message}")]
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The session store could not be read or written.
    #[error("Session storage failed: {message}")]
    Session {
        /// The underlying storage error.
        message: String,
    },
}

impl ApiError {
    /// Builds a transport error with a generic context and the underlying cause.
    #[must_use]
    pub fn transport(context: &str, cause: impl std::fmt::Display) -> Self {
        Self::Transport {
            message: format!("{context}: {cause}"),
        }
    }

    /// Returns true if this error means the session has been dropped.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::NotAuthenticated => Self::Unauthorized,
            AuthError::Forbidden {
                action,
                required_role,
            } => Self::Forbidden {
                action,
                required_role,
            },
        }
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        Self::Session {
            message: err.to_string(),
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    let field: &str = match &err {
        DomainError::InvalidEmail(_) => "email",
        DomainError::PasswordTooShort { .. } => "password",
        DomainError::PasswordMismatch => "confirm_password",
        DomainError::MissingDisplayName => "display_name",
        DomainError::MissingField(field) => *field,
        DomainError::InvalidRole(_) => "role",
        DomainError::InvalidPickupTime { .. } | DomainError::PickupTimeNotInFuture => {
            "pickup_time"
        }
        DomainError::NoDrinks => "drinks",
        DomainError::InvalidDrinkType(_) => "drink_type",
        DomainError::InvalidDrinkSize(_) => "drink_size",
        DomainError::InvalidPrice(_) => "price",
        DomainError::InvalidTip(_) => "tip",
        DomainError::InvalidOrderStatus(_) => "status",
        DomainError::InvalidStatusTransition { .. } => {
            return ApiError::DomainRuleViolation {
                rule: String::from("status_transition"),
                message,
            };
        }
    };
    ApiError::InvalidInput {
        field: field.to_lowercase(),
        message,
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::OrderNotFound(order_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Order"),
            message: format!("Order '{order_id}' is not known locally"),
        },
    }
}
