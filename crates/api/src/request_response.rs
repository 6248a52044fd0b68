// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Wire types exchanged with the BrewBox API.
//!
//! Field names follow the server's camelCase JSON.

use brewbox_domain::{DrinkSize, DrinkType, OrderStatus, Role};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ========================================================================
// Authentication
// ========================================================================

/// API request to create an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// The account email address.
    pub email: String,
    /// The account password.
    pub password: String,
    /// The requested role.
    pub role: Role,
    /// Optional display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// API request to log in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// The account email address.
    pub email: String,
    /// The account password.
    pub password: String,
}

/// API request to complete a multi-factor login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MfaRequest {
    /// The one-time token issued by the MFA provider.
    pub token: String,
}

/// The `{success, result, errors}` envelope used by the authentication endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Whether the server accepted the request.
    pub success: bool,
    /// The payload, when there is one.
    #[serde(default)]
    pub result: Option<T>,
    /// Errors reported by the server.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub errors: Vec<String>,
}

/// Result of a login or MFA verification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResult {
    /// Bearer token, present once authentication is complete.
    #[serde(default)]
    pub token: Option<String>,
    /// Role names granted to the account.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub roles: Vec<String>,
    /// True if a second factor must be verified before a token is issued.
    #[serde(default)]
    pub requires_mfa: bool,
    /// Whether the credential check succeeded.
    #[serde(default)]
    pub succeeded: bool,
    /// Optional server message.
    #[serde(default)]
    pub message: Option<String>,
}

impl LoginResult {
    /// The token, if present and non-empty.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|token| !token.is_empty())
    }
}

/// A login reply in either of the shapes the server has used.
///
/// Current servers wrap the result in an `Envelope`; the MFA endpoints of
/// the earlier revision return the result fields at the top level.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum AuthReply {
    /// `{success, result, errors}`.
    Wrapped(Envelope<LoginResult>),
    /// `{token, requiresMfa, ...}`.
    Bare(LoginResult),
}

impl AuthReply {
    /// Normalizes the reply into an envelope.
    #[must_use]
    pub fn into_envelope(self) -> Envelope<LoginResult> {
        match self {
            Self::Wrapped(envelope) => envelope,
            Self::Bare(result) => Envelope {
                success: result.succeeded || result.token().is_some(),
                result: Some(result),
                errors: Vec::new(),
            },
        }
    }
}

// ========================================================================
// Orders
// ========================================================================

/// A drink line in an order request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrinkRequest {
    /// The drink type.
    #[serde(rename = "type")]
    pub drink_type: DrinkType,
    /// The cup size.
    pub size: DrinkSize,
    /// The drink price.
    pub price: f64,
}

/// API request to place an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    /// Requested pickup instant, RFC 3339.
    pub pickup_time: String,
    /// Optional tip. Omitted when zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tip: Option<f64>,
    /// The drinks, in entry order.
    pub drinks: Vec<DrinkRequest>,
}

impl CreateOrderRequest {
    /// Sum of the drink prices, excluding tip.
    #[must_use]
    pub fn drink_total(&self) -> f64 {
        self.drinks.iter().map(|drink| drink.price).sum()
    }
}

/// API request to change an order's status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateOrderStatusRequest {
    /// The requested status.
    pub status: OrderStatus,
}

/// API request to change an order's payment flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePaymentRequest {
    /// Whether the order is paid.
    pub paid: bool,
}

// ========================================================================
// Errors
// ========================================================================

/// Validation errors as either a flat list or a field-keyed map.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ErrorList {
    /// `["message", ...]`
    List(Vec<String>),
    /// `{"Field": ["message", ...]}`
    Fields(BTreeMap<String, Vec<String>>),
}

impl ErrorList {
    fn joined(&self) -> String {
        match self {
            Self::List(items) => items.join("; "),
            Self::Fields(fields) => fields
                .values()
                .flatten()
                .map(String::as_str)
                .collect::<Vec<&str>>()
                .join("; "),
        }
    }
}

/// Body of an error response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApiErrorBody {
    /// Short error text.
    #[serde(default)]
    pub error: Option<String>,
    /// Longer error text.
    #[serde(default)]
    pub message: Option<String>,
    /// Individual problems.
    #[serde(default)]
    pub details: Option<Vec<String>>,
    /// Validation problems.
    #[serde(default)]
    pub errors: Option<ErrorList>,
}

impl ApiErrorBody {
    /// The message to show the user, if the body carries one.
    ///
    /// `error` wins over `message`, which wins over `details` and then
    /// `errors`. List entries are joined with `"; "`.
    #[must_use]
    pub fn summary(&self) -> Option<String> {
        let non_empty = |s: &String| !s.trim().is_empty();
        self.error
            .clone()
            .filter(non_empty)
            .or_else(|| self.message.clone().filter(non_empty))
            .or_else(|| {
                self.details
                    .as_ref()
                    .map(|details| details.join("; "))
                    .filter(non_empty)
            })
            .or_else(|| {
                self.errors
                    .as_ref()
                    .map(ErrorList::joined)
                    .filter(non_empty)
            })
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
