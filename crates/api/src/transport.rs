// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP transport for the BrewBox API.
//!
//! `BrewBoxApi` is the seam between the client and the network. `HttpApi`
//! is the `reqwest` implementation; tests substitute their own.

use crate::error::ApiError;
use crate::request_response::{
    ApiErrorBody, AuthReply, CreateOrderRequest, Envelope, LoginRequest, LoginResult, MfaRequest,
    RegisterRequest, UpdateOrderStatusRequest, UpdatePaymentRequest,
};
use async_trait::async_trait;
use brewbox_domain::{Order, OrderId};
use reqwest::{RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Default base URL of the BrewBox API.
pub const DEFAULT_API_URL: &str = "http://localhost:5196/api";

/// Which order collection to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderScope {
    /// Every order visible to the caller.
    All,
    /// Orders that are not finished.
    Active,
    /// The caller's own orders as a customer.
    Customer,
    /// Orders claimed by the caller as a barista.
    Barista,
    /// The barista work queue.
    Current,
}

impl OrderScope {
    /// Path segments below the base URL.
    #[must_use]
    pub const fn segments(&self) -> &'static [&'static str] {
        match self {
            Self::All => &["orders"],
            Self::Active => &["orders", "active"],
            Self::Customer => &["orders", "customer"],
            Self::Barista => &["orders", "barista"],
            Self::Current => &["orders", "current"],
        }
    }

    const fn failure_context(self) -> &'static str {
        match self {
            Self::All => "Failed to fetch orders",
            Self::Active | Self::Current => "Failed to fetch active orders",
            Self::Customer => "Failed to fetch customer orders",
            Self::Barista => "Failed to fetch barista orders",
        }
    }
}

impl FromStr for OrderScope {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "customer" => Ok(Self::Customer),
            "barista" => Ok(Self::Barista),
            "current" => Ok(Self::Current),
            other => Err(ApiError::InvalidInput {
                field: String::from("scope"),
                message: format!(
                    "Unknown order scope '{other}'. Choose from: all, active, customer, barista, current."
                ),
            }),
        }
    }
}

/// Second-factor providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MfaProvider {
    /// Google authenticator.
    Google,
    /// Apple.
    Apple,
}

impl MfaProvider {
    /// The provider's path segment.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Apple => "apple",
        }
    }

    const fn failure_context(self) -> &'static str {
        match self {
            Self::Google => "Google MFA failed",
            Self::Apple => "Apple MFA failed",
        }
    }
}

impl FromStr for MfaProvider {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "apple" => Ok(Self::Apple),
            other => Err(ApiError::InvalidInput {
                field: String::from("provider"),
                message: format!("Unknown MFA provider '{other}'. Choose from: google, apple."),
            }),
        }
    }
}

impl std::fmt::Display for MfaProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The remote BrewBox API.
///
/// Authenticated calls take the bearer token explicitly. A `401` response
/// is always reported as `ApiError::Unauthorized`.
#[async_trait]
pub trait BrewBoxApi: Send + Sync {
    /// `POST /auth/register`
    async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError>;

    /// `POST /auth/login`
    async fn login(&self, request: &LoginRequest) -> Result<Envelope<LoginResult>, ApiError>;

    /// `POST /auth/mfa/{provider}`
    async fn verify_mfa(
        &self,
        provider: MfaProvider,
        request: &MfaRequest,
    ) -> Result<Envelope<LoginResult>, ApiError>;

    /// `GET /orders[/scope]`
    async fn list_orders(
        &self,
        token: &SecretString,
        scope: OrderScope,
    ) -> Result<Vec<Order>, ApiError>;

    /// `GET /orders/{id}`
    async fn get_order(&self, token: &SecretString, order_id: &OrderId)
    -> Result<Order, ApiError>;

    /// `POST /orders`
    async fn create_order(
        &self,
        token: &SecretString,
        request: &CreateOrderRequest,
    ) -> Result<Order, ApiError>;

    /// `PUT /orders/{id}/status`
    async fn update_status(
        &self,
        token: &SecretString,
        order_id: &OrderId,
        request: &UpdateOrderStatusRequest,
    ) -> Result<(), ApiError>;

    /// `PUT /orders/{id}/payment`
    async fn update_payment(
        &self,
        token: &SecretString,
        order_id: &OrderId,
        request: &UpdatePaymentRequest,
    ) -> Result<(), ApiError>;
}

/// `reqwest` implementation of `BrewBoxApi`.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpApi {
    /// Creates a transport for the API rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or the URL cannot
    /// have path segments appended.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, ApiError> {
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidInput {
                field: String::from("api_url"),
                message: format!("'{base_url}' cannot be used as an API base URL"),
            });
        }
        let client: reqwest::Client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::transport("Failed to build HTTP client", e))?;
        Ok(Self { client, base_url })
    }

    /// The base URL requests are sent to.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url: Url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::transport("Invalid API base URL", &self.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn order_endpoint(&self, order_id: &OrderId, tail: Option<&str>) -> Result<Url, ApiError> {
        let mut segments: Vec<&str> = vec!["orders", order_id.as_str()];
        segments.extend(tail);
        self.endpoint(&segments)
    }

    /// Sends a bearer-authenticated request and maps failures.
    ///
    /// A 401 means the session was refused and becomes `Unauthorized`. Other
    /// non-success statuses become `Rejected`, see `send_anonymous`.
    async fn send(&self, request: RequestBuilder, context: &str) -> Result<Response, ApiError> {
        self.send_with(request, context, true).await
    }

    /// Sends a request made without a session and maps failures.
    ///
    /// Every non-success status, 401 included, becomes `Rejected` with the
    /// body's message, falling back to `context`.
    async fn send_anonymous(
        &self,
        request: RequestBuilder,
        context: &str,
    ) -> Result<Response, ApiError> {
        self.send_with(request, context, false).await
    }

    async fn send_with(
        &self,
        request: RequestBuilder,
        context: &str,
        bearer: bool,
    ) -> Result<Response, ApiError> {
        let response: Response = request
            .send()
            .await
            .map_err(|e| ApiError::transport(context, e))?;
        let status: StatusCode = response.status();
        debug!(url = %response.url(), status = status.as_u16(), "API response");

        if status.is_success() {
            return Ok(response);
        }
        if bearer && status == StatusCode::UNAUTHORIZED {
            warn!(url = %response.url(), "API rejected the session");
            return Err(ApiError::Unauthorized);
        }

        let body: String = response.text().await.unwrap_or_default();
        let message: String = serde_json::from_str::<ApiErrorBody>(&body)
            .ok()
            .and_then(|body| body.summary())
            .unwrap_or_else(|| context.to_string());
        warn!(status = status.as_u16(), %message, "API rejected request");
        Err(ApiError::Rejected { message })
    }

    async fn decode<T: DeserializeOwned>(response: Response, context: &str) -> Result<T, ApiError> {
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::transport(context, e))?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::transport(context, e))
    }

    async fn authenticate(
        &self,
        request: RequestBuilder,
        login: bool,
        context: &str,
    ) -> Result<Envelope<LoginResult>, ApiError> {
        let response: Response = self.send_anonymous(request, context).await?;
        let reply: AuthReply = Self::decode(response, context).await?;
        let envelope: Envelope<LoginResult> = reply.into_envelope();
        debug!(login, success = envelope.success, "Authentication reply");
        Ok(envelope)
    }
}

#[async_trait]
impl BrewBoxApi for HttpApi {
    async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        const CONTEXT: &str = "Registration failed";
        let url: Url = self.endpoint(&["auth", "register"])?;
        let response: Response = self
            .send_anonymous(self.client.post(url).json(request), CONTEXT)
            .await?;

        // Older servers answer with an empty 200; newer ones with an envelope.
        let body: String = response
            .text()
            .await
            .map_err(|e| ApiError::transport(CONTEXT, e))?;
        match serde_json::from_str::<Envelope<serde_json::Value>>(&body) {
            Ok(envelope) if !envelope.success => Err(ApiError::Rejected {
                message: if envelope.errors.is_empty() {
                    String::from(CONTEXT)
                } else {
                    envelope.errors.join("; ")
                },
            }),
            _ => Ok(()),
        }
    }

    async fn login(&self, request: &LoginRequest) -> Result<Envelope<LoginResult>, ApiError> {
        let url: Url = self.endpoint(&["auth", "login"])?;
        self.authenticate(self.client.post(url).json(request), true, "Login failed")
            .await
    }

    async fn verify_mfa(
        &self,
        provider: MfaProvider,
        request: &MfaRequest,
    ) -> Result<Envelope<LoginResult>, ApiError> {
        let url: Url = self.endpoint(&["auth", "mfa", provider.as_str()])?;
        self.authenticate(
            self.client.post(url).json(request),
            false,
            provider.failure_context(),
        )
        .await
    }

    async fn list_orders(
        &self,
        token: &SecretString,
        scope: OrderScope,
    ) -> Result<Vec<Order>, ApiError> {
        let context: &str = scope.failure_context();
        let url: Url = self.endpoint(scope.segments())?;
        let request: RequestBuilder = self.client.get(url).bearer_auth(token.expose_secret());
        let response: Response = self.send(request, context).await?;
        Self::decode(response, context).await
    }

    async fn get_order(
        &self,
        token: &SecretString,
        order_id: &OrderId,
    ) -> Result<Order, ApiError> {
        const CONTEXT: &str = "Failed to fetch order";
        let url: Url = self.order_endpoint(order_id, None)?;
        let request: RequestBuilder = self.client.get(url).bearer_auth(token.expose_secret());
        let response: Response = self.send(request, CONTEXT).await?;
        Self::decode(response, CONTEXT).await
    }

    async fn create_order(
        &self,
        token: &SecretString,
        request: &CreateOrderRequest,
    ) -> Result<Order, ApiError> {
        const CONTEXT: &str = "Failed to create order";
        let url: Url = self.endpoint(&["orders"])?;
        let request: RequestBuilder = self
            .client
            .post(url)
            .bearer_auth(token.expose_secret())
            .json(request);
        let response: Response = self.send(request, CONTEXT).await?;
        Self::decode(response, CONTEXT).await
    }

    async fn update_status(
        &self,
        token: &SecretString,
        order_id: &OrderId,
        request: &UpdateOrderStatusRequest,
    ) -> Result<(), ApiError> {
        let url: Url = self.order_endpoint(order_id, Some("status"))?;
        let request: RequestBuilder = self
            .client
            .put(url)
            .bearer_auth(token.expose_secret())
            .json(request);
        self.send(request, "Failed to update order status").await?;
        Ok(())
    }

    async fn update_payment(
        &self,
        token: &SecretString,
        order_id: &OrderId,
        request: &UpdatePaymentRequest,
    ) -> Result<(), ApiError> {
        let url: Url = self.order_endpoint(order_id, Some("payment"))?;
        let request: RequestBuilder = self
            .client
            .put(url)
            .bearer_auth(token.expose_secret())
            .json(request);
        self.send(request, "Failed to update payment").await?;
        Ok(())
    }
}
