// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the BrewBox client.
//!
//! `BrewBoxClient` is the entry point. It combines a `BrewBoxApi`
//! transport, the session store and a local order book, and enforces role
//! and lifecycle rules before anything is sent to the server.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod auth;
mod capabilities;
mod client;
mod error;
mod forms;
mod notifications;
mod orders;
mod poller;
mod request_response;
mod transport;

#[cfg(test)]
mod tests;

pub use auth::{AuthorizationService, LoginOutcome};
pub use capabilities::{
    Capability, OrderAction, OrderCapabilities, compute_order_capabilities,
    compute_session_capabilities,
};
pub use client::BrewBoxClient;
pub use error::{ApiError, AuthError, translate_core_error, translate_domain_error};
pub use forms::{DrinkInput, LoginForm, OrderForm, RegistrationForm, TipInput};
pub use notifications::{Notification, Notifier, NotifyError, TracingNotifier, dispatch};
pub use poller::{DEFAULT_POLL_INTERVAL, OrderPoller, PollerExit, PollerHandle};
pub use request_response::{
    ApiErrorBody, AuthReply, CreateOrderRequest, DrinkRequest, Envelope, ErrorList, LoginRequest,
    LoginResult, MfaRequest, RegisterRequest, UpdateOrderStatusRequest, UpdatePaymentRequest,
};
pub use transport::{BrewBoxApi, DEFAULT_API_URL, HttpApi, MfaProvider, OrderScope};
