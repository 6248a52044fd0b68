// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use brewbox_domain::{Drink, DrinkSize, DrinkType, Order, OrderId, OrderStatus, RoleSet};
use brewbox_persistence::SessionStore;
use secrecy::{ExposeSecret, SecretString};

use crate::{
    ApiError, BrewBoxApi, BrewBoxClient, CreateOrderRequest, Envelope, LoginRequest, LoginResult,
    MfaProvider, MfaRequest, Notification, Notifier, NotifyError, OrderScope, RegisterRequest,
    UpdateOrderStatusRequest, UpdatePaymentRequest,
};

pub const TEST_TOKEN: &str = "test-token";

/// In-memory stand-in for the BrewBox server that records every call.
#[derive(Default)]
pub struct StubApi {
    pub orders: Mutex<Vec<Order>>,
    pub login_reply: Mutex<Option<Envelope<LoginResult>>>,
    /// Returned, once, by the next call.
    pub failure: Mutex<Option<ApiError>>,
    pub calls: Mutex<Vec<String>>,
    pub tokens: Mutex<Vec<String>>,
    pub registered: Mutex<Vec<RegisterRequest>>,
    pub created: Mutex<Vec<CreateOrderRequest>>,
}

impl StubApi {
    pub fn with_orders(orders: Vec<Order>) -> Arc<Self> {
        let api: Self = Self::default();
        *api.orders.lock().unwrap() = orders;
        Arc::new(api)
    }

    pub fn fail_next(&self, error: ApiError) {
        *self.failure.lock().unwrap() = Some(error);
    }

    pub fn set_status(&self, id: &str, status: OrderStatus) {
        let mut orders = self.orders.lock().unwrap();
        let order: &mut Order = orders.iter_mut().find(|o| o.id.as_str() == id).unwrap();
        order.status = status;
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String, token: Option<&SecretString>) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(call);
        if let Some(token) = token {
            self.tokens
                .lock()
                .unwrap()
                .push(token.expose_secret().to_string());
        }
        self.failure.lock().unwrap().take().map_or(Ok(()), Err)
    }

    fn login_reply(&self) -> Envelope<LoginResult> {
        self.login_reply.lock().unwrap().clone().unwrap_or(Envelope {
            success: false,
            result: None,
            errors: vec![String::from("Invalid credentials")],
        })
    }

    fn find(&self, order_id: &OrderId) -> Result<Order, ApiError> {
        self.orders
            .lock()
            .unwrap()
            .iter()
            .find(|o| &o.id == order_id)
            .cloned()
            .ok_or_else(|| ApiError::Rejected {
                message: String::from("Order not found"),
            })
    }

    fn update(&self, order_id: &OrderId, change: impl FnOnce(&mut Order)) -> Result<(), ApiError> {
        let mut orders = self.orders.lock().unwrap();
        let order: &mut Order = orders
            .iter_mut()
            .find(|o| &o.id == order_id)
            .ok_or_else(|| ApiError::Rejected {
                message: String::from("Order not found"),
            })?;
        change(order);
        Ok(())
    }
}

#[async_trait]
impl BrewBoxApi for StubApi {
    async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        self.record(String::from("POST /auth/register"), None)?;
        self.registered.lock().unwrap().push(request.clone());
        Ok(())
    }

    async fn login(&self, _request: &LoginRequest) -> Result<Envelope<LoginResult>, ApiError> {
        self.record(String::from("POST /auth/login"), None)?;
        Ok(self.login_reply())
    }

    async fn verify_mfa(
        &self,
        provider: MfaProvider,
        _request: &MfaRequest,
    ) -> Result<Envelope<LoginResult>, ApiError> {
        self.record(format!("POST /auth/mfa/{provider}"), None)?;
        Ok(self.login_reply())
    }

    async fn list_orders(
        &self,
        token: &SecretString,
        scope: OrderScope,
    ) -> Result<Vec<Order>, ApiError> {
        self.record(format!("GET /{}", scope.segments().join("/")), Some(token))?;
        Ok(self.orders.lock().unwrap().clone())
    }

    async fn get_order(
        &self,
        token: &SecretString,
        order_id: &OrderId,
    ) -> Result<Order, ApiError> {
        self.record(format!("GET /orders/{order_id}"), Some(token))?;
        self.find(order_id)
    }

    async fn create_order(
        &self,
        token: &SecretString,
        request: &CreateOrderRequest,
    ) -> Result<Order, ApiError> {
        self.record(String::from("POST /orders"), Some(token))?;
        self.created.lock().unwrap().push(request.clone());

        let mut orders = self.orders.lock().unwrap();
        let order: Order = Order {
            id: OrderId::new(format!("{}", 100 + orders.len())),
            customer: Some(String::from("customer@example.com")),
            barista: None,
            status: OrderStatus::Placed,
            pickup_time: request.pickup_time.clone(),
            total_price: request.drink_total(),
            tip: request.tip,
            paid: false,
            drinks: request
                .drinks
                .iter()
                .map(|d| Drink {
                    id: String::new(),
                    drink_type: d.drink_type,
                    size: d.size,
                    price: d.price,
                })
                .collect(),
        };
        orders.push(order.clone());
        Ok(order)
    }

    async fn update_status(
        &self,
        token: &SecretString,
        order_id: &OrderId,
        request: &UpdateOrderStatusRequest,
    ) -> Result<(), ApiError> {
        self.record(format!("PUT /orders/{order_id}/status"), Some(token))?;
        self.update(order_id, |order| order.status = request.status)
    }

    async fn update_payment(
        &self,
        token: &SecretString,
        order_id: &OrderId,
        request: &UpdatePaymentRequest,
    ) -> Result<(), ApiError> {
        self.record(format!("PUT /orders/{order_id}/payment"), Some(token))?;
        self.update(order_id, |order| order.paid = request.paid)
    }
}

/// Notifier that keeps what it was given.
#[derive(Default)]
pub struct RecordingNotifier {
    pub received: Mutex<Vec<Notification>>,
    pub fail: bool,
}

impl RecordingNotifier {
    pub fn received(&self) -> Vec<Notification> {
        self.received.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: &Notification) -> Result<(), NotifyError> {
        self.received.lock().unwrap().push(notification.clone());
        if self.fail {
            return Err(NotifyError(String::from("display unavailable")));
        }
        Ok(())
    }
}

pub fn create_test_order(id: &str, status: OrderStatus) -> Order {
    Order {
        id: OrderId::new(id),
        customer: Some(String::from("customer@example.com")),
        barista: None,
        status,
        pickup_time: String::from("2026-10-15T09:30:00Z"),
        total_price: 4.5,
        tip: None,
        paid: false,
        drinks: vec![Drink {
            id: format!("{id}-1"),
            drink_type: DrinkType::Cappuccino,
            size: DrinkSize::Medium,
            price: 4.5,
        }],
    }
}

/// A client with no stored session.
pub fn anonymous_client(api: Arc<StubApi>) -> BrewBoxClient {
    BrewBoxClient::new(api, Arc::new(SessionStore::in_memory()))
}

/// A client logged in with the given comma-joined roles.
pub fn logged_in_client(api: Arc<StubApi>, roles: &str) -> BrewBoxClient {
    let store: SessionStore = SessionStore::in_memory();
    store
        .set_session(
            &SecretString::from(TEST_TOKEN.to_string()),
            &RoleSet::from_joined(roles),
        )
        .unwrap();
    BrewBoxClient::new(api, Arc::new(store))
}

pub fn successful_login(token: &str, roles: &[&str]) -> Envelope<LoginResult> {
    Envelope {
        success: true,
        result: Some(LoginResult {
            token: Some(token.to_string()),
            roles: roles.iter().map(ToString::to_string).collect(),
            requires_mfa: false,
            succeeded: true,
            message: None,
        }),
        errors: Vec::new(),
    }
}
