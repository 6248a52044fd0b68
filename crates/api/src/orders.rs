// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Order operations on `BrewBoxClient`.
//!
//! Every operation reads the session at call time. Role checks and
//! lifecycle checks run before the request is sent; the local order book is
//! updated only after the server accepts the change.

use crate::auth::AuthorizationService;
use crate::capabilities::{OrderAction, OrderCapabilities, compute_session_capabilities};
use crate::client::BrewBoxClient;
use crate::error::{ApiError, translate_core_error};
use crate::forms::OrderForm;
use crate::request_response::{CreateOrderRequest, UpdateOrderStatusRequest, UpdatePaymentRequest};
use crate::transport::OrderScope;
use brewbox_core::{Command, OrderBook, TransitionResult, apply};
use brewbox_domain::{Order, OrderId, OrderStatus, Role};
use brewbox_persistence::Session;
use time::OffsetDateTime;
use tracing::{debug, info, instrument, warn};

impl BrewBoxClient {
    /// Places an order.
    ///
    /// # Arguments
    ///
    /// * `form` - The order form as entered
    /// * `now` - The current time, used to check the pickup time
    ///
    /// # Returns
    ///
    /// The order as created by the server.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - There is no session, or it lacks the Customer role
    /// - The form is invalid (nothing is sent)
    /// - The server rejects the order
    #[instrument(skip(self, form, now))]
    pub async fn create_order(
        &self,
        form: &OrderForm,
        now: OffsetDateTime,
    ) -> Result<Order, ApiError> {
        let session: Session = self.session()?;
        AuthorizationService::authorize_create_order(&session)?;
        let request: CreateOrderRequest = form.validate(now)?;

        let order: Order = self.check(self.api.create_order(&session.token, &request).await)?;

        let mut book = self.book.lock().await;
        match apply(&book, Command::PlaceOrder {
            order: order.clone(),
        }) {
            Ok(result) => *book = result.new_book,
            Err(e) => {
                warn!(order_id = %order.id, error = %e, "Server returned an unexpected new order");
                book.upsert(order.clone());
            }
        }
        drop(book);

        info!(order_id = %order.id, drinks = order.drinks.len(), "Order placed");
        Ok(order)
    }

    /// Moves an order to `target`, acting as `actor_role`.
    ///
    /// The order is taken from the local book, or fetched when it is not
    /// known yet.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - There is no session, or it lacks `actor_role`
    /// - `target` is not reachable from the current status for `actor_role`
    /// - The server rejects the change
    #[instrument(skip(self))]
    pub async fn transition(
        &self,
        order_id: &OrderId,
        target: OrderStatus,
        actor_role: Role,
    ) -> Result<Order, ApiError> {
        let session: Session = self.session()?;
        AuthorizationService::authorize_transition(&session, actor_role)?;
        let book: OrderBook = self.book_with(&session, order_id).await?;

        let result: TransitionResult = apply(&book, Command::Transition {
            order_id: order_id.clone(),
            target,
            role: actor_role,
        })
        .map_err(translate_core_error)?;

        let request: UpdateOrderStatusRequest = UpdateOrderStatusRequest { status: target };
        self.check(
            self.api
                .update_status(&session.token, order_id, &request)
                .await,
        )?;

        self.book.lock().await.upsert(result.order.clone());
        info!(
            from = ?result.previous_status,
            to = %target,
            "Order status updated"
        );
        Ok(result.order)
    }

    /// Marks an order paid without changing its status.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no session, it lacks the Barista role, or
    /// the server rejects the change.
    #[instrument(skip(self))]
    pub async fn set_paid(&self, order_id: &OrderId) -> Result<Order, ApiError> {
        let session: Session = self.session()?;
        AuthorizationService::authorize_set_paid(&session)?;
        let book: OrderBook = self.book_with(&session, order_id).await?;

        let result: TransitionResult = apply(&book, Command::MarkPaid {
            order_id: order_id.clone(),
        })
        .map_err(translate_core_error)?;

        let request: UpdatePaymentRequest = UpdatePaymentRequest { paid: true };
        self.check(
            self.api
                .update_payment(&session.token, order_id, &request)
                .await,
        )?;

        self.book.lock().await.upsert(result.order.clone());
        info!("Order marked paid");
        Ok(result.order)
    }

    /// Performs one of the named order actions.
    ///
    /// # Errors
    ///
    /// See `transition` and `set_paid`.
    pub async fn perform(&self, order_id: &OrderId, action: OrderAction) -> Result<Order, ApiError> {
        match action.target_status() {
            Some(target) => self.transition(order_id, target, action.actor_role()).await,
            None => self.set_paid(order_id).await,
        }
    }

    /// Barista claims a placed order.
    ///
    /// # Errors
    ///
    /// See `transition`.
    pub async fn claim(&self, order_id: &OrderId) -> Result<Order, ApiError> {
        self.perform(order_id, OrderAction::Claim).await
    }

    /// Barista starts preparing a claimed order.
    ///
    /// # Errors
    ///
    /// See `transition`.
    pub async fn start(&self, order_id: &OrderId) -> Result<Order, ApiError> {
        self.perform(order_id, OrderAction::Start).await
    }

    /// Barista marks an order ready for pickup.
    ///
    /// # Errors
    ///
    /// See `transition`.
    pub async fn mark_ready(&self, order_id: &OrderId) -> Result<Order, ApiError> {
        self.perform(order_id, OrderAction::MarkReady).await
    }

    /// Barista cancels an order.
    ///
    /// # Errors
    ///
    /// See `transition`.
    pub async fn cancel(&self, order_id: &OrderId) -> Result<Order, ApiError> {
        self.perform(order_id, OrderAction::Cancel).await
    }

    /// Customer collects a ready order.
    ///
    /// # Errors
    ///
    /// See `transition`.
    pub async fn collect(&self, order_id: &OrderId) -> Result<Order, ApiError> {
        self.perform(order_id, OrderAction::Collect).await
    }

    /// Fetches an order collection and merges it into the local book.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no session or the fetch fails.
    #[instrument(skip(self))]
    pub async fn list_orders(&self, scope: OrderScope) -> Result<Vec<Order>, ApiError> {
        let session: Session = self.session()?;
        let orders: Vec<Order> =
            self.check(self.api.list_orders(&session.token, scope).await)?;
        debug!(count = orders.len(), "Fetched orders");
        self.book.lock().await.upsert_all(orders.iter().cloned());
        Ok(orders)
    }

    /// Fetches one order and merges it into the local book.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no session or the fetch fails.
    #[instrument(skip(self))]
    pub async fn get_order(&self, order_id: &OrderId) -> Result<Order, ApiError> {
        let session: Session = self.session()?;
        let order: Order = self.fetch_order(&session, order_id).await?;
        self.book.lock().await.upsert(order.clone());
        Ok(order)
    }

    /// Fetches the orders the session should be watching.
    ///
    /// Baristas get the work queue (`/orders/current`); everyone else gets
    /// their active orders (`/orders/active`).
    ///
    /// # Errors
    ///
    /// Returns an error if there is no session or the fetch fails.
    pub async fn visible_orders(&self) -> Result<Vec<Order>, ApiError> {
        let scope: OrderScope = self.visible_scope()?;
        self.list_orders(scope).await
    }

    /// The scope `visible_orders` fetches for the current session.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no session.
    pub fn visible_scope(&self) -> Result<OrderScope, ApiError> {
        let session: Session = self.session()?;
        Ok(if session.roles.is_barista() {
            OrderScope::Current
        } else {
            OrderScope::Active
        })
    }

    /// What the current session may do to `order`.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no session.
    pub fn capabilities(&self, order: &Order) -> Result<OrderCapabilities, ApiError> {
        let session: Session = self.session()?;
        Ok(compute_session_capabilities(order, &session.roles))
    }

    async fn fetch_order(&self, session: &Session, order_id: &OrderId) -> Result<Order, ApiError> {
        self.check(self.api.get_order(&session.token, order_id).await)
    }

    /// A copy of the local book that is sure to contain `order_id`.
    async fn book_with(&self, session: &Session, order_id: &OrderId) -> Result<OrderBook, ApiError> {
        let book: OrderBook = self.book.lock().await.clone();
        if book.contains(order_id) {
            return Ok(book);
        }

        debug!(%order_id, "Order not known locally; fetching");
        let order: Order = self.fetch_order(session, order_id).await?;
        let mut shared = self.book.lock().await;
        shared.upsert(order);
        Ok(shared.clone())
    }
}
