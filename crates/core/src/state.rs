// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use brewbox_domain::{Order, OrderId, OrderStatus};

/// The client's local copy of the orders it has seen.
///
/// Orders keep the position in which they were first seen, so listings
/// render in the order the server returned them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderBook {
    orders: Vec<Order>,
}

impl OrderBook {
    /// Creates an empty order book.
    #[must_use]
    pub const fn new() -> Self {
        Self { orders: Vec::new() }
    }

    /// Returns the order with the given id, if present.
    #[must_use]
    pub fn get(&self, order_id: &OrderId) -> Option<&Order> {
        self.orders.iter().find(|order| &order.id == order_id)
    }

    /// Returns true if the order is present.
    #[must_use]
    pub fn contains(&self, order_id: &OrderId) -> bool {
        self.get(order_id).is_some()
    }

    /// Inserts an order, replacing any existing order with the same id in place.
    pub fn upsert(&mut self, order: Order) {
        match self.orders.iter_mut().find(|existing| existing.id == order.id) {
            Some(existing) => *existing = order,
            None => self.orders.push(order),
        }
    }

    /// Inserts or replaces every order in `orders`.
    pub fn upsert_all(&mut self, orders: impl IntoIterator<Item = Order>) {
        for order in orders {
            self.upsert(order);
        }
    }

    /// All known orders.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Orders whose status is not terminal.
    pub fn active(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter().filter(|order| order.status.is_active())
    }

    /// Number of known orders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Returns true if no orders are known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

/// The result of a successful command.
///
/// Transitions are atomic: they either succeed completely or fail without side effects.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionResult {
    /// The new order book after the command.
    pub new_book: OrderBook,
    /// The affected order, as it is in `new_book`.
    pub order: Order,
    /// The order's status before the command, or `None` for a new order.
    pub previous_status: Option<OrderStatus>,
}
