// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use brewbox_domain::{Order, OrderId, OrderStatus, Role};

/// A command represents user intent against the local order book as data only.
///
/// Commands are the only way to change an order in the book. Fetches that
/// refresh the book from the server go through `OrderBook::upsert` instead.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Record an order the server has just accepted.
    PlaceOrder {
        /// The order as returned by the server.
        order: Order,
    },
    /// Move an order to a new status.
    Transition {
        /// The order to move.
        order_id: OrderId,
        /// The requested status.
        target: OrderStatus,
        /// The role the actor is acting as.
        role: Role,
    },
    /// Mark an order as settled without changing its status.
    MarkPaid {
        /// The order to settle.
        order_id: OrderId,
    },
}

impl Command {
    /// Returns the command name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::PlaceOrder { .. } => "PlaceOrder",
            Self::Transition { .. } => "Transition",
            Self::MarkPaid { .. } => "MarkPaid",
        }
    }
}
