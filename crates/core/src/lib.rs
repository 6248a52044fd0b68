// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod apply;
mod command;
mod diff;
mod error;
mod state;

#[cfg(test)]
mod tests;

use brewbox_domain::{Order, OrderId};

// Re-export public types and functions
pub use apply::apply;
pub use command::Command;
pub use diff::{OrderEvent, diff_snapshots};
pub use error::CoreError;
pub use state::{OrderBook, TransitionResult};

/// Looks up an order in the local book.
///
/// This is a read-only lookup that never contacts the API.
///
/// # Arguments
///
/// * `book` - The local order book
/// * `order_id` - The order to find
///
/// # Returns
///
/// * `Ok(&Order)` if the order is known locally
/// * `Err(CoreError::OrderNotFound)` otherwise
///
/// # Errors
///
/// Returns an error if the order has not been fetched or created yet.
pub fn require_order<'a>(book: &'a OrderBook, order_id: &OrderId) -> Result<&'a Order, CoreError> {
    book.get(order_id)
        .ok_or_else(|| CoreError::OrderNotFound(order_id.clone()))
}
