// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::require_order;
use crate::state::{OrderBook, TransitionResult};
use brewbox_domain::{DomainError, Order, OrderStatus};

/// Applies a command to the order book, producing a new book.
///
/// The input book is never modified. Callers validate a command against the
/// current book before contacting the API and keep the returned book only
/// once the server has accepted the change.
///
/// # Arguments
///
/// * `book` - The current order book (immutable)
/// * `command` - The command to apply
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new book and the affected order
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if:
/// - A placed order has no drinks or is not at status `Placed`
/// - The order is not in the book
/// - The transition is not allowed for the acting role
pub fn apply(book: &OrderBook, command: Command) -> Result<TransitionResult, CoreError> {
    match command {
        Command::PlaceOrder { order } => {
            if order.drinks.is_empty() {
                return Err(CoreError::DomainViolation(DomainError::NoDrinks));
            }
            if order.status != OrderStatus::Placed {
                return Err(CoreError::DomainViolation(
                    DomainError::InvalidOrderStatus(order.status.to_string()),
                ));
            }

            let mut new_book: OrderBook = book.clone();
            new_book.upsert(order.clone());

            Ok(TransitionResult {
                new_book,
                order,
                previous_status: None,
            })
        }
        Command::Transition {
            order_id,
            target,
            role,
        } => {
            let current: &Order = require_order(book, &order_id)?;
            let previous_status: OrderStatus = current.status;
            previous_status.validate_transition(target, role)?;

            let mut order: Order = current.clone();
            order.status = target;
            if target == OrderStatus::Paid {
                order.paid = true;
            }

            let mut new_book: OrderBook = book.clone();
            new_book.upsert(order.clone());

            Ok(TransitionResult {
                new_book,
                order,
                previous_status: Some(previous_status),
            })
        }
        Command::MarkPaid { order_id } => {
            let mut order: Order = require_order(book, &order_id)?.clone();
            let previous_status: OrderStatus = order.status;
            order.paid = true;

            let mut new_book: OrderBook = book.clone();
            new_book.upsert(order.clone());

            Ok(TransitionResult {
                new_book,
                order,
                previous_status: Some(previous_status),
            })
        }
    }
}
