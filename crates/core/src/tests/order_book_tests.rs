// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{create_test_book, create_test_order};
use crate::{CoreError, OrderBook, require_order};
use brewbox_domain::{OrderId, OrderStatus};

#[test]
fn test_upsert_replaces_in_place() {
    let mut book: OrderBook =
        create_test_book(&[("1", OrderStatus::Placed), ("2", OrderStatus::Claimed)]);

    book.upsert(create_test_order("1", OrderStatus::Claimed));

    assert_eq!(book.len(), 2);
    assert_eq!(book.orders()[0].id, OrderId::new("1"));
    assert_eq!(book.orders()[0].status, OrderStatus::Claimed);
}

#[test]
fn test_upsert_appends_unknown_orders() {
    let mut book: OrderBook = create_test_book(&[("1", OrderStatus::Placed)]);

    book.upsert_all(vec![
        create_test_order("3", OrderStatus::Ready),
        create_test_order("1", OrderStatus::Cancelled),
    ]);

    let ids: Vec<&str> = book.orders().iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "3"]);
    assert_eq!(book.orders()[0].status, OrderStatus::Cancelled);
}

#[test]
fn test_active_excludes_terminal_orders() {
    let book: OrderBook = create_test_book(&[
        ("1", OrderStatus::Placed),
        ("2", OrderStatus::Collected),
        ("3", OrderStatus::Ready),
        ("4", OrderStatus::Cancelled),
        ("5", OrderStatus::Paid),
    ]);

    let active: Vec<&str> = book.active().map(|o| o.id.as_str()).collect();
    assert_eq!(active, vec!["1", "3"]);
}

#[test]
fn test_require_order_reports_missing_id() {
    let book: OrderBook = OrderBook::new();
    let result = require_order(&book, &OrderId::new("missing"));

    match result {
        Err(CoreError::OrderNotFound(id)) => assert_eq!(id.as_str(), "missing"),
        other => panic!("Expected OrderNotFound, got {other:?}"),
    }
}
