// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::OrderBook;
use brewbox_domain::{Drink, DrinkSize, DrinkType, Order, OrderId, OrderStatus};

pub fn create_test_order(id: &str, status: OrderStatus) -> Order {
    Order {
        id: OrderId::new(id),
        customer: Some(String::from("alice@example.com")),
        barista: None,
        status,
        pickup_time: String::from("2026-10-15T09:30:00Z"),
        total_price: 4.5,
        tip: None,
        paid: false,
        drinks: vec![Drink {
            id: format!("{id}-1"),
            drink_type: DrinkType::Latte,
            size: DrinkSize::Medium,
            price: 4.5,
        }],
    }
}

pub fn create_test_book(orders: &[(&str, OrderStatus)]) -> OrderBook {
    let mut book: OrderBook = OrderBook::new();
    for (id, status) in orders {
        book.upsert(create_test_order(id, *status));
    }
    book
}
