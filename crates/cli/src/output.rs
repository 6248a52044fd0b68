// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Terminal rendering of orders and notifications.

use std::io::Write;

use brewbox_api::{Notification, Notifier, NotifyError, OrderAction, OrderCapabilities};
use brewbox_domain::Order;

/// Renders an order as a short block of text.
///
/// `capabilities`, when given, adds the actions the session may take.
#[must_use]
pub fn format_order(order: &Order, capabilities: Option<&OrderCapabilities>) -> String {
    let mut summary: String = format!(
        "Order {}  {}  pickup {}  ${:.2}",
        order.id, order.status, order.pickup_time, order.total_price
    );
    if let Some(tip) = order.tip {
        summary.push_str(&format!(" (+${tip:.2} tip)"));
    }
    if order.paid {
        summary.push_str("  paid");
    }
    if let Some(barista) = &order.barista {
        summary.push_str(&format!("  barista {barista}"));
    }

    let mut lines: Vec<String> = vec![summary];
    lines.extend(order.drinks.iter().map(|drink| {
        format!("    {} {}  ${:.2}", drink.size, drink.drink_type, drink.price)
    }));

    if let Some(capabilities) = capabilities {
        let actions: Vec<OrderAction> = capabilities.allowed_actions();
        if !actions.is_empty() {
            let names: Vec<&str> = actions.iter().map(|action| action.as_str()).collect();
            lines.push(format!("    actions: {}", names.join(", ")));
        }
    }
    lines.join("\n")
}

/// Renders a list of orders, or a placeholder when there are none.
#[must_use]
pub fn format_orders<'a, I>(orders: I) -> String
where
    I: IntoIterator<Item = (&'a Order, Option<OrderCapabilities>)>,
{
    let blocks: Vec<String> = orders
        .into_iter()
        .map(|(order, capabilities)| format_order(order, capabilities.as_ref()))
        .collect();
    if blocks.is_empty() {
        String::from("No orders.")
    } else {
        blocks.join("\n\n")
    }
}

/// Notifier that prints to standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: &Notification) -> Result<(), NotifyError> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "* {notification}")
            .and_then(|()| stdout.flush())
            .map_err(|e| NotifyError(e.to_string()))
    }
}
