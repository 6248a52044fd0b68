// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Snapshot comparison for the order poller.

use brewbox_domain::{Order, OrderId, OrderStatus, RoleSet};
use std::collections::HashMap;

/// Something the poller noticed between two snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderEvent {
    /// A placed order appeared that was not in the previous snapshot.
    NewUnclaimedOrder {
        /// The new order.
        order_id: OrderId,
        /// Its requested pickup time.
        pickup_time: String,
    },
    /// An order present in both snapshots changed status.
    StatusChanged {
        /// The order.
        order_id: OrderId,
        /// Status in the previous snapshot.
        from: OrderStatus,
        /// Status in the new snapshot.
        to: OrderStatus,
    },
}

/// Compares two snapshots of the visible orders.
///
/// New unclaimed orders are reported only when `roles` includes Barista.
/// Status changes are reported for any role. Orders that disappear are not
/// reported. Events follow the order of `current`.
#[must_use]
pub fn diff_snapshots(previous: &[Order], current: &[Order], roles: &RoleSet) -> Vec<OrderEvent> {
    let barista: bool = roles.effective().is_barista();
    let before: HashMap<&OrderId, OrderStatus> = previous
        .iter()
        .map(|order| (&order.id, order.status))
        .collect();

    current
        .iter()
        .filter_map(|order| match before.get(&order.id) {
            None if barista && order.status == OrderStatus::Placed => {
                Some(OrderEvent::NewUnclaimedOrder {
                    order_id: order.id.clone(),
                    pickup_time: order.pickup_time.clone(),
                })
            }
            Some(&from) if from != order.status => Some(OrderEvent::StatusChanged {
                order_id: order.id.clone(),
                from,
                to: order.status,
            }),
            _ => None,
        })
        .collect()
}
