// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capability computation for deciding which order actions to offer.
//!
//! Capabilities are advisory only and do not replace the checks made when
//! an action is performed.

use brewbox_domain::{Order, OrderStatus, Role, RoleSet};

/// Whether an action is permitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// The action is permitted.
    Allowed,
    /// The action is not permitted.
    Denied,
}

impl Capability {
    /// Returns true if the capability is allowed.
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Creates a capability from a boolean value.
    #[must_use]
    pub const fn from_bool(value: bool) -> Self {
        if value { Self::Allowed } else { Self::Denied }
    }

    const fn or(self, other: Self) -> Self {
        Self::from_bool(self.is_allowed() || other.is_allowed())
    }
}

/// An action a user can take on an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderAction {
    /// Barista takes a placed order.
    Claim,
    /// Barista starts preparing.
    Start,
    /// Barista marks the order ready.
    MarkReady,
    /// Barista cancels.
    Cancel,
    /// Customer picks up.
    Collect,
    /// Barista records payment.
    MarkPaid,
}

impl OrderAction {
    /// Every action.
    pub const ALL: [Self; 6] = [
        Self::Claim,
        Self::Start,
        Self::MarkReady,
        Self::Cancel,
        Self::Collect,
        Self::MarkPaid,
    ];

    /// The role that performs this action.
    #[must_use]
    pub const fn actor_role(self) -> Role {
        match self {
            Self::Collect => Role::Customer,
            Self::Claim | Self::Start | Self::MarkReady | Self::Cancel | Self::MarkPaid => {
                Role::Barista
            }
        }
    }

    /// The status this action moves the order to. `MarkPaid` leaves status alone.
    #[must_use]
    pub const fn target_status(self) -> Option<OrderStatus> {
        match self {
            Self::Claim => Some(OrderStatus::Claimed),
            Self::Start => Some(OrderStatus::InProgress),
            Self::MarkReady => Some(OrderStatus::Ready),
            Self::Cancel => Some(OrderStatus::Cancelled),
            Self::Collect => Some(OrderStatus::Collected),
            Self::MarkPaid => None,
        }
    }

    /// Short name used in logs and prompts.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Claim => "claim",
            Self::Start => "start",
            Self::MarkReady => "ready",
            Self::Cancel => "cancel",
            Self::Collect => "collect",
            Self::MarkPaid => "pay",
        }
    }
}

impl std::fmt::Display for OrderAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The actions a role may take on one order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderCapabilities {
    /// Whether the order can be claimed.
    pub can_claim: Capability,
    /// Whether preparation can start.
    pub can_start: Capability,
    /// Whether the order can be marked ready.
    pub can_mark_ready: Capability,
    /// Whether the order can be cancelled.
    pub can_cancel: Capability,
    /// Whether the order can be collected.
    pub can_collect: Capability,
    /// Whether the order can be marked paid.
    pub can_mark_paid: Capability,
}

impl OrderCapabilities {
    /// Returns the capability for `action`.
    #[must_use]
    pub const fn get(&self, action: OrderAction) -> Capability {
        match action {
            OrderAction::Claim => self.can_claim,
            OrderAction::Start => self.can_start,
            OrderAction::MarkReady => self.can_mark_ready,
            OrderAction::Cancel => self.can_cancel,
            OrderAction::Collect => self.can_collect,
            OrderAction::MarkPaid => self.can_mark_paid,
        }
    }

    /// The allowed actions, in `OrderAction::ALL` order.
    #[must_use]
    pub fn allowed_actions(&self) -> Vec<OrderAction> {
        OrderAction::ALL
            .into_iter()
            .filter(|action| self.get(*action).is_allowed())
            .collect()
    }

    const fn union(self, other: Self) -> Self {
        Self {
            can_claim: self.can_claim.or(other.can_claim),
            can_start: self.can_start.or(other.can_start),
            can_mark_ready: self.can_mark_ready.or(other.can_mark_ready),
            can_cancel: self.can_cancel.or(other.can_cancel),
            can_collect: self.can_collect.or(other.can_collect),
            can_mark_paid: self.can_mark_paid.or(other.can_mark_paid),
        }
    }
}

/// Computes what `role` may do to `order`.
///
/// Status actions follow the order lifecycle table. Marking paid is offered
/// to baristas for any order not yet paid.
#[must_use]
pub fn compute_order_capabilities(order: &Order, role: Role) -> OrderCapabilities {
    let allows = |action: OrderAction| -> Capability {
        let allowed: bool = match action.target_status() {
            Some(target) => {
                action.actor_role() == role && order.status.can_transition_to(target, role)
            }
            None => role == Role::Barista && !order.paid,
        };
        Capability::from_bool(allowed)
    };

    OrderCapabilities {
        can_claim: allows(OrderAction::Claim),
        can_start: allows(OrderAction::Start),
        can_mark_ready: allows(OrderAction::MarkReady),
        can_cancel: allows(OrderAction::Cancel),
        can_collect: allows(OrderAction::Collect),
        can_mark_paid: allows(OrderAction::MarkPaid),
    }
}

/// Computes what a session holding `roles` may do to `order`.
///
/// An empty role set is treated as Customer.
#[must_use]
pub fn compute_session_capabilities(order: &Order, roles: &RoleSet) -> OrderCapabilities {
    roles
        .effective()
        .iter()
        .map(|role| compute_order_capabilities(order, role))
        .fold(
            OrderCapabilities {
                can_claim: Capability::Denied,
                can_start: Capability::Denied,
                can_mark_ready: Capability::Denied,
                can_cancel: Capability::Denied,
                can_collect: Capability::Denied,
                can_mark_paid: Capability::Denied,
            },
            OrderCapabilities::union,
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use brewbox_domain::{Drink, DrinkSize, DrinkType, OrderId};

    fn order(status: OrderStatus, paid: bool) -> Order {
        Order {
            id: OrderId::new("1"),
            customer: None,
            barista: None,
            status,
            pickup_time: String::from("2026-10-15T09:30:00Z"),
            total_price: 3.0,
            tip: None,
            paid,
            drinks: vec![Drink {
                id: String::new(),
                drink_type: DrinkType::Espresso,
                size: DrinkSize::Small,
                price: 3.0,
            }],
        }
    }

    #[test]
    fn test_barista_on_placed_order() {
        let caps: OrderCapabilities =
            compute_order_capabilities(&order(OrderStatus::Placed, false), Role::Barista);
        assert_eq!(
            caps.allowed_actions(),
            vec![OrderAction::Claim, OrderAction::Cancel, OrderAction::MarkPaid]
        );
    }

    #[test]
    fn test_customer_can_only_collect_ready_orders() {
        for status in OrderStatus::ALL {
            let caps: OrderCapabilities =
                compute_order_capabilities(&order(status, false), Role::Customer);
            let expected: Vec<OrderAction> = if status == OrderStatus::Ready {
                vec![OrderAction::Collect]
            } else {
                Vec::new()
            };
            assert_eq!(caps.allowed_actions(), expected, "status {status}");
        }
    }

    #[test]
    fn test_barista_cannot_collect() {
        let caps: OrderCapabilities =
            compute_order_capabilities(&order(OrderStatus::Ready, true), Role::Barista);
        assert!(!caps.can_collect.is_allowed());
        assert!(!caps.can_mark_paid.is_allowed());
        assert!(caps.can_cancel.is_allowed());
    }

    #[test]
    fn test_terminal_orders_offer_no_status_actions() {
        for status in [
            OrderStatus::Collected,
            OrderStatus::Cancelled,
            OrderStatus::Paid,
        ] {
            let caps: OrderCapabilities =
                compute_order_capabilities(&order(status, true), Role::Barista);
            assert!(caps.allowed_actions().is_empty(), "status {status}");
        }
    }

    #[test]
    fn test_session_with_both_roles_gets_union() {
        let roles: RoleSet = RoleSet::from_joined("Customer,Barista");
        let caps: OrderCapabilities =
            compute_session_capabilities(&order(OrderStatus::Ready, false), &roles);
        assert_eq!(
            caps.allowed_actions(),
            vec![
                OrderAction::Cancel,
                OrderAction::Collect,
                OrderAction::MarkPaid
            ]
        );
    }

    #[test]
    fn test_empty_session_roles_act_as_customer() {
        let caps: OrderCapabilities =
            compute_session_capabilities(&order(OrderStatus::Ready, false), &RoleSet::new());
        assert_eq!(caps.allowed_actions(), vec![OrderAction::Collect]);
    }
}
