// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Order status tracking and transition logic.
//!
//! This module defines the order lifecycle and which role may move an
//! order between which states. Status never advances on its own; every
//! change is requested by a customer or a barista.

use crate::error::DomainError;
use crate::role::Role;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle states of an order.
///
/// `New` and `Completed` are accepted on the wire as aliases of `Placed`
/// and `Collected` for servers of the earlier API revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Submitted by a customer, waiting for a barista.
    #[serde(alias = "New")]
    Placed,
    /// Taken by a barista.
    Claimed,
    /// Being prepared.
    InProgress,
    /// Ready for collection.
    Ready,
    /// Picked up by the customer.
    #[serde(alias = "Completed")]
    Collected,
    /// Cancelled by a barista.
    Cancelled,
    /// Settled by a barista.
    Paid,
}

impl OrderStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 7] = [
        Self::Placed,
        Self::Claimed,
        Self::InProgress,
        Self::Ready,
        Self::Collected,
        Self::Cancelled,
        Self::Paid,
    ];

    /// Returns the wire representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Placed => "Placed",
            Self::Claimed => "Claimed",
            Self::InProgress => "InProgress",
            Self::Ready => "Ready",
            Self::Collected => "Collected",
            Self::Cancelled => "Cancelled",
            Self::Paid => "Paid",
        }
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "Placed" | "New" => Ok(Self::Placed),
            "Claimed" => Ok(Self::Claimed),
            "InProgress" => Ok(Self::InProgress),
            "Ready" => Ok(Self::Ready),
            "Collected" | "Completed" => Ok(Self::Collected),
            "Cancelled" => Ok(Self::Cancelled),
            "Paid" => Ok(Self::Paid),
            _ => Err(DomainError::InvalidOrderStatus(s.to_string())),
        }
    }

    /// Returns true if no role may move the order out of this status.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Collected | Self::Cancelled | Self::Paid)
    }

    /// Returns true while the order still needs barista attention.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !self.is_terminal()
    }

    /// Returns the statuses `role` may set from this status.
    ///
    /// | Current    | Customer  | Barista              |
    /// |------------|-----------|----------------------|
    /// | Placed     | -         | Claimed, Cancelled   |
    /// | Claimed    | -         | InProgress, Cancelled|
    /// | InProgress | -         | Ready, Cancelled     |
    /// | Ready      | Collected | Paid, Cancelled      |
    #[must_use]
    pub const fn allowed_targets(&self, role: Role) -> &'static [Self] {
        match (self, role) {
            (Self::Placed, Role::Barista) => &[Self::Claimed, Self::Cancelled],
            (Self::Claimed, Role::Barista) => &[Self::InProgress, Self::Cancelled],
            (Self::InProgress, Role::Barista) => &[Self::Ready, Self::Cancelled],
            (Self::Ready, Role::Barista) => &[Self::Paid, Self::Cancelled],
            (Self::Ready, Role::Customer) => &[Self::Collected],
            (Self::Placed | Self::Claimed | Self::InProgress, Role::Customer)
            | (Self::Collected | Self::Cancelled | Self::Paid, _) => &[],
        }
    }

    /// Returns true if `role` may move an order from this status to `target`.
    #[must_use]
    pub fn can_transition_to(&self, target: Self, role: Role) -> bool {
        self.allowed_targets(role).contains(&target)
    }

    /// Validates that `role` may move an order from this status to `target`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` if the pair is not in
    /// the transition table.
    pub fn validate_transition(&self, target: Self, role: Role) -> Result<(), DomainError> {
        if self.can_transition_to(target, role) {
            Ok(())
        } else {
            Err(DomainError::InvalidStatusTransition {
                from: *self,
                to: target,
                role,
            })
        }
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
