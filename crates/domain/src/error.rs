// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::order_status::OrderStatus;
use crate::role::Role;

/// Errors that can occur during domain validation.
///
/// The `Display` text of each variant is the message shown to the user
/// next to the form field that failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Email address does not have a `local@domain.tld` shape.
    InvalidEmail(String),
    /// Password is shorter than the minimum length.
    PasswordTooShort {
        /// The minimum accepted length.
        min_length: usize,
    },
    /// Password and its confirmation differ.
    PasswordMismatch,
    /// Display name is empty or whitespace only.
    MissingDisplayName,
    /// A required form field was left empty.
    MissingField(&'static str),
    /// Role name is not one of the known roles.
    InvalidRole(String),
    /// Pickup time could not be parsed.
    InvalidPickupTime {
        /// The raw input.
        value: String,
    },
    /// Pickup time is not strictly later than the validation instant.
    PickupTimeNotInFuture,
    /// An order was submitted without drinks.
    NoDrinks,
    /// Drink type is not one of the fixed drink types.
    InvalidDrinkType(String),
    /// Drink size is not one of the fixed drink sizes.
    InvalidDrinkSize(String),
    /// Drink price is not a finite number greater than zero.
    InvalidPrice(String),
    /// Tip is not a finite number greater than or equal to zero.
    InvalidTip(String),
    /// Order status string is not a known status.
    InvalidOrderStatus(String),
    /// The requested status change is not in the transition table.
    InvalidStatusTransition {
        /// The order's current status.
        from: OrderStatus,
        /// The requested status.
        to: OrderStatus,
        /// The role that requested the change.
        role: Role,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidEmail(_) => write!(f, "Please enter a valid email address"),
            Self::PasswordTooShort { min_length } => {
                write!(f, "Password must be at least {min_length} characters")
            }
            Self::PasswordMismatch => write!(f, "Passwords do not match"),
            Self::MissingDisplayName => write!(f, "Display name is required"),
            Self::MissingField(field) => write!(f, "{field} is required"),
            Self::InvalidRole(role) => {
                write!(f, "Invalid role '{role}'. Choose from: Customer, Barista.")
            }
            Self::InvalidPickupTime { value } => {
                write!(f, "Pickup time '{value}' is not a valid date and time.")
            }
            Self::PickupTimeNotInFuture => write!(f, "Pickup time must be in the future."),
            Self::NoDrinks => write!(f, "An order must contain at least one drink."),
            Self::InvalidDrinkType(_) => write!(
                f,
                "Invalid drink type. Choose from: Espresso, Latte, Cappuccino, Americano, Mocha."
            ),
            Self::InvalidDrinkSize(_) => {
                write!(f, "Invalid drink size. Choose from: Small, Medium, Large.")
            }
            Self::InvalidPrice(_) => write!(f, "Drink price must be a positive number."),
            Self::InvalidTip(_) => write!(f, "Tip must be a non-negative number."),
            Self::InvalidOrderStatus(status) => write!(f, "Unknown order status '{status}'"),
            Self::InvalidStatusTransition { from, to, role } => {
                write!(f, "A {role} cannot move an order from {from} to {to}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
