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

mod error;
mod order_status;
mod role;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use order_status::OrderStatus;
pub use role::{Role, RoleSet};
pub use types::{Drink, DrinkSize, DrinkType, Order, OrderId};
pub use validation::{
    MIN_PASSWORD_LENGTH, parse_pickup_time, validate_display_name, validate_drink_size,
    validate_drink_type, validate_email, validate_password, validate_password_confirmation,
    validate_pickup_time, validate_price, validate_price_amount, validate_tip,
    validate_tip_amount,
};
