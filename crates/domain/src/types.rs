// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::order_status::OrderStatus;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The fixed menu of drink types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrinkType {
    Espresso,
    Latte,
    Cappuccino,
    Americano,
    Mocha,
}

impl DrinkType {
    /// Every drink type, in menu order.
    pub const ALL: [Self; 5] = [
        Self::Espresso,
        Self::Latte,
        Self::Cappuccino,
        Self::Americano,
        Self::Mocha,
    ];

    /// Returns the wire name of the drink type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Espresso => "Espresso",
            Self::Latte => "Latte",
            Self::Cappuccino => "Cappuccino",
            Self::Americano => "Americano",
            Self::Mocha => "Mocha",
        }
    }
}

impl FromStr for DrinkType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s.trim())
            .ok_or_else(|| DomainError::InvalidDrinkType(s.to_string()))
    }
}

impl std::fmt::Display for DrinkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The fixed cup sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrinkSize {
    Small,
    Medium,
    Large,
}

impl DrinkSize {
    /// Every size, smallest first.
    pub const ALL: [Self; 3] = [Self::Small, Self::Medium, Self::Large];

    /// Returns the wire name of the size.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Small => "Small",
            Self::Medium => "Medium",
            Self::Large => "Large",
        }
    }
}

impl FromStr for DrinkSize {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|size| size.as_str() == s.trim())
            .ok_or_else(|| DomainError::InvalidDrinkSize(s.to_string()))
    }
}

impl std::fmt::Display for DrinkSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A drink that is part of a submitted order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Drink {
    /// Server-assigned identifier.
    #[serde(default)]
    pub id: String,
    /// The drink type.
    #[serde(rename = "type")]
    pub drink_type: DrinkType,
    /// The cup size.
    pub size: DrinkSize,
    /// Price of this drink.
    pub price: f64,
}

/// Identifier of an order, as assigned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Wraps a server-assigned identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// An order as reported by the server.
///
/// The client never recomputes `total_price`; it is displayed as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Server-assigned identifier.
    pub id: OrderId,
    /// The ordering customer.
    #[serde(default, alias = "customerId", alias = "createdById")]
    pub customer: Option<String>,
    /// The barista who claimed the order, if any.
    #[serde(default, alias = "baristaId", skip_serializing_if = "Option::is_none")]
    pub barista: Option<String>,
    /// Current lifecycle status.
    pub status: OrderStatus,
    /// Requested pickup instant, as sent by the server.
    pub pickup_time: String,
    /// Sum of the drink prices, excluding tip.
    pub total_price: f64,
    /// Optional tip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tip: Option<f64>,
    /// Whether the order has been settled.
    #[serde(default)]
    pub paid: bool,
    /// The drinks, in the order they were entered.
    #[serde(default)]
    pub drinks: Vec<Drink>,
}

impl Order {
    /// Returns true if a barista has not yet claimed the order.
    #[must_use]
    pub fn is_unclaimed(&self) -> bool {
        self.status == OrderStatus::Placed
    }
}
