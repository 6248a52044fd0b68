// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Roles granted to an authenticated identity.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

/// Actor roles for authorization.
///
/// Roles are informational on the client: the server reports them at login
/// and they decide which actions are offered, but they are never
/// verified locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Places orders and collects them.
    Customer,
    /// Claims, prepares, cancels and settles orders.
    Barista,
}

impl Role {
    /// Returns the wire name of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "Customer",
            Self::Barista => "Barista",
        }
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            s if s.eq_ignore_ascii_case("Customer") => Ok(Self::Customer),
            s if s.eq_ignore_ascii_case("Barista") => Ok(Self::Barista),
            other => Err(DomainError::InvalidRole(other.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The set of roles held by a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSet {
    roles: BTreeSet<Role>,
}

impl RoleSet {
    /// Creates an empty role set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            roles: BTreeSet::new(),
        }
    }

    /// Adds a role to the set.
    pub fn insert(&mut self, role: Role) {
        self.roles.insert(role);
    }

    /// Returns true if the set holds `role`.
    #[must_use]
    pub fn contains(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Returns true if no role is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Returns true if the set holds the Barista role.
    #[must_use]
    pub fn is_barista(&self) -> bool {
        self.contains(Role::Barista)
    }

    /// Iterates the roles in a stable order.
    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        self.roles.iter().copied()
    }

    /// Returns the set used for role decisions.
    ///
    /// An empty set is treated as `{Customer}`.
    #[must_use]
    pub fn effective(&self) -> Self {
        if self.is_empty() {
            Self::from_iter([Role::Customer])
        } else {
            self.clone()
        }
    }

    /// Parses role names as reported by the server.
    ///
    /// Unknown names are skipped so that a server adding a role does not
    /// lock the user out.
    #[must_use]
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Self {
        names
            .iter()
            .filter_map(|name| name.as_ref().parse::<Role>().ok())
            .collect()
    }

    /// Parses the comma-joined form used in persisted storage.
    #[must_use]
    pub fn from_joined(joined: &str) -> Self {
        let names: Vec<&str> = joined.split(',').filter(|s| !s.trim().is_empty()).collect();
        Self::from_names(&names)
    }

    /// Returns the comma-joined form used in persisted storage.
    #[must_use]
    pub fn to_joined(&self) -> String {
        self.iter().map(|r| r.as_str()).collect::<Vec<_>>().join(",")
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        Self {
            roles: iter.into_iter().collect(),
        }
    }
}

impl std::fmt::Display for RoleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_joined())
    }
}
