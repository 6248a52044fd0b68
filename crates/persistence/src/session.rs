// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use brewbox_domain::{Role, RoleSet};
use secrecy::SecretString;

/// An authenticated session.
///
/// The token is kept as a `SecretString` so that it never appears in
/// `Debug` output or logs.
#[derive(Debug, Clone)]
pub struct Session {
    /// Bearer token sent with every authenticated request.
    pub token: SecretString,
    /// Roles reported by the server at login. Never empty.
    pub roles: RoleSet,
}

impl Session {
    /// Creates a session, defaulting an empty role set to Customer.
    #[must_use]
    pub fn new(token: SecretString, roles: &RoleSet) -> Self {
        Self {
            token,
            roles: roles.effective(),
        }
    }

    /// Returns true if the session holds `role`.
    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(role)
    }
}
