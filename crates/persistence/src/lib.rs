// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session storage for the BrewBox client.
//!
//! The session is a bearer token plus the roles the server reported at
//! login. It is kept in a small string key-value store so that separate
//! invocations of the command-line client share one login.
//!
//! ## Backends
//!
//! - `MemoryBackend` keeps values for the lifetime of the process and is
//!   used by tests and embedders.
//! - `FileBackend` keeps values in a JSON object on disk. The file is read
//!   on every call and replaced atomically on every write, so the store
//!   always reflects what is persisted at call time.
//!
//! ## Keys
//!
//! - `jwtToken` holds the bearer token.
//! - `userRoles` holds the comma-joined role names.

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

mod backend;
mod error;
mod session;
mod store;

#[cfg(test)]
mod tests;

pub use backend::{FileBackend, MemoryBackend, SessionBackend};
pub use error::PersistenceError;
pub use session::Session;
pub use store::{ROLES_KEY, SessionStore, TOKEN_KEY};
