// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Key-value storage backends for the session store.
//!
//! Both backends store plain string values. Callers above this layer decide
//! what the keys mean.

mod file;
mod memory;

pub use file::FileBackend;
pub use memory::MemoryBackend;

use crate::error::PersistenceError;

/// A string key-value store.
///
/// Implementations serialize access internally; every method observes the
/// effects of every earlier completed call.
pub trait SessionBackend: Send + Sync + std::fmt::Debug {
    /// Reads a single value.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    /// Writes several values in one step.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be written.
    fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), PersistenceError>;

    /// Removes several values in one step. Missing keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be written.
    fn remove_many(&self, keys: &[&str]) -> Result<(), PersistenceError>;
}
