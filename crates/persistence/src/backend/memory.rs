// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::SessionBackend;
use crate::error::PersistenceError;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

/// Backend that keeps values for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    values: Mutex<BTreeMap<String, String>>,
}

impl MemoryBackend {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<String, String>>, PersistenceError> {
        self.values
            .lock()
            .map_err(|_| PersistenceError::LockPoisoned)
    }
}

impl SessionBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), PersistenceError> {
        let mut values = self.lock()?;
        for (key, value) in entries {
            values.insert((*key).to_string(), (*value).to_string());
        }
        drop(values);
        Ok(())
    }

    fn remove_many(&self, keys: &[&str]) -> Result<(), PersistenceError> {
        let mut values = self.lock()?;
        for key in keys {
            values.remove(*key);
        }
        drop(values);
        Ok(())
    }
}
