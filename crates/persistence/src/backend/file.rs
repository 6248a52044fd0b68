// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::SessionBackend;
use crate::error::PersistenceError;
use std::collections::BTreeMap;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};

type Values = BTreeMap<String, String>;

/// Backend that keeps values in a JSON object on disk.
///
/// A missing or empty file reads as an empty store. Writes go to a sibling
/// temporary file, readable only by the owner on unix, that is then renamed
/// over the original.
#[derive(Debug)]
pub struct FileBackend {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileBackend {
    /// Creates a backend for the file at `path`.
    ///
    /// Nothing is read or created until the first call.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// The file backing this store.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> Result<MutexGuard<'_, ()>, PersistenceError> {
        self.write_lock
            .lock()
            .map_err(|_| PersistenceError::LockPoisoned)
    }

    fn io_error(&self, source: std::io::Error) -> PersistenceError {
        PersistenceError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn read_all(&self) -> Result<Values, PersistenceError> {
        let contents: String = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Values::new()),
            Err(e) => return Err(self.io_error(e)),
        };
        if contents.trim().is_empty() {
            return Ok(Values::new());
        }
        serde_json::from_str(&contents).map_err(|e| PersistenceError::Serialization {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    fn write_all(&self, values: &Values) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let contents: String =
            serde_json::to_string_pretty(values).map_err(|e| PersistenceError::Serialization {
                path: self.path.clone(),
                message: e.to_string(),
            })?;

        let mut tmp_name = self.path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path: PathBuf = PathBuf::from(tmp_name);

        write_private(&tmp_path, &contents).map_err(|e| self.io_error(e))?;
        std::fs::rename(&tmp_path, &self.path).map_err(|e| self.io_error(e))?;
        debug!(path = %self.path.display(), keys = values.len(), "Wrote session file");
        Ok(())
    }
}

impl SessionBackend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let _guard = self.lock()?;
        Ok(self.read_all()?.remove(key))
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), PersistenceError> {
        let _guard = self.lock()?;
        let mut values: Values = self.read_all()?;
        for (key, value) in entries {
            values.insert((*key).to_string(), (*value).to_string());
        }
        self.write_all(&values)
    }

    /// Removes `keys`. A file that cannot be parsed is replaced by an empty
    /// store so that logging out always succeeds.
    fn remove_many(&self, keys: &[&str]) -> Result<(), PersistenceError> {
        let _guard = self.lock()?;
        let (mut values, corrupt): (Values, bool) = match self.read_all() {
            Ok(values) => (values, false),
            Err(PersistenceError::Serialization { message, .. }) => {
                warn!(path = %self.path.display(), %message, "Discarding unreadable session file");
                (Values::new(), true)
            }
            Err(e) => return Err(e),
        };
        let before: usize = values.len();
        for key in keys {
            values.remove(*key);
        }
        if values.len() == before && !corrupt {
            return Ok(());
        }
        self.write_all(&values)
    }
}

/// Writes `contents` to a fresh file at `path` with mode 0600 on unix.
fn write_private(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Err(e) = std::fs::remove_file(path) {
        if e.kind() != ErrorKind::NotFound {
            return Err(e);
        }
    }

    let mut options: std::fs::OpenOptions = std::fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file: std::fs::File = options.open(path)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()
}
