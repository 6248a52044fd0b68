// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing the session store.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The session file could not be read or written.
    #[error("Session file '{path}' could not be accessed: {source}")]
    Io {
        /// The file involved.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The session file does not hold a JSON object of strings.
    #[error("Session file '{path}' is not valid: {message}")]
    Serialization {
        /// The file involved.
        path: PathBuf,
        /// What was wrong with it.
        message: String,
    },
    /// Another thread panicked while holding the store lock.
    #[error("Session store lock was poisoned")]
    LockPoisoned,
}
