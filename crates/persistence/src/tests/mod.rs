// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_PATH: AtomicUsize = AtomicUsize::new(0);

/// Returns a path under the system temp directory that no other test uses.
pub fn unique_temp_path(name: &str) -> PathBuf {
    let n: usize = NEXT_PATH.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir()
        .join(format!("brewbox-persistence-{}-{n}", std::process::id()))
        .join(name)
}
