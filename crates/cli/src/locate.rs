//! Source root discovery.

use std::{
    env::current_dir,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};

use crate::config::SOURCE_ROOT_MARKER;

/// Walks up from the current working directory to the nearest directory
/// named `src` and returns it.
///
/// The walk stops at the filesystem root; running the tool outside the
/// project tree is reported as an error rather than looping forever.
pub fn find_source_root() -> Result<PathBuf> {
    let start = current_dir().context("Failed to resolve current directory")?;
    find_source_root_from(&start)
}

/// Walks up from `start` to the nearest directory named `src`.
///
/// The match is on the final path component, so `mysrc` or `src-old`
/// never qualify.
pub fn find_source_root_from(start: &Path) -> Result<PathBuf> {
    let mut dir = start.to_path_buf();
    loop {
        if dir.file_name().is_some_and(|name| name == SOURCE_ROOT_MARKER) {
            return Ok(dir);
        }
        if !dir.pop() {
            bail!(
                "No `{SOURCE_ROOT_MARKER}` directory between {} and the filesystem root",
                start.display()
            );
        }
    }
}
