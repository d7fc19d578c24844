//! Locating the recognizer executable before any work is done.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::error::{Result, SongidError};

/// Check that `program` can be resolved on `PATH`.
///
/// Returns the resolved path, or [`SongidError::DependencyMissing`].
pub fn check_for_songrec(program: &str) -> Result<PathBuf> {
    let search_path = std::env::var_os("PATH");
    match find_executable(program, search_path.as_deref()) {
        Some(path) => {
            log::debug!("Found {} at {}", program, path.display());
            Ok(path)
        }
        None => Err(SongidError::DependencyMissing(program.to_string())),
    }
}

/// Resolve `program` against a `PATH`-style search list.
///
/// A name with more than one path component is checked as given.
pub fn find_executable(program: &str, search_path: Option<&OsStr>) -> Option<PathBuf> {
    let candidate = Path::new(program);
    if candidate.components().count() > 1 {
        return is_executable(candidate).then(|| candidate.to_path_buf());
    }

    let search_path = search_path?;
    std::env::split_paths(search_path)
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| dir.join(program))
        .find(|path| is_executable(path))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    match path.metadata() {
        Ok(meta) => meta.is_file() && meta.permissions().mode() & 0o111 != 0,
        Err(_) => false,
    }
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
