//! Well-known directories used by zypper-docker.
//!
//! The cache file location is resolved from an ordered list of candidates.
//! Each candidate may hold several directories separated by `:`, which are
//! tried left to right. The first directory where the cache file can be
//! opened (or created) for reading and writing wins.

use crate::core::error::{Result, ZypperDockerError};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

/// Name of the cache file inside whichever directory gets picked.
pub const CACHE_FILE_NAME: &str = "docker-zypper.json";

/// An opened cache file together with the absolute path it was opened from.
///
/// The handle is only meant for the initial read; the store drops it right
/// after decoding and reopens the path on every flush.
#[derive(Debug)]
pub struct ResolvedLocation {
    pub path: PathBuf,
    pub file: File,
}

pub fn get_config_directory() -> Result<PathBuf> {
    let base = match std::env::consts::OS {
        "linux" | "freebsd" | "netbsd" | "openbsd" => std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| dirs::home_dir().unwrap_or_default().join(".config")),
        "macos" => dirs::home_dir()
            .unwrap_or_default()
            .join("Library/Application Support"),
        _ => dirs::config_dir().unwrap_or_default(),
    };

    Ok(base.join("zypper-docker"))
}

/// Candidate directories for the cache file, in priority order:
/// `$HOME/.cache` and then `/tmp`.
pub fn cache_candidates() -> Vec<String> {
    let mut candidates = Vec::with_capacity(2);

    match std::env::var("HOME") {
        Ok(home) if !home.is_empty() => candidates.push(format!("{home}/.cache")),
        _ => log::debug!("HOME is not set, skipping the user cache directory"),
    }
    candidates.push("/tmp".to_string());

    candidates
}

/// Opens the first usable cache file among `candidates`.
///
/// Existing content is never truncated. Missing parent directories are not
/// created: a candidate whose directory does not exist is simply skipped.
pub fn resolve_location(file_name: &str, candidates: &[String]) -> Result<ResolvedLocation> {
    for candidate in candidates {
        for dir in candidate.split(':').filter(|d| !d.is_empty()) {
            let path = absolute(Path::new(dir)).join(file_name);

            match open_read_write(&path) {
                Ok(file) => {
                    log::debug!("Using cache file: {}", path.display());
                    return Ok(ResolvedLocation { path, file });
                }
                Err(e) => {
                    log::debug!("Cannot use '{}' for the cache: {e}", path.display());
                }
            }
        }
    }

    Err(ZypperDockerError::CacheLocationUnavailable)
}

fn absolute(dir: &Path) -> PathBuf {
    if dir.is_absolute() {
        return dir.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(dir))
        .unwrap_or_else(|_| dir.to_path_buf())
}

#[cfg(unix)]
fn open_read_write(path: &Path) -> std::io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;

    OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .mode(0o666)
        .open(path)
}

#[cfg(not(unix))]
fn open_read_write(path: &Path) -> std::io::Result<File> {
    OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)
}
