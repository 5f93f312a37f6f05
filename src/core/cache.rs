//! Classification cache for docker images.
//!
//! Probing an image for zypper means starting a container, so answers are
//! remembered in a small JSON file keyed by image id. The cache is a pure
//! optimization: when no writable location exists the store still answers
//! every query by probing, it just never remembers anything.
//!
//! # Public API
//! - [`CacheStore`]: in-memory cache mirrored to the backing file
//! - [`Loaded`]: result of loading, with any non-fatal problem attached
//! - [`Classified`]: answer of [`CacheStore::is_suse`] plus the write outcome
//!
//! # Persistence
//! Every mutation is flushed before the call returns. Flushing reopens the
//! file by path and rewrites it in place. Write failures are returned to the
//! caller, who is expected to log them and move on.

use crate::core::dirs::{cache_candidates, resolve_location, ResolvedLocation, CACHE_FILE_NAME};
use crate::core::docker::ImageInspector;
use crate::core::error::{Result, ZypperDockerError};
use crate::core::state::{CacheRecord, ImageClass};
use std::collections::{BTreeMap, BTreeSet};
use std::fs::OpenOptions;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Binary whose presence marks an image as SUSE based.
pub const PROBE_COMMAND: &str = "zypper";

#[derive(Debug)]
pub struct CacheStore {
    location: Option<PathBuf>,
    valid: bool,
    probe_command: String,
    images: BTreeMap<String, ImageClass>,
    outdated: BTreeSet<String>,
}

impl Default for CacheStore {
    fn default() -> Self {
        Self {
            location: None,
            valid: false,
            probe_command: PROBE_COMMAND.to_string(),
            images: BTreeMap::new(),
            outdated: BTreeSet::new(),
        }
    }
}

/// A loaded store together with the problem hit while loading, if any.
///
/// Both an unavailable location and an unreadable file still produce a
/// usable store.
#[derive(Debug)]
pub struct Loaded {
    pub store: CacheStore,
    pub issue: Option<ZypperDockerError>,
}

#[must_use = "the flush outcome should be logged"]
#[derive(Debug)]
pub struct Classified {
    pub is_suse: bool,
    pub flush: Result<()>,
}

impl CacheStore {
    /// Store that never persists anything. Queries always probe.
    pub fn invalid() -> Self {
        Self::default()
    }

    /// Loads the cache from the default candidate directories.
    pub fn load() -> Loaded {
        Self::load_from(&cache_candidates())
    }

    /// Loads the cache from the first usable directory among `candidates`.
    pub fn load_from(candidates: &[String]) -> Loaded {
        match resolve_location(CACHE_FILE_NAME, candidates) {
            Ok(location) => Self::from_location(location),
            Err(e) => Loaded {
                store: Self::invalid(),
                issue: Some(e),
            },
        }
    }

    /// Decodes the content of an already opened cache file.
    ///
    /// The file handle is dropped once read. Undecodable content yields an
    /// empty store that is still bound to the location, so the next flush
    /// overwrites it.
    pub fn from_location(location: ResolvedLocation) -> Loaded {
        let ResolvedLocation { path, mut file } = location;
        let mut store = CacheStore {
            location: Some(path.clone()),
            valid: true,
            ..Self::default()
        };

        let mut content = String::new();
        let read = file.read_to_string(&mut content);
        drop(file);

        let issue = match read {
            Err(e) => Some(ZypperDockerError::cache_read_failed(&path, e)),
            Ok(_) => match serde_json::from_str::<CacheRecord>(&content) {
                Ok(record) => {
                    let (images, outdated) = record.into_parts();
                    store.images = images;
                    store.outdated = outdated;
                    log::debug!(
                        "Loaded {} classified and {} outdated images from {}",
                        store.images.len(),
                        store.outdated.len(),
                        path.display()
                    );
                    None
                }
                Err(e) => Some(ZypperDockerError::cache_parse_failed(&path, e)),
            },
        };

        Loaded { store, issue }
    }

    /// Uses `command` instead of zypper to decide whether an image is SUSE based.
    pub fn with_probe_command(mut self, command: impl Into<String>) -> Self {
        self.probe_command = command.into();
        self
    }

    pub fn location(&self) -> Option<&Path> {
        self.location.as_deref()
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Returns whether `id` is known, and if so whether it is SUSE based.
    pub fn id_exists(&self, id: &str) -> (bool, bool) {
        match self.images.get(id) {
            Some(class) => (true, class.is_suse()),
            None => (false, false),
        }
    }

    pub fn classification(&self, id: &str) -> Option<ImageClass> {
        self.images.get(id).copied()
    }

    /// Whether `id` was replaced by a `patch` or `update` run.
    pub fn is_image_outdated(&self, id: &str) -> bool {
        self.outdated.contains(id)
    }

    /// Whether the image is SUSE based, probing it only on a cache miss.
    ///
    /// On a valid store the probe result is recorded and flushed. The answer
    /// is returned even if the flush failed.
    pub fn is_suse(&mut self, id: &str, inspector: &dyn ImageInspector) -> Classified {
        if self.valid {
            if let Some(class) = self.classification(id) {
                return Classified {
                    is_suse: class.is_suse(),
                    flush: Ok(()),
                };
            }
        }

        let is_suse = inspector.has_command(id, &self.probe_command);
        log::debug!("Probed {id}: suse = {is_suse}");

        let flush = if self.valid {
            self.images
                .entry(id.to_string())
                .or_insert(ImageClass::from_probe(is_suse));
            self.flush()
        } else {
            Ok(())
        };

        Classified { is_suse, flush }
    }

    /// Records that `outdated_ref` was patched or updated into `updated_id`.
    ///
    /// The reference is resolved first and a resolution error is returned
    /// untouched, without changing anything. Afterwards the old id is marked
    /// outdated and the new one SUSE based; each change is flushed on its own
    /// and the first write error, if any, is returned once both were tried.
    pub fn update_cache_after_update(
        &mut self,
        outdated_ref: &str,
        updated_id: &str,
        inspector: &dyn ImageInspector,
    ) -> Result<()> {
        let outdated_id = inspector.image_id(outdated_ref)?;

        let mut first_error = None;

        if self.outdated.insert(outdated_id.clone()) {
            log::debug!("Marking {outdated_id} as outdated");
            if let Err(e) = self.flush() {
                first_error.get_or_insert(e);
            }
        }

        if self.classification(updated_id) != Some(ImageClass::SuseBase) {
            log::debug!("Marking {updated_id} as SUSE based");
            self.images
                .insert(updated_id.to_string(), ImageClass::SuseBase);
            if let Err(e) = self.flush() {
                first_error.get_or_insert(e);
            }
        }

        first_error.map_or(Ok(()), Err)
    }

    /// Forgets every classification. Outdated records are kept.
    pub fn reset(&mut self) -> Result<()> {
        self.images.clear();
        self.flush()
    }

    /// Writes the whole cache back to its file, replacing the old content.
    ///
    /// Does nothing on an invalid store.
    pub fn flush(&self) -> Result<()> {
        let path = match (&self.location, self.valid) {
            (Some(path), true) => path,
            _ => return Ok(()),
        };

        let json = serde_json::to_string_pretty(&self.record())
            .map_err(ZypperDockerError::cache_serialization_failed)?;

        let mut file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(path)
            .map_err(|e| ZypperDockerError::cache_write_failed(path, e))?;
        file.write_all(json.as_bytes())
            .and_then(|_| file.write_all(b"\n"))
            .map_err(|e| ZypperDockerError::cache_write_failed(path, e))?;

        log::debug!("Flushed cache to {}", path.display());
        Ok(())
    }

    /// Snapshot of the cache in its persisted shape.
    pub fn record(&self) -> CacheRecord {
        CacheRecord::from_parts(&self.images, &self.outdated)
    }

    pub fn suse_ids(&self) -> impl Iterator<Item = &str> {
        self.ids_of(ImageClass::SuseBase)
    }

    pub fn other_ids(&self) -> impl Iterator<Item = &str> {
        self.ids_of(ImageClass::OtherBase)
    }

    pub fn outdated_ids(&self) -> impl Iterator<Item = &str> {
        self.outdated.iter().map(String::as_str)
    }

    fn ids_of(&self, wanted: ImageClass) -> impl Iterator<Item = &str> {
        self.images
            .iter()
            .filter(move |(_, class)| **class == wanted)
            .map(|(id, _)| id.as_str())
    }
}
