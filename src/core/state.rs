//! Persisted state of the image classification cache.
//!
//! # Public API
//! - [`ImageClass`]: What a probed image turned out to be based on
//! - [`CacheRecord`]: The on-disk JSON shape of the cache
//!
//! # File format
//! ```json
//! { "suse": ["<id>", ...], "other": ["<id>", ...], "outdated": ["<id>", ...] }
//! ```
//! Unknown fields are ignored and missing fields read as empty lists.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Classification of an image, decided by probing for zypper inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageClass {
    SuseBase,
    OtherBase,
}

impl ImageClass {
    pub fn from_probe(has_zypper: bool) -> Self {
        if has_zypper {
            ImageClass::SuseBase
        } else {
            ImageClass::OtherBase
        }
    }

    pub fn is_suse(self) -> bool {
        self == ImageClass::SuseBase
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheRecord {
    pub suse: Vec<String>,
    pub other: Vec<String>,
    pub outdated: Vec<String>,
}

impl CacheRecord {
    /// Builds the persisted shape from the in-memory maps.
    pub fn from_parts(images: &BTreeMap<String, ImageClass>, outdated: &BTreeSet<String>) -> Self {
        let mut record = CacheRecord::default();
        for (id, class) in images {
            match class {
                ImageClass::SuseBase => record.suse.push(id.clone()),
                ImageClass::OtherBase => record.other.push(id.clone()),
            }
        }
        record.outdated = outdated.iter().cloned().collect();
        record
    }

    /// Splits the record into a classification map and the outdated set.
    ///
    /// An id listed in both `suse` and `other` keeps its `suse` classification.
    pub fn into_parts(self) -> (BTreeMap<String, ImageClass>, BTreeSet<String>) {
        let mut images = BTreeMap::new();
        for id in self.suse {
            images.entry(id).or_insert(ImageClass::SuseBase);
        }
        for id in self.other {
            images.entry(id).or_insert(ImageClass::OtherBase);
        }
        (images, self.outdated.into_iter().collect())
    }
}
