//! Per-manifest state kept for the lifetime of a module instance.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::util::fs::normalize_path;

/// Identity of a manifest record, unique within a [`ManifestCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordId(usize);

/// State attached to one manifest file.
#[derive(Debug)]
pub struct ManifestRecord {
    id: RecordId,
    path: PathBuf,
    installed: bool,
}

impl ManifestRecord {
    pub fn id(&self) -> RecordId {
        self.id
    }

    /// Canonical path of the manifest.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True once `conan install` succeeded for this manifest in this process.
    pub fn installed(&self) -> bool {
        self.installed
    }

    pub fn mark_installed(&mut self) {
        self.installed = true;
    }
}

/// One [`ManifestRecord`] per canonical manifest path. Never evicts.
#[derive(Debug, Default)]
pub struct ManifestCache {
    records: HashMap<PathBuf, ManifestRecord>,
}

impl ManifestCache {
    pub fn new() -> Self {
        ManifestCache::default()
    }

    /// Get the record for a manifest, creating it on first lookup.
    pub fn get_or_create(&mut self, manifest: &Path) -> &mut ManifestRecord {
        let path = normalize_path(manifest);
        let next_id = RecordId(self.records.len());

        self.records.entry(path.clone()).or_insert_with(|| {
            tracing::debug!("tracking manifest {}", path.display());
            ManifestRecord {
                id: next_id,
                path,
                installed: false,
            }
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
