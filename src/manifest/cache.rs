use std::sync::Arc;

use parking_lot::Mutex;

use crate::{
    foundation::error::CryptomatteResult,
    manifest::codec::{ManifestIndex, ManifestSource, parse_manifest},
};

#[derive(Debug)]
struct CachedManifest {
    source: ManifestSource,
    index: Arc<ManifestIndex>,
}

/// Memoizes the most recently parsed manifest.
///
/// Large manifests take a noticeable time to decode, and picking sessions look up
/// IDs repeatedly against the same one. Entries are tagged with their source, so
/// a lookup against a different manifest is a miss rather than a stale hit. The
/// lock is never held while parsing.
#[derive(Debug, Default)]
pub struct ManifestCache {
    slot: Mutex<Option<CachedManifest>>,
}

impl ManifestCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached index for `source`, if it is the one last parsed.
    pub fn get(&self, source: &ManifestSource) -> Option<Arc<ManifestIndex>> {
        self.slot
            .lock()
            .as_ref()
            .filter(|cached| cached.source.is_same(source))
            .map(|cached| Arc::clone(&cached.index))
    }

    /// Last parsed index, whatever its source.
    pub fn last(&self) -> Option<Arc<ManifestIndex>> {
        self.slot
            .lock()
            .as_ref()
            .map(|cached| Arc::clone(&cached.index))
    }

    /// Replace the cached manifest wholesale.
    pub fn put(&self, source: ManifestSource, index: ManifestIndex) -> Arc<ManifestIndex> {
        let index = Arc::new(index);
        *self.slot.lock() = Some(CachedManifest {
            source,
            index: Arc::clone(&index),
        });
        index
    }

    pub fn reset(&self) {
        *self.slot.lock() = None;
    }

    pub fn is_warm(&self) -> bool {
        self.slot.lock().is_some()
    }

    /// Cached index for `source`, parsing and caching it on a miss.
    ///
    /// Parse failures are returned and leave the cache untouched.
    #[tracing::instrument(skip(self, source))]
    pub fn get_or_parse(&self, source: &ManifestSource) -> CryptomatteResult<Arc<ManifestIndex>> {
        if let Some(index) = self.get(source) {
            tracing::debug!(entries = index.len(), "manifest cache hit");
            return Ok(index);
        }
        tracing::debug!("manifest cache miss");
        let index = parse_manifest(source)?;
        Ok(self.put(source.clone(), index))
    }

    /// Name stored for `id` in the manifest at `source`.
    pub fn id_to_name(&self, source: &ManifestSource, id: f32) -> Option<String> {
        self.lookup(source, |index| index.id_to_name(id).map(str::to_owned))
    }

    /// ID stored for `name` in the manifest at `source`.
    pub fn name_to_id(&self, source: &ManifestSource, name: &str) -> Option<f32> {
        self.lookup(source, |index| index.name_to_id(name))
    }

    fn lookup<T>(
        &self,
        source: &ManifestSource,
        f: impl FnOnce(&ManifestIndex) -> Option<T>,
    ) -> Option<T> {
        match self.get_or_parse(source) {
            Ok(index) => f(&index),
            Err(e) => {
                tracing::warn!(error = %e, "manifest lookup failed");
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/manifest/cache.rs"]
mod tests;
