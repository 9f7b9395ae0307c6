use std::{
    collections::{BTreeMap, HashMap},
    path::{Component, Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;

use crate::{
    foundation::error::{CryptomatteError, CryptomatteResult},
    hash::convert::{hex_to_id, id_to_hex},
};

/// Where a manifest's JSON text lives.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ManifestSource {
    /// JSON embedded directly in image metadata.
    ///
    /// Shared so that sessions and the cache can hold the same text without copies.
    Inline(Arc<str>),
    /// JSON in a separate file, referenced relative to the image it belongs to.
    Sidecar {
        /// Path of the image whose metadata referenced the sidecar.
        base_path: PathBuf,
        /// Relative path as stored in metadata (`/`-separated).
        manif_file: String,
    },
}

impl ManifestSource {
    /// Build an inline source.
    pub fn inline(json: impl Into<Arc<str>>) -> Self {
        Self::Inline(json.into())
    }

    /// Build a sidecar source.
    pub fn sidecar(base_path: impl Into<PathBuf>, manif_file: impl Into<String>) -> Self {
        Self::Sidecar {
            base_path: base_path.into(),
            manif_file: manif_file.into(),
        }
    }

    /// Equality that settles shared inline text by pointer before comparing bytes.
    pub(crate) fn is_same(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Inline(a), Self::Inline(b)) => Arc::ptr_eq(a, b) || a == b,
            _ => self == other,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Inline(_) => "inline",
            Self::Sidecar { .. } => "sidecar",
        }
    }
}

/// Bidirectional name/ID lookup built from one manifest.
///
/// The ID side is keyed by bit pattern. When several names share an ID, the first
/// name in sorted order owns the ID slot; [`crate::validate_manifest`] reports
/// the rest as collisions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ManifestIndex {
    from_names: BTreeMap<String, f32>,
    from_ids: HashMap<u32, String>,
}

impl ManifestIndex {
    /// Build an index from `(name, id)` pairs.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f32)>,
        S: Into<String>,
    {
        let from_names: BTreeMap<String, f32> =
            pairs.into_iter().map(|(n, id)| (n.into(), id)).collect();

        let mut from_ids = HashMap::with_capacity(from_names.len());
        for (name, id) in &from_names {
            from_ids
                .entry(id.to_bits())
                .or_insert_with(|| name.clone());
        }

        Self {
            from_names,
            from_ids,
        }
    }

    /// Parse manifest JSON: an object mapping names to hex ID strings.
    pub fn from_json(json: &str) -> CryptomatteResult<Self> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| CryptomatteError::manifest(format!("invalid manifest JSON: {e}")))?;
        let serde_json::Value::Object(map) = value else {
            return Err(CryptomatteError::manifest(
                "manifest JSON must be an object of name -> hex ID",
            ));
        };

        let mut pairs = Vec::with_capacity(map.len());
        for (name, value) in map {
            let Some(hex) = value.as_str() else {
                return Err(CryptomatteError::manifest(format!(
                    "manifest value for '{name}' must be a hex string"
                )));
            };
            let id = hex_to_id(hex)
                .map_err(|e| CryptomatteError::manifest(format!("manifest entry '{name}': {e}")))?;
            pairs.push((name, id));
        }
        Ok(Self::from_pairs(pairs))
    }

    /// Serialize back to manifest JSON with 8-digit lowercase hex values.
    pub fn to_json(&self) -> CryptomatteResult<String> {
        let map: BTreeMap<&str, String> = self
            .from_names
            .iter()
            .map(|(name, id)| (name.as_str(), id_to_hex(*id)))
            .collect();
        Ok(serde_json::to_string(&map)?)
    }

    pub fn name_to_id(&self, name: &str) -> Option<f32> {
        self.from_names.get(name).copied()
    }

    pub fn id_to_name(&self, id: f32) -> Option<&str> {
        self.from_ids.get(&id.to_bits()).map(String::as_str)
    }

    pub fn contains_id(&self, id: f32) -> bool {
        self.from_ids.contains_key(&id.to_bits())
    }

    /// Names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.from_names.keys().map(String::as_str)
    }

    /// `(name, id)` pairs in sorted name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> {
        self.from_names.iter().map(|(n, id)| (n.as_str(), *id))
    }

    pub fn len(&self) -> usize {
        self.from_names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.from_names.is_empty()
    }
}

/// Parse a manifest from its source.
#[tracing::instrument(skip(source), fields(kind = source.kind()))]
pub fn parse_manifest(source: &ManifestSource) -> CryptomatteResult<ManifestIndex> {
    match source {
        ManifestSource::Inline(json) => ManifestIndex::from_json(json),
        ManifestSource::Sidecar {
            base_path,
            manif_file,
        } => {
            let path = resolve_sidecar_path(base_path, manif_file)?;
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("read sidecar manifest '{}'", path.display()))?;
            ManifestIndex::from_json(&json)
        }
    }
}

/// Parse a manifest, degrading to an empty index on any failure.
///
/// Callers keep working with numeric IDs while a manifest is unavailable.
pub fn load_manifest(source: &ManifestSource) -> ManifestIndex {
    match parse_manifest(source) {
        Ok(index) => index,
        Err(e) => {
            tracing::warn!(error = %e, "manifest unavailable; continuing with an empty manifest");
            ManifestIndex::default()
        }
    }
}

/// Resolve a sidecar manifest path against the directory of `base_path`.
///
/// Backslashes are rejected so that stored paths stay portable.
pub fn resolve_sidecar_path(base_path: &Path, manif_file: &str) -> CryptomatteResult<PathBuf> {
    if manif_file.contains('\\') {
        return Err(CryptomatteError::manifest(format!(
            "sidecar manifest path must use '/' separators: '{manif_file}'"
        )));
    }
    if manif_file.trim().is_empty() {
        return Err(CryptomatteError::manifest(
            "sidecar manifest path must be non-empty",
        ));
    }

    let dir = base_path.parent().unwrap_or_else(|| Path::new(""));
    Ok(normalize_path(&dir.join(manif_file)))
}

/// Lexical normalization: drops `.` and lets `..` consume the previous component.
fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                // `..` at the root stays at the root
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/manifest/codec.rs"]
mod tests;
