use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{
    foundation::error::{CryptomatteError, CryptomatteResult},
    hash::id::name_to_id,
    manifest::{
        cache::ManifestCache,
        codec::{ManifestIndex, ManifestSource},
        metadata::{CryptomatteLayer, CryptomatteLayers},
        validate::{ValidationReport, validate_manifest},
    },
    matte::token::Token,
};

/// User-facing layer choice.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Name of the layer to key (e.g. `CryptoObject`); `None` picks the default layer.
    pub layer_name: Option<String>,
    /// Keep an unknown `layer_name` selected-as-nothing instead of falling back.
    pub lock_layer: bool,
}

/// Picking state for one image: its layers, the selected layer, and a manifest cache.
#[derive(Debug)]
pub struct CryptomatteSession {
    layers: CryptomatteLayers,
    selection: Option<String>,
    /// Manifest location of the selected layer, resolved once per selection.
    source: Option<ManifestSource>,
    base_path: Option<PathBuf>,
    config: SessionConfig,
    cache: ManifestCache,
}

impl CryptomatteSession {
    pub fn new(
        layers: CryptomatteLayers,
        base_path: Option<PathBuf>,
        config: SessionConfig,
    ) -> Self {
        let default = layers.default_layer().map(|l| l.id.clone());
        let selection = match config.layer_name.as_deref() {
            None => default,
            Some(name) => match layers.find_by_name(name) {
                Some(layer) => Some(layer.id.clone()),
                None if config.lock_layer => None,
                None => default,
            },
        };

        if let Some(layer) = selection.as_deref().and_then(|id| layers.get(id)) {
            for warning in layer.check_conventions() {
                tracing::warn!("{warning}");
            }
        }

        let mut session = Self {
            layers,
            selection: None,
            source: None,
            base_path,
            config,
            cache: ManifestCache::new(),
        };
        session.select(selection);
        session
    }

    /// Build a session from an image metadata dictionary.
    pub fn from_metadata<I, K, V>(
        metadata: I,
        base_path: Option<PathBuf>,
        config: SessionConfig,
    ) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        Self::new(CryptomatteLayers::from_metadata(metadata), base_path, config)
    }

    pub fn layers(&self) -> &CryptomatteLayers {
        &self.layers
    }

    pub fn layer_names(&self) -> Vec<&str> {
        self.layers.names()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn base_path(&self) -> Option<&Path> {
        self.base_path.as_deref()
    }

    /// Selected layer id.
    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    pub fn selected_layer(&self) -> Option<&CryptomatteLayer> {
        self.selection.as_deref().and_then(|id| self.layers.get(id))
    }

    /// Select the layer called `name`. On failure nothing is selected.
    pub fn set_selection(&mut self, name: &str) -> bool {
        let next = self.layers.find_by_name(name).map(|l| l.id.clone());
        if next != self.selection {
            self.cache.reset();
        }
        self.config.layer_name = Some(name.to_string());
        self.select(next);
        self.selection.is_some()
    }

    fn select(&mut self, selection: Option<String>) {
        self.source = selection
            .as_deref()
            .and_then(|id| self.layers.get(id))
            .and_then(|layer| layer.manifest_source(self.base_path.as_deref()));
        self.selection = selection;
    }

    pub fn manifest_source(&self) -> Option<&ManifestSource> {
        self.source.as_ref()
    }

    /// Manifest of the selected layer, through the cache.
    ///
    /// A selected layer without any manifest yields an empty index.
    pub fn parse_manifest(&self) -> CryptomatteResult<Arc<ManifestIndex>> {
        if self.selection.is_none() {
            return Err(CryptomatteError::manifest("no cryptomatte layer selected"));
        }
        match &self.source {
            Some(source) => self.cache.get_or_parse(source),
            None => Ok(Arc::new(ManifestIndex::default())),
        }
    }

    /// Name for a picked ID, if the manifest knows it.
    pub fn id_to_name(&self, id: f32) -> Option<String> {
        match self.parse_manifest() {
            Ok(index) => index.id_to_name(id).map(str::to_owned),
            Err(e) => {
                tracing::warn!(error = %e, "cannot resolve ID to a name");
                None
            }
        }
    }

    /// IDs always come from the hash, never from the manifest.
    pub fn name_to_id(&self, name: &str) -> f32 {
        name_to_id(name)
    }

    /// Parse and validate the selected layer's manifest.
    #[tracing::instrument(skip(self), fields(layer = self.selection.as_deref().unwrap_or("")))]
    pub fn test_manifest(&self) -> CryptomatteResult<ValidationReport> {
        let index = self.parse_manifest()?;
        let report = validate_manifest(&index);
        tracing::info!(
            names = index.len(),
            mismatches = report.errors.len(),
            collisions = report.collisions.len(),
            "tested manifest"
        );
        Ok(report)
    }

    /// Matte-list token for an ID sampled from the image.
    ///
    /// `0.0` is background and selects nothing. Unknown IDs become `<id>` literals.
    pub fn token_for_pick(&self, id: f32) -> Option<Token> {
        if id == 0.0 {
            return None;
        }
        Some(match self.id_to_name(id) {
            Some(name) => Token::from_raw(&name),
            None => Token::from_id(id),
        })
    }

    /// Forget cached manifests; call when upstream metadata changes.
    pub fn invalidate(&self) {
        self.cache.reset();
    }

    pub fn cache(&self) -> &ManifestCache {
        &self.cache
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/picker.rs"]
mod tests;
