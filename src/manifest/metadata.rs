use std::{collections::BTreeMap, path::Path};

use crate::{hash::id::HashVersion, manifest::codec::ManifestSource};

/// Metadata key prefixes under which renderers publish Cryptomatte layers.
pub const METADATA_PREFIXES: [&str; 2] = ["exr/cryptomatte/", "cryptomatte/"];
/// Expected value of the `conversion` metadata key.
pub const EXPECTED_CONVERSION: &str = "uint32_to_float32";
/// Channels a layer needs before it can be keyed.
pub const MIN_LAYER_CHANNELS: usize = 2;

const CHANNEL_SUFFIX: &str = ".red";

/// One Cryptomatte layer described by image metadata.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CryptomatteLayer {
    /// Short layer identifier from the metadata key (e.g. `ae93ba3`).
    pub id: String,
    /// Layer name, which is also the channel prefix (e.g. `CryptoObject`).
    pub name: String,
    pub hash: Option<String>,
    pub conversion: Option<String>,
    /// Inline manifest JSON.
    pub manifest: Option<String>,
    /// Sidecar manifest path relative to the image.
    pub manif_file: Option<String>,
    /// Sub keys this crate does not interpret.
    pub extra: BTreeMap<String, String>,
}

impl CryptomatteLayer {
    fn set(&mut self, sub_key: &str, value: &str) {
        let value = value.to_string();
        match sub_key {
            "name" => self.name = value,
            "hash" => self.hash = Some(value),
            "conversion" => self.conversion = Some(value),
            "manifest" => self.manifest = Some(value),
            "manif_file" => self.manif_file = Some(value),
            _ => {
                self.extra.insert(sub_key.to_string(), value);
            }
        }
    }

    /// Where this layer's manifest lives.
    ///
    /// Inline manifests win over sidecars. A sidecar needs the image path to resolve.
    pub fn manifest_source(&self, base_path: Option<&Path>) -> Option<ManifestSource> {
        if let Some(json) = &self.manifest {
            return Some(ManifestSource::inline(json.as_str()));
        }
        match (&self.manif_file, base_path) {
            (Some(file), Some(base)) => Some(ManifestSource::sidecar(base, file.clone())),
            _ => None,
        }
    }

    /// Warnings for hash/conversion values this crate cannot reproduce.
    pub fn check_conventions(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        let expected_hash = HashVersion::CURRENT.metadata_name();
        if let Some(hash) = self.hash.as_deref().filter(|h| *h != expected_hash) {
            warnings.push(format!(
                "layer '{}' uses hash '{hash}', expected '{expected_hash}'",
                self.name
            ));
        }
        if let Some(conv) = self
            .conversion
            .as_deref()
            .filter(|c| *c != EXPECTED_CONVERSION)
        {
            warnings.push(format!(
                "layer '{}' uses conversion '{conv}', expected '{EXPECTED_CONVERSION}'",
                self.name
            ));
        }
        warnings
    }
}

/// All Cryptomatte layers found in one metadata dictionary, keyed by layer id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CryptomatteLayers {
    layers: BTreeMap<String, CryptomatteLayer>,
}

impl CryptomatteLayers {
    /// Group `cryptomatte/<id>/<key>` and `exr/cryptomatte/<id>/<key>` entries.
    ///
    /// Unrelated keys and keys without a sub key are ignored. When the same field
    /// appears under both prefixes, the later entry in iteration order wins.
    pub fn from_metadata<I, K, V>(metadata: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut layers: BTreeMap<String, CryptomatteLayer> = BTreeMap::new();
        for (key, value) in metadata {
            let Some(rest) = METADATA_PREFIXES
                .iter()
                .find_map(|p| key.as_ref().strip_prefix(p))
            else {
                continue;
            };
            let Some((layer_id, sub_key)) = rest.split_once('/') else {
                continue;
            };
            if layer_id.is_empty() || sub_key.is_empty() {
                continue;
            }
            layers
                .entry(layer_id.to_string())
                .or_insert_with(|| CryptomatteLayer {
                    id: layer_id.to_string(),
                    ..CryptomatteLayer::default()
                })
                .set(sub_key, value.as_ref());
        }
        Self { layers }
    }

    pub fn get(&self, layer_id: &str) -> Option<&CryptomatteLayer> {
        self.layers.get(layer_id)
    }

    /// Layer whose `name` equals `name`.
    pub fn find_by_name(&self, name: &str) -> Option<&CryptomatteLayer> {
        self.layers.values().find(|l| l.name == name)
    }

    /// Layer picked when nothing else is selected: the first by id.
    pub fn default_layer(&self) -> Option<&CryptomatteLayer> {
        self.layers.values().next()
    }

    pub fn names(&self) -> Vec<&str> {
        self.layers.values().map(|l| l.name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CryptomatteLayer> {
        self.layers.values()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

/// Channels belonging to `layer_name`, e.g. `CryptoObject`, `CryptoObject00`, ...
///
/// Only `.red` channels are considered; the suffix is stripped and the result sorted.
pub fn identify_channels<I, S>(layer_name: &str, channels: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = channels
        .into_iter()
        .filter_map(|c| {
            let c = c.as_ref();
            if !c.starts_with(layer_name) {
                return None;
            }
            c.strip_suffix(CHANNEL_SUFFIX).map(str::to_string)
        })
        .collect();
    out.sort();
    out.dedup();
    out
}

pub fn has_enough_channels(channels: &[String]) -> bool {
    channels.len() >= MIN_LAYER_CHANNELS
}

#[cfg(test)]
#[path = "../../tests/unit/manifest/metadata.rs"]
mod tests;
