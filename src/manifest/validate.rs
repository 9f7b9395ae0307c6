use std::collections::{HashMap, hash_map::Entry};

use crate::{
    hash::{
        convert::id_to_hex,
        id::{HashVersion, name_to_id_with},
    },
    manifest::codec::ManifestIndex,
};

/// Findings from [`validate_manifest`]. Informational only.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct ValidationReport {
    /// Entries whose stored ID differs from the recomputed one.
    pub errors: Vec<String>,
    /// Names that share an ID with an earlier (sorted) name.
    pub collisions: Vec<String>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.collisions.is_empty()
    }
}

/// Rehash every name in `index` and look for mismatches and collisions.
pub fn validate_manifest(index: &ManifestIndex) -> ValidationReport {
    validate_manifest_with(index, HashVersion::CURRENT)
}

/// Like [`validate_manifest`], checking against a specific hash scheme.
pub fn validate_manifest_with(index: &ManifestIndex, version: HashVersion) -> ValidationReport {
    let mut report = ValidationReport::default();
    let mut claimed: HashMap<u32, &str> = HashMap::with_capacity(index.len());

    for (name, id) in index.iter() {
        let computed = name_to_id_with(name, version);
        if computed.to_bits() != id.to_bits() {
            report.errors.push(format!(
                "computed ID doesn't match manifest ID: {name} ({}, {})",
                id_to_hex(id),
                id_to_hex(computed)
            ));
            continue;
        }
        match claimed.entry(id.to_bits()) {
            Entry::Occupied(first) => report
                .collisions
                .push(format!("colliding: {} {name}", first.get())),
            Entry::Vacant(slot) => {
                slot.insert(name);
            }
        }
    }

    report
}

#[cfg(test)]
#[path = "../../tests/unit/manifest/validate.rs"]
mod tests;
