//! Cryptomatte ID hashing, manifest codec and matte-list encoding.
//!
//! Cryptomatte renders tag every object with a float ID derived from its name.
//! This crate is the host-independent core a compositing plugin needs to work
//! with those IDs:
//!
//! 1. **Hash**: `name -> f32` ID (MurmurHash3 with exponent repair), plus hex,
//!    `<float>` literal and preview-color conversions.
//! 2. **Manifest**: parse/serialize the name <-> ID JSON table (inline or sidecar),
//!    validate it, discover layers in image metadata, and cache the last parse.
//! 3. **Matte list**: the persisted selection text. Raw names are matte-escaped,
//!    joined as CSV, and escaped once more for the host's parameter syntax.
//!    Wildcard tokens expand against manifest names.
//! 4. **Session**: layer selection plus a cache, turning picked IDs into tokens.
//!
//! The crate is deterministic and does no IO besides reading sidecar manifests.
#![forbid(unsafe_code)]

mod foundation;
mod hash;
mod manifest;
mod matte;
mod session;

pub use foundation::error::{CryptomatteError, CryptomatteResult};
pub use hash::convert::{
    format_id_literal, hex_to_id, id_to_hex, id_to_preview_color, parse_id_literal,
    single_precision,
};
pub use hash::id::{HashVersion, name_to_id, name_to_id_with};
pub use manifest::cache::ManifestCache;
pub use manifest::codec::{
    ManifestIndex, ManifestSource, load_manifest, parse_manifest, resolve_sidecar_path,
};
pub use manifest::metadata::{
    CryptomatteLayer, CryptomatteLayers, EXPECTED_CONVERSION, METADATA_PREFIXES,
    MIN_LAYER_CHANNELS, has_enough_channels, identify_channels,
};
pub use manifest::validate::{ValidationReport, validate_manifest, validate_manifest_with};
pub use matte::csv::{decode_csv, encode_csv};
pub use matte::escape::{
    escape_host, escape_matte, has_unescaped_wildcard, unescape_host, unescape_matte,
};
pub use matte::list::MatteList;
pub use matte::token::Token;
pub use session::picker::{CryptomatteSession, SessionConfig};
