use crate::foundation::math::{Djb2_64, murmur3_x86_32};

const EXP_SHIFT: u32 = 23;
const EXP_MASK: u32 = 0xff;
const MANTISSA_MASK: u32 = (1 << EXP_SHIFT) - 1;
const SIGN_MASK: u32 = 1 << 31;

/// Name-hashing scheme used to derive an ID.
///
/// Only [`HashVersion::Murmur3`] is used for new data. The other variants exist to
/// check IDs written by older renderers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashVersion {
    /// MurmurHash3 x86/32, seed 0; exponent 0 or 255 repaired by flipping bit 23.
    #[default]
    Murmur3,
    /// MurmurHash3 x86/32 with the exponent clamped to `[1, 254]`.
    ///
    /// Produces the same IDs as [`HashVersion::Murmur3`] through a different bit path.
    Murmur3Clamped,
    /// 64-bit DJB2 folded to 32 bits, exponent clamped.
    Djb2Legacy,
}

impl HashVersion {
    /// Scheme used for every newly computed ID.
    pub const CURRENT: Self = Self::Murmur3;

    /// Value renderers write under the `hash` metadata key for this scheme.
    pub fn metadata_name(self) -> &'static str {
        match self {
            Self::Murmur3 | Self::Murmur3Clamped => "MurmurHash3_32",
            Self::Djb2Legacy => "djb2",
        }
    }
}

/// Compute the ID of `name` with the current hash scheme.
///
/// Total over all byte strings: the result is always a finite, normal `f32`, so
/// `0.0` stays free to mean "background".
pub fn name_to_id(name: impl AsRef<[u8]>) -> f32 {
    name_to_id_with(name, HashVersion::CURRENT)
}

/// Compute the ID of `name` with an explicit hash scheme.
pub fn name_to_id_with(name: impl AsRef<[u8]>, version: HashVersion) -> f32 {
    let bytes = name.as_ref();
    match version {
        HashVersion::Murmur3 => repair_exponent(murmur3_x86_32(bytes, 0)),
        HashVersion::Murmur3Clamped => clamp_exponent(murmur3_x86_32(bytes, 0)),
        HashVersion::Djb2Legacy => {
            let mut h = Djb2_64::new_default();
            h.write_bytes(bytes);
            clamp_exponent(h.finish_folded())
        }
    }
}

fn repair_exponent(mut bits: u32) -> f32 {
    let exp = (bits >> EXP_SHIFT) & EXP_MASK;
    if exp == 0 || exp == EXP_MASK {
        bits ^= 1 << EXP_SHIFT;
    }
    f32::from_bits(bits)
}

fn clamp_exponent(bits: u32) -> f32 {
    let exp = ((bits >> EXP_SHIFT) & EXP_MASK).clamp(1, 254);
    f32::from_bits((bits & SIGN_MASK) | (exp << EXP_SHIFT) | (bits & MANTISSA_MASK))
}

#[cfg(test)]
#[path = "../../tests/unit/hash/id.rs"]
mod tests;
