use crate::foundation::error::{CryptomatteError, CryptomatteResult};

/// Below this magnitude literals switch to exponent notation.
const PLAIN_MIN: f32 = 1e-4;
/// At or above this magnitude literals switch to exponent notation.
const PLAIN_MAX: f32 = 1e16;

/// Round an `f64` to the nearest `f32`.
///
/// Matte lists and manifests store IDs at double precision while pickers sample
/// them at single precision; every comparison happens after this cast.
pub fn single_precision(value: f64) -> f32 {
    value as f32
}

/// Bit pattern of `id` as 8 lowercase hex digits.
pub fn id_to_hex(id: f32) -> String {
    format!("{:08x}", id.to_bits())
}

/// Parse a manifest hex value back into an ID.
///
/// Accepts either case, an optional `0x` prefix and omitted leading zeros.
pub fn hex_to_id(hex: &str) -> CryptomatteResult<f32> {
    let s = hex.trim();
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    if digits.is_empty() {
        return Err(CryptomatteError::validation("hex ID must be non-empty"));
    }
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(CryptomatteError::validation(format!(
            "hex ID contains non-hex characters: '{hex}'"
        )));
    }
    let bits = u32::from_str_radix(digits, 16).map_err(|_| {
        CryptomatteError::validation(format!("hex ID does not fit in 32 bits: '{hex}'"))
    })?;
    Ok(f32::from_bits(bits))
}

/// Parse a `<float>` literal token into an ID.
///
/// Returns `None` for anything that is not a bracketed, finite decimal.
pub fn parse_id_literal(token: &str) -> Option<f32> {
    let body = token.strip_prefix('<')?.strip_suffix('>')?;
    let value: f64 = body.trim().parse().ok()?;
    let id = single_precision(value);
    id.is_finite().then_some(id)
}

/// Canonical `<float>` literal for `id`, using the shortest decimal that
/// round-trips through `f32`.
pub fn format_id_literal(id: f32) -> String {
    let magnitude = id.abs();
    if magnitude == 0.0 || (PLAIN_MIN..PLAIN_MAX).contains(&magnitude) {
        format!("<{id}>")
    } else {
        format!("<{id:e}>")
    }
}

/// Deterministic RGB swatch for UI previews, derived from the ID bit pattern.
pub fn id_to_preview_color(id: f32) -> [f32; 3] {
    let bits = id.to_bits();
    let max = f64::from(u32::MAX);
    [
        (f64::from(bits) / max) as f32,
        (f64::from(bits << 8) / max) as f32,
        (f64::from(bits << 16) / max) as f32,
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/hash/convert.rs"]
mod tests;
