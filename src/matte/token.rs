use std::fmt;

use crate::{
    hash::{
        convert::{format_id_literal, parse_id_literal},
        id::name_to_id,
    },
    matte::escape::{escape_matte, has_unescaped_wildcard, unescape_matte},
};

/// One matte-list entry: a name, a `<float>` ID literal, or a wildcard pattern.
///
/// Stored in matte-escaped form, so `raw()` and `matte()` are the only ways across
/// the escape boundary.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Token(String);

impl Token {
    /// Token for a literal name; wildcard characters in it match only themselves.
    pub fn from_raw(raw: &str) -> Self {
        Self(escape_matte(raw))
    }

    /// Token from already matte-escaped text, e.g. a decoded CSV field.
    pub fn from_matte(matte: impl Into<String>) -> Self {
        Self(matte.into())
    }

    /// Canonical literal token for an ID with no known name.
    pub fn from_id(id: f32) -> Self {
        Self(format_id_literal(id))
    }

    pub fn matte(&self) -> &str {
        &self.0
    }

    pub fn raw(&self) -> String {
        unescape_matte(&self.0)
    }

    /// The ID written in a `<float>` literal, if this is one.
    pub fn id_literal(&self) -> Option<f32> {
        parse_id_literal(&self.raw())
    }

    pub fn is_id_literal(&self) -> bool {
        self.id_literal().is_some()
    }

    /// ID this token selects: the literal value, or the hash of the raw name.
    pub fn id(&self) -> f32 {
        self.id_literal().unwrap_or_else(|| name_to_id(self.raw()))
    }

    pub fn has_wildcards(&self) -> bool {
        has_unescaped_wildcard(&self.0)
    }

    pub(crate) fn sort_key(&self) -> (String, &str) {
        (self.0.to_lowercase(), &self.0)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/matte/token.rs"]
mod tests;
