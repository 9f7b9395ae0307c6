use std::collections::HashSet;

use crate::{
    foundation::error::CryptomatteResult,
    matte::{
        csv::{decode_csv, encode_csv},
        escape::{escape_host, unescape_host},
        token::Token,
        wildcard::WildcardPattern,
    },
};

/// A persisted selection: an unordered set of [`Token`]s.
///
/// Serialization sorts tokens case-insensitively (ties broken by the exact text),
/// so encoding a decoded list reproduces it byte for byte.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MatteList {
    tokens: HashSet<Token>,
}

impl MatteList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode CSV text whose fields are matte-escaped tokens. Empty fields are skipped.
    pub fn decode(csv: &str) -> CryptomatteResult<Self> {
        Ok(decode_csv(csv)?
            .into_iter()
            .filter(|field| !field.is_empty())
            .map(Token::from_matte)
            .collect())
    }

    /// Decode text as stored in a host parameter.
    pub fn decode_host(host: &str) -> CryptomatteResult<Self> {
        Self::decode(&unescape_host(host))
    }

    pub fn encode(&self) -> String {
        encode_csv(self.sorted().into_iter().map(Token::matte))
    }

    /// Encode for storage in a host parameter.
    pub fn encode_host(&self) -> String {
        escape_host(&self.encode())
    }

    /// Tokens in serialization order.
    pub fn sorted(&self) -> Vec<&Token> {
        let mut tokens: Vec<&Token> = self.tokens.iter().collect();
        tokens.sort_by_cached_key(|&t| t.sort_key());
        tokens
    }

    /// Insert `token`, treating a name and the `<id>` literal of its hash as the same entry.
    ///
    /// Adding a literal whose ID is already selected is a no-op; adding a name replaces
    /// literals of its ID. Returns whether the list changed.
    pub fn add(&mut self, token: Token) -> bool {
        if token.matte().is_empty() || self.tokens.contains(&token) {
            return false;
        }
        match token.id_literal() {
            Some(id) => {
                if self.tokens.iter().any(|t| same_id(t.id(), id)) {
                    return false;
                }
            }
            None => {
                let id = token.id();
                self.tokens
                    .retain(|t| t.id_literal().is_none_or(|lit| !same_id(lit, id)));
            }
        }
        self.tokens.insert(token)
    }

    /// Remove `token` along with entries that name the same ID in the other form.
    ///
    /// Removing a literal drops every token with that ID; removing a name drops it
    /// and literals of its hash. Returns whether anything was removed.
    pub fn remove(&mut self, token: &Token) -> bool {
        let before = self.tokens.len();
        self.tokens.remove(token);
        match token.id_literal() {
            Some(id) => self.tokens.retain(|t| !same_id(t.id(), id)),
            None => {
                let id = token.id();
                self.tokens
                    .retain(|t| t.id_literal().is_none_or(|lit| !same_id(lit, id)));
            }
        }
        self.tokens.len() != before
    }

    pub fn contains(&self, token: &Token) -> bool {
        self.tokens.contains(token)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn clear(&mut self) {
        self.tokens.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }

    pub fn has_wildcards(&self) -> bool {
        self.tokens.iter().any(Token::has_wildcards)
    }

    /// Replace each wildcard token with the manifest names it matches.
    ///
    /// Unmatched or unparsable patterns are dropped. Other tokens pass through.
    pub fn expand_wildcards<I, S>(&self, manifest_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if !self.has_wildcards() {
            return self.clone();
        }

        let names: Vec<S> = manifest_names.into_iter().collect();
        let mut out = Self::new();
        for token in &self.tokens {
            if !token.has_wildcards() {
                out.tokens.insert(token.clone());
                continue;
            }
            match WildcardPattern::new(token.matte()) {
                Ok(pattern) => out.tokens.extend(
                    names
                        .iter()
                        .map(|name| name.as_ref())
                        .filter(|name| pattern.is_match(name))
                        .map(Token::from_raw),
                ),
                Err(e) => tracing::warn!(error = %e, "dropping wildcard token"),
            }
        }
        out
    }

    /// IDs selected by this list, in serialization order.
    pub fn ids(&self) -> Vec<f32> {
        self.sorted().into_iter().map(Token::id).collect()
    }
}

impl FromIterator<Token> for MatteList {
    fn from_iter<T: IntoIterator<Item = Token>>(iter: T) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

// Plain set semantics; use `MatteList::add` for ID-aware insertion.
impl Extend<Token> for MatteList {
    fn extend<T: IntoIterator<Item = Token>>(&mut self, iter: T) {
        self.tokens
            .extend(iter.into_iter().filter(|t| !t.matte().is_empty()));
    }
}

impl<'a> IntoIterator for &'a MatteList {
    type Item = &'a Token;
    type IntoIter = std::collections::hash_set::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

fn same_id(a: f32, b: f32) -> bool {
    a.to_bits() == b.to_bits()
}

#[cfg(test)]
#[path = "../../tests/unit/matte/list.rs"]
mod tests;
