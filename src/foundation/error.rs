/// Convenience result type used across the crate.
pub type CryptomatteResult<T> = Result<T, CryptomatteError>;

/// Top-level error taxonomy.
///
/// Hashing is total and has no variant here. Manifest validation findings are
/// returned as data (see [`crate::ValidationReport`]) and never surface as errors.
#[derive(thiserror::Error, Debug)]
pub enum CryptomatteError {
    /// Malformed, missing or unreadable manifest.
    #[error("manifest error: {0}")]
    Manifest(String),

    /// Malformed matte-list CSV text.
    #[error("csv error: {0}")]
    Csv(String),

    /// Invalid user-provided value (hex IDs, ID literals, metadata).
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CryptomatteError {
    /// Build a [`CryptomatteError::Manifest`] value.
    pub fn manifest(msg: impl Into<String>) -> Self {
        Self::Manifest(msg.into())
    }

    /// Build a [`CryptomatteError::Csv`] value.
    pub fn csv(msg: impl Into<String>) -> Self {
        Self::Csv(msg.into())
    }

    /// Build a [`CryptomatteError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CryptomatteError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for CryptomatteError {
    fn from(e: serde_json::Error) -> Self {
        Self::serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
