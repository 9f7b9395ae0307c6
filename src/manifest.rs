pub(crate) mod cache;
pub(crate) mod codec;
pub(crate) mod metadata;
pub(crate) mod validate;
