pub(crate) mod csv;
pub(crate) mod escape;
pub(crate) mod list;
pub(crate) mod token;
pub(crate) mod wildcard;
