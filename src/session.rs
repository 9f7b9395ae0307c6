pub(crate) mod picker;
