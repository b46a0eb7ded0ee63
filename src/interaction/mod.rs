pub(crate) mod drag;
