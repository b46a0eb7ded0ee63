pub(crate) mod projector;
pub(crate) mod stage;
