pub(crate) mod generator;
pub(crate) mod schema;
pub(crate) mod task;
