pub(crate) mod attrs;
pub(crate) mod geometry;
pub(crate) mod model;
pub(crate) mod tags;
