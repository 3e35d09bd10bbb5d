pub(crate) mod framer;
pub(crate) mod material;
pub(crate) mod model;
