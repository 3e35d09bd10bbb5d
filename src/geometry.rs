pub(crate) mod extrude;
pub(crate) mod mesh;
pub(crate) mod shape;
