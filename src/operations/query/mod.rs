mod area;
mod bounding_box;
mod vertex_density;

pub use area::Area;
pub use bounding_box::BoundingBox;
pub use vertex_density::VertexDensity;
