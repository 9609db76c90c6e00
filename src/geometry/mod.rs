pub mod aabb;
pub mod cut_line;
pub mod payload;
pub mod ring;

pub use aabb::Aabb2;
pub use cut_line::CutLine;
pub use payload::{Rgb, TextureRef, UvRect, VisualPayload};
pub use ring::PolygonRing;
