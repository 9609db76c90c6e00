pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod session;
pub mod tessellation;

pub use error::{PolyshardError, Result};
