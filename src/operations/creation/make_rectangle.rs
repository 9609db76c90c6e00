use crate::error::{OperationError, Result};
use crate::geometry::PolygonRing;
use crate::math::Point2;

/// Creates an axis-aligned, counter-clockwise rectangle ring.
pub struct MakeRectangle {
    center: Point2,
    width: f64,
    height: f64,
}

impl MakeRectangle {
    /// Creates a new `MakeRectangle` operation centred on the origin.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            center: Point2::origin(),
            width,
            height,
        }
    }

    /// Creates a square with the given side length.
    #[must_use]
    pub fn square(side: f64) -> Self {
        Self::new(side, side)
    }

    /// Sets the rectangle's centre.
    #[must_use]
    pub fn with_center(mut self, center: Point2) -> Self {
        self.center = center;
        self
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if either dimension is not
    /// positive.
    pub fn execute(&self) -> Result<PolygonRing> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(OperationError::InvalidInput(format!(
                "rectangle dimensions must be positive, got {} x {}",
                self.width, self.height
            ))
            .into());
        }
        let (hw, hh) = (self.width / 2.0, self.height / 2.0);
        let c = self.center;
        PolygonRing::new([
            Point2::new(c.x - hw, c.y - hh),
            Point2::new(c.x + hw, c.y - hh),
            Point2::new(c.x + hw, c.y + hh),
            Point2::new(c.x - hw, c.y + hh),
        ])
    }
}
