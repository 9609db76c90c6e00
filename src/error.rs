use thiserror::Error;

/// Top-level error type for the polyshard engine.
#[derive(Debug, Error)]
pub enum PolyshardError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Cut(#[from] CutError),

    #[error(transparent)]
    Silhouette(#[from] SilhouetteError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Tessellation(#[from] TessellationError),
}

/// Errors related to ring and line construction.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate ring: {vertex_count} usable vertices, at least 3 required")]
    DegenerateRing { vertex_count: usize },

    #[error("ring encloses zero area")]
    ZeroArea,

    #[error("cut line has zero length")]
    ZeroLengthCut,
}

/// Errors raised while cutting a ring.
#[derive(Debug, Error)]
pub enum CutError {
    #[error("cut line does not intersect the ring")]
    NoIntersection,

    #[error("intersection at u = {u} lies outside the drawn segment")]
    SegmentOutOfRange { u: f64 },

    #[error("cut pieces cover {actual} of the ring's {expected} area")]
    AreaNotConserved { expected: f64, actual: f64 },
}

/// Errors raised by boundary extraction.
#[derive(Debug, Error)]
pub enum SilhouetteError {
    #[error("insufficient points: {unique} unique points, at least 3 required")]
    InsufficientPoints { unique: usize },
}

/// Errors related to operation inputs.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Errors related to tessellation.
#[derive(Debug, Error)]
pub enum TessellationError {
    #[error("tessellation failed: {0}")]
    Failed(String),
}

/// Convenience type alias for results using [`PolyshardError`].
pub type Result<T> = std::result::Result<T, PolyshardError>;
