pub mod creation;
pub mod cut;
pub mod fragment;
pub mod query;
pub mod silhouette;
pub mod simplify;

pub use cut::{Cut, CutOutcome, CutParams, CutPiece};
pub use fragment::{Classification, DustBurst, FragmentPolicy};
pub use silhouette::{ExtractSilhouette, ProjectPointCloud};
pub use simplify::Simplify;
