use super::FragmentId;

/// Why a fragment survived a cut untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetainReason {
    /// The drawn segment does not pass through the fragment.
    NotIntersecting,
    /// Cutting would have produced a piece without usable area.
    DegenerateRing,
}

/// One fragment replaced by its pieces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitRecord {
    /// The removed fragment.
    pub parent: FragmentId,
    /// Pieces that became live fragments.
    pub children: Vec<FragmentId>,
    /// Pieces that turned to dust.
    pub dust: usize,
}

/// Summary of one [`Session::cut`](super::Session::cut) call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CutReport {
    /// Fragments tested against the line.
    pub examined: usize,
    /// Fragments that were split.
    pub split: Vec<SplitRecord>,
    /// Total pieces turned to dust.
    pub dust: usize,
    /// Fragments left as they were.
    pub retained: Vec<(FragmentId, RetainReason)>,
}

impl CutReport {
    /// Returns `true` if at least one fragment was split.
    #[must_use]
    pub fn any_split(&self) -> bool {
        !self.split.is_empty()
    }
}
