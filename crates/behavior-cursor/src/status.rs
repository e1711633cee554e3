//! Signals fed into a running tree.

/// The outcome a caller reports for the behavior at the active leaf.
///
/// The same type is used while the signal climbs the tree: a node can pass it
/// on unchanged, flip it (see [`Status::invert`]), or absorb it by moving the
/// cursor somewhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// The leaf's behavior completed successfully.
    Success,

    /// The leaf's behavior could not be carried out.
    Failure,
}

impl Status {
    /// Returns `true` if this status is `Success`.
    #[inline]
    pub fn is_success(self) -> bool {
        matches!(self, Status::Success)
    }

    /// Returns `true` if this status is `Failure`.
    #[inline]
    pub fn is_failure(self) -> bool {
        matches!(self, Status::Failure)
    }

    /// Inverts the status: Success becomes Failure and vice versa.
    #[inline]
    pub fn invert(self) -> Self {
        match self {
            Status::Success => Status::Failure,
            Status::Failure => Status::Success,
        }
    }
}
