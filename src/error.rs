use std::{collections::TryReserveError, fmt};

/// Errors returned by fallible [`AvlTree`](crate::AvlTree) operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Storage for a new node could not be allocated.
    ///
    /// The tree is unchanged when this is returned.
    OutOfMemory(TryReserveError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfMemory(e) => write!(f, "failed to allocate tree node: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::OutOfMemory(e) => Some(e),
        }
    }
}

impl From<TryReserveError> for Error {
    fn from(e: TryReserveError) -> Self {
        Self::OutOfMemory(e)
    }
}
