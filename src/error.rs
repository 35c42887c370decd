//! Engine error taxonomy
//!
//! Every error is a usage fault surfaced to the immediate caller. Nothing in
//! the engine retries or recovers; a sort that fails halfway leaves the
//! sequence as a valid permutation that should be rebuilt.

/// Errors produced by the sorting engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortError {
    /// Element or sequence built without a usable capacity, length or timing
    Configuration(String),
    /// A primitive was called with an index outside `[0, len)`
    Index { index: usize, len: usize },
    /// A state tag that is not one of `inactive/active/swapping/done`
    InvalidState(String),
    /// The requested algorithm name is not known at all
    UnknownAlgorithm(String),
    /// The algorithm is a known sort this build leaves out
    NotImplemented(String),
    /// The run was aborted through its cancel flag
    Cancelled,
    /// A session was asked to sort before any sequence was built
    NoSequence,
}

impl std::fmt::Display for SortError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortError::Configuration(e) => write!(f, "Configuration error: {}", e),
            SortError::Index { index, len } => {
                write!(f, "Index {} out of range for sequence of length {}", index, len)
            }
            SortError::InvalidState(tag) => write!(f, "Invalid element state: {:?}", tag),
            SortError::UnknownAlgorithm(name) => write!(f, "Unknown algorithm: {:?}", name),
            SortError::NotImplemented(name) => {
                write!(f, "Algorithm {:?} is not available in this build", name)
            }
            SortError::Cancelled => write!(f, "Sort cancelled"),
            SortError::NoSequence => write!(f, "No sequence has been built yet"),
        }
    }
}

impl std::error::Error for SortError {}

/// Engine result type
pub type Result<T> = std::result::Result<T, SortError>;
