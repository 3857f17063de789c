use crate::heuristic::Algorithm;
use thiserror::Error;

/// Errors reported by heuristic validation and packer construction.
///
/// Capacity outcomes (a size that does not fit) are not errors; they are
/// returned as values from the insert and pack operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RectPackError {
    #[error("heuristic does not specify a valid algorithm")]
    InvalidAlgorithm,

    #[error("bin-selection heuristic is not valid for the {algorithm} algorithm and will be ignored")]
    InvalidBinFit { algorithm: Algorithm },

    #[error("split method heuristic is not valid for the {algorithm} algorithm and will be ignored")]
    InvalidSplitMethod { algorithm: Algorithm },
}

pub type Result<T> = std::result::Result<T, RectPackError>;
