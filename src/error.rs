//! Error types for the compression engine.

use thiserror::Error;

/// Errors raised before a compression request does any work.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepairError {
    /// More rounds were requested than there are synthetic symbols
    #[error("{requested} rounds requested but only {capacity} synthetic symbols are available")]
    AlphabetExhausted { requested: usize, capacity: usize },

    /// An input symbol is indistinguishable from a synthetic one
    #[error("input symbol {symbol:?} at position {position} is reserved for merge symbols")]
    ReservedSymbol { symbol: char, position: usize },
}

/// Result type alias for compression operations.
pub type Result<T> = std::result::Result<T, RepairError>;
