//! Error taxonomy.
//!
//! Validation errors are caller-facing and recoverable: they are reported
//! before any engine work begins. Invariant violations (mismatched genotype
//! lengths, empty populations) are programming errors and panic instead.

use thiserror::Error;

/// Errors reported at the engine boundary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A split offset exceeded the board's corresponding dimension.
    #[error("invalid split offset {offset}: exceeds dimension {limit}")]
    InvalidSplit { offset: u32, limit: u32 },

    /// A cut needs at least two boards to have anything to join.
    #[error("need at least two boards, got {0}")]
    TooFewBoards(usize),

    /// A board order with a zero amount is malformed.
    #[error("order {index} has zero amount")]
    ZeroAmount { index: usize },

    /// The board does not fit the sheet in either orientation.
    #[error("board {width}x{height} does not fit max width {max_width}")]
    BoardTooWide {
        width: u32,
        height: u32,
        max_width: u32,
    },

    /// The crossover name is not one of `uniform`, `onepoint`, `twopoint`.
    #[error("unknown crossover strategy: {0:?}")]
    UnknownCrossover(String),

    /// An algorithm parameter is outside its documented range.
    #[error("invalid {name}: {value}")]
    ParamOutOfRange { name: &'static str, value: f64 },

    /// The estimated per-generation cost exceeds the configured ceiling.
    #[error("resource limits: population x boards^2 = {cost} exceeds {limit}; lower population or board count")]
    ResourceLimit { cost: u64, limit: u64 },
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
