use std::io;

/// A move the rules of the game do not allow
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IllegalMoveError {
    #[error("cell ({row}, {col}) is already occupied")]
    Occupied { row: usize, col: usize },

    #[error("cell ({row}, {col}) has nothing below it")]
    Floating { row: usize, col: usize },
}

/// An agent could not produce a move at all
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("input closed before a move was entered")]
    InputClosed,
}

/// Invalid parameters for a time-decaying value
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum DecayError {
    #[error("`vi - vf` ({vi} - {vf}) must have the same sign as `rate` ({rate})")]
    Direction { rate: f32, vi: f32, vf: f32 },
}
