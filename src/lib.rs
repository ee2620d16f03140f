/// Players: the agent contract and its fixed-policy implementations
pub mod agent;

/// Learning algorithms
pub mod algo;

/// Implementations of strategies for time-decaying hyperparameters
pub mod decay;

/// Error types
pub mod error;

/// Exploration policies
pub mod exploration;

/// Connect Four rules and the referee
pub mod game;

mod util;
