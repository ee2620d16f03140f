mod board;
mod referee;
mod tally;

pub use board::{Board, Cell, Move, Shape, StateKey, Token};
pub use referee::{Game, Outcome, Reward};
pub use tally::Tally;
