use crate::{
    error::AgentError,
    game::{Board, Move, Token},
};

mod interactive;
mod random;

pub use interactive::Interactive;
pub use random::RandomAgent;

/// A strategy for playing Connect Four under a [`Game`](crate::game::Game) referee
pub trait Agent {
    /// Reset per-game state; `token` is the mark this agent plays with
    fn begin_game(&mut self, token: Token);

    /// Choose a cell to claim on the current board
    ///
    /// The returned move is expected to be legal. An illegal one is not an error here, the
    /// referee turns it into a forfeit. **Returns** `Err` only when no move can be produced.
    fn select_move(&mut self, board: &Board) -> Result<Move, AgentError>;

    /// Receive the reward for this agent's most recent move along with the board after it
    fn observe_reward(&mut self, value: f32, board: &Board);
}
