use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::{
    error::AgentError,
    game::{Board, Move, Token},
};

use super::Agent;

/// An agent that picks uniformly among the legal moves
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// A reproducible agent
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn begin_game(&mut self, _token: Token) {}

    fn select_move(&mut self, board: &Board) -> Result<Move, AgentError> {
        Ok(*board
            .legal_moves()
            .choose(&mut self.rng)
            .expect("There is always a legal move on a board that is not full"))
    }

    fn observe_reward(&mut self, _value: f32, _board: &Board) {}
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn random_agent_selects_legal_moves() {
        let mut agent = RandomAgent::seeded(7);
        let mut board = Board::default();
        board.place(Move::new(5, 6), Token::X).unwrap();
        let legal = board.legal_moves();

        let mut seen = HashSet::new();
        for _ in 0..500 {
            let mv = agent.select_move(&board).unwrap();
            assert!(legal.contains(&mv), "{mv} is legal");
            seen.insert(mv);
        }
        assert_eq!(seen.len(), legal.len(), "every legal move gets picked");
    }
}
