use std::fmt;

use rand::Rng;

use crate::{agent::Agent, error::AgentError};

use super::{Board, Shape, Token};

/// Reward signals handed to agents
pub struct Reward;

impl Reward {
    pub const WIN: f32 = 1.0;
    pub const LOSS: f32 = -1.0;
    pub const DRAW: f32 = 0.5;
    pub const ONGOING: f32 = 0.0;
    /// Penalty for claiming a cell the rules do not allow
    pub const ILLEGAL: f32 = -99.0;
}

/// How a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Win(Token),
    Draw,
    /// The player with this token made an illegal move
    Forfeit(Token),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win(token) => write!(f, "{token} wins"),
            Outcome::Draw => write!(f, "draw"),
            Outcome::Forfeit(token) => write!(f, "{token} forfeits"),
        }
    }
}

/// A single game between two agents
///
/// The first agent plays [`Token::X`] and the second [`Token::O`]. Who moves first is drawn
/// at random when the game is created. The referee owns the board and hands agents read-only
/// views of it.
pub struct Game<'a> {
    board: Board,
    x: &'a mut dyn Agent,
    o: &'a mut dyn Agent,
    first: Token,
    moves: usize,
}

impl<'a> Game<'a> {
    /// A standard 6x7 game with a random first mover
    pub fn new(x: &'a mut dyn Agent, o: &'a mut dyn Agent) -> Self {
        let first = if rand::thread_rng().gen() {
            Token::X
        } else {
            Token::O
        };
        Self::with_first(x, o, first)
    }

    pub fn with_first(x: &'a mut dyn Agent, o: &'a mut dyn Agent, first: Token) -> Self {
        Self {
            board: Board::default(),
            x,
            o,
            first,
            moves: 0,
        }
    }

    /// Play on a board of a different size
    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.board = Board::with_shape(shape);
        self
    }

    pub fn first(&self) -> Token {
        self.first
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Number of legal moves applied so far
    pub fn moves(&self) -> usize {
        self.moves
    }

    fn reward(&mut self, token: Token, value: f32) {
        log::trace!("{token} rewarded {value}");
        let agent = match token {
            Token::X => &mut *self.x,
            Token::O => &mut *self.o,
        };
        agent.observe_reward(value, &self.board);
    }

    /// Run the game to completion, dispensing rewards along the way
    ///
    /// An illegal move ends the game as a forfeit; only failures of an agent to produce a move
    /// at all are returned as errors.
    ///
    /// **Panics** if an agent returns a move outside the board
    pub fn play(&mut self) -> Result<Outcome, AgentError> {
        self.x.begin_game(Token::X);
        self.o.begin_game(Token::O);
        log::debug!("new game, {} moves first", self.first);

        let mut turn = self.first;
        loop {
            let mv = match turn {
                Token::X => self.x.select_move(&self.board)?,
                Token::O => self.o.select_move(&self.board)?,
            };
            log::trace!("{turn} plays {mv}");

            if let Err(err) = self.board.place(mv, turn) {
                log::warn!("{turn} forfeits: {err}");
                self.reward(turn, Reward::ILLEGAL);
                return Ok(self.finish(Outcome::Forfeit(turn)));
            }
            self.moves += 1;

            if self.board.check_win(mv.row, mv.col) {
                self.reward(turn, Reward::WIN);
                self.reward(turn.opponent(), Reward::LOSS);
                return Ok(self.finish(Outcome::Win(turn)));
            }
            if self.board.is_full() {
                self.reward(turn, Reward::DRAW);
                self.reward(turn.opponent(), Reward::DRAW);
                return Ok(self.finish(Outcome::Draw));
            }
            self.reward(turn, Reward::ONGOING);
            turn = turn.opponent();
        }
    }

    fn finish(&self, outcome: Outcome) -> Outcome {
        log::debug!("{outcome} after {} moves", self.moves);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use crate::{
        agent::RandomAgent,
        game::{Move, Shape},
    };

    use super::*;

    /// Plays a fixed list of moves and records what it is told
    #[derive(Default)]
    struct Scripted {
        moves: VecDeque<Move>,
        token: Option<Token>,
        rewards: Vec<f32>,
        boards: Vec<Board>,
    }

    impl Scripted {
        fn new(moves: &[(usize, usize)]) -> Self {
            Self {
                moves: moves.iter().map(|&(r, c)| Move::new(r, c)).collect(),
                ..Default::default()
            }
        }
    }

    impl Agent for Scripted {
        fn begin_game(&mut self, token: Token) {
            self.token = Some(token);
        }

        fn select_move(&mut self, _board: &Board) -> Result<Move, AgentError> {
            self.moves.pop_front().ok_or(AgentError::InputClosed)
        }

        fn observe_reward(&mut self, value: f32, board: &Board) {
            self.rewards.push(value);
            self.boards.push(board.clone());
        }
    }

    #[test]
    fn vertical_win_rewards_both() {
        let mut x = Scripted::new(&[(5, 0), (4, 0), (3, 0), (2, 0)]);
        let mut o = Scripted::new(&[(5, 1), (4, 1), (3, 1)]);
        let outcome = Game::with_first(&mut x, &mut o, Token::X).play().unwrap();

        assert_eq!(outcome, Outcome::Win(Token::X));
        assert_eq!((x.token, o.token), (Some(Token::X), Some(Token::O)));
        assert_eq!(x.rewards, [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(o.rewards, [0.0, 0.0, 0.0, -1.0]);
        assert_eq!(
            x.boards.last().unwrap().get(2, 0),
            Some(Token::X),
            "rewards see the board after the move"
        );
    }

    #[test]
    fn second_mover_can_win() {
        let mut x = Scripted::new(&[(5, 6), (4, 6), (3, 6)]);
        let mut o = Scripted::new(&[(5, 0), (5, 1), (5, 2), (5, 3)]);
        let mut game = Game::with_first(&mut x, &mut o, Token::O);
        assert_eq!(game.play().unwrap(), Outcome::Win(Token::O));
        assert_eq!(game.moves(), 7);
    }

    #[test]
    fn occupied_cell_forfeits() {
        let mut x = Scripted::new(&[(5, 3), (4, 3)]);
        let mut o = Scripted::new(&[(5, 3)]);
        let outcome = Game::with_first(&mut x, &mut o, Token::X).play().unwrap();

        assert_eq!(outcome, Outcome::Forfeit(Token::O));
        assert_eq!(o.rewards, [Reward::ILLEGAL], "offender gets exactly -99");
        assert_eq!(x.rewards, [0.0], "opponent gets nothing for the forfeit");
        assert_eq!(o.boards[0].get(5, 3), Some(Token::X), "board not mutated");
    }

    #[test]
    fn floating_move_forfeits() {
        let mut x = Scripted::new(&[(0, 0)]);
        let mut o = Scripted::new(&[]);
        let outcome = Game::with_first(&mut x, &mut o, Token::X).play().unwrap();
        assert_eq!(outcome, Outcome::Forfeit(Token::X));
        assert_eq!(x.rewards, [-99.0]);
        assert!(o.rewards.is_empty());
    }

    #[test]
    fn full_board_draws() {
        // 2x2 fills without a line of four
        let mut x = Scripted::new(&[(1, 0), (0, 1)]);
        let mut o = Scripted::new(&[(1, 1), (0, 0)]);
        let mut game =
            Game::with_first(&mut x, &mut o, Token::X).with_shape(Shape { rows: 2, cols: 2 });
        assert_eq!(game.play().unwrap(), Outcome::Draw);
        assert!(game.board().is_full());
        assert_eq!(x.rewards, [0.0, 0.0, 0.5]);
        assert_eq!(o.rewards, [0.0, 0.5]);
    }

    #[test]
    fn full_standard_board_draws() {
        // Rows of XXOOXXO / OOXXOOX alternate, so no line is longer than two
        let color = |row: usize, col: usize| {
            if (col / 2 + row) % 2 == 0 {
                Token::X
            } else {
                Token::O
            }
        };
        let column = |col: usize| (0..6).rev().map(move |row| (row, col));
        let order = column(2)
            .take(1)
            .chain([0, 1, 4, 5].into_iter().flat_map(column))
            .chain(column(2).skip(1))
            .chain([3, 6].into_iter().flat_map(column))
            .collect::<Vec<_>>();

        let mut x_moves = Vec::new();
        let mut o_moves = Vec::new();
        for (i, &(row, col)) in order.iter().enumerate() {
            if i % 2 == 0 {
                assert_eq!(color(row, col), Token::X);
                x_moves.push((row, col));
            } else {
                assert_eq!(color(row, col), Token::O);
                o_moves.push((row, col));
            }
        }

        let mut x = Scripted::new(&x_moves);
        let mut o = Scripted::new(&o_moves);
        let mut game = Game::with_first(&mut x, &mut o, Token::X);
        assert_eq!(game.play().unwrap(), Outcome::Draw);
        assert_eq!(game.moves(), 42);
        assert!(game.board().is_full());
        assert_eq!(x.rewards.last(), Some(&Reward::DRAW));
        assert_eq!(o.rewards.last(), Some(&Reward::DRAW));
    }

    #[test]
    fn agent_errors_propagate() {
        let mut x = Scripted::new(&[]);
        let mut o = Scripted::new(&[]);
        let result = Game::with_first(&mut x, &mut o, Token::X).play();
        assert!(matches!(result, Err(AgentError::InputClosed)));
    }

    #[test]
    fn random_games_terminate() {
        let mut x = RandomAgent::seeded(1);
        let mut o = RandomAgent::seeded(2);
        let mut firsts = [0; 2];
        for _ in 0..200 {
            let mut game = Game::new(&mut x, &mut o);
            firsts[game.first() as usize - 1] += 1;
            let outcome = game.play().unwrap();
            assert!(!matches!(outcome, Outcome::Forfeit(_)), "random agents play legally");
            assert!(game.moves() >= 7 && game.moves() <= 42);
        }
        assert!(firsts[0] > 50 && firsts[1] > 50, "first mover is random: {firsts:?}");
    }

    #[test]
    fn outcome_display() {
        assert_eq!(Outcome::Win(Token::O).to_string(), "O wins");
        assert_eq!(Outcome::Forfeit(Token::X).to_string(), "X forfeits");
        assert_eq!(Outcome::Draw.to_string(), "draw");
    }
}
