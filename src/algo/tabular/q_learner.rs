use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::{
    agent::Agent,
    assert_interval,
    decay::{self, Decay},
    error::AgentError,
    exploration::{greedy, Choice, EpsilonGreedy, Softmax},
    game::{Board, Move, Shape, StateKey, Token},
};

use super::q_table::{QTable, ValueInit};

/// How a [`QLearner`] turns value estimates into a move
pub enum Policy<D: Decay> {
    /// Uniformly random with probability epsilon, otherwise the best estimate
    EpsilonGreedy(EpsilonGreedy<D>),
    /// Sample from a softmax over the estimates
    Softmax(Softmax<D>),
}

/// Configuration for the [`QLearner`]
pub struct QLearnerConfig<D: Decay> {
    pub policy: Policy<D>,
    pub init: ValueInit,
    pub alpha: f32,
    pub gamma: f32,
    pub shape: Shape,
}

impl Default for QLearnerConfig<decay::Constant> {
    fn default() -> Self {
        Self {
            policy: Policy::EpsilonGreedy(EpsilonGreedy::new(decay::Constant::new(0.2))),
            init: ValueInit::default(),
            alpha: 0.3,
            gamma: 0.9,
            shape: Shape::default(),
        }
    }
}

/// One temporal-difference step: Q ← Q + α(r + γ·max Q' − Q)
pub fn td_update(prev: f32, reward: f32, best_next: f32, alpha: f32, gamma: f32) -> f32 {
    prev + alpha * (reward + gamma * best_next - prev)
}

/// A Q-learning player backed by a [`QTable`]
///
/// The table lives as long as the agent and accumulates across games, while the last observed
/// state and move are reset by every [`begin_game`](Agent::begin_game). Each reward updates the
/// estimate of the move that earned it.
///
/// ### Generics
/// - `D` - The [`Decay`] schedule of the exploration rate (or softmax temperature), evaluated
///   at the number of games played
pub struct QLearner<D: Decay = decay::Constant> {
    table: QTable,
    policy: Policy<D>,
    alpha: f32, // learning rate
    gamma: f32, // discount factor
    shape: Shape,
    exploring: bool,
    games: u32,
    started: bool,
    last_state: StateKey,
    last_move: Option<Move>,
    rng: StdRng,
}

impl<D: Decay> QLearner<D> {
    /// Initialize a new `QLearner` with an empty table
    ///
    /// **Panics** if `alpha` or `gamma` is not in the interval `[0,1]`
    pub fn new(config: QLearnerConfig<D>) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// A reproducible learner
    pub fn seeded(config: QLearnerConfig<D>, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: QLearnerConfig<D>, rng: StdRng) -> Self {
        assert_interval!(config.alpha, 0.0, 1.0);
        assert_interval!(config.gamma, 0.0, 1.0);
        Self {
            table: QTable::new(config.init),
            policy: config.policy,
            alpha: config.alpha,
            gamma: config.gamma,
            shape: config.shape,
            exploring: true,
            games: 0,
            started: false,
            last_state: StateKey::empty(config.shape),
            last_move: None,
            rng,
        }
    }

    pub fn q_table(&self) -> &QTable {
        &self.table
    }

    /// Number of games begun before the current one
    pub fn games(&self) -> u32 {
        self.games
    }

    /// Turn exploration on or off; with it off the learner always plays its best estimate
    pub fn set_exploring(&mut self, exploring: bool) {
        self.exploring = exploring;
    }

    pub fn is_exploring(&self) -> bool {
        self.exploring
    }

    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    fn choose(&mut self, moves: &[Move]) -> Move {
        let t = self.games;
        match &self.policy {
            Policy::EpsilonGreedy(policy) => {
                let choice = if self.exploring {
                    policy.choose(t, &mut self.rng)
                } else {
                    Choice::Exploit
                };
                match choice {
                    Choice::Explore => *moves
                        .choose(&mut self.rng)
                        .expect("There is always at least one move available"),
                    Choice::Exploit => {
                        let values = self.table.values(&self.last_state, moves, &mut self.rng);
                        moves[greedy(&values, &mut self.rng)]
                    }
                }
            }
            Policy::Softmax(policy) => {
                let values = self.table.values(&self.last_state, moves, &mut self.rng);
                let i = if self.exploring {
                    policy.choose(t, &values, &mut self.rng)
                } else {
                    greedy(&values, &mut self.rng)
                };
                moves[i]
            }
        }
    }

    fn learn(&mut self, last_move: Move, reward: f32, board: &Board) {
        let next_state = board.state_key();
        let best_next = board
            .legal_moves()
            .into_iter()
            .map(|mv| self.table.value(&next_state, mv, &mut self.rng))
            .reduce(f32::max)
            .unwrap_or(0.0);

        let prev = self.table.value(&self.last_state, last_move, &mut self.rng);
        let next = td_update(prev, reward, best_next, self.alpha, self.gamma);
        log::trace!("Q({last_move}) {prev} -> {next} (reward {reward}, best next {best_next})");
        self.table.set(self.last_state.clone(), last_move, next);
    }
}

impl<D: Decay> Agent for QLearner<D> {
    fn begin_game(&mut self, _token: Token) {
        if self.started {
            self.games += 1;
        }
        self.started = true;
        self.last_state = StateKey::empty(self.shape);
        self.last_move = None;
    }

    fn select_move(&mut self, board: &Board) -> Result<Move, AgentError> {
        self.last_state = board.state_key();
        let moves = board.legal_moves();
        let mv = self.choose(&moves);
        self.last_move = Some(mv);
        Ok(mv)
    }

    fn observe_reward(&mut self, value: f32, board: &Board) {
        match self.last_move {
            Some(mv) => self.learn(mv, value, board),
            None => log::trace!("reward {value} before any move, ignored"),
        }
    }
}
