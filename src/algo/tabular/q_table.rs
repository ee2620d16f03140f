use std::collections::{hash_map::Entry, HashMap};

use rand::Rng;
use rand_distr::{Distribution, Uniform};

use crate::game::{Move, StateKey};

/// How a never-seen `(state, move)` pair gets its first value estimate
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueInit {
    /// The same value for every new pair; values above any reachable return encourage exploration
    Constant(f32),
    /// A value drawn uniformly from `[low, high)`
    Uniform { low: f32, high: f32 },
}

impl Default for ValueInit {
    /// Optimistic initialization at 1.0
    fn default() -> Self {
        Self::Constant(1.0)
    }
}

impl ValueInit {
    /// Uniform on `[0, 1)`
    pub fn uniform() -> Self {
        Self::Uniform {
            low: 0.0,
            high: 1.0,
        }
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        match *self {
            Self::Constant(value) => value,
            Self::Uniform { low, high } => Uniform::new(low, high).sample(rng),
        }
    }
}

/// A lazily-filled table of action values keyed by board snapshot and move
///
/// Reading an unseen entry commits its initial value, so repeated reads agree and the table
/// only ever grows.
#[derive(Debug, Clone, Default)]
pub struct QTable {
    values: HashMap<(StateKey, Move), f32>,
    init: ValueInit,
}

impl QTable {
    pub fn new(init: ValueInit) -> Self {
        Self {
            values: HashMap::new(),
            init,
        }
    }

    /// The value of `mv` in `state`, initializing it on first access
    pub fn value<R: Rng + ?Sized>(&mut self, state: &StateKey, mv: Move, rng: &mut R) -> f32 {
        match self.values.entry((state.clone(), mv)) {
            Entry::Occupied(e) => *e.get(),
            Entry::Vacant(e) => *e.insert(self.init.sample(rng)),
        }
    }

    /// Values of each of `moves` in `state`, in order, initializing as needed
    pub fn values<R: Rng + ?Sized>(
        &mut self,
        state: &StateKey,
        moves: &[Move],
        rng: &mut R,
    ) -> Vec<f32> {
        moves.iter().map(|&mv| self.value(state, mv, rng)).collect()
    }

    /// The value of `mv` in `state` without initializing it
    pub fn get(&self, state: &StateKey, mv: Move) -> Option<f32> {
        self.values.get(&(state.clone(), mv)).copied()
    }

    pub(crate) fn set(&mut self, state: StateKey, mv: Move, value: f32) {
        self.values.insert((state, mv), value);
    }

    pub fn init(&self) -> ValueInit {
        self.init
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
