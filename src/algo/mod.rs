/// Tabular methods, which keep one value estimate per state-action pair
pub mod tabular;

pub use tabular::{QLearner, QLearnerConfig};
