use rand::Rng;

use crate::decay::Decay;

use super::Choice;

/// Epsilon greedy exploration policy with time-decaying epsilon threshold
pub struct EpsilonGreedy<D: Decay> {
    epsilon: D,
}

impl<D: Decay> EpsilonGreedy<D> {
    /// Initialize epsilon greedy policy with a decay strategy
    pub fn new(decay: D) -> Self {
        Self { epsilon: decay }
    }

    /// The exploration rate at time `t`
    pub fn epsilon(&self, t: u32) -> f32 {
        self.epsilon.evaluate(t as f32)
    }

    /// Invoke epsilon greedy policy at time `t`
    ///
    /// Explores with probability epsilon, so an epsilon of zero never explores.
    pub fn choose<R: Rng + ?Sized>(&self, t: u32, rng: &mut R) -> Choice {
        if rng.gen::<f32>() < self.epsilon(t) {
            Choice::Explore
        } else {
            Choice::Exploit
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use crate::decay::{Constant, Linear};

    use super::*;

    #[test]
    fn epsilon_bounds() {
        let mut rng = StdRng::seed_from_u64(3);
        let never = EpsilonGreedy::new(Constant::new(0.0));
        let always = EpsilonGreedy::new(Constant::new(1.0));
        for t in 0..1000 {
            assert_eq!(never.choose(t, &mut rng), Choice::Exploit);
            assert_eq!(always.choose(t, &mut rng), Choice::Explore);
        }
    }

    #[test]
    fn epsilon_follows_decay() {
        let policy = EpsilonGreedy::new(Linear::new(0.1, 1.0, 0.0).unwrap());
        assert_eq!(policy.epsilon(0), 1.0);
        assert_eq!(policy.epsilon(20), 0.0);

        let mut rng = StdRng::seed_from_u64(4);
        assert_eq!(policy.choose(20, &mut rng), Choice::Exploit, "fully decayed");
    }
}
