use rand::{
    distributions::{Distribution, WeightedIndex},
    Rng,
};

use crate::decay::Decay;

use super::greedy;

/// Softmax exploration policy (also known as Boltzmann exploration) with time-decaying temperature
pub struct Softmax<D: Decay> {
    temperature: D,
}

impl<D: Decay> Softmax<D> {
    pub fn new(decay: D) -> Self {
        Self { temperature: decay }
    }

    pub fn temperature(&self, t: u32) -> f32 {
        self.temperature.evaluate(t as f32)
    }

    /// Sample an index of `values` with probability proportional to e<sup>v/τ</sup>
    ///
    /// A temperature of zero or below is the greedy limit of the distribution.
    ///
    /// **Panics** if `values` is empty
    pub fn choose<R: Rng + ?Sized>(&self, t: u32, values: &[f32], rng: &mut R) -> usize {
        let tau = self.temperature(t);
        if tau <= 0.0 {
            return greedy(values, rng);
        }
        let dist = WeightedIndex::new(weights(values, tau)).expect("`values` is not empty");
        dist.sample(rng)
    }
}

/// Unnormalized softmax weights, shifted by the max so the largest weight is exactly 1
fn weights(values: &[f32], tau: f32) -> Vec<f32> {
    let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    values.iter().map(|v| ((v - max) / tau).exp()).collect()
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use crate::decay::Constant;

    use super::*;

    #[test]
    fn weights_are_shifted() {
        let w = weights(&[1.0, 0.0, -99.0], 0.5);
        assert_eq!(w[0], 1.0);
        assert_eq!(w[1], (-2.0f32).exp());
        assert_eq!(w[2], 0.0, "penalized moves underflow to zero");
    }

    #[test]
    fn softmax_prefers_higher_values() {
        let mut rng = StdRng::seed_from_u64(11);
        let policy = Softmax::new(Constant::new(0.2));
        let mut counts = [0; 3];
        for _ in 0..2000 {
            counts[policy.choose(0, &[1.0, 0.8, 0.0], &mut rng)] += 1;
        }
        assert!(counts[0] > counts[1], "higher value sampled more: {counts:?}");
        assert!(counts[1] > counts[2], "ordering preserved: {counts:?}");
        assert!(counts[1] > 0, "lower values still explored");
    }

    #[test]
    fn zero_temperature_is_greedy() {
        let mut rng = StdRng::seed_from_u64(12);
        let policy = Softmax::new(Constant::new(0.0));
        for _ in 0..100 {
            assert_eq!(policy.choose(0, &[0.1, 0.9, 0.3], &mut rng), 1);
        }
    }
}
