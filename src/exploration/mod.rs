use rand::{seq::SliceRandom, Rng};

mod epsilon_greedy;
mod softmax;

pub use epsilon_greedy::EpsilonGreedy;
pub use softmax::Softmax;

/// Exploration policy result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Explore,
    Exploit,
}

/// Index of the largest value, with ties broken uniformly at random
///
/// **Panics** if `values` is empty
pub fn greedy<R: Rng + ?Sized>(values: &[f32], rng: &mut R) -> usize {
    let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let best = values
        .iter()
        .enumerate()
        .filter(|&(_, &v)| v == max)
        .map(|(i, _)| i)
        .collect::<Vec<_>>();
    *best.choose(rng).expect("`values` is not empty")
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn greedy_picks_the_max() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(greedy(&[0.1, 0.7, -3.0], &mut rng), 1);
        assert_eq!(greedy(&[-99.0], &mut rng), 0);
    }

    #[test]
    fn greedy_breaks_ties_randomly() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut counts = [0; 4];
        for _ in 0..4000 {
            counts[greedy(&[1.0, 0.5, 1.0, 1.0], &mut rng)] += 1;
        }
        assert_eq!(counts[1], 0, "never picks a lower value");
        for i in [0, 2, 3] {
            assert!(
                (1000..1700).contains(&counts[i]),
                "tied index {i} chosen about a third of the time, got {}",
                counts[i]
            );
        }
    }
}
