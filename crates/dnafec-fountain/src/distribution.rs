//! Degree distributions for LT droplets.
//!
//! Weights are indexed by degree, so entry 0 is always zero.

use dnafec_core::{FecError, FecResult};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

/// Ideal soliton over degrees 0..=n: P(1) = 1/n, P(k) = 1/(k(k-1)).
pub fn ideal_soliton(n: usize) -> Vec<f64> {
    let mut weights = vec![0.0; n + 1];
    if n == 0 {
        return weights;
    }
    weights[1] = 1.0 / n as f64;
    for k in 2..=n {
        weights[k] = 1.0 / (k as f64 * (k as f64 - 1.0));
    }
    weights
}

/// Robust soliton: the ideal soliton plus a correction with its spike at
/// `m = n/2 + 1`, renormalised to sum to 1.
pub fn robust_soliton(n: usize, delta: f64) -> Vec<f64> {
    let mut weights = ideal_soliton(n);
    if n == 0 {
        return weights;
    }

    let m = n / 2 + 1;
    let r = n as f64 / m as f64;
    for i in 1..m {
        weights[i] += 1.0 / (i as f64 * m as f64);
    }
    weights[m] += (r / delta).ln() / m as f64;

    let total: f64 = weights.iter().sum();
    for w in weights.iter_mut() {
        *w /= total;
    }
    weights
}

/// Samples droplet degrees from a robust soliton distribution.
#[derive(Debug, Clone)]
pub struct DegreeDistribution {
    probabilities: Vec<f64>,
    index: WeightedIndex<f64>,
}

impl DegreeDistribution {
    pub fn robust(n: usize, delta: f64) -> FecResult<Self> {
        let probabilities = robust_soliton(n, delta);
        let index = WeightedIndex::new(&probabilities)
            .map_err(|_| FecError::InvalidConfig { reason: "degree distribution has no mass" })?;
        Ok(Self { probabilities, index })
    }

    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    pub fn max_degree(&self) -> usize {
        self.probabilities.len() - 1
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        self.index.sample(rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn ideal_soliton_sums_to_one() {
        for n in [1, 2, 5, 10, 100, 1000] {
            let total: f64 = ideal_soliton(n).iter().sum();
            assert!((total - 1.0).abs() < 1e-9, "n={} total={}", n, total);
        }
    }

    #[test]
    fn robust_soliton_is_normalised() {
        for n in [1, 2, 3, 5, 10, 64, 500] {
            let weights = robust_soliton(n, 0.001);
            assert_eq!(weights.len(), n + 1);
            assert_eq!(weights[0], 0.0);
            assert!(weights.iter().all(|&w| w >= 0.0));
            let total: f64 = weights.iter().sum();
            assert!((total - 1.0).abs() < 1e-4, "n={} total={}", n, total);
        }
    }

    #[test]
    fn spike_sits_at_half_n_plus_one() {
        let weights = robust_soliton(5, 0.001);
        let peak = (1..weights.len())
            .max_by(|&a, &b| weights[a].total_cmp(&weights[b]))
            .unwrap();
        assert_eq!(peak, 3);
        // Past the spike only the ideal part remains.
        assert!(weights[4] < weights[2]);
    }

    #[test]
    fn samples_stay_within_one_to_n() {
        let dist = DegreeDistribution::robust(10, 0.001).unwrap();
        assert_eq!(dist.max_degree(), 10);
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        for _ in 0..10_000 {
            let d = dist.sample(&mut rng);
            assert!((1..=10).contains(&d), "degree {}", d);
        }
    }
}
