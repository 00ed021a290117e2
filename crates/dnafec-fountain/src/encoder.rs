use dnafec_core::{FecError, FecResult};
use log::debug;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::config::LtConfig;
use crate::distribution::DegreeDistribution;
use crate::droplet::Droplet;

/// The LT encoder.
/// Pours droplets over a fixed set of equal-width source blocks.
#[derive(Debug, Clone, Default)]
pub struct LtEncoder {
    config: LtConfig,
}

impl LtEncoder {
    pub fn new(config: LtConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LtConfig {
        &self.config
    }

    /// Produces `drops` droplets, indexed 0..drops.
    ///
    /// Droplet 0 always has degree 1 so the decoder has a block to start
    /// peeling from.
    pub fn encode(&self, blocks: &[Vec<u8>], drops: usize) -> FecResult<Vec<Droplet>> {
        self.config.validate()?;
        let width = check_blocks(blocks)?;
        let n = blocks.len();
        if drops < n {
            return Err(FecError::InsufficientDrops { drops, blocks: n });
        }

        let distribution = DegreeDistribution::robust(n, self.config.delta)?;
        let mut rng = ChaCha20Rng::seed_from_u64(self.config.seed);

        let droplets: Vec<Droplet> = (0..drops)
            .map(|index| {
                let degree = if index == 0 { 1 } else { distribution.sample(&mut rng) };
                Droplet::from_blocks(index, degree, blocks)
            })
            .collect();

        debug!(
            "lt encode: {} blocks of width {} -> {} droplets (seed {})",
            n, width, drops, self.config.seed
        );
        Ok(droplets)
    }
}

/// Returns the shared block width.
fn check_blocks(blocks: &[Vec<u8>]) -> FecResult<usize> {
    let expected = blocks.first().ok_or(FecError::EmptySource)?.len();
    for (index, block) in blocks.iter().enumerate() {
        if block.len() != expected {
            return Err(FecError::BlockWidth { index, width: block.len(), expected });
        }
    }
    Ok(expected)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocks(n: usize, width: usize) -> Vec<Vec<u8>> {
        (0..n).map(|b| (0..width).map(|i| (b * 31 + i) as u8).collect()).collect()
    }

    #[test]
    fn first_droplet_has_degree_one() {
        for n in [1, 2, 5, 17, 64] {
            for seed in 0..8 {
                let encoder = LtEncoder::new(LtConfig::with_seed(seed));
                let droplets = encoder.encode(&blocks(n, 2), 2 * n).unwrap();
                assert_eq!(droplets[0].degree, 1);
                assert_eq!(droplets[0].neighbors.len(), 1);
            }
        }
    }

    #[test]
    fn droplets_are_indexed_in_order() {
        let droplets = LtEncoder::default().encode(&blocks(6, 3), 15).unwrap();
        assert_eq!(droplets.len(), 15);
        for (i, d) in droplets.iter().enumerate() {
            assert_eq!(d.index, i);
            assert_eq!(d.payload.len(), 3);
            assert!((1..=6).contains(&d.degree));
        }
    }

    #[test]
    fn same_seed_same_droplets() {
        let source = blocks(20, 4);
        let a = LtEncoder::new(LtConfig::with_seed(9)).encode(&source, 40).unwrap();
        let b = LtEncoder::new(LtConfig::with_seed(9)).encode(&source, 40).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_bad_input() {
        let encoder = LtEncoder::default();
        assert_eq!(encoder.encode(&[], 4), Err(FecError::EmptySource));
        assert_eq!(
            encoder.encode(&blocks(5, 1), 4),
            Err(FecError::InsufficientDrops { drops: 4, blocks: 5 })
        );

        let ragged = vec![vec![1, 2], vec![3, 4], vec![5]];
        assert_eq!(
            encoder.encode(&ragged, 6),
            Err(FecError::BlockWidth { index: 2, width: 1, expected: 2 })
        );

        let bad = LtEncoder::new(LtConfig { delta: 2.0, ..LtConfig::default() });
        assert!(matches!(bad.encode(&blocks(3, 1), 3), Err(FecError::InvalidConfig { .. })));
    }
}
