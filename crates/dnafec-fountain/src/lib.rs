//! Luby-Transform fountain code over equal-width byte blocks.
//!
//! Neighbour sets are derived from the droplet index alone
//! (see [`select_neighbors`]), so a droplet can travel without them.

#![forbid(unsafe_code)]

pub mod config;
pub mod decoder;
pub mod distribution;
pub mod droplet;
pub mod encoder;

pub use config::LtConfig;
pub use decoder::{LtDecoded, LtDecoder};
pub use distribution::{ideal_soliton, robust_soliton, DegreeDistribution};
pub use droplet::{select_neighbors, Droplet};
pub use encoder::LtEncoder;

use dnafec_core::FecResult;

/// Encodes `blocks` into `drops` droplets with the default settings and the
/// given degree seed.
pub fn encode(blocks: &[Vec<u8>], drops: usize, seed: u64) -> FecResult<Vec<Droplet>> {
    LtEncoder::new(LtConfig::with_seed(seed)).encode(blocks, drops)
}

/// Decodes `target_count` blocks. Returns the recovered blocks in index order
/// and whether all of them were recovered.
pub fn decode(drops: &[Droplet], target_count: usize) -> FecResult<(Vec<Vec<u8>>, bool)> {
    let decoded = LtDecoder::default().decode(drops, target_count)?;
    let complete = decoded.complete;
    Ok((decoded.into_blocks(), complete))
}
