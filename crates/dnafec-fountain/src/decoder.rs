use std::collections::BTreeMap;

use dnafec_core::{FecError, FecResult};
use dnafec_math::xor_into;
use log::{debug, trace, warn};
use zeroize::Zeroize;

use crate::config::LtConfig;
use crate::droplet::Droplet;

/// Decoder output. `blocks` holds every recovered block keyed by index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LtDecoded {
    pub blocks: BTreeMap<usize, Vec<u8>>,
    pub complete: bool,
}

impl LtDecoded {
    pub fn recovered(&self) -> usize {
        self.blocks.len()
    }

    /// Block indices in `0..n` that were not recovered.
    pub fn missing(&self, n: usize) -> Vec<usize> {
        (0..n).filter(|b| !self.blocks.contains_key(b)).collect()
    }

    /// Recovered payloads in block-index order.
    pub fn into_blocks(self) -> Vec<Vec<u8>> {
        self.blocks.into_values().collect()
    }
}

/// A droplet still waiting on unsolved neighbours.
#[derive(Zeroize)]
struct Pending {
    neighbors: Vec<usize>,
    payload: Vec<u8>,
}

/// One GF(2) equation over the unsolved blocks, bit-packed by column.
#[derive(Zeroize)]
struct Row {
    bits: Vec<u64>,
    payload: Vec<u8>,
}

/// The LT decoder: belief-propagation peeling, optionally followed by GF(2)
/// elimination on whatever peeling could not resolve
/// (see [`LtConfig::elimination`]).
#[derive(Debug, Clone, Default)]
pub struct LtDecoder {
    config: LtConfig,
}

impl LtDecoder {
    pub fn new(config: LtConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LtConfig {
        &self.config
    }

    /// Recovers up to `n` source blocks from `droplets`, in any order.
    ///
    /// Running out of droplets is not an error: the partial result comes
    /// back with `complete == false`.
    pub fn decode(&self, droplets: &[Droplet], n: usize) -> FecResult<LtDecoded> {
        if n == 0 {
            return Ok(LtDecoded { blocks: BTreeMap::new(), complete: true });
        }
        validate(droplets, n)?;

        let mut order: Vec<&Droplet> = droplets.iter().collect();
        order.sort_by_key(|d| d.degree);

        let mut solved: BTreeMap<usize, Vec<u8>> = BTreeMap::new();
        let mut arena: Vec<Pending> = Vec::with_capacity(order.len());
        for droplet in order {
            if droplet.degree == 1 {
                solved
                    .entry(droplet.neighbors[0])
                    .or_insert_with(|| droplet.payload.clone());
            } else {
                arena.push(Pending {
                    neighbors: droplet.neighbors.clone(),
                    payload: droplet.payload.clone(),
                });
            }
        }
        trace!("lt seed: {} blocks from degree-1 droplets", solved.len());

        self.peel(&mut arena, &mut solved, n);

        if solved.len() < n && self.config.elimination && !arena.is_empty() {
            let before = solved.len();
            eliminate(&arena, &mut solved, n);
            debug!("lt elimination solved {} more blocks", solved.len() - before);
        }
        arena.zeroize();

        let complete = solved.len() == n;
        if complete {
            debug!("lt decode complete: {} blocks from {} droplets", n, droplets.len());
        } else {
            warn!(
                "lt decode stalled: {}/{} blocks from {} droplets",
                solved.len(),
                n,
                droplets.len()
            );
        }
        Ok(LtDecoded { blocks: solved, complete })
    }

    fn peel(&self, arena: &mut Vec<Pending>, solved: &mut BTreeMap<usize, Vec<u8>>, n: usize) {
        let mut idle = 0;
        let mut passes = 0;
        while solved.len() < n && idle <= self.config.stagnation_limit && !arena.is_empty() {
            passes += 1;
            let before = solved.len();
            let mut changed = false;

            let mut i = 0;
            while i < arena.len() {
                let eq = &mut arena[i];
                let degree = eq.neighbors.len();
                eq.neighbors.retain(|block| match solved.get(block) {
                    Some(known) => {
                        xor_into(&mut eq.payload, known);
                        false
                    }
                    None => true,
                });
                let remaining = eq.neighbors.len();
                changed |= remaining != degree;

                match remaining {
                    0 => {
                        // Every neighbour already known: nothing new.
                        arena.swap_remove(i).zeroize();
                    }
                    1 => {
                        let mut eq = arena.swap_remove(i);
                        let block = eq.neighbors[0];
                        solved
                            .entry(block)
                            .or_insert_with(|| core::mem::take(&mut eq.payload));
                        eq.zeroize();
                        changed = true;
                    }
                    _ => i += 1,
                }
            }

            if solved.len() > before {
                idle = 0;
            } else {
                idle += 1;
                // Fixed point: another pass would see the same solved set.
                if !changed {
                    break;
                }
            }
        }
        trace!(
            "lt peel: {} passes, {}/{} solved, {} pending",
            passes,
            solved.len(),
            n,
            arena.len()
        );
    }
}

fn validate(droplets: &[Droplet], n: usize) -> FecResult<()> {
    let width = droplets.first().map_or(0, |d| d.payload.len());
    for d in droplets {
        let invalid = |reason| FecError::InvalidDroplet { index: d.index, reason };
        if d.degree == 0 {
            return Err(invalid("degree must be at least 1"));
        }
        if d.neighbors.len() != d.degree {
            return Err(invalid("neighbor count does not match degree"));
        }
        if d.neighbors.iter().any(|&b| b >= n) {
            return Err(invalid("neighbor out of range"));
        }
        let mut sorted = d.neighbors.clone();
        sorted.sort_unstable();
        if sorted.windows(2).any(|w| w[0] == w[1]) {
            return Err(invalid("duplicate neighbor"));
        }
        if d.payload.len() != width {
            return Err(invalid("payload width mismatch"));
        }
    }
    Ok(())
}

/// Gauss-Jordan elimination over GF(2) on the pending equations.
/// Every reduced row left with a single unknown solves that block.
fn eliminate(arena: &[Pending], solved: &mut BTreeMap<usize, Vec<u8>>, n: usize) {
    let mut column = vec![None; n];
    let mut unknowns = Vec::new();
    for eq in arena {
        for &block in &eq.neighbors {
            if !solved.contains_key(&block) && column[block].is_none() {
                column[block] = Some(unknowns.len());
                unknowns.push(block);
            }
        }
    }
    let cols = unknowns.len();
    let words = (cols + 63) / 64;

    let mut rows: Vec<Row> = arena
        .iter()
        .map(|eq| {
            let mut row = Row { bits: vec![0u64; words], payload: eq.payload.clone() };
            for &block in &eq.neighbors {
                match (solved.get(&block), column[block]) {
                    (Some(known), _) => xor_into(&mut row.payload, known),
                    (None, Some(c)) => row.bits[c / 64] ^= 1 << (c % 64),
                    (None, None) => {}
                }
            }
            row
        })
        .collect();

    let mut rank = 0;
    for col in 0..cols {
        if rank == rows.len() {
            break;
        }
        let (word, mask) = (col / 64, 1u64 << (col % 64));
        let Some(pivot) = (rank..rows.len()).find(|&r| rows[r].bits[word] & mask != 0) else {
            continue;
        };
        rows.swap(rank, pivot);

        let (above, rest) = rows.split_at_mut(rank);
        let Some((pivot_row, below)) = rest.split_first_mut() else {
            break;
        };
        for row in above.iter_mut().chain(below.iter_mut()) {
            if row.bits[word] & mask != 0 {
                for (dst, src) in row.bits.iter_mut().zip(&pivot_row.bits) {
                    *dst ^= src;
                }
                xor_into(&mut row.payload, &pivot_row.payload);
            }
        }
        rank += 1;
    }

    for row in rows[..rank].iter_mut() {
        if row.bits.iter().map(|w| w.count_ones()).sum::<u32>() != 1 {
            continue;
        }
        let Some(word) = row.bits.iter().position(|&w| w != 0) else {
            continue;
        };
        let col = word * 64 + row.bits[word].trailing_zeros() as usize;
        solved
            .entry(unknowns[col])
            .or_insert_with(|| core::mem::take(&mut row.payload));
    }
    rows.zeroize();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn droplet(index: usize, neighbors: &[usize], blocks: &[Vec<u8>]) -> Droplet {
        let mut payload = vec![0u8; blocks[0].len()];
        for &b in neighbors {
            xor_into(&mut payload, &blocks[b]);
        }
        Droplet { index, degree: neighbors.len(), neighbors: neighbors.to_vec(), payload }
    }

    fn source() -> Vec<Vec<u8>> {
        vec![vec![0x11, 0xA0], vec![0x22, 0xB1], vec![0x33, 0xC2], vec![0x44, 0xD3]]
    }

    #[test]
    fn peels_a_chain() {
        let blocks = source();
        let droplets = vec![
            droplet(3, &[2, 3], &blocks),
            droplet(0, &[0], &blocks),
            droplet(2, &[1, 2], &blocks),
            droplet(1, &[0, 1], &blocks),
        ];
        let out = LtDecoder::default().decode(&droplets, 4).unwrap();
        assert!(out.complete);
        assert_eq!(out.into_blocks(), blocks);
    }

    #[test]
    fn elimination_finishes_what_peeling_cannot() {
        let blocks = source()[..3].to_vec();
        let droplets = vec![
            droplet(0, &[0, 1], &blocks),
            droplet(1, &[1, 2], &blocks),
            droplet(2, &[0, 1, 2], &blocks),
        ];

        let stalled = LtDecoder::default().decode(&droplets, 3).unwrap();
        assert!(!stalled.complete);
        assert_eq!(stalled.recovered(), 0);
        assert_eq!(stalled.missing(3), vec![0, 1, 2]);

        let out = LtDecoder::new(LtConfig::eliminating()).decode(&droplets, 3).unwrap();
        assert!(out.complete);
        assert_eq!(out.into_blocks(), blocks);
    }

    #[test]
    fn stagnation_limit_only_bounds_the_loop() {
        let blocks = source();
        let stalls = vec![
            droplet(0, &[0], &blocks),
            droplet(1, &[1, 2], &blocks),
            droplet(2, &[2, 3], &blocks),
            droplet(3, &[1, 3], &blocks),
        ];
        let completes = vec![
            droplet(0, &[3], &blocks),
            droplet(1, &[2, 3], &blocks),
            droplet(2, &[1, 2], &blocks),
            droplet(3, &[0, 1, 3], &blocks),
        ];

        let baseline = LtDecoder::default();
        for limit in [0, 1, 5, 100] {
            let decoder = LtDecoder::new(LtConfig { stagnation_limit: limit, ..LtConfig::default() });

            let stalled = decoder.decode(&stalls, 4).unwrap();
            assert!(!stalled.complete, "limit {}", limit);
            assert_eq!(stalled.missing(4), vec![1, 2, 3]);
            assert_eq!(stalled, baseline.decode(&stalls, 4).unwrap());

            let done = decoder.decode(&completes, 4).unwrap();
            assert!(done.complete, "limit {}", limit);
            assert_eq!(done.into_blocks(), blocks);
        }
    }

    #[test]
    fn partial_recovery_reports_missing_blocks() {
        let blocks = source();
        let droplets = vec![droplet(0, &[1], &blocks), droplet(1, &[2, 3], &blocks)];
        let out = LtDecoder::new(LtConfig::eliminating()).decode(&droplets, 4).unwrap();
        assert!(!out.complete);
        assert_eq!(out.blocks.get(&1), Some(&blocks[1]));
        assert_eq!(out.missing(4), vec![0, 2, 3]);
    }

    #[test]
    fn equal_blocks_are_kept_apart() {
        let blocks = vec![vec![7u8], vec![7u8], vec![9u8]];
        let droplets = vec![
            droplet(0, &[0], &blocks),
            droplet(1, &[1], &blocks),
            droplet(2, &[2], &blocks),
        ];
        let out = LtDecoder::default().decode(&droplets, 3).unwrap();
        assert!(out.complete);
        assert_eq!(out.into_blocks(), blocks);
    }

    #[test]
    fn zero_targets_is_trivially_complete() {
        let out = LtDecoder::default().decode(&[], 0).unwrap();
        assert!(out.complete);
        assert!(out.blocks.is_empty());
    }

    #[test]
    fn malformed_droplets_are_rejected() {
        let blocks = source();
        let mut cases = Vec::new();

        let mut d = droplet(5, &[0, 1], &blocks);
        d.degree = 3;
        cases.push(d);

        let mut d = droplet(6, &[0], &blocks);
        d.neighbors = vec![9];
        cases.push(d);

        let mut d = droplet(7, &[0, 1], &blocks);
        d.neighbors = vec![2, 2];
        cases.push(d);

        let mut d = droplet(8, &[0], &blocks);
        d.degree = 0;
        d.neighbors.clear();
        cases.push(d);

        for bad in cases {
            let index = bad.index;
            let err = LtDecoder::default().decode(&[bad], 4).unwrap_err();
            assert!(
                matches!(err, FecError::InvalidDroplet { index: i, .. } if i == index),
                "{:?}",
                err
            );
        }

        let mixed = vec![droplet(0, &[0], &blocks), Droplet {
            index: 1,
            degree: 1,
            neighbors: vec![1],
            payload: vec![1, 2, 3],
        }];
        assert!(LtDecoder::default().decode(&mixed, 4).is_err());
    }
}
