use dnafec_math::xor_into;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use zeroize::Zeroize;

/// One encoded LT symbol: the XOR of `degree` distinct source blocks.
#[derive(Debug, Clone, PartialEq, Eq, Zeroize)]
pub struct Droplet {
    pub index: usize,
    pub degree: usize,
    pub neighbors: Vec<usize>,
    pub payload: Vec<u8>,
}

impl Droplet {
    /// Builds droplet `index` of the given degree over `blocks`.
    /// Blocks must share one width.
    pub fn from_blocks(index: usize, degree: usize, blocks: &[Vec<u8>]) -> Self {
        let neighbors = select_neighbors(index, degree, blocks.len());
        let width = blocks.first().map_or(0, Vec::len);
        let mut payload = vec![0u8; width];
        for &block in &neighbors {
            xor_into(&mut payload, &blocks[block]);
        }
        Self { index, degree: neighbors.len(), neighbors, payload }
    }

    /// Rebuilds a droplet whose neighbour set was not stored alongside it.
    pub fn from_parts(index: usize, degree: usize, payload: Vec<u8>, n: usize) -> Self {
        let neighbors = select_neighbors(index, degree, n);
        Self { index, degree: neighbors.len(), neighbors, payload }
    }
}

/// Draws `degree` distinct block indices from `0..n`, seeded by the droplet
/// index alone, so any party knowing (index, degree, n) gets the same set.
pub fn select_neighbors(index: usize, degree: usize, n: usize) -> Vec<usize> {
    let mut rng = ChaCha20Rng::seed_from_u64(index as u64);
    rand::seq::index::sample(&mut rng, n, degree.min(n)).into_vec()
}
