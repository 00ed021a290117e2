use dnafec_core::{FecError, FecResult, DEFAULT_SOLITON_DELTA, DEFAULT_STAGNATION_LIMIT};

/// LT code settings shared by the encoder and the decoder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LtConfig {
    /// Target failure probability of the robust soliton distribution.
    pub delta: f64,
    /// Upper bound on consecutive peeling passes without a newly solved
    /// block. Peeling reaches its fixed point one idle pass after the last
    /// solve, so any value gives the same result; this only caps the loop.
    pub stagnation_limit: usize,
    /// Solve what peeling leaves behind with GF(2) elimination. Off by
    /// default: plain peeling stops in the stalled state instead.
    pub elimination: bool,
    /// Seed for degree sampling. Neighbour selection depends only on the
    /// droplet index.
    pub seed: u64,
}

impl Default for LtConfig {
    fn default() -> Self {
        Self {
            delta: DEFAULT_SOLITON_DELTA,
            stagnation_limit: DEFAULT_STAGNATION_LIMIT,
            elimination: false,
            seed: 0,
        }
    }
}

impl LtConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self { seed, ..Self::default() }
    }

    /// Default settings with the elimination fallback switched on.
    pub fn eliminating() -> Self {
        Self { elimination: true, ..Self::default() }
    }

    pub fn validate(&self) -> FecResult<()> {
        if !(self.delta > 0.0 && self.delta < 1.0) {
            return Err(FecError::InvalidConfig { reason: "soliton delta must lie in (0, 1)" });
        }
        Ok(())
    }
}
