#![no_std]
#[cfg(feature = "std")]
extern crate std;

use thiserror::Error;

/// Number of elements in GF(2^8).
pub const FIELD_SIZE: usize = 256;

/// Order of the multiplicative group (alpha^255 = 1).
pub const FIELD_ORDER: usize = 255;

/// Longest Reed-Solomon codeword over GF(2^8).
pub const MAX_CODEWORD_LEN: usize = FIELD_ORDER;

/// Target failure probability of the robust soliton distribution.
pub const DEFAULT_SOLITON_DELTA: f64 = 0.001;

/// Non-productive peeling passes tolerated before the decoder gives up.
pub const DEFAULT_STAGNATION_LIMIT: usize = 100;

pub type FecResult<T> = Result<T, FecError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FecError {
    /// Code parameters outside 1 <= n <= 255, 0 <= k < n.
    #[error("invalid code parameters: n={n}, k={k}")]
    InvalidParameters { n: usize, k: usize },

    #[error("message too long: {len} symbols, code carries at most {k}")]
    MessageTooLong { len: usize, k: usize },

    #[error("codeword length {len} does not match n={n}")]
    CodewordLength { len: usize, n: usize },

    /// Multiplicative inverse (or division) of zero in GF(256).
    #[error("inverse of zero in GF(256)")]
    ZeroInverse,

    #[error("polynomial division by zero")]
    ZeroDivisor,

    /// The decoder detected more errors than the code can repair.
    #[error("uncorrectable codeword: locator degree {degree}, {located} roots located, capacity {capacity}")]
    Uncorrectable {
        degree: usize,
        located: usize,
        capacity: usize,
    },

    #[error("insufficient drops: {drops} requested for {blocks} source blocks")]
    InsufficientDrops { drops: usize, blocks: usize },

    #[error("no source blocks to encode")]
    EmptySource,

    #[error("block {index} has width {width}, expected {expected}")]
    BlockWidth {
        index: usize,
        width: usize,
        expected: usize,
    },

    #[error("invalid droplet {index}: {reason}")]
    InvalidDroplet { index: usize, reason: &'static str },

    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: &'static str },
}
