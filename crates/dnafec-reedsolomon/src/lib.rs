//! Reed-Solomon outer code over GF(2^8).
//!
//! The codec repairs up to `t = (n - k) / 2` corrupted symbols per codeword:
//! syndromes, Berlekamp-Massey for the locator and evaluator, exhaustive
//! root search, then Forney's formula for the magnitudes.

#![no_std]
#![forbid(unsafe_code)]

extern crate alloc;

use alloc::vec::Vec;
use dnafec_core::FecResult;

pub mod berlekamp;
mod codec;
mod params;

pub use berlekamp::{berlekamp_massey, KeyEquation};
pub use codec::{Decoded, ReedSolomon};
pub use params::RsParams;

/// One-shot encode of a message of at most k symbols into n symbols.
pub fn encode(message: &[u8], n: usize, k: usize) -> FecResult<Vec<u8>> {
    ReedSolomon::new(n, k)?.encode(message)
}

/// One-shot decode of n received symbols into the k message symbols.
pub fn decode(received: &[u8], n: usize, k: usize) -> FecResult<Vec<u8>> {
    Ok(ReedSolomon::new(n, k)?.decode(received)?.message)
}

pub fn verify(codeword: &[u8], n: usize, k: usize) -> FecResult<bool> {
    Ok(ReedSolomon::new(n, k)?.verify(codeword))
}
