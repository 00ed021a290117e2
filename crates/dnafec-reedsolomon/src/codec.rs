use alloc::vec;
use alloc::vec::Vec;
use dnafec_core::{FecError, FecResult};
use dnafec_math::{GfSymbol, Poly};
use log::{debug, warn};
use zeroize::Zeroize;

use crate::berlekamp::{berlekamp_massey, KeyEquation};
use crate::params::RsParams;

/// Result of a decode: the k message symbols and the codeword indices that
/// were rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Zeroize)]
pub struct Decoded {
    pub message: Vec<u8>,
    pub corrected: Vec<usize>,
}

impl Decoded {
    pub fn was_corrected(&self) -> bool {
        !self.corrected.is_empty()
    }
}

/// A located error: codeword index and locator `X = alpha^p`, where `p` is
/// the power of x the index carries.
#[derive(Debug, Clone, Copy)]
struct ErrorLocation {
    index: usize,
    locator: GfSymbol,
}

/// Reed-Solomon codec over GF(2^8) for a fixed (n, k).
///
/// Codewords are written highest power first: the k message symbols, then
/// the n - k parity symbols. The generator is
/// `g(x) = (x - alpha^1)(x - alpha^2)...(x - alpha^(n-k))`.
///
/// Up to `t = (n - k) / 2` symbol errors are always repaired. Beyond that,
/// [`ReedSolomon::decode`] may hand back a wrong message without any signal;
/// use [`ReedSolomon::decode_checked`] or an outer integrity check when that
/// matters.
#[derive(Debug, Clone)]
pub struct ReedSolomon {
    params: RsParams,
    generator: Poly,
}

impl ReedSolomon {
    pub fn new(n: usize, k: usize) -> FecResult<Self> {
        Self::with_params(RsParams::new(n, k))
    }

    pub fn with_params(params: RsParams) -> FecResult<Self> {
        params.validate()?;
        let generator = (1..=params.parity() as i64).fold(Poly::one(), |g, i| {
            g.mul(&Poly::new(vec![GfSymbol::ONE, GfSymbol::exp(i)]))
        });
        Ok(Self { params, generator })
    }

    pub fn params(&self) -> RsParams {
        self.params
    }

    pub fn generator(&self) -> &Poly {
        &self.generator
    }

    /// Messages shorter than k are left-padded with zero symbols.
    pub fn encode(&self, message: &[u8]) -> FecResult<Vec<u8>> {
        let RsParams { n, k } = self.params;
        if message.len() > k {
            return Err(FecError::MessageTooLong { len: message.len(), k });
        }

        let shifted = Poly::from_bytes(message).shift(self.params.parity());
        let (_, remainder) = shifted.div_rem(&self.generator)?;
        Ok(shifted.sub(&remainder).to_padded(n))
    }

    /// True iff the word has length n and is a multiple of g(x).
    pub fn verify(&self, codeword: &[u8]) -> bool {
        if codeword.len() != self.params.n {
            return false;
        }
        Poly::from_bytes(codeword)
            .div_rem(&self.generator)
            .map(|(_, remainder)| remainder.is_zero())
            .unwrap_or(false)
    }

    /// `S_i = r(alpha^i)` for i = 1..=n-k.
    pub fn syndromes(&self, received: &[u8]) -> FecResult<Vec<GfSymbol>> {
        self.check_len(received)?;
        let r = Poly::from_bytes(received);
        Ok((1..=self.params.parity() as i64)
            .map(|i| r.eval(GfSymbol::exp(i)))
            .collect())
    }

    /// Bounded-distance decode. Never reports miscorrection.
    pub fn decode(&self, received: &[u8]) -> FecResult<Decoded> {
        self.correct(received, false)
    }

    /// Like [`ReedSolomon::decode`], but fails with
    /// [`FecError::Uncorrectable`] when the error pattern is detectably
    /// beyond the correction radius.
    pub fn decode_checked(&self, received: &[u8]) -> FecResult<Decoded> {
        self.correct(received, true)
    }

    fn correct(&self, received: &[u8], strict: bool) -> FecResult<Decoded> {
        self.check_len(received)?;
        let RsParams { n, k } = self.params;

        if self.verify(received) {
            return Ok(Decoded { message: received[..k].to_vec(), corrected: Vec::new() });
        }

        let syndromes = self.syndromes(received)?;
        let KeyEquation { sigma, omega } = berlekamp_massey(&syndromes)?;
        let locations = self.locate(&sigma);

        let degree = sigma.degree();
        let capacity = self.params.capacity();
        let uncorrectable = FecError::Uncorrectable { degree, located: locations.len(), capacity };
        if degree > capacity || locations.len() != degree {
            warn!("rs({},{}): locator degree {} with {} roots in range", n, k, degree, locations.len());
            if strict {
                return Err(uncorrectable);
            }
        }

        let magnitudes = forney(&omega, &locations)?;

        let mut error = vec![0u8; n];
        for (loc, magnitude) in locations.iter().zip(&magnitudes) {
            error[loc.index] = magnitude.0;
        }
        let mut corrected = Poly::from_bytes(received)
            .sub(&Poly::from_bytes(&error))
            .to_padded(n);
        error.zeroize();

        if strict && !self.verify(&corrected) {
            warn!("rs({},{}): correction did not yield a codeword", n, k);
            corrected.zeroize();
            return Err(uncorrectable);
        }

        let message = corrected[..k].to_vec();
        corrected.zeroize();
        let positions: Vec<usize> = locations.iter().map(|loc| loc.index).collect();
        debug!("rs({},{}): corrected {} symbol(s) at {:?}", n, k, positions.len(), positions);
        Ok(Decoded { message, corrected: positions })
    }

    /// Roots of sigma are the inverse locators. Roots pointing past the end
    /// of the codeword are dropped.
    fn locate(&self, sigma: &Poly) -> Vec<ErrorLocation> {
        let n = self.params.n;
        let mut locations: Vec<ErrorLocation> = sigma
            .roots()
            .into_iter()
            .filter_map(|root| {
                let locator = root.inv().ok()?;
                let power = locator.log()?;
                (power < n).then(|| ErrorLocation { index: n - 1 - power, locator })
            })
            .collect();
        locations.sort_by_key(|loc| loc.index);
        locations
    }

    fn check_len(&self, received: &[u8]) -> FecResult<()> {
        if received.len() != self.params.n {
            return Err(FecError::CodewordLength { len: received.len(), n: self.params.n });
        }
        Ok(())
    }
}

/// Forney's formula with the product taken over the located errors:
/// `Y_l = X_l^v * omega(X_l^-1) * X_l^-1 / prod_{j != l} (X_l - X_j)`.
fn forney(omega: &Poly, locations: &[ErrorLocation]) -> FecResult<Vec<GfSymbol>> {
    let v = locations.len() as i32;
    locations
        .iter()
        .enumerate()
        .map(|(l, loc)| {
            let x = loc.locator;
            let x_inv = x.inv()?;
            let denominator = locations
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != l)
                .fold(GfSymbol::ONE, |acc, (_, other)| acc * (x - other.locator));
            (x.pow(v)? * omega.eval(x_inv) * x_inv).div(denominator)
        })
        .collect()
}
