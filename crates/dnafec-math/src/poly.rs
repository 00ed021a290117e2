//! Polynomials over GF(2^8).
//!
//! Coefficients are stored highest degree first. Leading zeros are stripped,
//! so the zero polynomial is `[0]` and every other polynomial has a non-zero
//! leading coefficient.

use alloc::vec;
use alloc::vec::Vec;
use dnafec_core::{FecError, FecResult, FIELD_SIZE};
use zeroize::Zeroize;

use crate::GfSymbol;

#[derive(Debug, Clone, PartialEq, Eq, Zeroize)]
pub struct Poly {
    coeffs: Vec<GfSymbol>,
}

impl Poly {
    pub fn new(mut coeffs: Vec<GfSymbol>) -> Self {
        let leading_zeros = coeffs.iter().take_while(|&&c| c == GfSymbol::ZERO).count();
        if leading_zeros == coeffs.len() {
            return Self::zero();
        }
        coeffs.drain(..leading_zeros);
        Self { coeffs }
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::new(bytes.iter().map(|&b| GfSymbol(b)).collect())
    }

    pub fn zero() -> Self {
        Self { coeffs: vec![GfSymbol::ZERO] }
    }

    pub fn one() -> Self {
        Self { coeffs: vec![GfSymbol::ONE] }
    }

    /// `coeff * x^degree`.
    pub fn monomial(coeff: GfSymbol, degree: usize) -> Self {
        if coeff == GfSymbol::ZERO {
            return Self::zero();
        }
        let mut coeffs = vec![GfSymbol::ZERO; degree + 1];
        coeffs[0] = coeff;
        Self { coeffs }
    }

    pub fn coefficients(&self) -> &[GfSymbol] {
        &self.coeffs
    }

    pub fn degree(&self) -> usize {
        self.coeffs.len() - 1
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.len() == 1 && self.coeffs[0] == GfSymbol::ZERO
    }

    pub fn leading(&self) -> GfSymbol {
        self.coeffs[0]
    }

    /// Coefficient of `x^power`; zero above the degree.
    pub fn coefficient(&self, power: usize) -> GfSymbol {
        if power > self.degree() {
            GfSymbol::ZERO
        } else {
            self.coeffs[self.degree() - power]
        }
    }

    pub fn add(&self, other: &Self) -> Self {
        let len = self.coeffs.len().max(other.coeffs.len());
        let mut out = vec![GfSymbol::ZERO; len];
        for (slot, &c) in out[len - self.coeffs.len()..].iter_mut().zip(&self.coeffs) {
            *slot = c;
        }
        for (slot, &c) in out[len - other.coeffs.len()..].iter_mut().zip(&other.coeffs) {
            *slot = *slot + c;
        }
        Self::new(out)
    }

    /// Same as [`Poly::add`] in characteristic 2.
    pub fn sub(&self, other: &Self) -> Self {
        self.add(other)
    }

    pub fn scale(&self, factor: GfSymbol) -> Self {
        Self::new(self.coeffs.iter().map(|&c| c * factor).collect())
    }

    /// Multiply by `x^k`.
    pub fn shift(&self, k: usize) -> Self {
        if self.is_zero() {
            return Self::zero();
        }
        let mut coeffs = self.coeffs.clone();
        coeffs.resize(coeffs.len() + k, GfSymbol::ZERO);
        Self { coeffs }
    }

    pub fn mul(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }
        let mut out = vec![GfSymbol::ZERO; self.coeffs.len() + other.coeffs.len() - 1];
        for (i, &a) in self.coeffs.iter().enumerate() {
            if a == GfSymbol::ZERO { continue; }
            for (j, &b) in other.coeffs.iter().enumerate() {
                out[i + j] = out[i + j] + a * b;
            }
        }
        Self::new(out)
    }

    /// Long division: `self = quotient * divisor + remainder`,
    /// with `deg(remainder) < deg(divisor)`.
    pub fn div_rem(&self, divisor: &Self) -> FecResult<(Self, Self)> {
        if divisor.is_zero() {
            return Err(FecError::ZeroDivisor);
        }
        if self.is_zero() || self.degree() < divisor.degree() {
            return Ok((Self::zero(), self.clone()));
        }

        let lead_inv = divisor.leading().inv()?;
        let dlen = divisor.coeffs.len();
        let qlen = self.coeffs.len() - dlen + 1;
        let mut rem = self.coeffs.clone();
        let mut quot = vec![GfSymbol::ZERO; qlen];

        for i in 0..qlen {
            let coef = rem[i] * lead_inv;
            quot[i] = coef;
            if coef == GfSymbol::ZERO { continue; }
            for (j, &d) in divisor.coeffs.iter().enumerate() {
                rem[i + j] = rem[i + j] - coef * d;
            }
        }

        let remainder = rem.split_off(qlen);
        Ok((Self::new(quot), Self::new(remainder)))
    }

    /// Horner evaluation.
    pub fn eval(&self, x: GfSymbol) -> GfSymbol {
        self.coeffs
            .iter()
            .fold(GfSymbol::ZERO, |acc, &c| acc * x + c)
    }

    /// Exhaustive root search over the whole field.
    pub fn roots(&self) -> Vec<GfSymbol> {
        (0..FIELD_SIZE)
            .map(|v| GfSymbol(v as u8))
            .filter(|&x| self.eval(x) == GfSymbol::ZERO)
            .collect()
    }

    /// The `len` lowest-order coefficients as bytes, highest first,
    /// left-padded with zeros.
    pub fn to_padded(&self, len: usize) -> Vec<u8> {
        let mut out = vec![0u8; len];
        let take = len.min(self.coeffs.len());
        let src = &self.coeffs[self.coeffs.len() - take..];
        for (slot, c) in out[len - take..].iter_mut().zip(src) {
            *slot = c.0;
        }
        out
    }
}
