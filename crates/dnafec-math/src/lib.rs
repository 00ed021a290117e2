#![no_std]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod poly;
pub mod scalar;
pub mod tables;

pub use poly::Poly;
pub use scalar::xor_into;
pub use tables::TABLES;

use dnafec_core::{FecError, FecResult, FIELD_ORDER};
use zeroize::Zeroize;

/// An element of GF(2^8) under x^8 + x^4 + x^3 + x + 1 with generator 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Zeroize)]
#[repr(transparent)]
pub struct GfSymbol(pub u8);

impl GfSymbol {
    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(1);
    pub const ALPHA: Self = Self(tables::GENERATOR);

    #[inline(always)]
    pub fn add(self, rhs: Self) -> Self { Self(self.0 ^ rhs.0) }
    #[inline(always)]
    pub fn sub(self, rhs: Self) -> Self { self.add(rhs) }

    #[inline]
    pub fn mul(self, rhs: Self) -> Self {
        if self.0 == 0 || rhs.0 == 0 { return Self::ZERO; }
        let idx = (TABLES.log[self.0 as usize] as usize) + (TABLES.log[rhs.0 as usize] as usize);
        Self(TABLES.exp[idx])
    }

    /// Shift-and-add multiply without table lookups or data-dependent branches.
    pub fn mul_safe(self, rhs: Self) -> Self {
        let mut p = 0u8;
        let mut a = self.0;
        let mut b = rhs.0;
        for _ in 0..8 {
            let mask = (b & 1).wrapping_neg();
            p ^= a & mask;
            let carry = (a >> 7).wrapping_neg();
            a <<= 1;
            a ^= 0x1B & carry;
            b >>= 1;
        }
        Self(p)
    }

    pub fn inv(self) -> FecResult<Self> {
        if self.0 == 0 { return Err(FecError::ZeroInverse); }
        let log_a = TABLES.log[self.0 as usize] as usize;
        Ok(Self(TABLES.exp[FIELD_ORDER - log_a]))
    }

    pub fn div(self, rhs: Self) -> FecResult<Self> {
        Ok(self.mul(rhs.inv()?))
    }

    /// `self^exponent`; negative exponents raise the inverse.
    pub fn pow(self, exponent: i32) -> FecResult<Self> {
        let magnitude = exponent.unsigned_abs() as usize;
        let raised = if magnitude == 0 {
            Self::ONE
        } else if self.0 == 0 {
            Self::ZERO
        } else {
            let log_a = TABLES.log[self.0 as usize] as usize;
            Self(TABLES.exp[(log_a * (magnitude % FIELD_ORDER)) % FIELD_ORDER])
        };
        if exponent < 0 { raised.inv() } else { Ok(raised) }
    }

    /// alpha^power for any integer power.
    #[inline]
    pub fn exp(power: i64) -> Self {
        let idx = power.rem_euclid(FIELD_ORDER as i64) as usize;
        Self(TABLES.exp[idx])
    }

    /// Discrete logarithm base alpha, `None` for zero.
    #[inline]
    pub fn log(self) -> Option<usize> {
        if self.0 == 0 { None } else { Some(TABLES.log[self.0 as usize] as usize) }
    }
}

impl From<u8> for GfSymbol {
    fn from(value: u8) -> Self { Self(value) }
}

impl From<GfSymbol> for u8 {
    fn from(value: GfSymbol) -> Self { value.0 }
}

// Operator Overloads
impl core::ops::Add for GfSymbol { type Output = Self; fn add(self, rhs: Self) -> Self { self.add(rhs) } }
impl core::ops::Sub for GfSymbol { type Output = Self; fn sub(self, rhs: Self) -> Self { self.sub(rhs) } }
impl core::ops::Mul for GfSymbol { type Output = Self; fn mul(self, rhs: Self) -> Self { self.mul(rhs) } }
impl core::ops::AddAssign for GfSymbol { fn add_assign(&mut self, rhs: Self) { *self = self.add(rhs); } }
