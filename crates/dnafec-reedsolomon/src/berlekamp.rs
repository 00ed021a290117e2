//! Berlekamp-Massey over GF(2^8), in Berlekamp's form that carries the
//! error evaluator alongside the locator.
//!
//! After `2t` steps the outputs satisfy the key equation
//! `(1 + S(x)) * sigma(x) = omega(x) mod x^(2t+1)` with
//! `S(x) = S_1 x + S_2 x^2 + ... + S_2t x^2t`.

use alloc::vec::Vec;
use dnafec_core::FecResult;
use dnafec_math::{GfSymbol, Poly};
use log::trace;

/// Error locator `sigma` (roots at the inverse error locations) and error
/// evaluator `omega`, both normalised to a constant term of 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEquation {
    pub sigma: Poly,
    pub omega: Poly,
}

/// `syndromes[i]` holds `S_(i+1)`.
pub fn berlekamp_massey(syndromes: &[GfSymbol]) -> FecResult<KeyEquation> {
    let mut coeffs: Vec<GfSymbol> = syndromes.iter().rev().copied().collect();
    coeffs.push(GfSymbol::ONE);
    let one_plus_s = Poly::new(coeffs);

    let mut sigma = Poly::one();
    let mut omega = Poly::one();
    let mut tau = Poly::one();
    let mut gamma = Poly::zero();
    let mut d = 0usize;
    let mut b = false;

    for step in 1..=syndromes.len() {
        // Discrepancy: coefficient of x^step in (1 + S) * sigma.
        let delta = (0..=sigma.degree().min(step)).fold(GfSymbol::ZERO, |acc, i| {
            acc + sigma.coefficient(i) * one_plus_s.coefficient(step - i)
        });

        let sigma_next = sigma.sub(&tau.shift(1).scale(delta));
        let omega_next = omega.sub(&gamma.shift(1).scale(delta));

        if delta == GfSymbol::ZERO || 2 * d > step || (2 * d == step && !b) {
            // Rule A
            tau = tau.shift(1);
            gamma = gamma.shift(1);
        } else {
            // Rule B
            d = step - d;
            b = !b;
            let inv = delta.inv()?;
            tau = sigma.scale(inv);
            gamma = omega.scale(inv);
        }

        sigma = sigma_next;
        omega = omega_next;
        trace!("bm step {}: delta={:#04x} deg(sigma)={} D={}", step, delta.0, sigma.degree(), d);
    }

    Ok(KeyEquation { sigma, omega })
}
