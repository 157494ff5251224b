//! Standard normal distribution functions.
//!
//! Pricing accuracy is bounded by these two routines, so the CDF is built on
//! `statrs`'s double-precision complementary error function rather than a
//! low-order polynomial fit.

use statrs::function::erf::erfc;
use std::f64::consts::SQRT_2;

/// 1 / sqrt(2π)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Standard normal cumulative distribution function Φ(x).
///
/// Computed as `0.5 · erfc(-x / √2)`, which keeps full relative precision in
/// the lower tail where `1 - Φ(-x)` would cancel.
#[must_use]
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / SQRT_2)
}

/// Standard normal probability density function φ(x).
#[must_use]
pub fn norm_pdf(x: f64) -> f64 {
    FRAC_1_SQRT_2PI * (-0.5 * x * x).exp()
}
