//! Newton-Raphson solver for implied volatility calculation.
//!
//! This module provides a numerical solver to find the implied volatility
//! that makes the Black-Scholes price equal to the observed market price,
//! plus a bracketed bisection solver callers can fall back to.

use super::error::{NonConvergenceCause, SolverError};
use super::types::{ImpliedVol, SolverOutcome};
use crate::pricing::{BlackScholes, OptionContract, PricingError};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

/// Configuration for the implied volatility solvers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Maximum iterations before giving up.
    pub max_iterations: u32,
    /// Convergence threshold on successive volatility estimates.
    pub tolerance: f64,
    /// Vega below which the Newton step is considered undefined.
    pub min_vega: f64,
    /// Lower end of the bisection bracket.
    pub min_sigma: f64,
    /// Upper end of the bisection bracket.
    pub max_sigma: f64,
    /// Reject market prices outside the no-arbitrage bounds before iterating.
    pub check_price_bounds: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            tolerance: 1e-5,
            min_vega: 1e-12,
            min_sigma: 1e-4,
            max_sigma: 5.0,
            check_price_bounds: false,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the convergence tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the vega floor.
    #[must_use]
    pub fn with_min_vega(mut self, min_vega: f64) -> Self {
        self.min_vega = min_vega;
        self
    }

    /// Sets the bisection bracket.
    #[must_use]
    pub fn with_bounds(mut self, min_sigma: f64, max_sigma: f64) -> Self {
        self.min_sigma = min_sigma;
        self.max_sigma = max_sigma;
        self
    }

    /// Enables or disables the up-front no-arbitrage price check.
    #[must_use]
    pub fn with_price_bounds_check(mut self, check: bool) -> Self {
        self.check_price_bounds = check;
        self
    }

    fn validate(&self) -> Result<(), SolverError> {
        if self.max_iterations == 0 {
            return Err(invalid_config("max_iterations must be greater than zero"));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(invalid_config(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        if !(self.min_vega.is_finite() && self.min_vega >= 0.0) {
            return Err(invalid_config(format!(
                "min_vega must be non-negative, got {}",
                self.min_vega
            )));
        }
        Ok(())
    }
}

fn invalid_config(message: impl Into<String>) -> SolverError {
    SolverError::InvalidConfig {
        message: message.into(),
    }
}

/// Validates the inputs shared by every solver.
fn validate_inputs(
    contract: &OptionContract,
    market_price: f64,
    config: &SolverConfig,
) -> Result<(), SolverError> {
    contract.validate()?;
    config.validate()?;

    if !market_price.is_finite() {
        return Err(invalid_config(format!(
            "market price must be finite, got {market_price}"
        )));
    }

    if config.check_price_bounds {
        check_price_bounds(contract, market_price)?;
    }

    Ok(())
}

fn check_price_bounds(contract: &OptionContract, market_price: f64) -> Result<(), SolverError> {
    let (lower, upper) = contract.price_bounds();
    if market_price < lower || market_price > upper {
        return Err(SolverError::PriceOutOfBounds {
            price: market_price,
            lower,
            upper,
        });
    }
    Ok(())
}

/// Brenner-Subrahmanyam initial guess: `σ ≈ price / (0.4 · S · √T)`.
///
/// Accurate near the money; clamped to `[0.05, 2.0]` elsewhere. Useful as a
/// caller-side starting point when no historical volatility is at hand.
#[must_use]
pub fn brenner_subrahmanyam_guess(contract: &OptionContract, market_price: f64) -> f64 {
    let sqrt_time = contract.time_to_expiry.sqrt();
    let approx = market_price / (0.4 * contract.spot * sqrt_time);
    approx.clamp(0.05, 2.0)
}

/// Runs the Newton-Raphson iteration and returns its terminal state.
///
/// The update is `σ_{n+1} = σ_n - (BS(σ_n) - market_price) / vega(σ_n)`
/// using the unscaled vega `∂price/∂σ`. The run stops when successive
/// estimates differ by less than `config.tolerance`.
///
/// # Errors
/// Only invalid inputs are reported as `Err`. Every way the iteration itself
/// can end, including failure, is a [`SolverOutcome`] variant.
pub fn newton_raphson(
    market_price: f64,
    contract: &OptionContract,
    initial_sigma: f64,
    config: &SolverConfig,
) -> Result<SolverOutcome, SolverError> {
    validate_inputs(contract, market_price, config)?;

    if !initial_sigma.is_finite() {
        return Err(PricingError::NonFiniteInput {
            field: "volatility",
            value: initial_sigma,
        }
        .into());
    }
    if initial_sigma <= 0.0 {
        return Err(PricingError::NonPositiveVolatility {
            volatility: initial_sigma,
        }
        .into());
    }

    let mut sigma = initial_sigma;

    for iteration in 0..config.max_iterations {
        let (price, vega) = BlackScholes::price_and_vega(contract, sigma)?;
        trace!(iteration, sigma, price, vega, "newton-raphson step");

        if !vega.is_finite() || vega.abs() < config.min_vega {
            warn!(iteration, sigma, vega, "vega collapsed, aborting");
            return Ok(SolverOutcome::Degenerate {
                sigma,
                vega,
                iteration,
            });
        }

        let next = sigma - (price - market_price) / vega;

        if !next.is_finite() || next <= 0.0 {
            warn!(iteration, sigma, next, "step left the positive half-line");
            return Ok(SolverOutcome::Diverged {
                last_estimate: next,
                iterations: iteration + 1,
            });
        }

        if (next - sigma).abs() < config.tolerance {
            debug!(sigma = next, iterations = iteration + 1, "converged");
            return Ok(SolverOutcome::Converged {
                sigma: next,
                iterations: iteration + 1,
            });
        }

        sigma = next;
    }

    warn!(
        iterations = config.max_iterations,
        last_estimate = sigma,
        "iteration limit reached"
    );
    Ok(SolverOutcome::Exhausted {
        last_estimate: sigma,
        iterations: config.max_iterations,
    })
}

/// Solves for implied volatility using Newton-Raphson.
///
/// # Arguments
/// - `market_price`: Observed market price to match
/// - `contract`: Option terms (spot, strike, time, rate, type)
/// - `initial_sigma`: Starting guess; Newton-Raphson only converges locally,
///   so a poor guess is the dominant failure mode
/// - `config`: Solver configuration
///
/// # Returns
/// - `Ok(ImpliedVol)`: Converged volatility and iteration count
/// - `Err(SolverError)`: Invalid inputs, non-convergence or degenerate vega
///
/// # Example
/// ```
/// use impliedvol_rs::{OptionContract, SolverConfig, implied_volatility};
///
/// let contract = OptionContract::call(100.0, 100.0, 0.25, 0.05);
/// let result = implied_volatility(5.0, &contract, 0.2, &SolverConfig::default()).unwrap();
/// assert!(result.sigma > 0.0);
/// ```
pub fn implied_volatility(
    market_price: f64,
    contract: &OptionContract,
    initial_sigma: f64,
    config: &SolverConfig,
) -> Result<ImpliedVol, SolverError> {
    let (sigma, iterations) =
        newton_raphson(market_price, contract, initial_sigma, config)?.into_result()?;
    let (price, vega) = BlackScholes::price_and_vega(contract, sigma)?;
    Ok(ImpliedVol::new(sigma, iterations, price - market_price, vega))
}

/// Solves for IV using bisection over `[config.min_sigma, config.max_sigma]`.
///
/// Slower than Newton-Raphson but converges whenever the market price is
/// bracketed by the model prices at the two ends. Intended as a fallback a
/// caller may choose after a Newton-Raphson failure.
///
/// # Returns
/// - `Ok(ImpliedVol)`: Midpoint of the final bracket
/// - `Err(SolverError::PriceOutOfBounds)`: Price not reachable within the bracket
/// - `Err(SolverError::NonConvergence)`: Bracket still wider than the tolerance
pub fn solve_iv_bisection(
    market_price: f64,
    contract: &OptionContract,
    config: &SolverConfig,
) -> Result<ImpliedVol, SolverError> {
    validate_inputs(contract, market_price, config)?;

    if !(config.min_sigma > 0.0 && config.min_sigma < config.max_sigma) {
        return Err(invalid_config(format!(
            "bisection bounds must satisfy 0 < min < max, got [{}, {}]",
            config.min_sigma, config.max_sigma
        )));
    }

    let mut low = config.min_sigma;
    let mut high = config.max_sigma;

    // Price is increasing in sigma, so the bracket must straddle the target.
    let price_low = BlackScholes::price(contract, low)?;
    let price_high = BlackScholes::price(contract, high)?;
    if market_price < price_low || market_price > price_high {
        return Err(SolverError::PriceOutOfBounds {
            price: market_price,
            lower: price_low,
            upper: price_high,
        });
    }

    for iteration in 0..config.max_iterations {
        let mid = 0.5 * (low + high);
        let (price, vega) = BlackScholes::price_and_vega(contract, mid)?;
        let diff = price - market_price;
        trace!(iteration, low, high, diff, "bisection step");

        if diff == 0.0 || 0.5 * (high - low) < config.tolerance {
            debug!(sigma = mid, iterations = iteration + 1, "bisection converged");
            return Ok(ImpliedVol::new(mid, iteration + 1, diff, vega));
        }

        if diff > 0.0 {
            high = mid;
        } else {
            low = mid;
        }
    }

    Err(SolverError::NonConvergence {
        iterations: config.max_iterations,
        last_estimate: 0.5 * (low + high),
        cause: NonConvergenceCause::IterationLimit,
    })
}
