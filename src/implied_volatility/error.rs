//! Error types for implied volatility calculation.

use crate::pricing::PricingError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why the Newton-Raphson iteration stopped without converging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NonConvergenceCause {
    /// The iteration cap was reached without meeting the tolerance.
    IterationLimit,
    /// A Newton step produced a non-positive or non-finite volatility.
    NonPositiveEstimate,
}

impl fmt::Display for NonConvergenceCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NonConvergenceCause::IterationLimit => write!(f, "iteration limit reached"),
            NonConvergenceCause::NonPositiveEstimate => {
                write!(f, "step produced a non-positive volatility")
            }
        }
    }
}

/// Errors specific to IV calculation.
#[derive(Debug, Clone, PartialEq)]
pub enum SolverError {
    /// The contract or an evaluated volatility is outside the pricing domain.
    Domain(PricingError),

    /// Solver inputs that are not part of the contract are unusable.
    InvalidConfig {
        /// Description of the invalid setting.
        message: String,
    },

    /// The solver stopped without meeting the tolerance.
    NonConvergence {
        /// Number of iterations attempted.
        iterations: u32,
        /// Last volatility estimate. Not a valid answer.
        last_estimate: f64,
        /// What stopped the iteration.
        cause: NonConvergenceCause,
    },

    /// Vega collapsed to near zero, leaving the Newton step undefined.
    Degenerate {
        /// Iteration at which vega collapsed (0-based).
        iteration: u32,
        /// Volatility at which vega was evaluated.
        sigma: f64,
        /// The offending vega.
        vega: f64,
    },

    /// Market price lies outside the model-free no-arbitrage bounds.
    PriceOutOfBounds {
        /// Market price observed.
        price: f64,
        /// Lower bound.
        lower: f64,
        /// Upper bound.
        upper: f64,
    },
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverError::Domain(err) => write!(f, "pricing domain error: {err}"),
            SolverError::InvalidConfig { message } => {
                write!(f, "invalid solver configuration: {message}")
            }
            SolverError::NonConvergence {
                iterations,
                last_estimate,
                cause,
            } => {
                write!(
                    f,
                    "solver did not converge after {iterations} iterations ({cause}), last estimate: {last_estimate:.6}"
                )
            }
            SolverError::Degenerate {
                iteration,
                sigma,
                vega,
            } => {
                write!(
                    f,
                    "vega {vega:e} too small at iteration {iteration} (sigma {sigma:.6})"
                )
            }
            SolverError::PriceOutOfBounds {
                price,
                lower,
                upper,
            } => {
                write!(
                    f,
                    "price {price:.4} is outside no-arbitrage bounds [{lower:.4}, {upper:.4}]"
                )
            }
        }
    }
}

impl std::error::Error for SolverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SolverError::Domain(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PricingError> for SolverError {
    fn from(err: PricingError) -> Self {
        SolverError::Domain(err)
    }
}
