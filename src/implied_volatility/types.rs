//! Types for implied volatility calculation.

use super::error::{NonConvergenceCause, SolverError};
use serde::{Deserialize, Serialize};

/// Terminal state of one Newton-Raphson run.
///
/// Only [`Converged`](Self::Converged) carries a usable volatility; every
/// other variant reports the estimate at which the run stopped so callers can
/// inspect it, but must not treat it as an answer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SolverOutcome {
    /// Successive estimates moved by less than the tolerance.
    Converged {
        /// Implied volatility.
        sigma: f64,
        /// Iterations used.
        iterations: u32,
    },
    /// The iteration cap was reached.
    Exhausted {
        /// Estimate after the final iteration.
        last_estimate: f64,
        /// Iterations used (equal to the cap).
        iterations: u32,
    },
    /// Vega fell below the configured floor.
    Degenerate {
        /// Estimate at which vega collapsed.
        sigma: f64,
        /// The offending vega.
        vega: f64,
        /// Iteration at which it happened (0-based).
        iteration: u32,
    },
    /// A step left the positive half-line.
    Diverged {
        /// The non-positive or non-finite estimate produced by the step.
        last_estimate: f64,
        /// Iterations used, including the diverging step.
        iterations: u32,
    },
}

impl SolverOutcome {
    /// Returns true only for [`Converged`](Self::Converged).
    #[must_use]
    pub fn is_converged(&self) -> bool {
        matches!(self, SolverOutcome::Converged { .. })
    }

    /// The converged volatility, if any.
    #[must_use]
    pub fn sigma(&self) -> Option<f64> {
        match self {
            SolverOutcome::Converged { sigma, .. } => Some(*sigma),
            _ => None,
        }
    }

    /// Converts the outcome into a result, mapping failures to [`SolverError`].
    pub fn into_result(self) -> Result<(f64, u32), SolverError> {
        match self {
            SolverOutcome::Converged { sigma, iterations } => Ok((sigma, iterations)),
            SolverOutcome::Exhausted {
                last_estimate,
                iterations,
            } => Err(SolverError::NonConvergence {
                iterations,
                last_estimate,
                cause: NonConvergenceCause::IterationLimit,
            }),
            SolverOutcome::Diverged {
                last_estimate,
                iterations,
            } => Err(SolverError::NonConvergence {
                iterations,
                last_estimate,
                cause: NonConvergenceCause::NonPositiveEstimate,
            }),
            SolverOutcome::Degenerate {
                sigma,
                vega,
                iteration,
            } => Err(SolverError::Degenerate {
                iteration,
                sigma,
                vega,
            }),
        }
    }
}

/// Result of a successful IV calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpliedVol {
    /// Implied volatility (e.g., 0.25 = 25%).
    pub sigma: f64,
    /// Number of solver iterations to converge.
    pub iterations: u32,
    /// Model price at `sigma` minus the market price.
    pub price_error: f64,
    /// Unscaled vega at `sigma`.
    ///
    /// A tiny vega means the price is flat in volatility: many values of
    /// `sigma` reproduce the market price to machine precision, and the one
    /// returned is not meaningful.
    pub vega: f64,
}

impl ImpliedVol {
    /// Creates a new IV result.
    #[must_use]
    pub fn new(sigma: f64, iterations: u32, price_error: f64, vega: f64) -> Self {
        Self {
            sigma,
            iterations,
            price_error,
            vega,
        }
    }

    /// Returns the IV as a percentage (e.g., 25.0 for 25%).
    #[must_use]
    pub fn sigma_percent(&self) -> f64 {
        self.sigma * 100.0
    }

    /// Returns true if vega at the solution is at least `min_vega`.
    #[must_use]
    pub fn is_well_conditioned(&self, min_vega: f64) -> bool {
        self.vega >= min_vega
    }
}
