//! Option Greeks and their reporting conventions.

use serde::{Deserialize, Serialize};

/// The five first-order (and gamma) sensitivities of an option price.
///
/// Values are unscaled partial derivatives:
/// - `delta`: ∂V/∂S
/// - `gamma`: ∂²V/∂S²
/// - `vega`: ∂V/∂σ, per 1.00 of volatility
/// - `theta`: ∂V/∂t, per year of calendar time
/// - `rho`: ∂V/∂r, per 1.00 of rate
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GreekSet {
    /// Sensitivity to the underlying price.
    pub delta: f64,
    /// Sensitivity of delta to the underlying price.
    pub gamma: f64,
    /// Sensitivity to volatility.
    pub vega: f64,
    /// Time decay per year.
    pub theta: f64,
    /// Sensitivity to the risk-free rate.
    pub rho: f64,
}

impl GreekSet {
    /// Applies display conventions to produce trader-facing figures.
    #[must_use]
    pub fn reported(&self, conventions: &GreekConventions) -> ReportedGreeks {
        ReportedGreeks {
            delta: self.delta,
            gamma: self.gamma,
            vega: self.vega / conventions.vol_bump,
            theta: self.theta / conventions.days_per_year,
            rho: self.rho / conventions.rate_bump,
        }
    }
}

/// Scaling conventions applied when Greeks are shown rather than computed with.
///
/// The defaults express vega and rho per one percentage point and theta per
/// calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GreekConventions {
    /// Divisor for vega (100 = per 1 vol point).
    pub vol_bump: f64,
    /// Divisor for rho (100 = per 1% rate move).
    pub rate_bump: f64,
    /// Divisor for theta (365 = per calendar day, 252 = per trading day).
    pub days_per_year: f64,
}

impl Default for GreekConventions {
    fn default() -> Self {
        Self {
            vol_bump: 100.0,
            rate_bump: 100.0,
            days_per_year: 365.0,
        }
    }
}

impl GreekConventions {
    /// Creates conventions with the default per-1% / per-calendar-day scaling.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of days theta is spread over.
    #[must_use]
    pub fn with_days_per_year(mut self, days_per_year: f64) -> Self {
        self.days_per_year = days_per_year;
        self
    }

    /// Sets the vega divisor.
    #[must_use]
    pub fn with_vol_bump(mut self, vol_bump: f64) -> Self {
        self.vol_bump = vol_bump;
        self
    }

    /// Sets the rho divisor.
    #[must_use]
    pub fn with_rate_bump(mut self, rate_bump: f64) -> Self {
        self.rate_bump = rate_bump;
        self
    }

    /// Conventions that leave every Greek unscaled.
    #[must_use]
    pub fn unscaled() -> Self {
        Self {
            vol_bump: 1.0,
            rate_bump: 1.0,
            days_per_year: 1.0,
        }
    }
}

/// Greeks after applying [`GreekConventions`]. For display only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportedGreeks {
    /// Delta, unchanged.
    pub delta: f64,
    /// Gamma, unchanged.
    pub gamma: f64,
    /// Vega per `vol_bump`.
    pub vega: f64,
    /// Theta per day.
    pub theta: f64,
    /// Rho per `rate_bump`.
    pub rho: f64,
}
