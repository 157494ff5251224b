//! # impliedvol-rs
//!
//! Closed-form Black-Scholes pricing for European options, the five standard
//! Greeks, and a Newton-Raphson solver that backs implied volatility out of an
//! observed market price.
//!
//! The crate is split in two layers:
//!
//! - [`pricing`]: the pure pricing engine. [`BlackScholes`] evaluates the
//!   price and unscaled sensitivities of an [`OptionContract`] at a given
//!   volatility. Display conventions (per-1% vega and rho, per-day theta) are
//!   applied separately through [`GreekConventions`].
//! - [`implied_volatility`]: the solver. [`implied_volatility`](fn@implied_volatility)
//!   iterates on the pricing engine and reports non-convergence, degenerate
//!   vega and divergence as explicit errors instead of returning a stale
//!   estimate.
//!
//! # Example
//!
//! ```
//! use impliedvol_rs::prelude::*;
//!
//! let contract = OptionContract::call(30.0, 28.0, 0.5, 0.025);
//! let config = SolverConfig::default();
//!
//! let result = implied_volatility(5.0, &contract, 0.2, &config).unwrap();
//! assert!((result.sigma - 0.4583).abs() < 1e-3);
//!
//! let greeks = BlackScholes::greeks(&contract, result.sigma).unwrap();
//! let reported = greeks.reported(&GreekConventions::default());
//! assert!(reported.vega > 0.0);
//! ```

pub mod implied_volatility;
pub mod pricing;

pub use implied_volatility::{
    ImpliedVol, NonConvergenceCause, SolverConfig, SolverError, SolverOutcome,
    brenner_subrahmanyam_guess, implied_volatility, newton_raphson, solve_iv_bisection,
};
pub use pricing::{
    BlackScholes, GreekConventions, GreekSet, OptionContract, OptionType, PricingError,
    ReportedGreeks, Valuation,
};

/// Convenience re-exports of the types most callers need.
pub mod prelude {
    pub use crate::implied_volatility::{
        ImpliedVol, NonConvergenceCause, SolverConfig, SolverError, SolverOutcome,
        brenner_subrahmanyam_guess, implied_volatility, newton_raphson, solve_iv_bisection,
    };
    pub use crate::pricing::{
        BlackScholes, GreekConventions, GreekSet, OptionContract, OptionType, PricingError,
        ReportedGreeks, Valuation,
    };
}
