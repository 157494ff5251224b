//! Implied volatility calculation.
//!
//! Implied volatility (IV) is the option's price translated into different
//! units: the volatility that, plugged into Black-Scholes with the other
//! contract terms, reproduces the observed market price.
//!
//! # Newton-Raphson
//!
//! There is no closed-form inverse of Black-Scholes, so [`newton_raphson`]
//! iterates `σ ← σ - (BS(σ) - price) / vega(σ)` with the unscaled vega
//! `∂price/∂σ`, stopping when successive estimates differ by less than the
//! configured tolerance.
//!
//! The run ends in exactly one [`SolverOutcome`]:
//!
//! - `Converged`: the only outcome carrying a usable volatility
//! - `Exhausted`: the iteration cap was hit
//! - `Degenerate`: vega fell below the floor, so the step is undefined
//! - `Diverged`: a step produced a non-positive volatility
//!
//! [`implied_volatility`](fn@implied_volatility) wraps this into a `Result`,
//! mapping every non-converged outcome to a [`SolverError`].
//!
//! The solver never retries. A caller that wants a second attempt can pick a
//! new starting point (e.g. [`brenner_subrahmanyam_guess`]) or switch to
//! [`solve_iv_bisection`].
//!
//! # Example
//!
//! ```
//! use impliedvol_rs::implied_volatility::{SolverConfig, SolverOutcome, newton_raphson};
//! use impliedvol_rs::pricing::OptionContract;
//!
//! let contract = OptionContract::call(30.0, 28.0, 0.5, 0.025);
//! let outcome = newton_raphson(5.0, &contract, 0.2, &SolverConfig::default()).unwrap();
//!
//! match outcome {
//!     SolverOutcome::Converged { sigma, .. } => println!("IV: {:.2}%", sigma * 100.0),
//!     other => println!("no implied volatility: {other:?}"),
//! }
//! ```

mod error;
mod solver;
mod types;

pub use error::{NonConvergenceCause, SolverError};
pub use solver::{
    SolverConfig, brenner_subrahmanyam_guess, implied_volatility, newton_raphson,
    solve_iv_bisection,
};
pub use types::{ImpliedVol, SolverOutcome};
