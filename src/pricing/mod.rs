//! Black-Scholes pricing engine.
//!
//! Pure, stateless evaluation of European option prices and sensitivities
//! under the Black-Scholes assumptions: constant volatility and rate,
//! lognormal underlying, no dividends, exercise only at expiry.
//!
//! All sensitivities returned by [`BlackScholes`] are unscaled partial
//! derivatives (vega per unit of σ, theta per year, rho per unit of rate).
//! Use [`GreekSet::reported`] with [`GreekConventions`] to obtain the
//! per-1% / per-day figures usually shown to traders.

mod black_scholes;
pub mod distribution;
mod error;
mod greeks;
mod types;

pub use black_scholes::{BlackScholes, Valuation};
pub use error::PricingError;
pub use greeks::{GreekConventions, GreekSet, ReportedGreeks};
pub use types::{OptionContract, OptionType};
