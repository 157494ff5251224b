//! Black-Scholes pricing model and Greeks calculation.
//!
//! Every public function validates its inputs and evaluates the shared
//! `d1`/`d2` terms exactly once before applying the closed-form formula.

use super::distribution::{norm_cdf, norm_pdf};
use super::error::PricingError;
use super::greeks::GreekSet;
use super::types::{OptionContract, OptionType};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Black-Scholes pricing model implementation.
///
/// Provides methods for calculating European option prices and Greeks
/// using the Black-Scholes formula without dividends.
pub struct BlackScholes;

/// Price and Greeks computed together from one set of intermediate terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Valuation {
    /// Theoretical option price.
    pub price: f64,
    /// Unscaled sensitivities.
    pub greeks: GreekSet,
}

/// Intermediate terms shared by the price and every Greek.
struct Terms {
    d1: f64,
    d2: f64,
    sqrt_time: f64,
    discount: f64,
}

impl Terms {
    /// d1 = [ln(S/K) + (r + σ²/2)T] / (σ√T), d2 = d1 - σ√T
    fn new(contract: &OptionContract, vol: f64) -> Result<Self, PricingError> {
        contract.validate()?;
        if !vol.is_finite() {
            return Err(PricingError::NonFiniteInput {
                field: "volatility",
                value: vol,
            });
        }
        if vol <= 0.0 {
            return Err(PricingError::NonPositiveVolatility { volatility: vol });
        }

        let time = contract.time_to_expiry;
        let rate = contract.risk_free_rate;
        let sqrt_time = time.sqrt();
        let vol_sqrt_time = vol * sqrt_time;

        let d1 = ((contract.spot / contract.strike).ln() + (rate + 0.5 * vol * vol) * time)
            / vol_sqrt_time;
        let d2 = d1 - vol_sqrt_time;

        trace!(d1, d2, "black-scholes terms");

        Ok(Self {
            d1,
            d2,
            sqrt_time,
            discount: (-rate * time).exp(),
        })
    }

    fn price(&self, c: &OptionContract) -> f64 {
        match c.option_type {
            OptionType::Call => {
                c.spot * norm_cdf(self.d1) - c.strike * self.discount * norm_cdf(self.d2)
            }
            OptionType::Put => {
                c.strike * self.discount * norm_cdf(-self.d2) - c.spot * norm_cdf(-self.d1)
            }
        }
    }

    fn delta(&self, c: &OptionContract) -> f64 {
        match c.option_type {
            OptionType::Call => norm_cdf(self.d1),
            OptionType::Put => norm_cdf(self.d1) - 1.0,
        }
    }

    fn gamma(&self, c: &OptionContract, vol: f64) -> f64 {
        norm_pdf(self.d1) / (c.spot * vol * self.sqrt_time)
    }

    fn vega(&self, c: &OptionContract) -> f64 {
        c.spot * self.sqrt_time * norm_pdf(self.d1)
    }

    fn theta(&self, c: &OptionContract, vol: f64) -> f64 {
        let decay = -c.spot * norm_pdf(self.d1) * vol / (2.0 * self.sqrt_time);
        let carry = c.risk_free_rate * c.strike * self.discount;
        match c.option_type {
            OptionType::Call => decay - carry * norm_cdf(self.d2),
            OptionType::Put => decay + carry * norm_cdf(-self.d2),
        }
    }

    fn rho(&self, c: &OptionContract) -> f64 {
        let pv_strike_time = c.strike * c.time_to_expiry * self.discount;
        match c.option_type {
            OptionType::Call => pv_strike_time * norm_cdf(self.d2),
            OptionType::Put => -pv_strike_time * norm_cdf(-self.d2),
        }
    }
}

impl BlackScholes {
    /// Calculates the theoretical option price.
    ///
    /// For calls: C = S·N(d1) - K·e^(-rT)·N(d2)
    /// For puts:  P = K·e^(-rT)·N(-d2) - S·N(-d1)
    ///
    /// # Errors
    /// Returns a [`PricingError`] if the contract is invalid or `vol <= 0`.
    pub fn price(contract: &OptionContract, vol: f64) -> Result<f64, PricingError> {
        Terms::new(contract, vol).map(|terms| terms.price(contract))
    }

    /// Calculates delta (∂price/∂S).
    ///
    /// For calls: Δ = N(d1), in (0, 1)
    /// For puts:  Δ = N(d1) - 1, in (-1, 0)
    pub fn delta(contract: &OptionContract, vol: f64) -> Result<f64, PricingError> {
        Terms::new(contract, vol).map(|terms| terms.delta(contract))
    }

    /// Calculates gamma (∂²price/∂S²), identical for calls and puts.
    ///
    /// Γ = N'(d1) / (S · σ · √T)
    pub fn gamma(contract: &OptionContract, vol: f64) -> Result<f64, PricingError> {
        Terms::new(contract, vol).map(|terms| terms.gamma(contract, vol))
    }

    /// Calculates vega (∂price/∂σ), identical for calls and puts.
    ///
    /// Vega = S · √T · N'(d1)
    ///
    /// This is the per-unit derivative the implied volatility solver needs.
    /// Divide by 100 (see [`GreekConventions`](super::GreekConventions)) for
    /// the per-vol-point figure.
    pub fn vega(contract: &OptionContract, vol: f64) -> Result<f64, PricingError> {
        Terms::new(contract, vol).map(|terms| terms.vega(contract))
    }

    /// Calculates theta (∂price/∂t) per year.
    ///
    /// For calls: -S·N'(d1)·σ/(2√T) - r·K·e^(-rT)·N(d2)
    /// For puts:  -S·N'(d1)·σ/(2√T) + r·K·e^(-rT)·N(-d2)
    pub fn theta(contract: &OptionContract, vol: f64) -> Result<f64, PricingError> {
        Terms::new(contract, vol).map(|terms| terms.theta(contract, vol))
    }

    /// Calculates rho (∂price/∂r) per unit of rate.
    ///
    /// For calls: K·T·e^(-rT)·N(d2)
    /// For puts:  -K·T·e^(-rT)·N(-d2)
    pub fn rho(contract: &OptionContract, vol: f64) -> Result<f64, PricingError> {
        Terms::new(contract, vol).map(|terms| terms.rho(contract))
    }

    /// Calculates all five Greeks.
    pub fn greeks(contract: &OptionContract, vol: f64) -> Result<GreekSet, PricingError> {
        let terms = Terms::new(contract, vol)?;
        Ok(Self::greek_set(&terms, contract, vol))
    }

    /// Calculates the price and all five Greeks in one pass.
    pub fn valuation(contract: &OptionContract, vol: f64) -> Result<Valuation, PricingError> {
        let terms = Terms::new(contract, vol)?;
        Ok(Valuation {
            price: terms.price(contract),
            greeks: Self::greek_set(&terms, contract, vol),
        })
    }

    /// Price and vega from one evaluation, as consumed by the solver.
    pub(crate) fn price_and_vega(
        contract: &OptionContract,
        vol: f64,
    ) -> Result<(f64, f64), PricingError> {
        let terms = Terms::new(contract, vol)?;
        Ok((terms.price(contract), terms.vega(contract)))
    }

    fn greek_set(terms: &Terms, contract: &OptionContract, vol: f64) -> GreekSet {
        GreekSet {
            delta: terms.delta(contract),
            gamma: terms.gamma(contract, vol),
            vega: terms.vega(contract),
            theta: terms.theta(contract, vol),
            rho: terms.rho(contract),
        }
    }
}
