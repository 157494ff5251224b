//! Contract types for the pricing engine.

use super::error::PricingError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Option type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionType {
    /// Call option (right to buy the underlying at strike price).
    Call,
    /// Put option (right to sell the underlying at strike price).
    Put,
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "call"),
            OptionType::Put => write!(f, "put"),
        }
    }
}

impl FromStr for OptionType {
    type Err = PricingError;

    /// Parses `call`/`c` or `put`/`p`, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "call" | "c" => Ok(OptionType::Call),
            "put" | "p" => Ok(OptionType::Put),
            _ => Err(PricingError::InvalidOptionType {
                value: s.to_string(),
            }),
        }
    }
}

/// Terms of a European option, everything except volatility.
///
/// Construction does not validate; the pricing functions call
/// [`validate`](Self::validate) on every evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionContract {
    /// Underlying spot price (S).
    pub spot: f64,
    /// Option strike price (K).
    pub strike: f64,
    /// Time to expiration in years (e.g., 30 days = 30.0 / 365.0).
    pub time_to_expiry: f64,
    /// Risk-free interest rate, annualized and continuously compounded.
    pub risk_free_rate: f64,
    /// Call or Put.
    pub option_type: OptionType,
}

impl OptionContract {
    /// Creates a new contract.
    ///
    /// # Arguments
    /// - `spot`: Underlying spot price
    /// - `strike`: Option strike price
    /// - `time_to_expiry`: Time to expiration in years
    /// - `risk_free_rate`: Risk-free interest rate (annualized)
    /// - `option_type`: Call or Put
    #[must_use]
    pub fn new(
        spot: f64,
        strike: f64,
        time_to_expiry: f64,
        risk_free_rate: f64,
        option_type: OptionType,
    ) -> Self {
        Self {
            spot,
            strike,
            time_to_expiry,
            risk_free_rate,
            option_type,
        }
    }

    /// Creates a call contract.
    #[must_use]
    pub fn call(spot: f64, strike: f64, time_to_expiry: f64, risk_free_rate: f64) -> Self {
        Self::new(
            spot,
            strike,
            time_to_expiry,
            risk_free_rate,
            OptionType::Call,
        )
    }

    /// Creates a put contract.
    #[must_use]
    pub fn put(spot: f64, strike: f64, time_to_expiry: f64, risk_free_rate: f64) -> Self {
        Self::new(
            spot,
            strike,
            time_to_expiry,
            risk_free_rate,
            OptionType::Put,
        )
    }

    /// Returns the same terms with a different option type.
    #[must_use]
    pub fn with_option_type(mut self, option_type: OptionType) -> Self {
        self.option_type = option_type;
        self
    }

    /// Checks the contract against the closed-form formulas' domain.
    ///
    /// Requires finite inputs with `spot > 0`, `strike > 0` and
    /// `time_to_expiry > 0`. The rate may be any finite value.
    pub fn validate(&self) -> Result<(), PricingError> {
        check_finite("spot", self.spot)?;
        check_finite("strike", self.strike)?;
        check_finite("time_to_expiry", self.time_to_expiry)?;
        check_finite("risk_free_rate", self.risk_free_rate)?;

        if self.spot <= 0.0 {
            return Err(PricingError::NonPositiveSpot { spot: self.spot });
        }
        if self.strike <= 0.0 {
            return Err(PricingError::NonPositiveStrike {
                strike: self.strike,
            });
        }
        if self.time_to_expiry <= 0.0 {
            return Err(PricingError::NonPositiveTime {
                time_to_expiry: self.time_to_expiry,
            });
        }
        Ok(())
    }

    /// Discount factor `e^(-rT)`.
    #[must_use]
    pub fn discount_factor(&self) -> f64 {
        (-self.risk_free_rate * self.time_to_expiry).exp()
    }

    /// Intrinsic value, which is also the option's value at expiry.
    ///
    /// For calls: max(0, spot - strike)
    /// For puts: max(0, strike - spot)
    #[must_use]
    pub fn intrinsic_value(&self) -> f64 {
        match self.option_type {
            OptionType::Call => (self.spot - self.strike).max(0.0),
            OptionType::Put => (self.strike - self.spot).max(0.0),
        }
    }

    /// Model-free no-arbitrage bounds `(lower, upper)` on the option price.
    ///
    /// Calls: `[max(S - K·e^(-rT), 0), S]`.
    /// Puts: `[max(K·e^(-rT) - S, 0), K·e^(-rT)]`.
    #[must_use]
    pub fn price_bounds(&self) -> (f64, f64) {
        let pv_strike = self.strike * self.discount_factor();
        match self.option_type {
            OptionType::Call => ((self.spot - pv_strike).max(0.0), self.spot),
            OptionType::Put => ((pv_strike - self.spot).max(0.0), pv_strike),
        }
    }

    /// Returns true if the option is in-the-money.
    #[must_use]
    pub fn is_itm(&self) -> bool {
        self.intrinsic_value() > 0.0
    }

    /// Returns true if the option is at-the-money (within 0.1% of strike).
    #[must_use]
    pub fn is_atm(&self) -> bool {
        (self.spot - self.strike).abs() / self.strike < 0.001
    }

    /// Returns true if the option is out-of-the-money.
    #[must_use]
    pub fn is_otm(&self) -> bool {
        !self.is_itm() && !self.is_atm()
    }
}

fn check_finite(field: &'static str, value: f64) -> Result<(), PricingError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PricingError::NonFiniteInput { field, value })
    }
}
