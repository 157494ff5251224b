//! Error types for the pricing engine.

use std::fmt;

/// Domain errors raised when pricing inputs fall outside the model's support.
///
/// These are caller contract violations: the engine never recovers from them
/// locally and never substitutes a default.
#[derive(Debug, Clone, PartialEq)]
pub enum PricingError {
    /// Spot price must be strictly positive.
    NonPositiveSpot {
        /// Offending spot price.
        spot: f64,
    },

    /// Strike price must be strictly positive.
    NonPositiveStrike {
        /// Offending strike price.
        strike: f64,
    },

    /// Time to expiry must be strictly positive for the closed-form formulas.
    ///
    /// At `T = 0` the option is worth its intrinsic value; see
    /// [`OptionContract::intrinsic_value`](super::OptionContract::intrinsic_value).
    NonPositiveTime {
        /// Offending time to expiry in years.
        time_to_expiry: f64,
    },

    /// Volatility must be strictly positive.
    NonPositiveVolatility {
        /// Offending volatility.
        volatility: f64,
    },

    /// An input was NaN or infinite.
    NonFiniteInput {
        /// Name of the offending field.
        field: &'static str,
        /// Offending value.
        value: f64,
    },

    /// Option type flag was not recognised.
    InvalidOptionType {
        /// The unrecognised flag as supplied.
        value: String,
    },
}

impl fmt::Display for PricingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingError::NonPositiveSpot { spot } => {
                write!(f, "spot price must be positive, got {spot}")
            }
            PricingError::NonPositiveStrike { strike } => {
                write!(f, "strike price must be positive, got {strike}")
            }
            PricingError::NonPositiveTime { time_to_expiry } => {
                write!(
                    f,
                    "time to expiry must be positive, got {time_to_expiry} years"
                )
            }
            PricingError::NonPositiveVolatility { volatility } => {
                write!(f, "volatility must be positive, got {volatility}")
            }
            PricingError::NonFiniteInput { field, value } => {
                write!(f, "{field} must be finite, got {value}")
            }
            PricingError::InvalidOptionType { value } => {
                write!(
                    f,
                    "invalid option type '{value}': expected one of call, c, put, p"
                )
            }
        }
    }
}

impl std::error::Error for PricingError {}
