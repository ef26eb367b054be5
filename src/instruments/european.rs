//! Canonical European vanilla contract definition used throughout the library.
//!
//! [`EuropeanOption`] stores side, strike, and expiry. Exercise happens only
//! at expiry; early-exercise rights are outside this crate's scope, so there
//! is no exercise-style field. Validation enforces strictly positive strike
//! and expiry: the analytic kernels divide by `σ√T` and the lattice spacing
//! is `T/M`, so zero-maturity contracts are rejected up front rather than
//! priced at intrinsic value.

use crate::core::{Instrument, OptionType, PricingError};

/// European vanilla option contract.
///
/// This is the canonical input for both the lattice and the analytic engine:
/// strike `K`, expiry `T` in year fractions, and the option side.
///
/// # Examples
/// ```
/// use ferrictree::core::OptionType;
/// use ferrictree::instruments::EuropeanOption;
///
/// let option = EuropeanOption::call(100.0, 1.0);
/// assert_eq!(option.option_type, OptionType::Call);
/// assert!(option.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EuropeanOption {
    /// Call or put.
    pub option_type: OptionType,
    /// Strike level.
    pub strike: f64,
    /// Expiry in years.
    pub expiry: f64,
}

impl EuropeanOption {
    /// Builds a contract with an explicit side.
    pub fn new(option_type: OptionType, strike: f64, expiry: f64) -> Self {
        Self {
            option_type,
            strike,
            expiry,
        }
    }

    /// Builds a European call option.
    pub fn call(strike: f64, expiry: f64) -> Self {
        Self::new(OptionType::Call, strike, expiry)
    }

    /// Builds a European put option.
    pub fn put(strike: f64, expiry: f64) -> Self {
        Self::new(OptionType::Put, strike, expiry)
    }

    /// Validates instrument fields.
    ///
    /// # Errors
    /// Returns [`PricingError::InvalidInput`] when `strike <= 0` or
    /// `expiry <= 0`.
    pub fn validate(&self) -> Result<(), PricingError> {
        if self.strike <= 0.0 {
            return Err(PricingError::InvalidInput(
                "option strike must be > 0".to_string(),
            ));
        }
        if self.expiry <= 0.0 {
            return Err(PricingError::InvalidInput(
                "option expiry must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Instrument for EuropeanOption {
    fn instrument_type(&self) -> &str {
        "EuropeanOption"
    }
}
