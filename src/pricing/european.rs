//! Module `pricing::european`.
//!
//! Implements the scalar-in/scalar-out workflow boundary with concrete
//! routines such as `black_scholes_call_put`, `crr_option_value`, and
//! `price_lattice`.
//!
//! References: Hull (11th ed.) for payoff identities and Cox-Ross-Rubinstein
//! (1979) for the lattice parameterization implemented by the engines these
//! wrappers delegate to.
//!
//! Numerical considerations: the wrappers perform the parameter validation
//! the raw kernels assume. Non-positive spot/strike/expiry/vol and a zero
//! step count are rejected here, before any engine arithmetic runs.
//!
//! When to use: use these direct helpers for quick valuation tasks; prefer
//! instruments plus engines composition for larger systems and
//! extensibility.

use crate::core::{OptionType, PricingError};
use crate::engines::analytic::bs_call_put;
use crate::engines::tree::{self, CrrEngine, CrrValuation};
use crate::instruments::EuropeanOption;
use crate::lattice::Lattice;
use crate::market::Market;

/// Builds the validated underlying price lattice.
///
/// # Errors
/// Rejects non-positive `spot`, `vol`, or `expiry` and `steps == 0` with
/// [`PricingError::InvalidInput`].
///
/// # Examples
/// ```rust
/// use ferrictree::pricing::european::price_lattice;
///
/// let lattice = price_lattice(36.0, 0.2, 1.0, 10).unwrap();
/// assert_eq!(lattice.steps(), 10);
/// assert_eq!(lattice.root(), 36.0);
/// ```
pub fn price_lattice(
    spot: f64,
    vol: f64,
    expiry: f64,
    steps: usize,
) -> Result<Lattice, PricingError> {
    let market = Market::builder().spot(spot).flat_vol(vol).build()?;
    if expiry <= 0.0 {
        return Err(PricingError::InvalidInput(
            "expiry must be > 0".to_string(),
        ));
    }
    if steps == 0 {
        return Err(PricingError::InvalidInput(
            "binomial steps must be > 0".to_string(),
        ));
    }
    Ok(tree::build_price_lattice(market.spot, market.vol, expiry, steps))
}

/// Values a European option on a CRR tree, returning the root value and both
/// lattices.
///
/// # Examples
/// ```rust
/// use ferrictree::core::OptionType;
/// use ferrictree::pricing::european::crr_option_value;
///
/// let valuation = crr_option_value(OptionType::Put, 36.0, 40.0, 0.06, 0.2, 1.0, 100).unwrap();
/// assert!((valuation.value - 3.84).abs() < 0.05);
/// ```
pub fn crr_option_value(
    option_type: OptionType,
    spot: f64,
    strike: f64,
    rate: f64,
    vol: f64,
    expiry: f64,
    steps: usize,
) -> Result<CrrValuation, PricingError> {
    let option = EuropeanOption::new(option_type, strike, expiry);
    let market = Market::builder()
        .spot(spot)
        .rate(rate)
        .flat_vol(vol)
        .build()?;
    CrrEngine::new(steps).valuate(&option, &market)
}

/// Closed-form Black-Scholes call and parity put.
///
/// # Examples
/// ```rust
/// use ferrictree::pricing::european::black_scholes_call_put;
///
/// let (call, put) = black_scholes_call_put(100.0, 100.0, 0.05, 0.20, 1.0).unwrap();
/// assert!(call > put);
/// ```
pub fn black_scholes_call_put(
    spot: f64,
    strike: f64,
    rate: f64,
    vol: f64,
    expiry: f64,
) -> Result<(f64, f64), PricingError> {
    let market = Market::builder()
        .spot(spot)
        .rate(rate)
        .flat_vol(vol)
        .build()?;
    // Either side carries the same strike/expiry validation.
    EuropeanOption::call(strike, expiry).validate()?;
    Ok(bs_call_put(market.spot, strike, market.rate, market.vol, expiry))
}
