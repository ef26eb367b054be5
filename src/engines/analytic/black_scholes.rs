use crate::core::{
    DiagKey, Diagnostics, Greeks, OptionType, PricingEngine, PricingError, PricingResult,
};
use crate::instruments::EuropeanOption;
use crate::market::Market;
use crate::math::{normal_cdf, normal_pdf};

/// Analytic Black-Scholes engine for European vanilla options.
///
/// Serves as the convergence target for the lattice engine: as the step count
/// grows, the tree price approaches the value produced here.
#[derive(Debug, Clone, Default)]
pub struct BlackScholesEngine;

impl BlackScholesEngine {
    /// Creates a Black-Scholes engine instance.
    pub fn new() -> Self {
        Self
    }
}

#[inline]
fn d1_d2(spot: f64, strike: f64, rate: f64, vol: f64, expiry: f64) -> (f64, f64) {
    let sig_sqrt_t = vol * expiry.sqrt();
    let d1 = ((spot / strike).ln() + (rate + 0.5 * vol * vol) * expiry) / sig_sqrt_t;
    (d1, d1 - sig_sqrt_t)
}

/// Closed-form call price and its parity put.
///
/// `call = S·Φ(d1) − K·e^{−rT}·Φ(d2)`; the put is then
/// `call + K·e^{−rT} − S`, derived from put-call parity off the computed call
/// rather than from a second Φ-based formula. The two prices therefore can
/// never drift apart.
///
/// Assumes `vol > 0` and `expiry > 0`; with either at zero the division by
/// `σ√T` propagates NaN, so validated callers never pass those (see
/// [`crate::pricing::european::black_scholes_call_put`]).
#[inline]
pub fn bs_call_put(spot: f64, strike: f64, rate: f64, vol: f64, expiry: f64) -> (f64, f64) {
    let (d1, d2) = d1_d2(spot, strike, rate, vol, expiry);
    let df = (-rate * expiry).exp();
    let call = spot * normal_cdf(d1) - strike * df * normal_cdf(d2);
    let put = call + strike * df - spot;
    (call, put)
}

/// Closed-form Greeks for one option side.
///
/// Same preconditions as [`bs_call_put`].
pub fn bs_greeks(
    option_type: OptionType,
    spot: f64,
    strike: f64,
    rate: f64,
    vol: f64,
    expiry: f64,
) -> Greeks {
    let (d1, d2) = d1_d2(spot, strike, rate, vol, expiry);
    let sqrt_t = expiry.sqrt();
    let df = (-rate * expiry).exp();
    let pdf_d1 = normal_pdf(d1);

    let gamma = pdf_d1 / (spot * vol * sqrt_t);
    let vega = spot * pdf_d1 * sqrt_t;

    match option_type {
        OptionType::Call => Greeks {
            delta: normal_cdf(d1),
            gamma,
            vega,
            theta: -spot * pdf_d1 * vol / (2.0 * sqrt_t) - rate * strike * df * normal_cdf(d2),
            rho: strike * expiry * df * normal_cdf(d2),
        },
        OptionType::Put => Greeks {
            delta: normal_cdf(d1) - 1.0,
            gamma,
            vega,
            theta: -spot * pdf_d1 * vol / (2.0 * sqrt_t) + rate * strike * df * normal_cdf(-d2),
            rho: -strike * expiry * df * normal_cdf(-d2),
        },
    }
}

impl PricingEngine<EuropeanOption> for BlackScholesEngine {
    fn price(
        &self,
        instrument: &EuropeanOption,
        market: &Market,
    ) -> Result<PricingResult, PricingError> {
        instrument.validate()?;
        if market.spot <= 0.0 {
            return Err(PricingError::InvalidInput(
                "market spot must be > 0".to_string(),
            ));
        }
        if market.vol <= 0.0 {
            return Err(PricingError::InvalidInput(
                "market volatility must be > 0".to_string(),
            ));
        }

        let (call, put) = bs_call_put(
            market.spot,
            instrument.strike,
            market.rate,
            market.vol,
            instrument.expiry,
        );
        let price = match instrument.option_type {
            OptionType::Call => call,
            OptionType::Put => put,
        };
        let greeks = bs_greeks(
            instrument.option_type,
            market.spot,
            instrument.strike,
            market.rate,
            market.vol,
            instrument.expiry,
        );

        let (d1, d2) = d1_d2(
            market.spot,
            instrument.strike,
            market.rate,
            market.vol,
            instrument.expiry,
        );
        let mut diagnostics = Diagnostics::new();
        diagnostics.insert_key(DiagKey::D1, d1);
        diagnostics.insert_key(DiagKey::D2, d2);
        diagnostics.insert_key(DiagKey::Vol, market.vol);

        Ok(PricingResult {
            price,
            greeks: Some(greeks),
            diagnostics,
        })
    }
}
