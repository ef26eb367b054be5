//! Module `engines::tree::crr`.
//!
//! Cox-Ross-Rubinstein lattice construction and backward-induction valuation
//! for European vanilla options.
//!
//! References: Cox, Ross & Rubinstein (1979); Hull (11th ed.) Ch. 13 and the
//! backward-induction recursion around Eq. (13.10).
//!
//! Key types and purpose: [`CrrParams`] is the single source of the
//! discretization factors, so the price grid and the induction can never
//! disagree; [`CrrEngine`] produces a [`CrrValuation`] carrying the root
//! value together with both full lattices for inspection.
//!
//! Numerical considerations: convergence to the analytic value is first-order
//! in step count and oscillates around it. The risk-neutral probability `q`
//! is only economically meaningful inside `(0, 1)`; the engine reports it
//! rather than rejecting it, see [`CrrParams::is_arbitrage_free`].

use crate::core::{DiagKey, Diagnostics, PricingEngine, PricingError, PricingResult};
use crate::instruments::EuropeanOption;
use crate::lattice::Lattice;
use crate::market::Market;

/// Discretization factors derived once per valuation and shared by lattice
/// construction and backward induction.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CrrParams {
    /// Step length `T / M` in years.
    pub dt: f64,
    /// Up-move factor `exp(σ√dt)`.
    pub up: f64,
    /// Down-move factor `1 / up`; `up · down = 1` keeps the tree recombining.
    pub down: f64,
    /// Risk-neutral up probability `(exp(r·dt) − down) / (up − down)`.
    pub q: f64,
    /// Per-step discount factor `exp(−r·dt)`.
    pub discount: f64,
}

impl CrrParams {
    /// Derives the factor set for `steps` intervals over `expiry` years.
    pub fn derive(rate: f64, vol: f64, expiry: f64, steps: usize) -> Self {
        let dt = expiry / steps as f64;
        let up = (vol * dt.sqrt()).exp();
        let down = 1.0 / up;
        let q = ((rate * dt).exp() - down) / (up - down);
        let discount = (-rate * dt).exp();
        Self {
            dt,
            up,
            down,
            q,
            discount,
        }
    }

    /// Whether `down < exp(r·dt) < up` holds, i.e. `q` lies in `(0, 1)`.
    ///
    /// Outside that band the backward induction still produces a well-defined
    /// number, but it is not an arbitrage-free price. Valuation does not
    /// reject such parameter sets; callers wanting a warning path check here.
    #[inline]
    pub fn is_arbitrage_free(&self) -> bool {
        self.q > 0.0 && self.q < 1.0
    }

    /// Underlying level at node `(j, t)`: `spot · up^(t−j) · down^j`.
    #[inline]
    fn node_price(&self, spot: f64, j: usize, t: usize) -> f64 {
        spot * self.up.powi((t - j) as i32) * self.down.powi(j as i32)
    }

    /// Builds the underlying price grid for `steps` intervals.
    pub fn price_lattice(&self, spot: f64, steps: usize) -> Lattice {
        Lattice::build(steps, |j, t| self.node_price(spot, j, t))
    }
}

/// Builds the underlying price lattice for `(spot, vol, expiry, steps)`.
///
/// The grid depends only on the volatility and the step length; the rate
/// enters `q` and the discount factor, neither of which the builder uses.
/// No validation happens here; callers reject non-positive parameters and
/// `steps == 0` before invoking (see [`crate::pricing::european`]).
pub fn build_price_lattice(spot: f64, vol: f64, expiry: f64, steps: usize) -> Lattice {
    CrrParams::derive(0.0, vol, expiry, steps).price_lattice(spot, steps)
}

/// Full output of a lattice valuation.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CrrValuation {
    /// Present value, `values(0, 0)`.
    pub value: f64,
    /// Underlying price grid.
    pub prices: Lattice,
    /// Discounted option value grid.
    pub values: Lattice,
    /// Factor set the valuation ran with.
    pub params: CrrParams,
}

/// Cox-Ross-Rubinstein binomial tree engine for European options.
#[derive(Debug, Clone)]
pub struct CrrEngine {
    /// Number of tree steps.
    pub steps: usize,
}

impl CrrEngine {
    /// Creates a tree engine with the given number of steps.
    pub fn new(steps: usize) -> Self {
        Self { steps }
    }

    fn check(&self, instrument: &EuropeanOption, market: &Market) -> Result<(), PricingError> {
        instrument.validate()?;
        if self.steps == 0 {
            return Err(PricingError::InvalidInput(
                "binomial steps must be > 0".to_string(),
            ));
        }
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
        Ok(())
    }

    /// Values the option, building the price grid internally.
    pub fn valuate(
        &self,
        instrument: &EuropeanOption,
        market: &Market,
    ) -> Result<CrrValuation, PricingError> {
        self.check(instrument, market)?;
        let params = CrrParams::derive(market.rate, market.vol, instrument.expiry, self.steps);
        let prices = params.price_lattice(market.spot, self.steps);
        Ok(self.induct(instrument, params, prices))
    }

    /// Values the option over a precomputed price grid.
    ///
    /// The grid must come from the same parameter set (same spot, vol, and
    /// expiry as the market snapshot, same step count as the engine);
    /// a mismatched step count is rejected, the rest is the caller's contract.
    pub fn valuate_on(
        &self,
        instrument: &EuropeanOption,
        market: &Market,
        prices: &Lattice,
    ) -> Result<CrrValuation, PricingError> {
        self.check(instrument, market)?;
        if prices.steps() != self.steps {
            return Err(PricingError::InvalidInput(format!(
                "price lattice has {} steps, engine expects {}",
                prices.steps(),
                self.steps
            )));
        }
        let params = CrrParams::derive(market.rate, market.vol, instrument.expiry, self.steps);
        Ok(self.induct(instrument, params, prices.clone()))
    }

    /// Terminal payoff seeding and risk-neutral backward induction.
    fn induct(
        &self,
        instrument: &EuropeanOption,
        params: CrrParams,
        prices: Lattice,
    ) -> CrrValuation {
        let m = self.steps;
        let mut values = Lattice::zeroed(m);

        for j in 0..=m {
            let payoff = instrument
                .option_type
                .payoff(prices.at(j, m), instrument.strike);
            values.set(j, m, payoff);
        }

        // value(j, t) = df · [q·value(j, t+1) + (1−q)·value(j+1, t+1)]
        for t in (0..m).rev() {
            for j in 0..=t {
                let expectation =
                    params.q * values.at(j, t + 1) + (1.0 - params.q) * values.at(j + 1, t + 1);
                values.set(j, t, params.discount * expectation);
            }
        }

        CrrValuation {
            value: values.root(),
            prices,
            values,
            params,
        }
    }
}

impl PricingEngine<EuropeanOption> for CrrEngine {
    fn price(
        &self,
        instrument: &EuropeanOption,
        market: &Market,
    ) -> Result<PricingResult, PricingError> {
        let valuation = self.valuate(instrument, market)?;

        let mut diagnostics = Diagnostics::new();
        diagnostics.insert_key(DiagKey::NumSteps, self.steps as f64);
        diagnostics.insert_key(DiagKey::DeltaT, valuation.params.dt);
        diagnostics.insert_key(DiagKey::Up, valuation.params.up);
        diagnostics.insert_key(DiagKey::Down, valuation.params.down);
        diagnostics.insert_key(DiagKey::RiskNeutralProb, valuation.params.q);
        diagnostics.insert_key(DiagKey::DiscountFactor, valuation.params.discount);
        diagnostics.insert_key(DiagKey::Vol, market.vol);

        Ok(PricingResult {
            price: valuation.value,
            greeks: None,
            diagnostics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::analytic::bs_call_put;
    use approx::assert_relative_eq;

    fn market_36() -> Market {
        Market::builder()
            .spot(36.0)
            .rate(0.06)
            .flat_vol(0.2)
            .build()
            .unwrap()
    }

    #[test]
    fn single_step_put_matches_hand_rolled_expectation() {
        let option = EuropeanOption::put(40.0, 1.0);
        let valuation = CrrEngine::new(1).valuate(&option, &market_36()).unwrap();

        let u = 0.2f64.exp();
        let d = 1.0 / u;
        let q = (0.06f64.exp() - d) / (u - d);
        // Up node finishes out of the money; only the down node pays.
        let expected = (-0.06f64).exp() * (1.0 - q) * (40.0 - 36.0 * d);

        assert_relative_eq!(valuation.value, expected, epsilon = 1e-12);
        assert_relative_eq!(valuation.value, 3.9281, epsilon = 1e-4);
        assert_relative_eq!(valuation.params.q, 0.60373, epsilon = 1e-5);
    }

    #[test]
    fn deep_tree_approaches_analytic_value() {
        let option = EuropeanOption::put(40.0, 1.0);
        let market = market_36();
        let tree = CrrEngine::new(500).valuate(&option, &market).unwrap();
        let (_, put) = bs_call_put(market.spot, option.strike, market.rate, market.vol, option.expiry);

        assert_relative_eq!(tree.value, put, epsilon = 0.01);
    }

    #[test]
    fn price_grid_recombines() {
        let market = market_36();
        let option = EuropeanOption::call(40.0, 1.0);
        let valuation = CrrEngine::new(50).valuate(&option, &market).unwrap();

        assert_relative_eq!(
            valuation.params.up * valuation.params.down,
            1.0,
            epsilon = 1e-12
        );
        // One up-move and one down-move land back on the spot.
        assert_relative_eq!(
            valuation.prices.get(1, 2).unwrap(),
            market.spot,
            epsilon = 1e-9
        );
    }

    #[test]
    fn valuate_on_prebuilt_grid_matches_internal_build() {
        let option = EuropeanOption::call(40.0, 1.0);
        let market = market_36();
        let engine = CrrEngine::new(25);

        let prices = build_price_lattice(market.spot, market.vol, option.expiry, 25);
        let external = engine.valuate_on(&option, &market, &prices).unwrap();
        let internal = engine.valuate(&option, &market).unwrap();

        assert_eq!(external, internal);
    }

    #[test]
    fn valuate_on_rejects_mismatched_step_count() {
        let option = EuropeanOption::call(40.0, 1.0);
        let market = market_36();
        let prices = build_price_lattice(market.spot, market.vol, option.expiry, 10);

        let err = CrrEngine::new(25)
            .valuate_on(&option, &market, &prices)
            .unwrap_err();
        assert!(matches!(err, PricingError::InvalidInput(_)));
    }

    #[test]
    fn zero_steps_is_rejected() {
        let option = EuropeanOption::put(40.0, 1.0);
        let err = CrrEngine::new(0).valuate(&option, &market_36()).unwrap_err();
        assert!(matches!(err, PricingError::InvalidInput(_)));
    }

    #[test]
    fn q_is_reported_not_enforced() {
        let option = EuropeanOption::call(100.0, 1.0);
        // Rate large enough that exp(r·dt) clears the up-factor: q > 1.
        let market = Market::builder()
            .spot(100.0)
            .rate(2.0)
            .flat_vol(0.1)
            .build()
            .unwrap();

        let valuation = CrrEngine::new(1).valuate(&option, &market).unwrap();
        assert!(valuation.params.q > 1.0);
        assert!(!valuation.params.is_arbitrage_free());
        assert!(valuation.value.is_finite());

        let standard = CrrEngine::new(1).valuate(&option, &market_36()).unwrap();
        assert!(standard.params.is_arbitrage_free());
    }

    #[test]
    fn diagnostics_carry_the_factor_set() {
        let option = EuropeanOption::put(40.0, 1.0);
        let result = CrrEngine::new(10).price(&option, &market_36()).unwrap();

        assert_eq!(result.diagnostics.get("num_steps"), Some(&10.0));
        let q = *result.diagnostics.get("q").unwrap();
        assert!(q > 0.0 && q < 1.0);
        let u = *result.diagnostics.get("u").unwrap();
        let d = *result.diagnostics.get("d").unwrap();
        assert_relative_eq!(u * d, 1.0, epsilon = 1e-12);
        assert!(result.greeks.is_none());
    }
}
