//! Discretization-error sampling against the analytic reference.
//!
//! Revalues the same contract on trees of increasing depth and pairs the
//! series with the closed-form Black-Scholes value, so a caller can tabulate
//! or plot how fast the lattice price settles. Each sample is an independent
//! pure valuation with no shared state, which is what makes the feature-gated
//! parallel variant a drop-in: both produce identical output.

use crate::core::{OptionType, PricingError};
use crate::engines::analytic::bs_call_put;
use crate::engines::tree::CrrEngine;
use crate::instruments::EuropeanOption;
use crate::market::Market;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// One sampled tree depth and the root value it produced.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ConvergencePoint {
    /// Tree depth the valuation ran at.
    pub steps: usize,
    /// Lattice present value at that depth.
    pub value: f64,
}

/// A convergence series plus its analytic target.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ConvergenceStudy {
    /// Samples in increasing step order.
    pub points: Vec<ConvergencePoint>,
    /// Closed-form Black-Scholes value for the option's side.
    pub reference: f64,
}

impl ConvergenceStudy {
    /// Absolute errors `|value − reference|` in sample order.
    pub fn errors(&self) -> impl Iterator<Item = f64> + '_ {
        self.points
            .iter()
            .map(move |point| (point.value - self.reference).abs())
    }
}

/// Sampled depths: decades from 10 up to `max(10, steps_hint) + 10`.
fn step_grid(steps_hint: usize) -> impl Iterator<Item = usize> {
    (10..=steps_hint.max(10) + 10).step_by(10)
}

fn reference_value(option: &EuropeanOption, market: &Market) -> f64 {
    let (call, put) = bs_call_put(
        market.spot,
        option.strike,
        market.rate,
        market.vol,
        option.expiry,
    );
    match option.option_type {
        OptionType::Call => call,
        OptionType::Put => put,
    }
}

/// Samples lattice values across the step grid, sequentially.
///
/// `steps_hint` is typically the depth the caller plans to display; the grid
/// extends one decade past it so the tail of the series brackets the working
/// resolution.
pub fn convergence_study(
    option: &EuropeanOption,
    market: &Market,
    steps_hint: usize,
) -> Result<ConvergenceStudy, PricingError> {
    option.validate()?;

    let mut points = Vec::new();
    for steps in step_grid(steps_hint) {
        let valuation = CrrEngine::new(steps).valuate(option, market)?;
        points.push(ConvergencePoint {
            steps,
            value: valuation.value,
        });
    }

    Ok(ConvergenceStudy {
        points,
        reference: reference_value(option, market),
    })
}

/// Samples the same grid with a Rayon parallel map.
///
/// Output is identical to [`convergence_study`]: the per-depth valuations are
/// pure and independent, so only wall-clock time changes.
#[cfg(feature = "parallel")]
pub fn convergence_study_parallel(
    option: &EuropeanOption,
    market: &Market,
    steps_hint: usize,
) -> Result<ConvergenceStudy, PricingError> {
    option.validate()?;

    let grid: Vec<usize> = step_grid(steps_hint).collect();
    let points = grid
        .into_par_iter()
        .map(|steps| {
            CrrEngine::new(steps)
                .valuate(option, market)
                .map(|valuation| ConvergencePoint {
                    steps,
                    value: valuation.value,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ConvergenceStudy {
        points,
        reference: reference_value(option, market),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (EuropeanOption, Market) {
        let option = EuropeanOption::put(40.0, 1.0);
        let market = Market::builder()
            .spot(36.0)
            .rate(0.06)
            .flat_vol(0.2)
            .build()
            .unwrap();
        (option, market)
    }

    #[test]
    fn grid_runs_in_decades_and_extends_past_the_hint() {
        let (option, market) = setup();

        let study = convergence_study(&option, &market, 100).unwrap();
        let steps: Vec<usize> = study.points.iter().map(|p| p.steps).collect();
        assert_eq!(steps.first(), Some(&10));
        assert_eq!(steps.last(), Some(&110));
        assert!(steps.windows(2).all(|w| w[1] - w[0] == 10));
    }

    #[test]
    fn small_hints_still_cover_a_decade_past_ten() {
        let (option, market) = setup();

        let study = convergence_study(&option, &market, 1).unwrap();
        let steps: Vec<usize> = study.points.iter().map(|p| p.steps).collect();
        assert_eq!(steps, vec![10, 20]);
    }

    #[test]
    fn reference_is_the_parity_consistent_side() {
        let (option, market) = setup();

        let study = convergence_study(&option, &market, 10).unwrap();
        let (_, put) = bs_call_put(36.0, 40.0, 0.06, 0.2, 1.0);
        assert_eq!(study.reference, put);
    }

    #[test]
    fn invalid_contracts_are_rejected_before_sampling() {
        let (_, market) = setup();
        let bad = EuropeanOption::put(40.0, 0.0);
        assert!(convergence_study(&bad, &market, 10).is_err());
    }
}
