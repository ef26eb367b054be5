use ferrictree::core::{OptionType, PricingEngine};
use ferrictree::engines::analytic::BlackScholesEngine;
use ferrictree::instruments::EuropeanOption;
use ferrictree::market::Market;
use ferrictree::pricing::european::black_scholes_call_put;

#[derive(Debug, Clone, Copy)]
struct EuropeanCase {
    option_type: OptionType,
    strike: f64,
    spot: f64,
    rate: f64,
    expiry: f64,
    vol: f64,
    expected: f64,
    tolerance: f64,
}

/// Textbook reference values: Hull (11th ed.) Ch. 15 worked examples and the
/// Longstaff-Schwartz (2001) European benchmark case.
const CASES: &[EuropeanCase] = &[
    EuropeanCase {
        option_type: OptionType::Call,
        strike: 100.0,
        spot: 100.0,
        rate: 0.05,
        expiry: 1.0,
        vol: 0.20,
        expected: 10.4506,
        tolerance: 1.0e-3,
    },
    EuropeanCase {
        option_type: OptionType::Put,
        strike: 100.0,
        spot: 100.0,
        rate: 0.05,
        expiry: 1.0,
        vol: 0.20,
        expected: 5.5735,
        tolerance: 1.0e-3,
    },
    EuropeanCase {
        option_type: OptionType::Put,
        strike: 40.0,
        spot: 36.0,
        rate: 0.06,
        expiry: 1.0,
        vol: 0.20,
        expected: 3.8443,
        tolerance: 1.5e-3,
    },
    EuropeanCase {
        option_type: OptionType::Call,
        strike: 40.0,
        spot: 36.0,
        rate: 0.06,
        expiry: 1.0,
        vol: 0.20,
        expected: 2.1736,
        tolerance: 1.5e-3,
    },
    EuropeanCase {
        option_type: OptionType::Call,
        strike: 40.0,
        spot: 42.0,
        rate: 0.10,
        expiry: 0.5,
        vol: 0.20,
        expected: 4.7628,
        tolerance: 1.5e-3,
    },
    EuropeanCase {
        option_type: OptionType::Put,
        strike: 40.0,
        spot: 42.0,
        rate: 0.10,
        expiry: 0.5,
        vol: 0.20,
        expected: 0.8120,
        tolerance: 1.5e-3,
    },
];

fn market_for(case: &EuropeanCase) -> Market {
    Market::builder()
        .spot(case.spot)
        .rate(case.rate)
        .flat_vol(case.vol)
        .build()
        .expect("valid market")
}

#[test]
fn engine_matches_textbook_reference_values() {
    let engine = BlackScholesEngine::new();

    for case in CASES {
        let option = EuropeanOption::new(case.option_type, case.strike, case.expiry);
        let price = engine
            .price(&option, &market_for(case))
            .expect("pricing succeeds")
            .price;
        let err = (price - case.expected).abs();

        assert!(
            err <= case.tolerance,
            "{:?} S={} K={} r={} t={} vol={} expected={} got={price} err={err}",
            case.option_type,
            case.spot,
            case.strike,
            case.rate,
            case.expiry,
            case.vol,
            case.expected
        );
    }
}

#[test]
fn put_call_parity_holds_across_a_parameter_sweep() {
    for &spot in &[25.0, 80.0, 100.0, 140.0] {
        for &strike in &[50.0, 100.0, 110.0] {
            for &rate in &[0.0, 0.03, 0.08] {
                for &vol in &[0.1, 0.25, 0.6] {
                    for &expiry in &[0.25, 1.0, 3.0] {
                        let (call, put) =
                            black_scholes_call_put(spot, strike, rate, vol, expiry).unwrap();
                        let rhs = spot - strike * (-rate * expiry).exp();
                        assert!(
                            ((call - put) - rhs).abs() <= 1e-12,
                            "parity failed for S={spot} K={strike} r={rate} vol={vol} t={expiry}: \
                             C-P={} rhs={rhs}",
                            call - put
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn hand_assembled_degenerate_markets_are_rejected() {
    let engine = BlackScholesEngine::new();
    let option = EuropeanOption::call(100.0, 1.0);

    let zero_vol = Market {
        spot: 100.0,
        rate: 0.05,
        vol: 0.0,
    };
    assert!(engine.price(&option, &zero_vol).is_err());

    let negative_spot = Market {
        spot: -100.0,
        rate: 0.05,
        vol: 0.2,
    };
    assert!(engine.price(&option, &negative_spot).is_err());
}
