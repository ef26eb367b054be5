//! FerricTree prices European vanilla options on a Cox-Ross-Rubinstein (CRR)
//! binomial lattice and compares the discrete prices against the closed-form
//! Black-Scholes value.
//!
//! The crate is a pure numeric engine: it builds the recombining underlying
//! lattice, runs risk-neutral backward induction over it, evaluates the
//! analytic reference, and samples the discretization error across step
//! counts. Parameter collection and rendering (tables, plots) belong to the
//! caller; every public entry point takes plain scalars or value types and
//! returns scalars and lattices.
//!
//! References used across modules:
//! - Cox, Ross & Rubinstein (1979) for the lattice parameterization.
//! - Hull, *Options, Futures, and Other Derivatives* (11th ed.), Ch. 13 for
//!   backward induction and Ch. 15 for the Black-Scholes-Merton formula.
//! - Abramowitz & Stegun 7.1.26 for the normal CDF approximation.
//!
//! Numerical considerations:
//! - All arithmetic is plain `f64`; valuations are deterministic and
//!   repeatable bit for bit.
//! - The lattice price converges to the analytic value at first order in the
//!   step count, oscillating around it; use the convergence sampler to pick
//!   a depth for a target accuracy.
//! - The risk-neutral probability `q` is exposed but deliberately not
//!   range-checked; see [`engines::tree::CrrParams::is_arbitrage_free`].
//!
//! # Feature Flags
//! - `parallel`: enables the Rayon-powered convergence sampler.
//!
//! # Quick Start
//! Price a call and its parity put analytically:
//! ```rust
//! use ferrictree::pricing::european::black_scholes_call_put;
//!
//! let (call, put) = black_scholes_call_put(100.0, 100.0, 0.05, 0.20, 1.0).unwrap();
//! assert!(call > 10.0 && call < 11.0);
//! assert!(put > 5.0 && put < 6.0);
//! ```
//!
//! Value an option on the lattice and inspect the grids:
//! ```rust
//! use ferrictree::engines::tree::CrrEngine;
//! use ferrictree::instruments::EuropeanOption;
//! use ferrictree::market::Market;
//!
//! let option = EuropeanOption::put(40.0, 1.0);
//! let market = Market::builder()
//!     .spot(36.0)
//!     .rate(0.06)
//!     .flat_vol(0.20)
//!     .build()
//!     .unwrap();
//!
//! let valuation = CrrEngine::new(500).valuate(&option, &market).unwrap();
//! assert!((valuation.value - 3.844).abs() < 0.01);
//! assert_eq!(valuation.values.get(0, 0), Some(valuation.value));
//! ```
//!
//! Sample convergence against the analytic reference:
//! ```rust
//! use ferrictree::instruments::EuropeanOption;
//! use ferrictree::market::Market;
//! use ferrictree::pricing::convergence::convergence_study;
//!
//! let option = EuropeanOption::put(40.0, 1.0);
//! let market = Market::builder()
//!     .spot(36.0)
//!     .rate(0.06)
//!     .flat_vol(0.20)
//!     .build()
//!     .unwrap();
//!
//! let study = convergence_study(&option, &market, 40).unwrap();
//! assert_eq!(study.points.first().unwrap().steps, 10);
//! assert!((study.points.last().unwrap().value - study.reference).abs() < 0.05);
//! ```

pub mod core;
pub mod engines;
pub mod instruments;
pub mod lattice;
pub mod market;
pub mod math;
pub mod pricing;

/// Common imports for ergonomic usage.
pub mod prelude {
    pub use crate::core::*;
    pub use crate::engines::analytic::*;
    pub use crate::engines::tree::*;
    pub use crate::instruments::*;
    pub use crate::lattice::*;
    pub use crate::market::*;
}
