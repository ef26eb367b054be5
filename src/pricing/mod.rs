//! Direct pricing workflows over the engine layer.

pub mod convergence;
pub mod european;

pub use convergence::{ConvergencePoint, ConvergenceStudy, convergence_study};
pub use european::{black_scholes_call_put, crr_option_value, price_lattice};
