//! Tree-based pricing engines.

pub mod crr;

pub use crr::{CrrEngine, CrrParams, CrrValuation, build_price_lattice};
