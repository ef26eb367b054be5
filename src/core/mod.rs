//! Core traits, common domain types, and library-wide result/error structures.

use crate::market::Market;

pub mod types;

pub use types::*;

/// Standardized Greeks container used by engine results.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Greeks {
    /// First derivative to spot.
    pub delta: f64,
    /// Second derivative to spot.
    pub gamma: f64,
    /// First derivative to volatility.
    pub vega: f64,
    /// First derivative to time.
    pub theta: f64,
    /// First derivative to rate.
    pub rho: f64,
}

/// Common trait implemented by every priceable instrument.
pub trait Instrument: std::fmt::Debug {
    /// Returns a short type identifier for diagnostics and bindings.
    fn instrument_type(&self) -> &str;
}

/// Pricing engine abstraction over an instrument type.
pub trait PricingEngine<I: Instrument> {
    /// Prices an instrument under the provided market state.
    fn price(&self, instrument: &I, market: &Market) -> Result<PricingResult, PricingError>;
}

/// Compact key set for engine diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagKey {
    D1,
    D2,
    DeltaT,
    DiscountFactor,
    Down,
    NumSteps,
    RiskNeutralProb,
    Up,
    Vol,
}

impl DiagKey {
    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::D1 => "d1",
            Self::D2 => "d2",
            Self::DeltaT => "dt",
            Self::DiscountFactor => "discount_factor",
            Self::Down => "d",
            Self::NumSteps => "num_steps",
            Self::RiskNeutralProb => "q",
            Self::Up => "u",
            Self::Vol => "vol",
        }
    }
}

impl std::str::FromStr for DiagKey {
    type Err = ();

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        match key {
            "d1" => Ok(Self::D1),
            "d2" => Ok(Self::D2),
            "dt" => Ok(Self::DeltaT),
            "discount_factor" => Ok(Self::DiscountFactor),
            "d" => Ok(Self::Down),
            "num_steps" => Ok(Self::NumSteps),
            "q" => Ok(Self::RiskNeutralProb),
            "u" => Ok(Self::Up),
            "vol" => Ok(Self::Vol),
            _ => Err(()),
        }
    }
}

/// Inline diagnostics storage used in [`PricingResult`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    entries: [Option<(DiagKey, f64)>; 8],
}

impl Diagnostics {
    pub const CAPACITY: usize = 8;

    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.iter().flatten().count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries[0].is_none()
    }

    /// Inserts a diagnostic value, replacing and returning any previous value
    /// stored under the same key.
    #[inline]
    pub fn insert_key(&mut self, key: DiagKey, value: f64) -> Option<f64> {
        for (entry_key, existing) in self.entries.iter_mut().flatten() {
            if *entry_key == key {
                let prev = *existing;
                *existing = value;
                return Some(prev);
            }
        }

        for entry in &mut self.entries {
            if entry.is_none() {
                *entry = Some((key, value));
                return None;
            }
        }

        panic!("diagnostics capacity exceeded ({})", Self::CAPACITY);
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&f64> {
        let key: DiagKey = key.parse().ok()?;
        self.entries
            .iter()
            .filter_map(Option::as_ref)
            .find_map(|(entry_key, value)| (*entry_key == key).then_some(value))
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &f64)> {
        self.entries
            .iter()
            .filter_map(Option::as_ref)
            .map(|(k, v)| (k.as_str(), v))
    }
}

/// Unified engine result payload.
#[derive(Debug, Clone)]
pub struct PricingResult {
    /// Present value.
    pub price: f64,
    /// Greeks when available from the engine.
    pub greeks: Option<Greeks>,
    /// Engine-specific scalar diagnostics.
    pub diagnostics: Diagnostics,
}

/// Engine and model errors surfaced by the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// Input validation error.
    InvalidInput(String),
    /// Required market datum is unavailable.
    MarketDataMissing(String),
}

impl std::fmt::Display for PricingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            Self::MarketDataMissing(msg) => write!(f, "market data missing: {msg}"),
        }
    }
}

impl std::error::Error for PricingError {}
