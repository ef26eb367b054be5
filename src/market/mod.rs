//! Market data container shared by all pricing engines.

use crate::core::PricingError;

/// Market snapshot used by all pricing engines.
///
/// Holds the spot level, a flat continuously compounded risk-free rate, and a
/// flat Black volatility. Build through [`Market::builder`], which validates
/// the fields; engines additionally re-check positivity so hand-assembled
/// snapshots fail loudly too.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Market {
    /// Spot price.
    pub spot: f64,
    /// Continuously compounded risk-free rate.
    pub rate: f64,
    /// Flat annualized volatility.
    pub vol: f64,
}

impl Market {
    /// Starts a market builder.
    #[inline]
    pub fn builder() -> MarketBuilder {
        MarketBuilder::default()
    }
}

/// Builder for [`Market`].
#[derive(Debug, Clone, Default)]
pub struct MarketBuilder {
    spot: Option<f64>,
    rate: Option<f64>,
    vol: Option<f64>,
}

impl MarketBuilder {
    /// Sets the spot price.
    #[inline]
    pub fn spot(mut self, spot: f64) -> Self {
        self.spot = Some(spot);
        self
    }

    /// Sets the flat risk-free rate.
    #[inline]
    pub fn rate(mut self, rate: f64) -> Self {
        self.rate = Some(rate);
        self
    }

    /// Sets the flat volatility.
    #[inline]
    pub fn flat_vol(mut self, vol: f64) -> Self {
        self.vol = Some(vol);
        self
    }

    /// Validates and builds a [`Market`].
    ///
    /// # Errors
    /// - [`PricingError::MarketDataMissing`] when spot or vol was never set.
    /// - [`PricingError::InvalidInput`] when spot or vol is not strictly
    ///   positive. The rate may take any sign and defaults to zero.
    pub fn build(self) -> Result<Market, PricingError> {
        let spot = self
            .spot
            .ok_or_else(|| PricingError::MarketDataMissing("market spot is required".to_string()))?;
        if spot <= 0.0 {
            return Err(PricingError::InvalidInput(
                "market spot must be > 0".to_string(),
            ));
        }

        let vol = self.vol.ok_or_else(|| {
            PricingError::MarketDataMissing("market flat_vol is required".to_string())
        })?;
        if vol <= 0.0 {
            return Err(PricingError::InvalidInput(
                "market flat_vol must be > 0".to_string(),
            ));
        }

        Ok(Market {
            spot,
            rate: self.rate.unwrap_or(0.0),
            vol,
        })
    }
}
