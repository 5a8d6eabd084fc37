use serde::{Deserialize, Serialize};

use crate::{core::error::FuelsError, quantity::rate::MegawattHourRate};

/// Fuel prices and renewable availability for a single dispatch.
#[derive(Copy, Clone, Debug, Deserialize, Serialize)]
pub struct Fuels {
    #[serde(rename = "gas(euro/MWh)")]
    pub gas: MegawattHourRate,

    #[serde(rename = "kerosine(euro/MWh)")]
    pub kerosine: MegawattHourRate,

    /// Emission allowance price in euro per ton. Not part of the marginal cost.
    #[serde(rename = "co2(euro/ton)")]
    pub co2: f64,

    /// Share of the nameplate wind capacity that is available, in percent.
    #[serde(rename = "wind(%)")]
    pub wind_percentage: f64,
}

impl Fuels {
    pub fn validate(self) -> Result<Self, FuelsError> {
        let prices = [("gas", self.gas.0), ("kerosine", self.kerosine.0), ("CO2", self.co2)];
        for (fuel, price) in prices {
            if !price.is_finite() || price < 0.0 {
                return Err(FuelsError::InvalidPrice { fuel, price });
            }
        }
        if !(0.0..=100.0).contains(&self.wind_percentage) {
            return Err(FuelsError::InvalidWindPercentage(self.wind_percentage));
        }
        Ok(self)
    }

    /// Available fraction of the wind turbine capacity, within `[0, 1]`.
    pub const fn wind_availability(self) -> f64 {
        self.wind_percentage / 100.0
    }
}
