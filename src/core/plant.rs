use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use bon::bon;
use comfy_table::Color;

use crate::{
    core::{error::PlantError, fuels::Fuels},
    quantity::{power::Megawatts, rate::MegawattHourRate},
};

/// Declared power plant type.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PowerPlantKind {
    /// Burns gas.
    GasFired,

    /// Burns kerosine.
    TurboJet,

    /// Free but limited by the wind availability.
    WindTurbine,
}

impl FromStr for PowerPlantKind {
    type Err = PlantError;

    fn from_str(kind: &str) -> Result<Self, Self::Err> {
        match kind {
            "gasfired" => Ok(Self::GasFired),
            "turbojet" => Ok(Self::TurboJet),
            "windturbine" => Ok(Self::WindTurbine),
            _ => Err(PlantError::UnknownKind(kind.to_string())),
        }
    }
}

impl Display for PowerPlantKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GasFired => write!(f, "gasfired"),
            Self::TurboJet => write!(f, "turbojet"),
            Self::WindTurbine => write!(f, "windturbine"),
        }
    }
}

impl PowerPlantKind {
    /// Whether the output is capped by an external resource rather than by the operator.
    pub const fn is_intermittent(self) -> bool {
        matches!(self, Self::WindTurbine)
    }

    pub const fn color(self) -> Color {
        match self {
            Self::GasFired => Color::DarkYellow,
            Self::TurboJet => Color::Red,
            Self::WindTurbine => Color::Cyan,
        }
    }
}

/// How the power plant turns its input into electricity.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Generation {
    /// Fuel-burning, runs anywhere within its declared limits.
    Dispatchable {
        fuel_price: MegawattHourRate,

        /// Megawatt-hours of electricity per megawatt-hour of fuel, within `(0, 1]`.
        efficiency: f64,
    },

    /// Renewable with zero marginal cost, capped by the resource availability.
    Intermittent {
        /// Available fraction of the nameplate capacity, within `[0, 1]`.
        availability: f64,
    },
}

impl Generation {
    pub fn marginal_cost(self) -> MegawattHourRate {
        match self {
            Self::Dispatchable { fuel_price, efficiency } => fuel_price / efficiency,
            Self::Intermittent { .. } => MegawattHourRate::ZERO,
        }
    }

    pub fn effective_range(self, pmin: Megawatts, pmax: Megawatts) -> EffectiveRange {
        match self {
            Self::Dispatchable { .. } => EffectiveRange { min: pmin, max: pmax },
            Self::Intermittent { availability } => {
                EffectiveRange { min: Megawatts::ZERO, max: pmax * availability }
            }
        }
    }
}

/// Output range a power plant may be committed to during one dispatch.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EffectiveRange {
    pub min: Megawatts,
    pub max: Megawatts,
}

/// Generating unit as seen by the merit order.
#[derive(Clone, Debug)]
pub struct PowerPlant {
    name: String,
    kind: PowerPlantKind,
    generation: Generation,
    pmin: Megawatts,
    pmax: Megawatts,
}

#[bon]
impl PowerPlant {
    /// Build the power plant from its declaration and the current fuel prices.
    ///
    /// The power limits are expected to be already normalized to the precision grid.
    #[builder]
    pub fn new(
        #[builder(into)] name: String,
        kind: PowerPlantKind,
        efficiency: f64,
        pmin: Megawatts,
        pmax: Megawatts,
        fuels: Fuels,
    ) -> Result<Self, PlantError> {
        if name.is_empty() {
            return Err(PlantError::EmptyName);
        }
        let generation = match kind {
            PowerPlantKind::GasFired => {
                Generation::Dispatchable { fuel_price: fuels.gas, efficiency }
            }
            PowerPlantKind::TurboJet => {
                Generation::Dispatchable { fuel_price: fuels.kerosine, efficiency }
            }
            PowerPlantKind::WindTurbine => {
                Generation::Intermittent { availability: fuels.wind_availability() }
            }
        };
        let is_valid_efficiency = match generation {
            Generation::Dispatchable { .. } => efficiency > 0.0 && efficiency <= 1.0,
            // Wind turbines do not burn anything, the efficiency is informational:
            Generation::Intermittent { .. } => (0.0..=1.0).contains(&efficiency),
        };
        if !is_valid_efficiency {
            return Err(PlantError::InvalidEfficiency { name, efficiency });
        }
        if !(pmin.0.is_finite() && pmax.0.is_finite())
            || pmin < Megawatts::ZERO
            || pmax < Megawatts::ZERO
        {
            return Err(PlantError::NegativePower { name, pmin, pmax });
        }
        if pmax < pmin {
            return Err(PlantError::PmaxLessThanPmin { name, pmin, pmax });
        }
        Ok(Self { name, kind, generation, pmin, pmax })
    }
}

impl PowerPlant {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn kind(&self) -> PowerPlantKind {
        self.kind
    }

    pub fn marginal_cost(&self) -> MegawattHourRate {
        self.generation.marginal_cost()
    }

    pub fn effective_range(&self) -> EffectiveRange {
        self.generation.effective_range(self.pmin, self.pmax)
    }
}
