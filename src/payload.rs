//! Wire format of the production plan request and its normalization.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{
    core::{
        Fuels,
        PowerPlant,
        PowerPlantKind,
        Precision,
        error::{LoadError, PlantError},
    },
    quantity::power::Megawatts,
};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ProductionPlanRequest {
    /// Power to be generated, in megawatts.
    pub load: Megawatts,

    pub fuels: Fuels,

    #[serde(rename = "powerplants")]
    pub power_plants: Vec<PowerPlantDeclaration>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PowerPlantDeclaration {
    pub name: String,

    /// Raw type, parsed into [`PowerPlantKind`] when the plant gets built.
    #[serde(rename = "type")]
    pub kind: String,

    pub efficiency: f64,
    pub pmin: Megawatts,
    pub pmax: Megawatts,
}

impl ProductionPlanRequest {
    /// Check the load against the precision grid.
    pub fn validated_load(&self, precision: Precision) -> Result<Megawatts, LoadError> {
        if !self.load.0.is_finite() || self.load < Megawatts::ZERO {
            return Err(LoadError::Negative(self.load));
        }
        if !precision.is_multiple(self.load) {
            return Err(LoadError::OffGrid { load: self.load, step: precision.step() });
        }
        Ok(self.load)
    }

    /// Build the fleet with the power limits snapped to the precision grid.
    pub fn power_plants(
        &self,
        fuels: Fuels,
        precision: Precision,
    ) -> Result<Vec<PowerPlant>, PlantError> {
        let mut names = HashSet::with_capacity(self.power_plants.len());
        self.power_plants
            .iter()
            .map(|declaration| {
                if !names.insert(declaration.name.as_str()) {
                    return Err(PlantError::DuplicateName(declaration.name.clone()));
                }
                declaration.to_power_plant(fuels, precision)
            })
            .collect()
    }
}

impl PowerPlantDeclaration {
    fn to_power_plant(
        &self,
        fuels: Fuels,
        precision: Precision,
    ) -> Result<PowerPlant, PlantError> {
        if self.pmin < Megawatts::ZERO || self.pmax < Megawatts::ZERO {
            return Err(PlantError::NegativePower {
                name: self.name.clone(),
                pmin: self.pmin,
                pmax: self.pmax,
            });
        }
        PowerPlant::builder()
            .name(self.name.as_str())
            .kind(self.kind.parse::<PowerPlantKind>()?)
            .efficiency(self.efficiency)
            // Never allow more than declared:
            .pmin(precision.ceil(self.pmin))
            .pmax(precision.floor(self.pmax))
            .fuels(fuels)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    const PAYLOAD_1: &str = include_str!("../payloads/payload1.json");

    fn request(power_plants: serde_json::Value) -> ProductionPlanRequest {
        serde_json::from_value(serde_json::json!({
            "load": 100,
            "fuels": {
                "gas(euro/MWh)": 13.4,
                "kerosine(euro/MWh)": 50.8,
                "co2(euro/ton)": 20,
                "wind(%)": 60,
            },
            "powerplants": power_plants,
        }))
        .unwrap()
    }

    #[test]
    fn test_deserialize_payload() {
        let request: ProductionPlanRequest = serde_json::from_str(PAYLOAD_1).unwrap();
        assert_abs_diff_eq!(request.load.0, 480.0);
        assert_eq!(request.power_plants.len(), 6);
        assert_eq!(request.power_plants[0].name, "gasfiredbig1");
        assert_eq!(request.power_plants[0].kind, "gasfired");
        assert_abs_diff_eq!(request.power_plants[0].efficiency, 0.53);
    }

    #[test]
    fn test_power_limits_are_snapped_inwards() {
        let request = request(serde_json::json!([
            {"name": "gas", "type": "gasfired", "efficiency": 0.5, "pmin": 100.12, "pmax": 460.14},
        ]));
        let plants = request.power_plants(request.fuels, Precision::default()).unwrap();
        let range = plants[0].effective_range();
        assert_abs_diff_eq!(range.min.0, 100.2, epsilon = 1e-9);
        assert_abs_diff_eq!(range.max.0, 460.1, epsilon = 1e-9);
    }

    #[test]
    fn test_range_collapsing_under_rounding() {
        let request = request(serde_json::json!([
            {"name": "tiny", "type": "gasfired", "efficiency": 0.5, "pmin": 10.05, "pmax": 10.08},
        ]));
        let error = request.power_plants(request.fuels, Precision::default()).unwrap_err();
        assert!(matches!(error, PlantError::PmaxLessThanPmin { .. }));
    }

    #[test]
    fn test_unknown_kind() {
        let request = request(serde_json::json!([
            {"name": "n1", "type": "nuclear", "efficiency": 0.3, "pmin": 0, "pmax": 1000},
        ]));
        let error = request.power_plants(request.fuels, Precision::default()).unwrap_err();
        assert_eq!(error, PlantError::UnknownKind("nuclear".to_string()));
    }

    #[test]
    fn test_duplicate_name() {
        let request = request(serde_json::json!([
            {"name": "w", "type": "windturbine", "efficiency": 1, "pmin": 0, "pmax": 10},
            {"name": "w", "type": "windturbine", "efficiency": 1, "pmin": 0, "pmax": 20},
        ]));
        let error = request.power_plants(request.fuels, Precision::default()).unwrap_err();
        assert_eq!(error, PlantError::DuplicateName("w".to_string()));
    }

    #[test]
    fn test_load_on_grid() {
        let mut request = request(serde_json::json!([]));
        request.load = Megawatts::from(400.1);
        assert_eq!(request.validated_load(Precision::default()), Ok(Megawatts::from(400.1)));
    }

    #[test]
    fn test_load_off_grid() {
        let mut request = request(serde_json::json!([]));
        request.load = Megawatts::from(400.15);
        assert!(matches!(request.validated_load(Precision::default()), Err(LoadError::OffGrid { .. })));
    }

    #[test]
    fn test_negative_load() {
        let mut request = request(serde_json::json!([]));
        request.load = Megawatts::from(-10.0);
        assert_eq!(
            request.validated_load(Precision::default()),
            Err(LoadError::Negative(Megawatts::from(-10.0))),
        );
    }
}
