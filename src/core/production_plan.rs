use serde::Serialize;

use crate::{
    core::{
        plant::{EffectiveRange, PowerPlantKind},
        precision::Precision,
    },
    prelude::*,
    quantity::{cost::HourlyCost, power::Megawatts, rate::MegawattHourRate},
};

/// Output committed to a single power plant.
#[derive(Clone, Debug, Serialize)]
pub struct Assignment {
    pub name: String,

    #[serde(rename = "p")]
    pub power: Megawatts,

    #[serde(skip)]
    pub kind: PowerPlantKind,

    #[serde(skip)]
    pub marginal_cost: MegawattHourRate,

    #[serde(skip)]
    pub range: EffectiveRange,
}

/// Result of a successful dispatch, listed in the merit order.
#[must_use]
#[derive(Clone, Debug, Default, Serialize)]
pub struct ProductionPlan(pub Vec<Assignment>);

impl ProductionPlan {
    pub fn iter(&self) -> impl Iterator<Item = &Assignment> {
        self.0.iter()
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<Megawatts> {
        self.iter().find(|assignment| assignment.name == name).map(|assignment| assignment.power)
    }

    pub fn total_power(&self) -> Megawatts {
        self.iter().map(|assignment| assignment.power).sum()
    }

    pub fn hourly_cost(&self) -> HourlyCost {
        self.iter().map(|assignment| assignment.power * assignment.marginal_cost).sum()
    }

    /// Round the committed outputs for reporting, keeping their total equal to the load.
    ///
    /// Intermittent plants are rounded down so that they never exceed their availability.
    /// The rounding residual is then settled by the running dispatchable plants,
    /// starting from the most expensive one, within their effective ranges.
    pub fn rounded(mut self, precision: Precision, load: Megawatts) -> Self {
        for assignment in &mut self.0 {
            assignment.power = if assignment.kind.is_intermittent() {
                precision.floor_output(assignment.power)
            } else {
                precision.round_output(assignment.power)
            };
        }

        let mut residual = load - self.total_power();
        for assignment in self.0.iter_mut().rev() {
            if residual.0.abs() <= precision.tolerance().0 {
                break;
            }
            if assignment.kind.is_intermittent() || assignment.power <= Megawatts::ZERO {
                continue;
            }
            let settled = precision.round_output(
                (assignment.power + residual).clamp(assignment.range.min, assignment.range.max),
            );
            residual -= settled - assignment.power;
            assignment.power = settled;
        }
        if residual.0.abs() > precision.tolerance().0 {
            warn!(%residual, "rounded outputs do not add up to the load");
        }

        self
    }
}
