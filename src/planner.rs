use thiserror::Error;

use crate::{
    core::{
        MeritOrder,
        Precision,
        ProductionPlan,
        error::{DispatchError, FuelsError, LoadError, PlantError},
    },
    payload::ProductionPlanRequest,
    prelude::*,
};

#[derive(Debug, Error)]
pub enum PlanError {
    #[error(transparent)]
    Fuels(#[from] FuelsError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    PowerPlant(#[from] PlantError),

    #[error(transparent)]
    Infeasible(#[from] DispatchError),
}

impl PlanError {
    /// Short machine-readable error category.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Fuels(_) => "invalid_fuels",
            Self::Load(_) => "invalid_load",
            Self::PowerPlant(PlantError::UnknownKind(_)) => "unknown_power_plant_type",
            Self::PowerPlant(_) => "invalid_power_plant",
            Self::Infeasible(_) => "infeasible_dispatch",
        }
    }
}

/// Validate the request, build the fleet, and dispatch it.
///
/// The committed outputs are rounded to the configured number of decimal places.
#[instrument(skip_all, fields(load = %request.load, n_plants = request.power_plants.len()))]
pub fn plan(
    request: &ProductionPlanRequest,
    precision: Precision,
) -> Result<ProductionPlan, PlanError> {
    let fuels = request.fuels.validate()?;
    let load = request.validated_load(precision)?;
    let power_plants = request.power_plants(fuels, precision)?;

    let production_plan = MeritOrder::builder()
        .plants(&power_plants)
        .load(load)
        .tolerance(precision.tolerance())
        .build()
        .dispatch()?;
    info!(
        total_power = %production_plan.total_power(),
        hourly_cost = %production_plan.hourly_cost(),
        "dispatched",
    );

    Ok(production_plan.rounded(precision, load))
}
