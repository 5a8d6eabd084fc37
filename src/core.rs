pub mod error;
pub mod fuels;
pub mod merit_order;
pub mod plant;
pub mod precision;
pub mod production_plan;

pub use self::{
    fuels::Fuels,
    merit_order::MeritOrder,
    plant::{PowerPlant, PowerPlantKind},
    precision::Precision,
    production_plan::ProductionPlan,
};
