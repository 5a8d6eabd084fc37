use thiserror::Error;

use crate::quantity::power::Megawatts;

/// Rejected generating unit declaration.
#[derive(Debug, Error, PartialEq)]
pub enum PlantError {
    #[error("unknown power plant type `{0}`")]
    UnknownKind(String),

    #[error("power plant name must not be empty")]
    EmptyName,

    #[error("power plant `{0}` is declared more than once")]
    DuplicateName(String),

    #[error("efficiency of `{name}` must be within (0, 1], got {efficiency}")]
    InvalidEfficiency { name: String, efficiency: f64 },

    #[error("power limits of `{name}` must be non-negative, got pmin = {pmin:?}, pmax = {pmax:?}")]
    NegativePower { name: String, pmin: Megawatts, pmax: Megawatts },

    #[error("pmax ({pmax}) must not be less than pmin ({pmin}) for `{name}`")]
    PmaxLessThanPmin { name: String, pmin: Megawatts, pmax: Megawatts },
}

/// Rejected fuel and availability context.
#[derive(Debug, Error, PartialEq)]
pub enum FuelsError {
    #[error("{fuel} price must be a non-negative number, got {price}")]
    InvalidPrice { fuel: &'static str, price: f64 },

    #[error("wind percentage must be within [0, 100], got {0}")]
    InvalidWindPercentage(f64),
}

/// Rejected target load.
#[derive(Debug, Error, PartialEq)]
pub enum LoadError {
    #[error("load must be non-negative, got {0}")]
    Negative(Megawatts),

    #[error("load must be a multiple of {step}, got {load:?}")]
    OffGrid { load: Megawatts, step: f64 },
}

/// The requested load cannot be met exactly.
#[derive(Debug, Error, PartialEq)]
pub enum DispatchError {
    #[error(
        "minimum output of `{plant}` ({pmin}) exceeds the remaining load ({remaining}), \
         and there is no cheaper power plant to reduce"
    )]
    NoPredecessor { plant: String, pmin: Megawatts, remaining: Megawatts },

    #[error(
        "making room for `{plant}` requires reducing `{predecessor}` by {reduction} \
         below its minimum of {predecessor_pmin}"
    )]
    PredecessorBelowMinimum {
        plant: String,
        predecessor: String,
        reduction: Megawatts,
        predecessor_pmin: Megawatts,
    },

    #[error("`{plant}` would have to produce {required}, above its maximum of {pmax}")]
    MarginalAboveMaximum { plant: String, required: Megawatts, pmax: Megawatts },

    #[error("insufficient capacity: {available} available, {load} requested")]
    InsufficientCapacity { available: Megawatts, load: Megawatts },
}
