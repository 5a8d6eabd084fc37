use bon::Builder;
use itertools::Itertools;
use ordered_float::OrderedFloat;

use crate::{
    core::{
        error::DispatchError,
        plant::{EffectiveRange, PowerPlant},
        production_plan::{Assignment, ProductionPlan},
    },
    prelude::*,
    quantity::{power::Megawatts, rate::MegawattHourRate},
};

/// Merit-order dispatch of a fleet for a single load.
///
/// Power plants are loaded in the ascending order of their marginal cost until the load is met.
/// When the minimum output of the next plant does not fit into the remaining load,
/// the immediately preceding plant is reduced by that minimum to make room for it.
/// Only one step back is ever taken: if that is not enough, the dispatch is infeasible.
#[derive(Builder)]
pub struct MeritOrder<'a> {
    plants: &'a [PowerPlant],
    load: Megawatts,

    /// Slack for comparing floating-point outputs.
    #[builder(default = Megawatts::from(1e-6))]
    tolerance: Megawatts,
}

/// Power plant record in the merit order, indexed by its position.
struct Slot<'a> {
    plant: &'a PowerPlant,
    marginal_cost: MegawattHourRate,
    range: EffectiveRange,
    output: Megawatts,
}

impl<'a> MeritOrder<'a> {
    #[instrument(skip_all, fields(n_plants = self.plants.len(), load = %self.load))]
    pub fn dispatch(self) -> Result<ProductionPlan, DispatchError> {
        let mut slots = self.sort();
        debug!(
            merit_order = %slots.iter().map(|slot| slot.plant.name()).join(", "),
            "sorted by marginal cost",
        );

        let mut committed = Megawatts::ZERO;
        for index in 0..slots.len() {
            let range = slots[index].range;

            if committed + range.max <= self.load + self.tolerance {
                slots[index].output = range.max;
                committed += range.max;
                debug!(
                    plant = slots[index].plant.name(),
                    output = %range.max,
                    %committed,
                    "fully loaded",
                );
                if committed >= self.load - self.tolerance {
                    info!(plant = slots[index].plant.name(), "load met at full output");
                    return Ok(Self::collect(slots));
                }
                continue;
            }

            if committed + range.min > self.load + self.tolerance {
                committed -= self.make_room(&mut slots, index, committed)?;
            }

            let remainder = (self.load - committed).max(Megawatts::ZERO);
            if remainder > range.max + self.tolerance {
                warn!(
                    plant = slots[index].plant.name(),
                    %remainder,
                    "marginal output above maximum",
                );
                return Err(DispatchError::MarginalAboveMaximum {
                    plant: slots[index].plant.name().to_string(),
                    required: remainder,
                    pmax: range.max,
                });
            }
            slots[index].output = remainder;
            info!(
                plant = slots[index].plant.name(),
                output = %remainder,
                "marginal power plant",
            );
            return Ok(Self::collect(slots));
        }

        if committed < self.load - self.tolerance {
            warn!(available = %committed, "insufficient capacity");
            return Err(DispatchError::InsufficientCapacity {
                available: committed,
                load: self.load,
            });
        }
        Ok(Self::collect(slots))
    }

    /// Build the merit order, keeping the input order between equally priced plants.
    fn sort(&self) -> Vec<Slot<'a>> {
        let mut slots = self
            .plants
            .iter()
            .map(|plant| Slot {
                plant,
                marginal_cost: plant.marginal_cost(),
                range: plant.effective_range(),
                output: Megawatts::ZERO,
            })
            .collect_vec();
        slots.sort_by_key(|slot| OrderedFloat(slot.marginal_cost.0));
        slots
    }

    /// Reduce the plant preceding `index` by the minimum output of the plant at `index`.
    ///
    /// # Returns
    ///
    /// The reduction, which is to be subtracted from the committed load.
    fn make_room(
        &self,
        slots: &mut [Slot<'_>],
        index: usize,
        committed: Megawatts,
    ) -> Result<Megawatts, DispatchError> {
        let plant = slots[index].plant.name();
        let reduction = slots[index].range.min;

        let Some(predecessor_index) = index.checked_sub(1) else {
            warn!(plant, pmin = %reduction, "no cheaper power plant to reduce");
            return Err(DispatchError::NoPredecessor {
                plant: plant.to_string(),
                pmin: reduction,
                remaining: self.load - committed,
            });
        };

        let predecessor = &mut slots[predecessor_index];
        let reduced_output = predecessor.output - reduction;
        if reduced_output < predecessor.range.min - self.tolerance {
            warn!(
                plant,
                predecessor = predecessor.plant.name(),
                %reduction,
                "predecessor would go below its minimum",
            );
            return Err(DispatchError::PredecessorBelowMinimum {
                plant: plant.to_string(),
                predecessor: predecessor.plant.name().to_string(),
                reduction,
                predecessor_pmin: predecessor.range.min,
            });
        }

        info!(
            plant,
            predecessor = predecessor.plant.name(),
            from = %predecessor.output,
            to = %reduced_output,
            "reducing the predecessor",
        );
        predecessor.output = reduced_output;
        Ok(reduction)
    }

    fn collect(slots: Vec<Slot<'_>>) -> ProductionPlan {
        ProductionPlan(
            slots
                .into_iter()
                .map(|slot| Assignment {
                    name: slot.plant.name().to_string(),
                    power: slot.output,
                    kind: slot.plant.kind(),
                    marginal_cost: slot.marginal_cost,
                    range: slot.range,
                })
                .collect(),
        )
    }
}
