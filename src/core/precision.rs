use bon::Builder;

use crate::quantity::power::Megawatts;

/// Power grid that inputs are normalized to and outputs are rounded to.
#[must_use]
#[derive(Copy, Clone, Debug, Builder)]
pub struct Precision {
    /// Smallest distinguishable power step, for example `0.1` MW.
    #[builder(default = 0.1)]
    step: f64,

    /// Number of decimal places in the reported output.
    #[builder(default = 1)]
    decimal_places: u8,
}

impl Default for Precision {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Precision {
    /// Fraction of a step absorbed when snapping to the grid, so that `0.3 / 0.1` is still `3`.
    const SLACK: f64 = 1e-9;

    pub const fn step(self) -> f64 {
        self.step
    }

    /// Comparison tolerance used by the solver.
    pub fn tolerance(self) -> Megawatts {
        Megawatts::from(self.step * 1e-3)
    }

    /// Round up to the nearest grid multiple.
    pub fn ceil(self, power: Megawatts) -> Megawatts {
        Megawatts::from((self.steps(power) - Self::SLACK).ceil() * self.step)
    }

    /// Round down to the nearest grid multiple.
    pub fn floor(self, power: Megawatts) -> Megawatts {
        Megawatts::from((self.steps(power) + Self::SLACK).floor() * self.step)
    }

    pub fn is_multiple(self, power: Megawatts) -> bool {
        let steps = self.steps(power);
        (steps - steps.round()).abs() <= Self::SLACK
    }

    /// Round to the configured number of decimal places.
    pub fn round_output(self, power: Megawatts) -> Megawatts {
        self.to_output(power, f64::round)
    }

    /// Round down to the configured number of decimal places.
    pub fn floor_output(self, power: Megawatts) -> Megawatts {
        self.to_output(power, |places| (places + Self::SLACK).floor())
    }

    fn to_output(self, power: Megawatts, round: impl FnOnce(f64) -> f64) -> Megawatts {
        let factor = 10_f64.powi(i32::from(self.decimal_places));
        let rounded = round(power.0 * factor) / factor;
        // Avoid reporting `-0.0`:
        Megawatts::from(if rounded == 0.0 { 0.0 } else { rounded })
    }

    fn steps(self, power: Megawatts) -> f64 {
        power.0 / self.step
    }
}
