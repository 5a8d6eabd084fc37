mod plan;
mod serve;

use clap::{Parser, Subcommand};

pub use self::{plan::PlanArgs, serve::ServeArgs};
use crate::{core::Precision, prelude::*};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[clap(flatten)]
    pub precision: PrecisionArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Dispatch the fleet from a production plan request file and print the plan.
    #[clap(name = "plan")]
    Plan(PlanArgs),

    /// Serve the production plan over HTTP.
    #[clap(name = "serve")]
    Serve(ServeArgs),
}

#[derive(Copy, Clone, Parser)]
pub struct PrecisionArgs {
    /// Power step in megawatts: the load must be its multiple, and power limits are snapped to it.
    #[clap(long = "precision", env = "PRECISION", default_value = "0.1", global = true)]
    pub step: f64,

    /// Number of decimal places in the reported outputs.
    #[clap(long, env = "DECIMAL_PLACES", default_value = "1", global = true)]
    pub decimal_places: u8,
}

impl TryFrom<PrecisionArgs> for Precision {
    type Error = Error;

    fn try_from(args: PrecisionArgs) -> Result<Self> {
        ensure!(
            args.step.is_finite() && args.step > 0.0,
            "the precision must be a positive number, got {}",
            args.step,
        );
        Ok(Self::builder().step(args.step).decimal_places(args.decimal_places).build())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_parse_plan() {
        let args = Args::try_parse_from(["merit", "plan", "payload.json", "--json"]).unwrap();
        let precision = Precision::try_from(args.precision).unwrap();
        assert_abs_diff_eq!(precision.step(), 0.1);
        assert!(matches!(args.command, Command::Plan(_)));
    }

    #[test]
    fn test_parse_serve_with_precision() {
        let args =
            Args::try_parse_from(["merit", "serve", "--bind", "127.0.0.1:9000", "--precision", "1"])
                .unwrap();
        assert_abs_diff_eq!(args.precision.step, 1.0);
        assert!(matches!(args.command, Command::Serve(_)));
    }

    #[test]
    fn test_non_positive_precision() {
        let args = PrecisionArgs { step: 0.0, decimal_places: 1 };
        assert!(Precision::try_from(args).is_err());
    }
}
