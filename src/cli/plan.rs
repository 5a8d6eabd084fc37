use std::{fs, io, path::PathBuf};

use clap::Parser;

use crate::{
    core::Precision,
    payload::ProductionPlanRequest,
    planner::plan,
    prelude::*,
    tables::build_production_plan_table,
};

#[derive(Parser)]
pub struct PlanArgs {
    /// Production plan request in JSON, or `-` to read it from the standard input.
    #[clap(value_name = "PAYLOAD")]
    payload: PathBuf,

    /// Print the plan as a JSON response instead of a table.
    #[clap(long)]
    json: bool,
}

impl PlanArgs {
    pub fn run(self, precision: Precision) -> Result {
        let payload = if self.payload.as_os_str() == "-" {
            io::read_to_string(io::stdin()).context("failed to read the standard input")?
        } else {
            fs::read_to_string(&self.payload)
                .with_context(|| format!("failed to read `{}`", self.payload.display()))?
        };
        let request: ProductionPlanRequest =
            serde_json::from_str(&payload).context("failed to parse the request")?;
        let production_plan =
            plan(&request, precision).context("failed to plan the production")?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&production_plan)?);
        } else {
            println!("{}", build_production_plan_table(&production_plan));
        }
        Ok(())
    }
}
