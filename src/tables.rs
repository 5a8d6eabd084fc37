use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{core::ProductionPlan, quantity::power::Megawatts};

pub fn build_production_plan_table(plan: &ProductionPlan) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table.set_header(vec!["Power plant", "Type", "Marginal cost", "Min", "Max", "Output"]);
    for assignment in plan.iter() {
        let is_running = assignment.power > Megawatts::ZERO;
        table.add_row(vec![
            Cell::new(&assignment.name),
            Cell::new(assignment.kind).fg(assignment.kind.color()),
            Cell::new(assignment.marginal_cost).set_alignment(CellAlignment::Right),
            Cell::new(assignment.range.min)
                .set_alignment(CellAlignment::Right)
                .add_attribute(Attribute::Dim),
            Cell::new(assignment.range.max)
                .set_alignment(CellAlignment::Right)
                .add_attribute(Attribute::Dim),
            Cell::new(assignment.power)
                .set_alignment(CellAlignment::Right)
                .fg(if is_running { Color::Green } else { Color::Reset }),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new(""),
        Cell::new(plan.hourly_cost()).set_alignment(CellAlignment::Right),
        Cell::new(""),
        Cell::new(""),
        Cell::new(plan.total_power())
            .set_alignment(CellAlignment::Right)
            .add_attribute(Attribute::Bold),
    ]);
    table
}
