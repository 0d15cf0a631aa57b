use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};
use contract_capacity::{
    fee::{MonthlyFee, WasteAndPenalty},
    optimizer::{Assessment, OptimizationResult},
    quantity::{cost::Cost, power::Kilowatts},
};

/// Width of the longest bar in the distribution chart.
const BAR_WIDTH: f64 = 40.0;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

fn cost_cell(cost: Cost, color: Color) -> Cell {
    Cell::new(cost)
        .set_alignment(CellAlignment::Right)
        .fg(if cost > Cost::ZERO { color } else { Color::Reset })
}

pub fn build_monthly_table(capacity: Kilowatts, months: &[MonthlyFee]) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "Month", "Demand", "Rate", "Base fee", "Waste", "Within band", "Beyond band", "Fee",
    ]);
    for month in months {
        table.add_row(vec![
            Cell::new(month.month),
            Cell::new(month.demand).set_alignment(CellAlignment::Right).fg(
                if month.demand > capacity {
                    Color::Red
                } else {
                    Color::Reset
                },
            ),
            Cell::new(month.rate).add_attribute(Attribute::Dim),
            Cell::new(month.base_fee).set_alignment(CellAlignment::Right),
            cost_cell(month.waste, Color::DarkYellow),
            cost_cell(month.overage_within_allowance, Color::Red),
            cost_cell(month.overage_beyond_allowance, Color::Red),
            Cell::new(month.fee()).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

pub fn build_annual_table(capacity: Kilowatts, annual_fee: Cost, totals: WasteAndPenalty) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Capacity", "Annual fee", "Waste", "Penalty"]).add_row(vec![
        Cell::new(capacity),
        Cell::new(annual_fee).add_attribute(Attribute::Bold),
        cost_cell(totals.waste, Color::DarkYellow),
        cost_cell(totals.penalty, Color::Red),
    ]);
    table
}

pub fn build_assessment_table(assessment: &Assessment) -> Table {
    let optimum = &assessment.optimum;
    let saving_color =
        if assessment.annual_saving > Cost::ZERO { Color::Green } else { Color::Reset };

    let mut table = new_table();
    table.set_header(vec!["", "Capacity", "Annual fee", "Waste", "Penalty"]);
    table.add_row(vec![
        Cell::new("Current"),
        Cell::new(assessment.current_capacity),
        Cell::new(assessment.current_fee),
        cost_cell(assessment.current.waste, Color::DarkYellow),
        cost_cell(assessment.current.penalty, Color::Red),
    ]);
    table.add_row(vec![
        Cell::new("Optimal").add_attribute(Attribute::Bold),
        Cell::new(optimum.optimal_capacity).fg(Color::Green).add_attribute(Attribute::Bold),
        Cell::new(optimum.optimal_fee).add_attribute(Attribute::Bold),
        cost_cell(optimum.waste, Color::DarkYellow),
        cost_cell(optimum.penalty, Color::Red),
    ]);
    table.add_row(vec![
        Cell::new("Saving"),
        Cell::new(""),
        Cell::new(assessment.annual_saving).fg(saving_color),
        Cell::new(format!("{} per month", assessment.monthly_saving))
            .fg(saving_color)
            .add_attribute(Attribute::Dim),
        Cell::new(""),
    ]);
    table
}

/// Annual fee of every candidate with a bar proportional to it, the optimum highlighted.
pub fn build_distribution_table(result: &OptimizationResult) -> Table {
    let max_fee = result.distribution.iter().map(|candidate| candidate.fee).max();

    let mut table = new_table();
    table.set_header(vec!["Capacity", "Annual fee", ""]);
    for candidate in &result.distribution {
        let is_optimal = candidate.capacity == result.optimal_capacity;
        let color = if is_optimal { Color::Green } else { Color::Blue };
        let bar = max_fee.map_or_else(String::new, |max_fee| bar(candidate.fee / max_fee));

        let mut row = vec![
            Cell::new(candidate.capacity).set_alignment(CellAlignment::Right),
            Cell::new(candidate.fee).set_alignment(CellAlignment::Right),
            Cell::new(bar).fg(color),
        ];
        if is_optimal {
            row = row.into_iter().map(|cell| cell.add_attribute(Attribute::Bold)).collect();
        }
        table.add_row(row);
    }
    table
}

#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn bar(share: f64) -> String {
    "█".repeat((share.clamp(0.0, 1.0) * BAR_WIDTH).round() as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar() {
        assert_eq!(bar(1.0).chars().count(), 40);
        assert_eq!(bar(0.5).chars().count(), 20);
        assert_eq!(bar(0.0), "");
        assert_eq!(bar(f64::NAN), "");
    }
}
