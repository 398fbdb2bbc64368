use comfy_table::{presets::UTF8_FULL, Table};
use jebi_core::{ConfigEngine, DrawEngine};

pub fn outcome_table(engine: &ConfigEngine) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["#", "Outcome", "Balls", "Assigned"]);

    for (index, outcome) in engine.outcomes().iter().enumerate() {
        let label = if outcome.text.is_empty() {
            "(unnamed)"
        } else {
            outcome.text.as_str()
        };
        table.add_row(vec![
            (index + 1).to_string(),
            label.to_string(),
            outcome.count.to_string(),
            format!("{}/{}", engine.assigned_count(&outcome.text), outcome.count),
        ]);
    }

    table
}

pub fn assignment_table(engine: &ConfigEngine) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Ball", "Outcome"]);

    for ball in 1..=engine.ball_count() {
        table.add_row(vec![
            ball.to_string(),
            engine.assignment(ball).unwrap_or("-").to_string(),
        ]);
    }

    table
}

/// Balls in shuffled order; drawn ones show their outcome
pub fn board_table(engine: &DrawEngine) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Slot", "Ball"]);

    for (slot, &ball) in engine.shuffled_order().iter().enumerate() {
        let face = match engine.revealed_outcome(ball) {
            Some(outcome) => format!("#{} {}", ball, outcome),
            None => format!("#{}", ball),
        };
        table.add_row(vec![(slot + 1).to_string(), face]);
    }

    table
}

pub fn summary_line(engine: &ConfigEngine) -> String {
    format!(
        "Balls: {}  Remaining: {} / {}",
        engine.ball_count(),
        engine.remaining_balls(),
        engine.ball_count()
    )
}
