use anyhow::{anyhow, Context, Result};
use comfy_table::{presets::UTF8_FULL, Table};
use jebi_core::{ConfigEngine, DrawEngine, GameSettings, OutcomePreset};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Parse `LABEL:COUNT`; the label itself may contain colons
pub fn parse_outcome(raw: &str) -> Result<OutcomePreset> {
    let (text, count) = raw
        .rsplit_once(':')
        .ok_or_else(|| anyhow!("Outcome '{}' must look like LABEL:COUNT", raw))?;
    let count: u32 = count
        .trim()
        .parse()
        .with_context(|| format!("Invalid ball count in '{}'", raw))?;

    Ok(OutcomePreset::new(text.trim(), count))
}

/// Build a setup, fill it in order, lock it and draw every ball once
pub fn run_auto(
    defaults: &GameSettings,
    balls: Option<u32>,
    outcomes: &[String],
    seed: Option<u64>,
) -> Result<()> {
    let outcomes = if outcomes.is_empty() {
        defaults.outcomes.clone()
    } else {
        outcomes
            .iter()
            .map(|raw| parse_outcome(raw))
            .collect::<Result<Vec<_>>>()?
    };
    let settings = GameSettings {
        ball_count: balls.unwrap_or_else(|| outcomes.iter().map(|o| o.count).sum()),
        outcomes,
        reveal_delay_ms: 0,
    };

    let mut config = ConfigEngine::from_settings(&settings)?;
    config.auto_assign();
    let locked = config.lock()?;

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut engine = DrawEngine::with_rng(locked, &mut rng);

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Draw", "Ball", "Outcome"]);

    let order = engine.shuffled_order().to_vec();
    for (turn, ball) in order.into_iter().enumerate() {
        let reveal = engine.draw(ball)?;
        table.add_row(vec![
            (turn + 1).to_string(),
            reveal.ball.to_string(),
            reveal.outcome,
        ]);
    }

    println!("{}", table);
    Ok(())
}
