use super::render;
use anyhow::Result;
use dialoguer::Select;
use jebi_core::{Game, GameError};

pub enum DrawExit {
    Setup,
    Quit,
}

enum Choice {
    Ball(u32),
    Reset,
    Setup,
    Quit,
}

/// Participant board: pick balls until the operator leaves
pub async fn run_draw(game: &Game) -> Result<DrawExit> {
    let revealer = game.revealer()?.clone();

    loop {
        let mut choices = {
            let engine = revealer.engine();
            println!();
            println!("{}", render::board_table(&engine));
            println!(
                "Remaining: {} / {}",
                engine.remaining(),
                engine.ball_count()
            );

            let mut choices: Vec<(String, Choice)> = engine
                .shuffled_order()
                .iter()
                .filter(|&&ball| !engine.is_drawn(ball))
                .map(|&ball| (format!("Draw ball #{}", ball), Choice::Ball(ball)))
                .collect();
            if !engine.drawn().is_empty() {
                choices.push(("Reset round".to_string(), Choice::Reset));
            }
            choices
        };
        choices.push(("Back to setup".to_string(), Choice::Setup));
        choices.push(("Quit".to_string(), Choice::Quit));

        let labels: Vec<&str> = choices.iter().map(|(label, _)| label.as_str()).collect();
        let selection = Select::new()
            .with_prompt("Draw")
            .items(&labels)
            .default(0)
            .interact()?;

        match choices[selection].1 {
            Choice::Ball(ball) => {
                println!("Flipping ball #{}...", ball);
                match revealer.draw(ball).await {
                    Ok(reveal) => println!(">>> Ball #{}: {} <<<", reveal.ball, reveal.outcome),
                    Err(e) => rejected(e)?,
                }
                if revealer.engine().is_finished() {
                    println!("Every ball has been drawn.");
                }
            }
            Choice::Reset => match revealer.reset() {
                Ok(()) => println!("Balls reshuffled."),
                Err(e) => rejected(e)?,
            },
            Choice::Setup => return Ok(DrawExit::Setup),
            Choice::Quit => return Ok(DrawExit::Quit),
        }
    }
}

fn rejected(e: GameError) -> Result<()> {
    if e.is_rejection() {
        println!("Rejected: {}", e);
        Ok(())
    } else {
        Err(e.into())
    }
}
