use super::render;
use anyhow::Result;
use dialoguer::{Input, Select};
use jebi_core::{ConfigEngine, Game, GameError};

pub enum SetupExit {
    Locked,
    Quit,
}

const ACTIONS: [&str; 11] = [
    "Add a ball",
    "Remove a ball",
    "Add outcome",
    "Edit outcome",
    "Remove outcome",
    "Assign a ball",
    "Clear a ball",
    "Auto-assign",
    "Show assignments",
    "Lock and start draw",
    "Quit",
];

/// Operator menu; returns once the setup is locked or the operator quits
pub fn run_setup(game: &mut Game) -> Result<SetupExit> {
    loop {
        let engine = game.config_mut()?;
        print_overview(engine);

        let selection = Select::new()
            .with_prompt("Setup")
            .items(&ACTIONS[..])
            .default(0)
            .interact()?;

        let outcome = match selection {
            0 => {
                engine.set_ball_count(1);
                Ok(())
            }
            1 => {
                engine.set_ball_count(-1);
                Ok(())
            }
            2 => add_outcome(engine),
            3 => edit_outcome(engine),
            4 => remove_outcome(engine),
            5 => assign_ball(engine),
            6 => clear_ball(engine),
            7 => {
                engine.auto_assign();
                println!("Balls assigned in outcome order.");
                Ok(())
            }
            8 => {
                println!("{}", render::assignment_table(engine));
                Ok(())
            }
            9 => match game.lock() {
                Ok(()) => {
                    println!("Configuration locked. Let the draw begin!");
                    return Ok(SetupExit::Locked);
                }
                Err(e) => Err(e.into()),
            },
            10 => return Ok(SetupExit::Quit),
            _ => unreachable!(),
        };

        report(outcome)?;
    }
}

/// Game-rule rejections are shown and the menu carries on
fn report(result: Result<()>) -> Result<()> {
    match result {
        Ok(()) => Ok(()),
        Err(e) => match e.downcast_ref::<GameError>() {
            Some(rejection) if rejection.is_rejection() => {
                println!("Rejected: {}", rejection);
                Ok(())
            }
            _ => Err(e),
        },
    }
}

fn print_overview(engine: &ConfigEngine) {
    println!();
    println!("{}", render::summary_line(engine));
    println!("{}", render::outcome_table(engine));
    for issue in engine.issues() {
        println!("  ! {}", issue);
    }
}

fn pick_outcome(engine: &ConfigEngine, prompt: &str) -> Result<Option<usize>> {
    if engine.outcomes().is_empty() {
        println!("No outcomes yet.");
        return Ok(None);
    }

    let labels: Vec<String> = engine
        .outcomes()
        .iter()
        .enumerate()
        .map(|(i, o)| format!("{}. {} ({} balls)", i + 1, o.text, o.count))
        .collect();

    let selection = Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(0)
        .interact_opt()?;
    Ok(selection)
}

fn add_outcome(engine: &mut ConfigEngine) -> Result<()> {
    let index = engine.add_outcome()?;

    let text: String = Input::new()
        .with_prompt("Label")
        .allow_empty(true)
        .interact_text()?;
    engine.set_outcome_text(index, text)?;
    Ok(())
}

fn edit_outcome(engine: &mut ConfigEngine) -> Result<()> {
    let Some(index) = pick_outcome(engine, "Which outcome?")? else {
        return Ok(());
    };
    let id = engine.outcomes()[index].id;

    let options = ["+1 ball", "-1 ball", "Rename", "Done"];
    loop {
        let Some(index) = engine.position_of(id) else {
            return Ok(());
        };
        let outcome = &engine.outcomes()[index];
        println!("'{}': {} balls", outcome.text, outcome.count);

        let selection = Select::new()
            .with_prompt("Edit")
            .items(&options[..])
            .default(0)
            .interact()?;

        match selection {
            0 | 1 => {
                let delta = if selection == 0 { 1 } else { -1 };
                let requested = i64::from(outcome.count) + i64::from(delta);
                let applied = engine.set_outcome_count(index, delta)?;
                if let Some(note) = clamp_note(delta, requested, applied) {
                    println!("{}", note);
                }
            }
            2 => {
                let text: String = Input::new()
                    .with_prompt("New label")
                    .with_initial_text(outcome.text.clone())
                    .allow_empty(true)
                    .interact_text()?;
                engine.set_outcome_text(index, text)?;
            }
            3 => return Ok(()),
            _ => unreachable!(),
        }
    }
}

/// Explain why a count edit landed somewhere other than requested
fn clamp_note(delta: i32, requested: i64, applied: u32) -> Option<&'static str> {
    if i64::from(applied) == requested {
        None
    } else if delta > 0 {
        Some("No room: every ball is already allotted.")
    } else if requested < 0 {
        Some("Count is already at zero.")
    } else {
        Some("Count lowered further to fit the current ball count.")
    }
}

fn remove_outcome(engine: &mut ConfigEngine) -> Result<()> {
    if let Some(index) = pick_outcome(engine, "Remove which outcome?")? {
        let removed = engine.remove_outcome(index)?;
        println!("Removed '{}'.", removed.text);
    }
    Ok(())
}

fn pick_ball(engine: &ConfigEngine, prompt: &str) -> Result<Option<u32>> {
    let labels: Vec<String> = (1..=engine.ball_count())
        .map(|ball| match engine.assignment(ball) {
            Some(text) => format!("Ball {} -> {}", ball, text),
            None => format!("Ball {}", ball),
        })
        .collect();

    let selection = Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(0)
        .interact_opt()?;
    Ok(selection.map(|index| index as u32 + 1))
}

fn assign_ball(engine: &mut ConfigEngine) -> Result<()> {
    if !engine.has_assignable_outcomes() {
        println!("Give at least one outcome a ball first.");
        return Ok(());
    }

    let Some(ball) = pick_ball(engine, "Which ball?")? else {
        return Ok(());
    };

    let options = engine.assignment_options(ball);
    let labels: Vec<String> = options
        .iter()
        .map(|option| {
            let marker = if option.selectable { "" } else { " [full]" };
            format!(
                "{} ({}/{}){}",
                option.text, option.assigned, option.capacity, marker
            )
        })
        .collect();

    let Some(choice) = Select::new()
        .with_prompt(format!("Outcome for ball {}", ball))
        .items(&labels)
        .default(0)
        .interact_opt()?
    else {
        return Ok(());
    };

    engine.assign(ball, &options[choice].text)?;
    Ok(())
}

fn clear_ball(engine: &mut ConfigEngine) -> Result<()> {
    if let Some(ball) = pick_ball(engine, "Clear which ball?")? {
        if let Some(previous) = engine.unassign(ball) {
            println!("Ball {} no longer -> {}", ball, previous);
        }
    }
    Ok(())
}
