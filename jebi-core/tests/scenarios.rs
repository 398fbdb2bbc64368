use jebi_core::{
    create_game, ConfigEngine, DrawEngine, GameError, GameSettings, OutcomePreset,
};

fn settings(ball_count: u32, outcomes: &[(&str, u32)]) -> GameSettings {
    GameSettings {
        ball_count,
        outcomes: outcomes
            .iter()
            .map(|(text, count)| OutcomePreset::new(*text, *count))
            .collect(),
        reveal_delay_ms: 0,
    }
}

#[test]
fn default_setup_auto_assigns_in_order() {
    let mut engine = ConfigEngine::new();
    engine.auto_assign();

    let assigned: Vec<(u32, &str)> = engine
        .assignments()
        .iter()
        .map(|(ball, text)| (*ball, text.as_str()))
        .collect();
    assert_eq!(
        assigned,
        [(1, "WIN"), (2, "MISS"), (3, "MISS"), (4, "MISS"), (5, "PENALTY")]
    );
    assert!(engine.is_complete());
}

#[test]
fn outcome_counts_cannot_overshoot_ball_count() {
    let mut engine = ConfigEngine::from_settings(&settings(3, &[])).unwrap();
    let a = engine.add_outcome().unwrap();
    engine.set_outcome_text(a, "A").unwrap();
    assert_eq!(engine.set_outcome_count(a, 2).unwrap(), 2);

    let b = engine.add_outcome().unwrap();
    engine.set_outcome_text(b, "B").unwrap();
    // asking for 2 more would make the total 4; only 1 ball is left
    assert_eq!(engine.set_outcome_count(b, 2).unwrap(), 1);

    assert_eq!(engine.total_outcome_count(), 3);
    assert!(!engine.can_add_outcome());
}

#[test]
fn auto_assign_completes_whenever_quotas_fill_the_balls() {
    let cases: &[&[(&str, u32)]] = &[
        &[("only", 1)],
        &[("a", 2), ("b", 3), ("c", 5)],
        &[("x", 19), ("y", 1)],
        &[("p", 4), ("q", 4), ("r", 4), ("s", 4), ("t", 4)],
    ];

    for outcomes in cases {
        let total = outcomes.iter().map(|(_, count)| count).sum();
        let mut engine = ConfigEngine::from_settings(&settings(total, outcomes)).unwrap();
        engine.auto_assign();
        assert!(engine.is_complete(), "not complete for {:?}", outcomes);
        assert!(engine.lock().is_ok());
    }
}

#[test]
fn assignment_never_exceeds_quota() {
    let mut engine = ConfigEngine::new();

    for ball in 1..=5 {
        for label in ["WIN", "MISS", "PENALTY"] {
            let _ = engine.assign(ball, label);
            for outcome in engine.outcomes() {
                assert!(engine.assigned_count(&outcome.text) <= outcome.count as usize);
            }
        }
    }
}

#[test]
fn removing_outcome_clears_only_its_balls() {
    let mut engine = ConfigEngine::new();
    engine.auto_assign();

    engine.remove_outcome(0).unwrap();

    assert!(!engine.assignments().contains_key(&1));
    assert_eq!(engine.assignments().len(), 4);
    assert!(engine.assignments().values().all(|text| text != "WIN"));
}

#[test]
fn drawing_the_same_ball_twice() {
    let mut config = ConfigEngine::from_settings(&settings(3, &[("A", 1), ("B", 2)])).unwrap();
    config.auto_assign();
    let mut draw = DrawEngine::new(config.lock().unwrap());

    let first = draw.draw(2).unwrap();
    assert_eq!(first.outcome, "B");

    let second = draw.draw(2);
    assert!(matches!(second, Err(GameError::AlreadyDrawn(2))));
    assert_eq!(draw.drawn().len(), 1);
    assert_eq!(draw.remaining(), 2);
}

#[tokio::test]
async fn full_session_round_trip() {
    let mut game = create_game(settings(4, &[("prize", 1), ("blank", 3)])).unwrap();

    let config = game.config_mut().unwrap();
    config.assign(3, "prize").unwrap();
    for ball in [1, 2, 4] {
        config.assign(ball, "blank").unwrap();
    }
    game.lock().unwrap();

    let revealer = game.revealer().unwrap().clone();
    let order = revealer.engine().shuffled_order().to_vec();
    let mut prizes = 0;
    for ball in order {
        if revealer.draw(ball).await.unwrap().outcome == "prize" {
            prizes += 1;
        }
    }

    assert_eq!(prizes, 1);
    assert!(revealer.engine().is_finished());
    assert_eq!(revealer.engine().revealed_outcome(3), Some("prize"));

    revealer.reset().unwrap();
    assert_eq!(revealer.engine().remaining(), 4);
}
