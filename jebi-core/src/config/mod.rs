//! Setup-phase editor for balls, outcomes and the hidden ball assignments.
//!
//! Every edit either applies in full or is rejected with the configuration
//! left exactly as it was. Outcome totals can never exceed the ball count
//! through outcome edits; shrinking the ball count is deliberately allowed
//! to leave the configuration over-allotted until the operator fixes it.

pub mod settings;

pub use settings::{GameSettings, OutcomePreset};

use crate::error::{GameError, Result};
use crate::types::{AssignmentOption, BallNumber, ConfigIssue, Outcome, MAX_BALLS, MIN_BALLS};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use uuid::Uuid;

/// Plain configuration data: ball count, outcome list, ball -> outcome label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub ball_count: u32,
    pub outcomes: Vec<Outcome>,
    pub assignments: BTreeMap<BallNumber, String>,
}

impl GameConfig {
    fn from_settings(settings: &GameSettings) -> Self {
        Self {
            ball_count: settings.ball_count,
            outcomes: settings
                .outcomes
                .iter()
                .map(|preset| Outcome::new(preset.text.clone(), preset.count))
                .collect(),
            assignments: BTreeMap::new(),
        }
    }

    fn assigned_count(&self, text: &str) -> usize {
        self.assignments.values().filter(|t| *t == text).count()
    }
}

#[derive(Debug, Clone)]
pub struct ConfigEngine {
    config: GameConfig,
}

impl Default for ConfigEngine {
    fn default() -> Self {
        Self {
            config: GameConfig::from_settings(&GameSettings::default()),
        }
    }
}

impl ConfigEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_settings(settings: &GameSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            config: GameConfig::from_settings(settings),
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn ball_count(&self) -> u32 {
        self.config.ball_count
    }

    pub fn outcomes(&self) -> &[Outcome] {
        &self.config.outcomes
    }

    pub fn outcome(&self, index: usize) -> Option<&Outcome> {
        self.config.outcomes.get(index)
    }

    pub fn position_of(&self, id: Uuid) -> Option<usize> {
        self.config.outcomes.iter().position(|o| o.id == id)
    }

    pub fn assignments(&self) -> &BTreeMap<BallNumber, String> {
        &self.config.assignments
    }

    pub fn assignment(&self, ball: BallNumber) -> Option<&str> {
        self.config.assignments.get(&ball).map(String::as_str)
    }

    pub fn total_outcome_count(&self) -> u32 {
        self.config.outcomes.iter().map(|o| o.count).sum()
    }

    /// Balls not yet allotted to any outcome; negative after a ball-count shrink
    pub fn remaining_balls(&self) -> i64 {
        i64::from(self.config.ball_count) - i64::from(self.total_outcome_count())
    }

    /// Number of balls currently assigned to the given label
    pub fn assigned_count(&self, text: &str) -> usize {
        self.config.assigned_count(text)
    }

    pub fn can_add_outcome(&self) -> bool {
        self.total_outcome_count() < self.config.ball_count
    }

    /// Whether there is anything to assign balls to yet
    pub fn has_assignable_outcomes(&self) -> bool {
        self.config.outcomes.iter().any(|o| o.count > 0)
    }

    /// Adjust the ball count, clamped to the supported range.
    ///
    /// Outcomes and assignments are left untouched even if they no longer fit.
    pub fn set_ball_count(&mut self, delta: i32) -> u32 {
        let next = (i64::from(self.config.ball_count) + i64::from(delta))
            .clamp(i64::from(MIN_BALLS), i64::from(MAX_BALLS)) as u32;

        if next != self.config.ball_count {
            tracing::debug!("Ball count {} -> {}", self.config.ball_count, next);
        }
        if i64::from(next) < i64::from(self.total_outcome_count()) {
            tracing::warn!(
                "Ball count {} is below the {} balls allotted to outcomes",
                next,
                self.total_outcome_count()
            );
        }

        self.config.ball_count = next;
        next
    }

    /// Relabel an outcome. Assignments made under the old label are not renamed.
    pub fn set_outcome_text(&mut self, index: usize, text: impl Into<String>) -> Result<()> {
        let outcome = self
            .config
            .outcomes
            .get_mut(index)
            .ok_or(GameError::OutcomeNotFound(index))?;

        outcome.text = text.into();
        tracing::debug!("Outcome #{} relabelled to '{}'", index, outcome.text);
        Ok(())
    }

    /// Adjust an outcome's ball quota, clamped so the outcome total never
    /// exceeds the ball count. Returns the applied count.
    pub fn set_outcome_count(&mut self, index: usize, delta: i32) -> Result<u32> {
        let ball_count = i64::from(self.config.ball_count);
        let total = i64::from(self.total_outcome_count());

        let outcome = self
            .config
            .outcomes
            .get_mut(index)
            .ok_or(GameError::OutcomeNotFound(index))?;

        let current = i64::from(outcome.count);
        let max_allowed = ball_count - (total - current);
        let next = (current + i64::from(delta)).min(max_allowed).max(0) as u32;

        if i64::from(next) != current + i64::from(delta) {
            tracing::debug!(
                "Count for '{}' clamped to {} (requested {:+})",
                outcome.text,
                next,
                delta
            );
        }

        outcome.count = next;
        Ok(next)
    }

    /// Append a blank outcome; rejected once every ball is allotted.
    pub fn add_outcome(&mut self) -> Result<usize> {
        if !self.can_add_outcome() {
            return Err(GameError::NoCapacity {
                ball_count: self.config.ball_count,
            });
        }

        self.config.outcomes.push(Outcome::blank());
        Ok(self.config.outcomes.len() - 1)
    }

    /// Remove an outcome along with every assignment carrying its label.
    pub fn remove_outcome(&mut self, index: usize) -> Result<Outcome> {
        if index >= self.config.outcomes.len() {
            return Err(GameError::OutcomeNotFound(index));
        }

        let removed = self.config.outcomes.remove(index);
        let before = self.config.assignments.len();
        self.config
            .assignments
            .retain(|_, text| *text != removed.text);

        tracing::debug!(
            "Removed outcome '{}' and {} assignment(s)",
            removed.text,
            before - self.config.assignments.len()
        );
        Ok(removed)
    }

    /// Point a ball at the outcome with the given label.
    pub fn assign(&mut self, ball: BallNumber, text: &str) -> Result<()> {
        self.check_ball(ball)?;

        let capacity = self
            .config
            .outcomes
            .iter()
            .find(|o| o.text == text)
            .map(|o| o.count)
            .ok_or_else(|| GameError::UnknownOutcome(text.to_string()))?;

        let unchanged = self.assignment(ball) == Some(text);
        if !unchanged && self.assigned_count(text) >= capacity as usize {
            tracing::warn!("Outcome '{}' is full ({} balls)", text, capacity);
            return Err(GameError::OutcomeFull {
                text: text.to_string(),
                capacity,
            });
        }

        self.config.assignments.insert(ball, text.to_string());
        tracing::debug!("Ball {} -> '{}'", ball, text);
        Ok(())
    }

    /// Clear a ball's assignment, returning the label it had.
    pub fn unassign(&mut self, ball: BallNumber) -> Option<String> {
        self.config.assignments.remove(&ball)
    }

    /// Fill balls 1, 2, 3, ... in outcome-list order, each outcome taking
    /// as many consecutive balls as its count. Replaces every assignment.
    pub fn auto_assign(&mut self) {
        let mut assignments = BTreeMap::new();
        let mut next_ball: BallNumber = 1;

        for outcome in &self.config.outcomes {
            for _ in 0..outcome.count {
                assignments.insert(next_ball, outcome.text.clone());
                next_ball += 1;
            }
        }

        tracing::info!("Auto-assigned {} balls", assignments.len());
        self.config.assignments = assignments;
    }

    /// Picker entries for one ball; full outcomes stay selectable only for
    /// the ball that already holds them.
    pub fn assignment_options(&self, ball: BallNumber) -> Vec<AssignmentOption> {
        let current = self.assignment(ball);

        self.config
            .outcomes
            .iter()
            .map(|outcome| {
                let assigned = self.assigned_count(&outcome.text);
                let selected = current == Some(outcome.text.as_str());
                AssignmentOption {
                    text: outcome.text.clone(),
                    assigned,
                    capacity: outcome.count,
                    selected,
                    selectable: selected || assigned < outcome.count as usize,
                }
            })
            .collect()
    }

    /// Every ball assigned and every outcome holding exactly its quota
    pub fn is_complete(&self) -> bool {
        self.config.assignments.len() == self.config.ball_count as usize
            && self
                .config
                .outcomes
                .iter()
                .all(|o| self.assigned_count(&o.text) == o.count as usize)
    }

    pub fn issues(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.remaining_balls() < 0 {
            issues.push(ConfigIssue::Overallotted {
                excess: self.remaining_balls().unsigned_abs() as u32,
            });
        }

        let mut seen = HashSet::new();
        for (index, outcome) in self.config.outcomes.iter().enumerate() {
            if outcome.text.trim().is_empty() {
                issues.push(ConfigIssue::BlankLabel { index });
            } else if !seen.insert(outcome.text.as_str()) {
                issues.push(ConfigIssue::DuplicateLabel {
                    text: outcome.text.clone(),
                });
            }
        }

        for (&ball, text) in &self.config.assignments {
            if ball > self.config.ball_count {
                issues.push(ConfigIssue::BallOutOfRange { ball });
            }
            if !self.config.outcomes.iter().any(|o| &o.text == text) {
                issues.push(ConfigIssue::OrphanedAssignment {
                    ball,
                    text: text.clone(),
                });
            }
        }

        issues
    }

    /// Freeze a complete configuration for drawing.
    pub fn lock(&self) -> Result<LockedConfig> {
        if !self.is_complete() {
            return Err(GameError::Incomplete(self.describe_gap()));
        }

        if let Some(&ball) = self
            .config
            .assignments
            .keys()
            .find(|&&ball| ball > self.config.ball_count)
        {
            return Err(GameError::Incomplete(format!(
                "ball {} is assigned but only {} balls exist",
                ball, self.config.ball_count
            )));
        }

        tracing::info!(
            "Configuration locked: {} balls, {} outcomes",
            self.config.ball_count,
            self.config.outcomes.len()
        );
        Ok(LockedConfig {
            config: self.config.clone(),
            locked_at: Utc::now(),
        })
    }

    fn describe_gap(&self) -> String {
        if let Some(outcome) = self
            .config
            .outcomes
            .iter()
            .find(|o| self.assigned_count(&o.text) != o.count as usize)
        {
            return format!(
                "'{}' has {} of {} balls",
                outcome.text,
                self.assigned_count(&outcome.text),
                outcome.count
            );
        }

        format!(
            "{} of {} balls assigned",
            self.config.assignments.len(),
            self.config.ball_count
        )
    }

    fn check_ball(&self, ball: BallNumber) -> Result<()> {
        if ball < MIN_BALLS || ball > self.config.ball_count {
            return Err(GameError::BallOutOfRange {
                ball,
                ball_count: self.config.ball_count,
            });
        }
        Ok(())
    }
}

/// Read-only configuration handed to the draw phase; only [`ConfigEngine::lock`] builds one
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LockedConfig {
    config: GameConfig,
    locked_at: DateTime<Utc>,
}

impl LockedConfig {
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn ball_count(&self) -> u32 {
        self.config.ball_count
    }

    pub fn outcomes(&self) -> &[Outcome] {
        &self.config.outcomes
    }

    pub fn outcome_of(&self, ball: BallNumber) -> Option<&str> {
        self.config.assignments.get(&ball).map(String::as_str)
    }

    pub fn locked_at(&self) -> DateTime<Utc> {
        self.locked_at
    }

    /// Back to setup with the same configuration
    pub fn into_editable(self) -> ConfigEngine {
        tracing::info!("Configuration unlocked");
        ConfigEngine {
            config: self.config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn engine_with(ball_count: u32, outcomes: &[(&str, u32)]) -> ConfigEngine {
        ConfigEngine::from_settings(&GameSettings {
            ball_count,
            outcomes: outcomes
                .iter()
                .map(|(text, count)| OutcomePreset::new(*text, *count))
                .collect(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_default_configuration() {
        let engine = ConfigEngine::new();
        assert_eq!(engine.ball_count(), 5);
        let labels: Vec<_> = engine.outcomes().iter().map(|o| o.text.as_str()).collect();
        assert_eq!(labels, ["WIN", "MISS", "PENALTY"]);
        assert!(engine.assignments().is_empty());
        assert_eq!(engine.remaining_balls(), 0);
    }

    #[test]
    fn test_ball_count_clamps() {
        let mut engine = engine_with(1, &[]);
        assert_eq!(engine.set_ball_count(-1), 1);
        assert_eq!(engine.set_ball_count(100), MAX_BALLS);
        assert_eq!(engine.set_ball_count(1), MAX_BALLS);
        assert_eq!(engine.set_ball_count(-3), 17);
    }

    #[test]
    fn test_shrinking_ball_count_keeps_outcomes() {
        let mut engine = ConfigEngine::new();
        engine.auto_assign();
        engine.set_ball_count(-2);

        assert_eq!(engine.total_outcome_count(), 5);
        assert_eq!(engine.assignments().len(), 5);
        assert_eq!(engine.remaining_balls(), -2);
        assert!(engine
            .issues()
            .contains(&ConfigIssue::Overallotted { excess: 2 }));
        assert!(!engine.is_complete());
    }

    #[test]
    fn test_outcome_count_never_exceeds_balls() {
        for ball_count in [1, 3, 6, MAX_BALLS] {
            for index in 0..3 {
                for delta in -3..=3 {
                    let mut engine = engine_with(ball_count, &[("A", 0), ("B", 0), ("C", 0)]);
                    engine.set_outcome_count((index + 1) % 3, 2).unwrap();
                    engine.set_outcome_count((index + 2) % 3, 1).unwrap();

                    let before = engine.total_outcome_count();
                    engine.set_outcome_count(index, delta).unwrap();
                    assert!(engine.total_outcome_count() <= engine.ball_count());
                    if delta <= 0 {
                        assert!(engine.total_outcome_count() <= before);
                    }
                }
            }
        }
    }

    #[test]
    fn test_random_count_edits_stay_within_balls() {
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..200 {
            let ball_count = rng.gen_range(MIN_BALLS..=MAX_BALLS);
            let mut engine = engine_with(ball_count, &[("A", 0), ("B", 0), ("C", 0), ("D", 0)]);

            for _ in 0..40 {
                let index = rng.gen_range(0..4);
                let delta = rng.gen_range(-3..=3);
                engine.set_outcome_count(index, delta).unwrap();
                assert!(engine.total_outcome_count() <= engine.ball_count());
            }
        }
    }

    #[test]
    fn test_outcome_count_floor_after_shrink() {
        let mut engine = ConfigEngine::new();
        engine.set_ball_count(-3);
        // no room at all: raising is clamped down to zero, never negative
        assert_eq!(engine.set_outcome_count(2, 1).unwrap(), 0);
        assert_eq!(engine.set_outcome_count(0, -5).unwrap(), 0);
        assert!(matches!(
            engine.set_outcome_count(9, 1),
            Err(GameError::OutcomeNotFound(9))
        ));
    }

    #[test]
    fn test_add_outcome_needs_capacity() {
        let mut engine = ConfigEngine::new();
        assert!(!engine.can_add_outcome());
        assert!(matches!(
            engine.add_outcome(),
            Err(GameError::NoCapacity { ball_count: 5 })
        ));
        assert_eq!(engine.outcomes().len(), 3);

        engine.set_ball_count(1);
        assert_eq!(engine.add_outcome().unwrap(), 3);
        let added = engine.outcome(3).unwrap();
        assert_eq!(added.text, "");
        assert_eq!(added.count, 0);
    }

    #[test]
    fn test_assign_respects_capacity() {
        let mut engine = ConfigEngine::new();
        engine.assign(1, "WIN").unwrap();

        let err = engine.assign(2, "WIN").unwrap_err();
        assert!(matches!(err, GameError::OutcomeFull { capacity: 1, .. }));
        assert_eq!(engine.assignment(2), None);

        // re-selecting the current label is not a capacity violation
        engine.assign(1, "WIN").unwrap();
        assert_eq!(engine.assigned_count("WIN"), 1);

        // moving ball 1 frees the WIN slot
        engine.assign(1, "MISS").unwrap();
        engine.assign(2, "WIN").unwrap();
        assert_eq!(engine.assigned_count("WIN"), 1);
        assert_eq!(engine.assigned_count("MISS"), 1);
    }

    #[test]
    fn test_assign_rejects_unknown_and_out_of_range() {
        let mut engine = ConfigEngine::new();
        assert!(matches!(
            engine.assign(1, "JACKPOT"),
            Err(GameError::UnknownOutcome(_))
        ));
        assert!(matches!(
            engine.assign(6, "WIN"),
            Err(GameError::BallOutOfRange {
                ball: 6,
                ball_count: 5
            })
        ));
        assert!(engine.assign(0, "WIN").is_err());
        assert!(engine.assignments().is_empty());
    }

    #[test]
    fn test_remove_outcome_cascades_by_label() {
        let mut engine = ConfigEngine::new();
        engine.auto_assign();

        let removed = engine.remove_outcome(1).unwrap();
        assert_eq!(removed.text, "MISS");
        assert_eq!(engine.assignments().len(), 2);
        assert_eq!(engine.assignment(1), Some("WIN"));
        assert_eq!(engine.assignment(5), Some("PENALTY"));
        assert!(engine.remove_outcome(5).is_err());
    }

    #[test]
    fn test_rename_orphans_assignments() {
        let mut engine = ConfigEngine::new();
        engine.auto_assign();
        let id = engine.outcome(0).unwrap().id;

        engine.set_outcome_text(0, "JACKPOT").unwrap();
        assert_eq!(engine.position_of(id), Some(0));
        assert_eq!(engine.assignment(1), Some("WIN"));
        assert_eq!(engine.assigned_count("JACKPOT"), 0);
        assert!(!engine.is_complete());
        assert!(engine.issues().contains(&ConfigIssue::OrphanedAssignment {
            ball: 1,
            text: "WIN".to_string()
        }));
    }

    #[test]
    fn test_auto_assign_default() {
        let mut engine = ConfigEngine::new();
        engine.assign(5, "WIN").unwrap();
        engine.auto_assign();

        let expected: BTreeMap<BallNumber, String> = [
            (1, "WIN"),
            (2, "MISS"),
            (3, "MISS"),
            (4, "MISS"),
            (5, "PENALTY"),
        ]
        .into_iter()
        .map(|(ball, text)| (ball, text.to_string()))
        .collect();
        assert_eq!(engine.assignments(), &expected);
        assert!(engine.is_complete());
    }

    #[test]
    fn test_incomplete_when_quota_unmet() {
        let mut engine = ConfigEngine::new();
        assert!(!engine.is_complete());

        engine.auto_assign();
        engine.unassign(3);
        assert!(!engine.is_complete());
        assert!(matches!(engine.lock(), Err(GameError::Incomplete(_))));
    }

    #[test]
    fn test_assignment_options() {
        let mut engine = ConfigEngine::new();
        engine.assign(1, "WIN").unwrap();

        let for_ball_1 = engine.assignment_options(1);
        assert!(for_ball_1[0].selected && for_ball_1[0].selectable);

        let for_ball_2 = engine.assignment_options(2);
        assert_eq!(for_ball_2[0].assigned, 1);
        assert!(!for_ball_2[0].selectable);
        assert!(for_ball_2[1].selectable);
    }

    #[test]
    fn test_duplicate_and_blank_labels_reported() {
        let mut engine = engine_with(4, &[("A", 1), ("A", 1)]);
        engine.add_outcome().unwrap();
        let issues = engine.issues();
        assert!(issues.contains(&ConfigIssue::DuplicateLabel {
            text: "A".to_string()
        }));
        assert!(issues.contains(&ConfigIssue::BlankLabel { index: 2 }));
    }

    #[test]
    fn test_lock_and_unlock_round_trip() {
        let mut engine = ConfigEngine::new();
        assert!(engine.has_assignable_outcomes());
        assert!(engine.lock().is_err());

        engine.auto_assign();
        let locked = engine.lock().unwrap();
        assert_eq!(locked.ball_count(), 5);
        assert_eq!(locked.outcome_of(4), Some("MISS"));
        assert_eq!(locked.outcome_of(6), None);

        let editable = locked.into_editable();
        assert_eq!(editable.config(), engine.config());
    }

    #[test]
    fn test_locked_config_exports_as_json() {
        let mut engine = ConfigEngine::new();
        engine.auto_assign();
        let locked = engine.lock().unwrap();

        let json = serde_json::to_value(&locked).unwrap();
        assert_eq!(json["config"]["ball_count"], 5);
        assert_eq!(json["config"]["assignments"]["5"], "PENALTY");

        let config: GameConfig = serde_json::from_value(json["config"].clone()).unwrap();
        assert_eq!(&config, engine.config());
    }
}
