use crate::error::{GameError, Result};
use crate::types::{MAX_BALLS, MIN_BALLS};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const MAX_REVEAL_DELAY_MS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomePreset {
    pub text: String,
    pub count: u32,
}

impl OutcomePreset {
    pub fn new(text: impl Into<String>, count: u32) -> Self {
        Self {
            text: text.into(),
            count,
        }
    }
}

/// Starting point for a fresh setup plus draw pacing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub ball_count: u32,
    pub outcomes: Vec<OutcomePreset>,
    pub reveal_delay_ms: u64,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            ball_count: 5,
            outcomes: vec![
                OutcomePreset::new("WIN", 1),
                OutcomePreset::new("MISS", 3),
                OutcomePreset::new("PENALTY", 1),
            ],
            reveal_delay_ms: 600, // flip animation
        }
    }
}

impl GameSettings {
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }

    pub fn preset_total(&self) -> u32 {
        self.outcomes.iter().map(|o| o.count).sum()
    }

    pub fn validate(&self) -> Result<()> {
        if !(MIN_BALLS..=MAX_BALLS).contains(&self.ball_count) {
            return Err(GameError::config(format!(
                "Ball count must be between {} and {}, got {}",
                MIN_BALLS, MAX_BALLS, self.ball_count
            )));
        }

        if self.preset_total() > self.ball_count {
            return Err(GameError::config(format!(
                "Outcome presets claim {} balls but only {} exist",
                self.preset_total(),
                self.ball_count
            )));
        }

        if self.reveal_delay_ms > MAX_REVEAL_DELAY_MS {
            return Err(GameError::config(format!(
                "Reveal delay cannot exceed {} ms",
                MAX_REVEAL_DELAY_MS
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = GameSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.preset_total(), 5);
        assert_eq!(settings.reveal_delay(), Duration::from_millis(600));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = GameSettings::from_json(r#"{ "reveal_delay_ms": 0 }"#).unwrap();
        assert_eq!(settings.ball_count, 5);
        assert_eq!(settings.outcomes.len(), 3);
        assert_eq!(settings.reveal_delay_ms, 0);
    }

    #[test]
    fn test_rejects_bad_settings() {
        let too_many = GameSettings {
            ball_count: 21,
            ..Default::default()
        };
        assert!(matches!(too_many.validate(), Err(GameError::Config(_))));

        let overallotted = GameSettings {
            ball_count: 2,
            ..Default::default()
        };
        assert!(overallotted.validate().is_err());

        assert!(GameSettings::from_json(r#"{ "reveal_delay_ms": 60000 }"#).is_err());
        assert!(matches!(
            GameSettings::from_json("not json"),
            Err(GameError::Serialization(_))
        ));
    }
}
