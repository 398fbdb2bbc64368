//! Rigged lottery engine
//!
//! An operator assigns hidden outcomes to numbered balls, locks the setup,
//! and participants then draw balls one at a time to reveal them.
//! `ConfigEngine` keeps balls, outcome quotas and assignments consistent;
//! `DrawEngine` runs the shuffled rounds over a locked configuration.

pub mod config;
pub mod draw;
pub mod error;
pub mod game;
pub mod types;

pub use config::{ConfigEngine, GameConfig, GameSettings, LockedConfig, OutcomePreset};
pub use draw::{DrawEngine, RevealState, Revealer};
pub use error::{GameError, Result};
pub use game::{Game, GameInfo, GamePhase, PhaseKind};
pub use types::{
    AssignmentOption, BallNumber, ConfigIssue, Outcome, Reveal, MAX_BALLS, MIN_BALLS,
};

/// Start a new session from the given settings
pub fn create_game(settings: GameSettings) -> Result<Game> {
    Game::new(settings)
}
