use crate::config::{ConfigEngine, GameSettings};
use crate::draw::{DrawEngine, Revealer};
use crate::{GameError, Result};
use chrono::{DateTime, Utc};
use parking_lot::MutexGuard;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which side of the lock the session is on
#[derive(Debug)]
pub enum GamePhase {
    Setup(ConfigEngine),
    Drawing(Revealer),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseKind {
    Setup,
    Drawing,
}

/// A single operator session: edit, lock, draw, optionally unlock and edit again
#[derive(Debug)]
pub struct Game {
    id: Uuid,
    settings: GameSettings,
    phase: GamePhase,
    created_at: DateTime<Utc>,
}

impl Game {
    pub fn new(settings: GameSettings) -> Result<Self> {
        let config = ConfigEngine::from_settings(&settings)?;

        let game = Self {
            id: Uuid::new_v4(),
            settings,
            phase: GamePhase::Setup(config),
            created_at: Utc::now(),
        };
        tracing::info!("Game {} created", game.id);
        Ok(game)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn phase(&self) -> &GamePhase {
        &self.phase
    }

    pub fn phase_kind(&self) -> PhaseKind {
        match self.phase {
            GamePhase::Setup(_) => PhaseKind::Setup,
            GamePhase::Drawing(_) => PhaseKind::Drawing,
        }
    }

    pub fn config(&self) -> Result<&ConfigEngine> {
        match &self.phase {
            GamePhase::Setup(config) => Ok(config),
            GamePhase::Drawing(_) => Err(GameError::invalid_state(
                "Configuration is locked",
            )),
        }
    }

    pub fn config_mut(&mut self) -> Result<&mut ConfigEngine> {
        match &mut self.phase {
            GamePhase::Setup(config) => Ok(config),
            GamePhase::Drawing(_) => Err(GameError::invalid_state(
                "Configuration is locked",
            )),
        }
    }

    pub fn revealer(&self) -> Result<&Revealer> {
        match &self.phase {
            GamePhase::Drawing(revealer) => Ok(revealer),
            GamePhase::Setup(_) => Err(GameError::invalid_state(
                "Configuration is not locked yet",
            )),
        }
    }

    pub fn draw_engine(&self) -> Result<MutexGuard<'_, DrawEngine>> {
        Ok(self.revealer()?.engine())
    }

    /// Freeze the configuration and start the first round
    pub fn lock(&mut self) -> Result<()> {
        let locked = self.config()?.lock()?;
        let engine = DrawEngine::new(locked);

        self.phase = GamePhase::Drawing(Revealer::new(engine, self.settings.reveal_delay()));
        tracing::info!("Game {} moved to drawing", self.id);
        Ok(())
    }

    /// Return to setup, discarding the current round
    pub fn unlock(&mut self) -> Result<()> {
        let engine = self.draw_engine()?;
        if engine.is_revealing() {
            return Err(GameError::invalid_state("A ball is still being revealed"));
        }
        let config = engine.config().clone().into_editable();
        drop(engine);

        self.phase = GamePhase::Setup(config);
        tracing::info!("Game {} back in setup", self.id);
        Ok(())
    }

    pub fn info(&self) -> GameInfo {
        let (ball_count, outcome_count, assigned, drawn) = match &self.phase {
            GamePhase::Setup(config) => (
                config.ball_count(),
                config.outcomes().len(),
                config.assignments().len(),
                0,
            ),
            GamePhase::Drawing(revealer) => {
                let engine = revealer.engine();
                let config = engine.config();
                (
                    config.ball_count(),
                    config.outcomes().len(),
                    config.config().assignments.len(),
                    engine.drawn().len(),
                )
            }
        };

        GameInfo {
            id: self.id,
            phase: self.phase_kind(),
            ball_count,
            outcome_count,
            assigned,
            drawn,
            created_at: self.created_at,
        }
    }
}

/// Game info for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameInfo {
    pub id: Uuid,
    pub phase: PhaseKind,
    pub ball_count: u32,
    pub outcome_count: usize,
    pub assigned: usize,
    pub drawn: usize,
    pub created_at: DateTime<Utc>,
}
