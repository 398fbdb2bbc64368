pub mod reveal;

pub use reveal::Revealer;

use crate::config::LockedConfig;
use crate::error::{GameError, Result};
use crate::types::{BallNumber, Reveal};
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Whether a ball is mid-flip; only one reveal may be in flight
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealState {
    Idle,
    Revealing {
        ball: BallNumber,
        since: DateTime<Utc>,
    },
}

/// One play-through over a locked configuration
#[derive(Debug, Clone)]
pub struct DrawEngine {
    config: LockedConfig,
    shuffled_order: Vec<BallNumber>,
    drawn: BTreeSet<BallNumber>,
    reveal: RevealState,
    round: u32,
}

impl DrawEngine {
    pub fn new(config: LockedConfig) -> Self {
        Self::with_rng(config, &mut rand::thread_rng())
    }

    pub fn with_rng<R: Rng + ?Sized>(config: LockedConfig, rng: &mut R) -> Self {
        let mut engine = Self {
            config,
            shuffled_order: Vec::new(),
            drawn: BTreeSet::new(),
            reveal: RevealState::Idle,
            round: 0,
        };
        engine.new_round(rng);
        engine
    }

    pub fn config(&self) -> &LockedConfig {
        &self.config
    }

    pub fn into_config(self) -> LockedConfig {
        self.config
    }

    pub fn ball_count(&self) -> u32 {
        self.config.ball_count()
    }

    /// Display order of the balls for this round
    pub fn shuffled_order(&self) -> &[BallNumber] {
        &self.shuffled_order
    }

    pub fn drawn(&self) -> &BTreeSet<BallNumber> {
        &self.drawn
    }

    pub fn is_drawn(&self, ball: BallNumber) -> bool {
        self.drawn.contains(&ball)
    }

    pub fn remaining(&self) -> u32 {
        self.ball_count() - self.drawn.len() as u32
    }

    pub fn is_finished(&self) -> bool {
        self.remaining() == 0
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn reveal_state(&self) -> &RevealState {
        &self.reveal
    }

    pub fn is_revealing(&self) -> bool {
        matches!(self.reveal, RevealState::Revealing { .. })
    }

    /// Outcome of a ball, hidden until it has been drawn
    pub fn revealed_outcome(&self, ball: BallNumber) -> Option<&str> {
        if self.is_drawn(ball) {
            self.config.outcome_of(ball)
        } else {
            None
        }
    }

    /// Start flipping a ball. The ball only counts as drawn once
    /// [`finish_reveal`](Self::finish_reveal) runs.
    pub fn begin_reveal(&mut self, ball: BallNumber) -> Result<()> {
        if let RevealState::Revealing { ball: in_flight, .. } = self.reveal {
            return Err(GameError::DrawInFlight(in_flight));
        }

        if ball == 0 || ball > self.ball_count() {
            return Err(GameError::BallOutOfRange {
                ball,
                ball_count: self.ball_count(),
            });
        }

        if self.is_drawn(ball) {
            return Err(GameError::AlreadyDrawn(ball));
        }

        self.reveal = RevealState::Revealing {
            ball,
            since: Utc::now(),
        };
        tracing::debug!("Revealing ball {}", ball);
        Ok(())
    }

    pub fn finish_reveal(&mut self) -> Result<Reveal> {
        let ball = match self.reveal {
            RevealState::Revealing { ball, .. } => ball,
            RevealState::Idle => return Err(GameError::NoRevealPending),
        };

        let outcome = self
            .config
            .outcome_of(ball)
            .ok_or_else(|| GameError::internal(format!("ball {} has no outcome", ball)))?
            .to_string();

        self.drawn.insert(ball);
        self.reveal = RevealState::Idle;

        tracing::info!(
            "Ball {} revealed '{}' ({} remaining)",
            ball,
            outcome,
            self.remaining()
        );
        Ok(Reveal { ball, outcome })
    }

    /// Draw a ball without any reveal delay
    pub fn draw(&mut self, ball: BallNumber) -> Result<Reveal> {
        self.begin_reveal(ball)?;
        self.finish_reveal()
    }

    /// Reshuffle and clear all draws. Rejected while a ball is mid-flip.
    pub fn reset(&mut self) -> Result<()> {
        self.reset_with_rng(&mut rand::thread_rng())
    }

    pub fn reset_with_rng<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<()> {
        if let RevealState::Revealing { ball, .. } = self.reveal {
            return Err(GameError::DrawInFlight(ball));
        }

        self.new_round(rng);
        Ok(())
    }

    fn new_round<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut order: Vec<BallNumber> = (1..=self.ball_count()).collect();
        order.shuffle(rng);

        self.shuffled_order = order;
        self.drawn.clear();
        self.reveal = RevealState::Idle;
        self.round += 1;

        tracing::info!("Round {} started with {} balls", self.round, self.ball_count());
    }
}
