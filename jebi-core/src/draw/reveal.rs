use super::DrawEngine;
use crate::error::{GameError, Result};
use crate::types::{BallNumber, Reveal};
use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;
use std::time::Duration;

/// Draws with a fixed flip delay between picking a ball and showing its outcome.
///
/// The engine sits behind a mutex so the presentation layer can hand clones
/// of this handle to whatever reacts to input. While a ball is flipping every
/// other draw attempt is rejected; the delay itself cannot be cancelled.
#[derive(Debug, Clone)]
pub struct Revealer {
    engine: Arc<Mutex<DrawEngine>>,
    delay: Duration,
}

impl Revealer {
    pub fn new(engine: DrawEngine, delay: Duration) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
            delay,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn engine(&self) -> MutexGuard<'_, DrawEngine> {
        self.engine.lock()
    }

    /// The flip always runs to completion on its own task, even if the
    /// returned future is dropped before it resolves.
    pub async fn draw(&self, ball: BallNumber) -> Result<Reveal> {
        self.engine.lock().begin_reveal(ball)?;

        let engine = Arc::clone(&self.engine);
        let delay = self.delay;
        let flip = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            engine.lock().finish_reveal()
        });

        flip.await
            .map_err(|e| GameError::internal(format!("reveal task failed: {}", e)))?
    }

    pub fn reset(&self) -> Result<()> {
        self.engine.lock().reset()
    }

    /// Take the engine back out; fails while other handles are alive.
    pub fn into_engine(self) -> std::result::Result<DrawEngine, Self> {
        let delay = self.delay;
        Arc::try_unwrap(self.engine)
            .map(Mutex::into_inner)
            .map_err(|engine| Self { engine, delay })
    }
}
