//! How the loading screen waits between steps.
//!
//! Pauses exist only so the loading screen reads well; nothing depends on them
//! for correctness. [`EnginePacing`] blocks through the engine, [`Headless`]
//! skips every pause and only keeps count.

use instant::Duration;

use crate::engine::Engine;

pub trait Pacing {
    fn pause<E: Engine + ?Sized>(&mut self, engine: &mut E, delay: Duration);
}

/// Blocks for each pause with [`Engine::delay`].
#[derive(Debug, Default, Clone, Copy)]
pub struct EnginePacing;

impl Pacing for EnginePacing {
    fn pause<E: Engine + ?Sized>(&mut self, engine: &mut E, delay: Duration) {
        if delay.is_zero() {
            return;
        }
        log::debug!("pause {:?}", delay);
        engine.delay(delay);
    }
}

/// Never waits. Used by tests and by headless tools.
#[derive(Debug, Default, Clone)]
pub struct Headless {
    pauses: usize,
    skipped: Duration,
}

impl Headless {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pauses requested so far.
    pub fn pauses(&self) -> usize {
        self.pauses
    }

    /// Total time that would have been spent waiting.
    pub fn skipped(&self) -> Duration {
        self.skipped
    }
}

impl Pacing for Headless {
    fn pause<E: Engine + ?Sized>(&mut self, _engine: &mut E, delay: Duration) {
        self.pauses += 1;
        self.skipped += delay;
    }
}
