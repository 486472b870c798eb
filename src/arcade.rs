//! Single-threaded command queue driving both engines
//!
//! Clock ticks and key presses arrive as [`Command`]s and are applied strictly
//! in FIFO order, so a pursuit tick never observes a half-applied player move.

use std::collections::VecDeque;

use crate::consts::MAX_CATCH_UP_TICKS;
use crate::physics::{BodyManifest, Bounds, PhysicsEngine};
use crate::pursuit::{Direction, MoveOutcome, PursuitEngine, PursuitLayout, PursuitOutcome};
use crate::settings::Settings;

/// One unit of work for the arcade
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Advance physics; `None` when the host could not measure the viewport
    PhysicsTick(Option<Bounds>),
    PursuitTick,
    Input(Direction),
    ResetPhysics,
    ResetPursuit,
}

/// What applying a command did, for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Physics { advanced: bool },
    Pursuit(PursuitOutcome),
    Move(MoveOutcome),
    Reset,
}

/// Converts elapsed time into a whole number of fixed-interval ticks
#[derive(Debug, Clone)]
pub struct FixedClock {
    interval_ms: f64,
    accumulator: f64,
    max_catch_up: u32,
}

impl FixedClock {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms: f64::from(interval_ms.max(1)),
            accumulator: 0.0,
            max_catch_up: MAX_CATCH_UP_TICKS,
        }
    }

    pub fn with_max_catch_up(mut self, max_catch_up: u32) -> Self {
        self.max_catch_up = max_catch_up.max(1);
        self
    }

    /// Add elapsed time and return how many ticks are due
    ///
    /// After a long stall at most `max_catch_up` ticks are replayed; the rest of
    /// the backlog is dropped to prevent a spiral of death.
    pub fn accumulate(&mut self, dt_ms: f64) -> u32 {
        if dt_ms.is_finite() && dt_ms > 0.0 {
            self.accumulator += dt_ms;
        }

        let mut ticks = 0;
        while self.accumulator >= self.interval_ms && ticks < self.max_catch_up {
            self.accumulator -= self.interval_ms;
            ticks += 1;
        }
        if ticks == self.max_catch_up && self.accumulator >= self.interval_ms {
            log::debug!(
                "Clock dropping {:.1} ms of backlog",
                self.accumulator - self.accumulator % self.interval_ms
            );
            self.accumulator %= self.interval_ms;
        }
        ticks
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

/// Both engines plus the queue and clocks feeding them
#[derive(Debug, Clone)]
pub struct Arcade {
    physics: PhysicsEngine,
    pursuit: PursuitEngine,
    queue: VecDeque<Command>,
    physics_clock: FixedClock,
    pursuit_clock: FixedClock,
}

impl Arcade {
    pub fn new(settings: &Settings) -> Self {
        Self::with_engines(
            settings,
            PhysicsEngine::new(BodyManifest::reference(), settings.physics),
            PursuitEngine::new(PursuitLayout::reference(), settings.pursuit),
        )
    }

    pub fn with_engines(settings: &Settings, physics: PhysicsEngine, pursuit: PursuitEngine) -> Self {
        Self {
            physics,
            pursuit,
            queue: VecDeque::new(),
            physics_clock: FixedClock::new(settings.physics_interval_ms),
            pursuit_clock: FixedClock::new(settings.pursuit.pursuit_interval_ms),
        }
    }

    pub fn physics(&self) -> &PhysicsEngine {
        &self.physics
    }

    pub fn pursuit(&self) -> &PursuitEngine {
        &self.pursuit
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn push(&mut self, command: Command) {
        self.queue.push_back(command);
    }

    /// Queue a key press. Returns false for keys that are not directions.
    pub fn press_key(&mut self, key: &str) -> bool {
        match Direction::from_key(key) {
            Some(direction) => {
                self.push(Command::Input(direction));
                true
            }
            None => false,
        }
    }

    /// Apply a single command immediately
    pub fn apply(&mut self, command: Command) -> Applied {
        match command {
            Command::PhysicsTick(bounds) => Applied::Physics {
                advanced: self.physics.tick(bounds),
            },
            Command::PursuitTick => Applied::Pursuit(self.pursuit.advance()),
            Command::Input(direction) => Applied::Move(self.pursuit.move_player(direction)),
            Command::ResetPhysics => {
                self.physics.reset();
                self.physics_clock.reset();
                Applied::Reset
            }
            Command::ResetPursuit => {
                self.pursuit.reset();
                self.pursuit_clock.reset();
                Applied::Reset
            }
        }
    }

    /// Apply every queued command in order
    pub fn drain(&mut self) -> Vec<Applied> {
        let mut applied = Vec::with_capacity(self.queue.len());
        while let Some(command) = self.queue.pop_front() {
            applied.push(self.apply(command));
        }
        applied
    }

    /// Advance wall time by `dt_ms`: queue the ticks that came due, then drain
    ///
    /// Inputs queued before this call are applied before the new ticks.
    pub fn advance(&mut self, dt_ms: f64, bounds: Option<Bounds>) -> Vec<Applied> {
        for _ in 0..self.physics_clock.accumulate(dt_ms) {
            self.push(Command::PhysicsTick(bounds));
        }
        for _ in 0..self.pursuit_clock.accumulate(dt_ms) {
            self.push(Command::PursuitTick);
        }
        self.drain()
    }
}

impl Default for Arcade {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}
