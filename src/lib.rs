//! Mini Arcade - simulation cores for two small arcade games
//!
//! Core modules:
//! - `physics`: Bouncing-ball sandbox (integration, pairwise collisions, walls)
//! - `pursuit`: Maze chase game (grid, player moves, greedy pursuers)
//! - `arcade`: Serialized command queue and fixed-interval clocks
//! - `settings`: Data-driven tuning for both engines
//!
//! Rendering and input capture live outside this crate; a renderer reads the
//! engines' state after every tick and forwards key presses as commands.

pub mod arcade;
pub mod error;
pub mod physics;
pub mod pursuit;
pub mod settings;

pub use arcade::{Applied, Arcade, Command, FixedClock};
pub use error::{ArcadeError, Result};
pub use settings::{MotionMode, PhysicsPreset, PhysicsTuning, PursuitTuning, Settings, StepPolicy};

/// Reference constants for both games
pub mod consts {
    /// Physics tick interval (~60 Hz)
    pub const PHYSICS_INTERVAL_MS: u32 = 16;
    /// Pursuer advance interval (4 Hz)
    pub const PURSUIT_INTERVAL_MS: u32 = 250;
    /// Maximum ticks a clock will replay after a stall
    pub const MAX_CATCH_UP_TICKS: u32 = 8;

    /// Fraction of velocity exchanged between two colliding bodies
    pub const EXCHANGE_FRACTION: f32 = 0.6;
    /// Velocity kept by both bodies after a collision
    pub const COLLISION_DAMPING: f32 = 0.95;
    /// Velocity kept (sign-flipped) after a wall bounce
    pub const WALL_RESTITUTION: f32 = 0.85;
    /// Per-tick air resistance factor
    pub const AIR_DRAG: f32 = 0.999;

    /// Perpetual-motion variant: collision damping
    pub const PERPETUAL_COLLISION_DAMPING: f32 = 0.99;
    /// Perpetual-motion variant: wall restitution
    pub const PERPETUAL_WALL_RESTITUTION: f32 = 0.98;
    /// Perpetual-motion variant: per-axis speed floor (px/tick)
    pub const MIN_SPEED: f32 = 1.0;

    /// Score awarded per collectible
    pub const COLLECTIBLE_REWARD: u32 = 10;
}
