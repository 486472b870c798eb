//! Engine tuning and preferences
//!
//! Loaded from an optional JSON file; every field falls back to the
//! reference value when omitted.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ArcadeError, Result};

/// Physics tuning presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PhysicsPreset {
    /// Soft collisions, lossy walls, air drag - bodies eventually slow down
    #[default]
    Classic,
    /// Near-elastic walls and a per-axis speed floor - bodies never settle
    Perpetual,
}

impl PhysicsPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhysicsPreset::Classic => "Classic",
            PhysicsPreset::Perpetual => "Perpetual",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(PhysicsPreset::Classic),
            "perpetual" | "infinite" => Some(PhysicsPreset::Perpetual),
            _ => None,
        }
    }

    /// Tuning values for this preset
    pub fn tuning(&self) -> PhysicsTuning {
        match self {
            PhysicsPreset::Classic => PhysicsTuning::classic(),
            PhysicsPreset::Perpetual => PhysicsTuning::perpetual(),
        }
    }
}

/// What happens to velocity at the end of every tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum MotionMode {
    /// No extra per-tick adjustment
    Ballistic,
    /// Multiply velocity by a near-1 factor every tick
    AirDrag { factor: f32 },
    /// Snap any axis slower than `min_speed` up to `±min_speed`
    Perpetual { min_speed: f32 },
}

impl Default for MotionMode {
    fn default() -> Self {
        MotionMode::AirDrag { factor: AIR_DRAG }
    }
}

/// Tuning for the bouncing-ball engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsTuning {
    /// Fraction of the partner's velocity blended in on impact (0..=1)
    pub exchange_fraction: f32,
    /// Velocity multiplier applied to both bodies after impact (0..=1)
    pub collision_damping: f32,
    /// Velocity kept after a wall bounce (0..=1)
    pub wall_restitution: f32,
    pub motion: MotionMode,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self::classic()
    }
}

impl PhysicsTuning {
    pub fn classic() -> Self {
        Self {
            exchange_fraction: EXCHANGE_FRACTION,
            collision_damping: COLLISION_DAMPING,
            wall_restitution: WALL_RESTITUTION,
            motion: MotionMode::AirDrag { factor: AIR_DRAG },
        }
    }

    pub fn perpetual() -> Self {
        Self {
            exchange_fraction: EXCHANGE_FRACTION,
            collision_damping: PERPETUAL_COLLISION_DAMPING,
            wall_restitution: PERPETUAL_WALL_RESTITUTION,
            motion: MotionMode::Perpetual {
                min_speed: MIN_SPEED,
            },
        }
    }
}

/// How a pursuer picks its next cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StepPolicy {
    /// One axis per tick: close the column gap first, then the row gap
    #[default]
    AxisPriority,
    /// Step both axes at once and validate the diagonal cell
    Diagonal,
}

/// Tuning for the maze chase engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PursuitTuning {
    /// Score per collectible
    pub reward: u32,
    pub step_policy: StepPolicy,
    /// Pursuer advance interval
    pub pursuit_interval_ms: u32,
}

impl Default for PursuitTuning {
    fn default() -> Self {
        Self {
            reward: COLLECTIBLE_REWARD,
            step_policy: StepPolicy::AxisPriority,
            pursuit_interval_ms: PURSUIT_INTERVAL_MS,
        }
    }
}

/// All tuning for one arcade session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Physics tick interval
    pub physics_interval_ms: u32,
    pub physics: PhysicsTuning,
    pub pursuit: PursuitTuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            physics_interval_ms: PHYSICS_INTERVAL_MS,
            physics: PhysicsTuning::classic(),
            pursuit: PursuitTuning::default(),
        }
    }
}

impl Settings {
    /// Create settings from a physics preset
    pub fn from_preset(preset: PhysicsPreset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Replace the physics tuning with a preset's values
    pub fn apply_preset(&mut self, preset: PhysicsPreset) {
        self.physics = preset.tuning();
    }

    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file, falling back to defaults when it does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::warn!("Settings file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Reject values the engines cannot run with
    pub fn validate(&self) -> Result<()> {
        let unit = |name: &str, v: f32| {
            if (0.0..=1.0).contains(&v) {
                Ok(())
            } else {
                Err(ArcadeError::InvalidSettings(format!(
                    "{name} must be within 0..=1, got {v}"
                )))
            }
        };

        unit("exchange_fraction", self.physics.exchange_fraction)?;
        unit("collision_damping", self.physics.collision_damping)?;
        unit("wall_restitution", self.physics.wall_restitution)?;
        match self.physics.motion {
            MotionMode::Ballistic => {}
            MotionMode::AirDrag { factor } => unit("air drag factor", factor)?,
            MotionMode::Perpetual { min_speed } => {
                if !(min_speed > 0.0 && min_speed.is_finite()) {
                    return Err(ArcadeError::InvalidSettings(format!(
                        "min_speed must be positive, got {min_speed}"
                    )));
                }
            }
        }

        if self.physics_interval_ms == 0 || self.pursuit.pursuit_interval_ms == 0 {
            return Err(ArcadeError::InvalidSettings(
                "tick intervals must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}
