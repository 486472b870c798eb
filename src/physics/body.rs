//! Bodies, viewport bounds and starting manifests
//!
//! A body's `pos` is the top-left corner of its bounding square, matching how
//! the renderer lays it out. Collision math works on `center()`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::settings::PhysicsTuning;

/// A circular body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub id: u32,
    /// Top-left corner of the bounding square (px)
    pub pos: Vec2,
    /// Velocity (px/tick)
    pub vel: Vec2,
    /// Diameter (px)
    pub size: f32,
    /// Velocity kept after a wall bounce
    pub wall_restitution: f32,
    /// Fraction of the partner's velocity taken on impact
    pub exchange_fraction: f32,
}

impl Body {
    #[inline]
    pub fn radius(&self) -> f32 {
        self.size / 2.0
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.radius())
    }
}

/// Viewport dimensions supplied by the host each tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// A measurement the engine can simulate against
    pub fn is_measurable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Largest legal top-left coordinate for a body of the given diameter
    #[inline]
    pub fn limit(&self, size: f32) -> Vec2 {
        Vec2::new(self.width - size, self.height - size)
    }
}

/// Starting state of one body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodySpec {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
}

impl BodySpec {
    pub const fn new(id: u32, x: f32, y: f32, vx: f32, vy: f32, size: f32) -> Self {
        Self {
            id,
            pos: Vec2::new(x, y),
            vel: Vec2::new(vx, vy),
            size,
        }
    }
}

/// The bodies an engine starts (and resets) with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyManifest {
    pub bodies: Vec<BodySpec>,
}

/// Five bodies of mixed size, all moving fast
const REFERENCE_BODIES: [BodySpec; 5] = [
    BodySpec::new(1, 100.0, 100.0, 6.5, 5.2, 50.0),
    BodySpec::new(2, 200.0, 150.0, -7.8, 6.1, 70.0),
    BodySpec::new(3, 300.0, 200.0, 5.4, -7.2, 35.0),
    BodySpec::new(4, 150.0, 250.0, -5.8, -4.9, 80.0),
    BodySpec::new(5, 250.0, 100.0, 8.5, 7.8, 40.0),
];

const SCATTER_MIN_SIZE: f32 = 30.0;
const SCATTER_MAX_SIZE: f32 = 80.0;
const SCATTER_MAX_SPEED: f32 = 8.5;

impl Default for BodyManifest {
    fn default() -> Self {
        Self::reference()
    }
}

impl BodyManifest {
    pub fn new(bodies: Vec<BodySpec>) -> Self {
        Self { bodies }
    }

    pub fn reference() -> Self {
        Self::new(REFERENCE_BODIES.to_vec())
    }

    /// Deterministic random layout, every body fully inside `bounds`
    ///
    /// Bodies may start overlapping; the first collision pass pushes them apart.
    pub fn scattered(seed: u64, count: usize, bounds: Bounds) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let max_size = SCATTER_MAX_SIZE.min(bounds.width.min(bounds.height)).max(1.0);
        let min_size = SCATTER_MIN_SIZE.min(max_size);

        let bodies = (0..count)
            .map(|i| {
                let size = rng.random_range(min_size..=max_size);
                let limit = bounds.limit(size).max(Vec2::ZERO);
                BodySpec {
                    id: i as u32 + 1,
                    pos: Vec2::new(
                        rng.random_range(0.0..=limit.x),
                        rng.random_range(0.0..=limit.y),
                    ),
                    vel: Vec2::new(
                        rng.random_range(-SCATTER_MAX_SPEED..=SCATTER_MAX_SPEED),
                        rng.random_range(-SCATTER_MAX_SPEED..=SCATTER_MAX_SPEED),
                    ),
                    size,
                }
            })
            .collect();

        Self::new(bodies)
    }

    /// Materialize the bodies with per-body coefficients from `tuning`
    pub fn spawn(&self, tuning: &PhysicsTuning) -> Vec<Body> {
        self.bodies
            .iter()
            .map(|spec| Body {
                id: spec.id,
                pos: spec.pos,
                vel: spec.vel,
                size: spec.size,
                wall_restitution: tuning.wall_restitution,
                exchange_fraction: tuning.exchange_fraction,
            })
            .collect()
    }
}
