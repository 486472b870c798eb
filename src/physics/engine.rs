//! Stateful wrapper owning one run of the bouncing-ball sandbox

use super::body::{Body, BodyManifest, Bounds};
use super::step::step;
use crate::settings::PhysicsTuning;

/// Owns the bodies between ticks; the renderer only reads them
#[derive(Debug, Clone)]
pub struct PhysicsEngine {
    manifest: BodyManifest,
    tuning: PhysicsTuning,
    bodies: Vec<Body>,
    /// Ticks actually simulated (skipped ticks are not counted)
    ticks: u64,
}

impl PhysicsEngine {
    pub fn new(manifest: BodyManifest, tuning: PhysicsTuning) -> Self {
        let bodies = manifest.spawn(&tuning);
        Self {
            manifest,
            tuning,
            bodies,
            ticks: 0,
        }
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn tuning(&self) -> &PhysicsTuning {
        &self.tuning
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Run one tick. Returns false if the tick was skipped for lack of a viewport.
    pub fn tick(&mut self, bounds: Option<Bounds>) -> bool {
        if !bounds.is_some_and(|b| b.is_measurable()) {
            log::debug!("Physics tick {} skipped, viewport unavailable", self.ticks);
            return false;
        }
        self.bodies = step(&self.bodies, bounds, &self.tuning);
        self.ticks += 1;
        true
    }

    /// Restore the starting manifest
    pub fn reset(&mut self) {
        self.bodies = self.manifest.spawn(&self.tuning);
        self.ticks = 0;
        log::info!("Physics engine reset ({} bodies)", self.bodies.len());
    }

    /// Total kinetic-like energy (sum of squared speeds), for diagnostics
    pub fn energy(&self) -> f32 {
        self.bodies.iter().map(|b| b.vel.length_squared()).sum()
    }
}

impl Default for PhysicsEngine {
    fn default() -> Self {
        Self::new(BodyManifest::reference(), PhysicsTuning::classic())
    }
}
