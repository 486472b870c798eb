//! Bouncing-ball sandbox
//!
//! Pure and deterministic, like the rest of the simulation code:
//! - One unit timestep per tick
//! - Stable iteration order (by index)
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod engine;
pub mod step;

pub use body::{Body, BodyManifest, BodySpec, Bounds};
pub use collision::{Contact, body_contact, exchange_velocities, resolve_pair, resolve_walls, separate};
pub use engine::PhysicsEngine;
pub use step::{apply_motion, integrate, resolve_boundaries, resolve_collisions, step};
