//! Body-body and body-wall collision response
//!
//! Arcade approximations, not rigid-body dynamics: overlapping pairs are pushed
//! apart symmetrically and trade a fixed fraction of their velocities instead
//! of an elastic swap.

use glam::Vec2;

use super::body::{Body, Bounds};

/// Overlap between two bodies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit vector from the second body's center toward the first's
    pub normal: Vec2,
    /// Current center-to-center distance
    pub distance: f32,
    /// Sum of radii (the separation after correction)
    pub target: f32,
}

impl Contact {
    /// How far the pair interpenetrates
    #[inline]
    pub fn penetration(&self) -> f32 {
        self.target - self.distance
    }
}

/// Detect overlap between two bodies
///
/// Tangent bodies (`distance == r1 + r2`) are not in contact.
pub fn body_contact(a: &Body, b: &Body) -> Option<Contact> {
    let delta = a.center() - b.center();
    let distance = delta.length();
    let target = a.radius() + b.radius();

    if distance >= target {
        return None;
    }

    // Coincident centers resolve along +x
    let angle = delta.y.atan2(delta.x);
    Some(Contact {
        normal: Vec2::new(angle.cos(), angle.sin()),
        distance,
        target,
    })
}

/// Push both bodies apart along the contact normal, half each
pub fn separate(a: &mut Body, b: &mut Body, contact: &Contact) {
    let push = contact.normal * (contact.penetration() * 0.5);
    a.pos += push;
    b.pos -= push;
}

/// Blend each body's velocity toward its partner's, then damp both
///
/// `v1' = (v1 * (1 - f1) + v2 * f1) * damping`, per axis.
pub fn exchange_velocities(a: &mut Body, b: &mut Body, damping: f32) {
    let (va, vb) = (a.vel, b.vel);
    a.vel = (va * (1.0 - a.exchange_fraction) + vb * a.exchange_fraction) * damping;
    b.vel = (vb * (1.0 - b.exchange_fraction) + va * b.exchange_fraction) * damping;
}

/// Resolve one pair. Returns true if they were in contact.
pub fn resolve_pair(a: &mut Body, b: &mut Body, damping: f32) -> bool {
    match body_contact(a, b) {
        Some(contact) => {
            separate(a, b, &contact);
            exchange_velocities(a, b, damping);
            true
        }
        None => false,
    }
}

/// Reflect and clamp one axis against `[0, limit]`
#[inline]
fn bounce_axis(pos: f32, vel: f32, limit: f32, restitution: f32) -> (f32, f32) {
    if pos <= 0.0 {
        (0.0, -vel * restitution)
    } else if pos >= limit {
        (limit, -vel * restitution)
    } else {
        (pos, vel)
    }
}

/// Keep a body inside the viewport. Returns true if any wall was hit.
pub fn resolve_walls(body: &mut Body, bounds: Bounds) -> bool {
    let limit = bounds.limit(body.size);
    let (x, vx) = bounce_axis(body.pos.x, body.vel.x, limit.x, body.wall_restitution);
    let (y, vy) = bounce_axis(body.pos.y, body.vel.y, limit.y, body.wall_restitution);

    let hit = x != body.pos.x || vx != body.vel.x || y != body.pos.y || vy != body.vel.y;
    body.pos = Vec2::new(x, y);
    body.vel = Vec2::new(vx, vy);
    hit
}
