//! Fixed-tick physics step
//!
//! One tick runs four phases in strict order, each consuming the previous
//! phase's snapshot and returning a new one:
//!
//! 1. `integrate` - explicit Euler, unit timestep
//! 2. `resolve_collisions` - sequential pairwise pass over `i < j`
//! 3. `resolve_boundaries` - reflect and clamp against the viewport
//! 4. `apply_motion` - air drag or the perpetual-motion speed floor
//!
//! The pairwise pass is not a simultaneous solve: a later pair sees positions
//! already corrected by earlier pairs that share a body.

use super::body::{Body, Bounds};
use super::collision::{resolve_pair, resolve_walls};
use crate::settings::{MotionMode, PhysicsTuning};

/// Advance bodies by one tick
///
/// A missing or zero-sized viewport skips the tick and returns the bodies unchanged.
pub fn step(bodies: &[Body], bounds: Option<Bounds>, tuning: &PhysicsTuning) -> Vec<Body> {
    let Some(bounds) = bounds.filter(Bounds::is_measurable) else {
        log::warn!("No usable viewport measurement ({bounds:?}), skipping physics tick");
        return bodies.to_vec();
    };

    let moved = integrate(bodies);
    let collided = resolve_collisions(moved, tuning.collision_damping);
    let contained = resolve_boundaries(collided, bounds);
    apply_motion(contained, tuning.motion)
}

/// Move every body by its velocity
pub fn integrate(bodies: &[Body]) -> Vec<Body> {
    bodies
        .iter()
        .map(|body| Body {
            pos: body.pos + body.vel,
            ..*body
        })
        .collect()
}

/// Resolve every overlapping pair in ascending `(i, j)` order
pub fn resolve_collisions(mut bodies: Vec<Body>, damping: f32) -> Vec<Body> {
    let n = bodies.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let (head, tail) = bodies.split_at_mut(j);
            let (a, b) = (&mut head[i], &mut tail[0]);
            if resolve_pair(a, b, damping) {
                log::trace!("Resolved collision between bodies {} and {}", a.id, b.id);
            }
        }
    }
    bodies
}

/// Reflect and clamp each body against the viewport edges
pub fn resolve_boundaries(mut bodies: Vec<Body>, bounds: Bounds) -> Vec<Body> {
    for body in &mut bodies {
        resolve_walls(body, bounds);
    }
    bodies
}

/// Apply the end-of-tick velocity adjustment
pub fn apply_motion(mut bodies: Vec<Body>, motion: MotionMode) -> Vec<Body> {
    match motion {
        MotionMode::Ballistic => {}
        MotionMode::AirDrag { factor } => {
            for body in &mut bodies {
                body.vel *= factor;
            }
        }
        MotionMode::Perpetual { min_speed } => {
            for body in &mut bodies {
                body.vel.x = speed_floor(body.vel.x, min_speed);
                body.vel.y = speed_floor(body.vel.y, min_speed);
            }
        }
    }
    bodies
}

/// Snap a slow axis up to `±min_speed`; zero counts as positive
#[inline]
fn speed_floor(v: f32, min_speed: f32) -> f32 {
    if v.abs() >= min_speed {
        v
    } else if v < 0.0 {
        -min_speed
    } else {
        min_speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::BodyManifest;
    use glam::Vec2;
    use proptest::prelude::*;

    fn body(id: u32, x: f32, y: f32, vx: f32, vy: f32, size: f32) -> Body {
        Body {
            id,
            pos: Vec2::new(x, y),
            vel: Vec2::new(vx, vy),
            size,
            wall_restitution: 0.85,
            exchange_fraction: 0.6,
        }
    }

    fn ballistic() -> PhysicsTuning {
        PhysicsTuning {
            motion: MotionMode::Ballistic,
            ..PhysicsTuning::classic()
        }
    }

    #[test]
    fn test_integrate() {
        let moved = integrate(&[body(1, 10.0, 20.0, 1.5, -2.0, 10.0)]);
        assert_eq!(moved[0].pos, Vec2::new(11.5, 18.0));
        assert_eq!(moved[0].vel, Vec2::new(1.5, -2.0));
    }

    #[test]
    fn test_head_on_collision_blend() {
        // Radii 25 and 35, centers 55 apart after integration
        let bodies = [
            body(1, 100.0, 100.0, 5.0, 0.0, 50.0),
            body(2, 145.0, 90.0, -5.0, 0.0, 70.0),
        ];
        let next = step(&bodies, Some(Bounds::new(1000.0, 1000.0)), &ballistic());

        let expected_a = (5.0 * 0.4 + -5.0 * 0.6) * 0.95;
        let expected_b = (-5.0 * 0.4 + 5.0 * 0.6) * 0.95;
        assert!((next[0].vel.x - expected_a).abs() < 1e-5);
        assert!((next[1].vel.x - expected_b).abs() < 1e-5);
        assert_eq!(next[0].vel.y, 0.0);
        assert_eq!(next[1].vel.y, 0.0);

        let distance = (next[0].center() - next[1].center()).length();
        assert!((distance - 60.0).abs() < 1e-3);
    }

    #[test]
    fn test_missing_bounds_skips_tick() {
        let bodies = BodyManifest::reference().spawn(&PhysicsTuning::classic());
        assert_eq!(step(&bodies, None, &PhysicsTuning::classic()), bodies);
        assert_eq!(
            step(&bodies, Some(Bounds::new(0.0, 0.0)), &PhysicsTuning::classic()),
            bodies
        );
    }

    #[test]
    fn test_air_drag() {
        let next = apply_motion(
            vec![body(1, 0.0, 0.0, 2.0, -1.0, 10.0)],
            MotionMode::AirDrag { factor: 0.999 },
        );
        assert!((next[0].vel.x - 1.998).abs() < 1e-6);
        assert!((next[0].vel.y + 0.999).abs() < 1e-6);
    }

    #[test]
    fn test_speed_floor_preserves_sign() {
        assert_eq!(speed_floor(0.2, 1.0), 1.0);
        assert_eq!(speed_floor(-0.2, 1.0), -1.0);
        assert_eq!(speed_floor(0.0, 1.0), 1.0);
        assert_eq!(speed_floor(-0.0, 1.0), 1.0);
        assert_eq!(speed_floor(-3.0, 1.0), -3.0);
        assert_eq!(speed_floor(1.0, 1.0), 1.0);
    }

    #[test]
    fn test_phases_run_in_order() {
        // Wall bounce sees the post-collision velocity: body 1 is pushed into
        // the left wall by its partner and leaves moving right.
        let bodies = [
            body(1, 1.0, 0.0, 0.0, 0.0, 20.0),
            body(2, 12.0, 0.0, -4.0, 0.0, 20.0),
        ];
        let next = step(&bodies, Some(Bounds::new(500.0, 20.0)), &ballistic());
        assert!(next[0].pos.x >= 0.0);
        assert!(next[0].vel.x >= 0.0);
    }

    #[test]
    fn test_sequential_pairs_shared_body() {
        // Three bodies stacked on one point; the pass is sequential, so the
        // outcome is deterministic but not symmetric.
        let bodies = [
            body(1, 50.0, 50.0, 0.0, 0.0, 20.0),
            body(2, 50.0, 50.0, 0.0, 0.0, 20.0),
            body(3, 50.0, 50.0, 0.0, 0.0, 20.0),
        ];
        let a = step(&bodies, Some(Bounds::new(500.0, 500.0)), &ballistic());
        let b = step(&bodies, Some(Bounds::new(500.0, 500.0)), &ballistic());
        assert_eq!(a, b);
        assert!(a[0].pos != a[1].pos);
    }

    proptest! {
        #[test]
        fn prop_containment(seed in any::<u64>(), ticks in 1usize..120) {
            let bounds = Bounds::new(640.0, 480.0);
            let tuning = PhysicsTuning::classic();
            let mut bodies = BodyManifest::scattered(seed, 8, bounds).spawn(&tuning);
            for _ in 0..ticks {
                bodies = step(&bodies, Some(bounds), &tuning);
                for b in &bodies {
                    let limit = bounds.limit(b.size);
                    prop_assert!(b.pos.x >= 0.0 && b.pos.x <= limit.x);
                    prop_assert!(b.pos.y >= 0.0 && b.pos.y <= limit.y);
                }
            }
        }

        #[test]
        fn prop_perpetual_speed_floor(seed in any::<u64>(), ticks in 1usize..120) {
            let bounds = Bounds::new(640.0, 480.0);
            let tuning = PhysicsTuning::perpetual();
            let mut bodies = BodyManifest::scattered(seed, 8, bounds).spawn(&tuning);
            for _ in 0..ticks {
                bodies = step(&bodies, Some(bounds), &tuning);
                for b in &bodies {
                    prop_assert!(b.vel.x.abs() >= 1.0);
                    prop_assert!(b.vel.y.abs() >= 1.0);
                }
            }
        }
    }
}
