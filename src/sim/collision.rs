//! Collision detection and response between circular bodies
//!
//! Single-pass O(n²) scan over unordered pairs. Overlap is removed by
//! pushing both bodies apart along the contact normal, then the normal
//! components of their velocities are swapped (elastic exchange for equal
//! masses). Tangential components are left alone.

use glam::Vec2;

use super::state::Body;
use crate::DISTANCE_EPSILON;

/// Normal used when two centers coincide
pub const COINCIDENT_NORMAL: Vec2 = Vec2::X;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Unit contact normal (from the first body toward the second, or
    /// outward through the wall for boundaries)
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Check whether two bodies overlap
pub fn body_body_collision(a: &Body, b: &Body) -> CollisionResult {
    let delta = b.pos - a.pos;
    let distance = delta.length();
    let min_distance = a.radius + b.radius;

    if distance >= min_distance {
        return CollisionResult::miss();
    }

    let normal = if distance > DISTANCE_EPSILON {
        delta / distance
    } else {
        COINCIDENT_NORMAL
    };

    CollisionResult {
        hit: true,
        normal,
        penetration: min_distance - distance,
    }
}

/// Swap the components of `va` and `vb` along `normal`
#[inline]
pub fn exchange_normal_velocity(va: Vec2, vb: Vec2, normal: Vec2) -> (Vec2, Vec2) {
    let va_n = va.dot(normal) * normal;
    let vb_n = vb.dot(normal) * normal;
    (va - va_n + vb_n, vb - vb_n + va_n)
}

/// Separate and exchange velocities if `a` and `b` overlap.
///
/// Returns true if the pair was in contact.
pub fn resolve_pair(a: &mut Body, b: &mut Body) -> bool {
    let result = body_body_collision(a, b);
    if !result.hit {
        return false;
    }

    let correction = result.normal * (result.penetration / 2.0);
    a.pos -= correction;
    b.pos += correction;

    let (va, vb) = exchange_normal_velocity(a.vel, b.vel, result.normal);
    a.vel = va;
    b.vel = vb;
    true
}

/// Resolve every overlapping pair (i < j) once, in insertion order.
///
/// Returns the number of contacts resolved.
pub fn resolve_pairs(bodies: &mut [Body]) -> usize {
    let mut contacts = 0;
    for i in 0..bodies.len() {
        let (head, tail) = bodies.split_at_mut(i + 1);
        let a = &mut head[i];
        for b in tail.iter_mut() {
            if resolve_pair(a, b) {
                contacts += 1;
            }
        }
    }
    contacts
}

/// Resolve one body (the ball) against every body in `others`
pub fn resolve_against_all(body: &mut Body, others: &mut [Body]) -> usize {
    let mut contacts = 0;
    for other in others.iter_mut() {
        if resolve_pair(body, other) {
            contacts += 1;
        }
    }
    contacts
}
