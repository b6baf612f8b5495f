//! Containment regions
//!
//! A circular bowl (with restitution) or an axis-aligned box (elastic).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{CollisionResult, reflect_velocity};
use super::state::Body;
use crate::DISTANCE_EPSILON;

/// Region bodies are kept inside of
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "kebab-case")]
pub enum Boundary {
    /// Circular bowl
    Circle {
        center: Vec2,
        radius: f32,
        /// Fraction of velocity kept after a bounce (0-1)
        restitution: f32,
    },
    /// Axis-aligned box centered on the origin, full elastic reflection
    Box { half_extents: Vec2 },
}

impl Boundary {
    pub fn bowl(radius: f32, restitution: f32) -> Self {
        Boundary::Circle {
            center: Vec2::ZERO,
            radius,
            restitution,
        }
    }

    pub fn unit_box() -> Self {
        Boundary::Box {
            half_extents: Vec2::ONE,
        }
    }

    /// Check whether `body` lies inside the region (within float tolerance)
    pub fn contains(&self, body: &Body) -> bool {
        const TOLERANCE: f32 = 1e-5;
        match *self {
            Boundary::Circle { center, radius, .. } => {
                (body.pos - center).length() + body.radius <= radius + TOLERANCE
            }
            Boundary::Box { half_extents } => {
                body.pos.x.abs() + body.radius <= half_extents.x + TOLERANCE
                    && body.pos.y.abs() + body.radius <= half_extents.y + TOLERANCE
            }
        }
    }

    /// Push `body` back inside and bounce its velocity
    pub fn resolve(&self, body: &mut Body) -> CollisionResult {
        match *self {
            Boundary::Circle {
                center,
                radius,
                restitution,
            } => resolve_circle(body, center, radius, restitution),
            Boundary::Box { half_extents } => resolve_box(body, half_extents),
        }
    }
}

/// Keep a body inside a circle of `bowl_radius` around `center`
pub fn resolve_circle(
    body: &mut Body,
    center: Vec2,
    bowl_radius: f32,
    restitution: f32,
) -> CollisionResult {
    let offset = body.pos - center;
    let distance = offset.length();
    let penetration = distance + body.radius - bowl_radius;

    if penetration <= 0.0 {
        return CollisionResult::miss();
    }
    if distance <= DISTANCE_EPSILON {
        // Body too large for the bowl; no direction to push along
        return CollisionResult::miss();
    }

    let normal = offset / distance;
    body.pos = center + normal * (bowl_radius - body.radius).max(0.0);

    // Only bounce when heading into the wall
    if body.vel.dot(normal) > 0.0 {
        body.vel = reflect_velocity(body.vel, normal) * restitution;
    }

    CollisionResult {
        hit: true,
        normal,
        penetration,
    }
}

/// Per-axis clamp into the box `[-h, h]`
pub fn resolve_box(body: &mut Body, half_extents: Vec2) -> CollisionResult {
    let mut result = CollisionResult::miss();
    let r = body.radius;

    for axis in 0..2 {
        let h = half_extents[axis];
        let p = body.pos[axis];
        if p - r < -h {
            body.pos[axis] = -h + r;
            body.vel[axis] = body.vel[axis].abs();
            let mut normal = Vec2::ZERO;
            normal[axis] = -1.0;
            result = merge_hit(result, normal, -h - (p - r));
        } else if p + r > h {
            body.pos[axis] = h - r;
            body.vel[axis] = -body.vel[axis].abs();
            let mut normal = Vec2::ZERO;
            normal[axis] = 1.0;
            result = merge_hit(result, normal, p + r - h);
        }
    }

    result
}

fn merge_hit(prev: CollisionResult, normal: Vec2, penetration: f32) -> CollisionResult {
    if !prev.hit {
        return CollisionResult {
            hit: true,
            normal,
            penetration,
        };
    }
    // Corner contact
    CollisionResult {
        hit: true,
        normal: (prev.normal + normal).normalize_or_zero(),
        penetration: prev.penetration.max(penetration),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inside_bowl_untouched() {
        let bowl = Boundary::bowl(1.0, 0.8);
        let mut body = Body::at_rest(Vec2::new(0.5, 0.0), 0.05);
        body.vel = Vec2::new(1.0, 0.0);

        assert!(!bowl.resolve(&mut body).hit);
        assert_eq!(body.pos, Vec2::new(0.5, 0.0));
        assert_eq!(body.vel, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_bowl_places_on_edge_and_bounces() {
        let bowl = Boundary::bowl(1.0, 0.8);
        let mut body = Body::at_rest(Vec2::new(0.0, -1.2), 0.05);
        body.vel = Vec2::new(0.0, -2.0);

        let result = bowl.resolve(&mut body);
        assert!(result.hit);
        assert!((body.pos.length() - 0.95).abs() < 1e-6);
        assert!(body.pos.x.abs() < 1e-6);
        assert!((body.vel.y - 1.6).abs() < 1e-5);
        assert!(bowl.contains(&body));
    }

    #[test]
    fn test_bowl_skips_bounce_when_moving_inward() {
        let bowl = Boundary::bowl(1.0, 0.8);
        let mut body = Body::at_rest(Vec2::new(0.98, 0.0), 0.05);
        body.vel = Vec2::new(-1.0, 0.0);

        assert!(bowl.resolve(&mut body).hit);
        assert_eq!(body.vel, Vec2::new(-1.0, 0.0));
        assert!((body.pos.x - 0.95).abs() < 1e-6);
    }

    #[test]
    fn test_bowl_degenerate_center() {
        // Body larger than the bowl sitting exactly at the center
        let bowl = Boundary::bowl(0.01, 0.8);
        let mut body = Body::at_rest(Vec2::ZERO, 0.05);
        let result = bowl.resolve(&mut body);
        assert!(!result.hit);
        assert!(body.pos.is_finite());
    }

    #[test]
    fn test_box_reflects_without_loss() {
        let walls = Boundary::unit_box();
        let mut body = Body::at_rest(Vec2::new(-1.02, 0.3), 0.05);
        body.vel = Vec2::new(-3.0, 0.5);

        let result = walls.resolve(&mut body);
        assert!(result.hit);
        assert!((body.pos.x - (-0.95)).abs() < 1e-6);
        assert_eq!(body.vel, Vec2::new(3.0, 0.5));
    }

    #[test]
    fn test_box_corner() {
        let walls = Boundary::unit_box();
        let mut body = Body::at_rest(Vec2::new(1.1, 1.1), 0.05);
        body.vel = Vec2::new(1.0, 2.0);

        let result = walls.resolve(&mut body);
        assert!(result.hit);
        assert!(result.normal.x > 0.0 && result.normal.y > 0.0);
        assert_eq!(body.vel, Vec2::new(-1.0, -2.0));
        assert!(walls.contains(&body));
    }
}
