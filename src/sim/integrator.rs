//! Time integration for a single point mass
//!
//! Two schemes are used by the toys:
//! - semi-implicit Euler: `v += a*dt; x += v*dt`
//! - Störmer–Verlet: `x' = 2x - x_prev + a*dt²`, velocity reconstructed
//!   from the position history when collision response needs it

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Body;

/// Integration scheme for a simulation variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Integrator {
    SemiImplicitEuler,
    #[default]
    Verlet,
}

/// Returns true if `dt` can advance the simulation
#[inline]
pub fn is_valid_dt(dt: f32) -> bool {
    dt.is_finite() && dt > 0.0
}

/// Semi-implicit (symplectic) Euler step
#[inline]
pub fn semi_implicit_euler(pos: &mut Vec2, vel: &mut Vec2, accel: Vec2, dt: f32) {
    if !is_valid_dt(dt) {
        return;
    }
    *vel += accel * dt;
    *pos += *vel * dt;
}

/// Störmer–Verlet position step
#[inline]
pub fn verlet(pos: &mut Vec2, prev_pos: &mut Vec2, accel: Vec2, dt: f32) {
    if !is_valid_dt(dt) {
        return;
    }
    let next = 2.0 * *pos - *prev_pos + accel * dt * dt;
    *prev_pos = *pos;
    *pos = next;
}

/// Velocity implied by a Verlet position history.
///
/// Falls back to `stored` when `dt` cannot be divided by.
#[inline]
pub fn verlet_velocity(pos: Vec2, prev_pos: Vec2, dt: f32, stored: Vec2) -> Vec2 {
    if is_valid_dt(dt) {
        (pos - prev_pos) / dt
    } else {
        stored
    }
}

impl Integrator {
    /// Advance `body` by one step under constant acceleration `accel`
    pub fn advance(self, body: &mut Body, accel: Vec2, dt: f32) {
        if !is_valid_dt(dt) {
            return;
        }
        match self {
            Integrator::SemiImplicitEuler => {
                body.prev_pos = body.pos;
                semi_implicit_euler(&mut body.pos, &mut body.vel, accel, dt);
            }
            Integrator::Verlet => {
                verlet(&mut body.pos, &mut body.prev_pos, accel, dt);
                body.vel = verlet_velocity(body.pos, body.prev_pos, dt, body.vel);
            }
        }
    }

    /// Fold velocity changes made by contact response back into the
    /// position history so the next Verlet step sees them.
    ///
    /// Positional corrections alone inject no velocity.
    pub fn sync_history(self, body: &mut Body, dt: f32) {
        if self == Integrator::Verlet && is_valid_dt(dt) {
            body.prev_pos = body.pos - body.vel * dt;
        }
    }
}
