//! Physics tick
//!
//! One step: apply input, integrate the ball and particles, contain them,
//! resolve particle contacts, contain again, then spawn. Every body is
//! inside the boundary when a tick returns.

use glam::Vec2;

use super::collision::{resolve_against_all, resolve_pairs};
use super::integrator::is_valid_dt;
use super::state::SimState;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Cursor position in world coordinates, if known
    pub cursor: Option<Vec2>,
    /// Mouse button went down this frame
    pub press: bool,
    /// Mouse button went up this frame
    pub release: bool,
    /// Spawn key is held
    pub spawn: bool,
}

/// Advance the simulation by `dt` seconds
pub fn tick(state: &mut SimState, input: &TickInput, dt: f32) {
    if let Some(cursor) = input.cursor {
        state.cursor = cursor;
    }
    if input.press {
        state.press(state.cursor);
    }
    if input.release {
        state.release();
    }

    if !is_valid_dt(dt) {
        return;
    }

    state.time_ticks += 1;
    state.contacts = 0;

    let integrator = state.settings.integrator;
    let boundary = state.settings.boundary;

    // Ball
    if let (Some(ball), Some(cfg)) = (state.ball.as_mut(), state.settings.ball.as_ref()) {
        let mouse = state.dragging.then_some(state.cursor);
        let accel = cfg.forces.acceleration(ball.pos, ball.vel, mouse);
        integrator.advance(ball, accel, dt);
        if let Some(boundary) = &boundary {
            if boundary.resolve(ball).hit {
                state.contacts += 1;
            }
        }
    }

    // Particles
    if let Some(cfg) = state.settings.particles.as_ref() {
        for particle in state.particles.iter_mut() {
            let accel = cfg.forces.acceleration(particle.pos, particle.vel, None);
            integrator.advance(particle, accel, dt);
            if let Some(boundary) = &boundary {
                if boundary.resolve(particle).hit {
                    state.contacts += 1;
                }
            }
        }
    }

    state.contacts += resolve_pairs(&mut state.particles);
    if let Some(ball) = state.ball.as_mut() {
        state.contacts += resolve_against_all(ball, &mut state.particles);
    }

    // Pair pushes can shove bodies back past the wall
    if let Some(boundary) = &boundary {
        if let Some(ball) = state.ball.as_mut() {
            boundary.resolve(ball);
        }
        for particle in state.particles.iter_mut() {
            boundary.resolve(particle);
        }
    }

    // Contact response changed velocities; carry them into the history
    if let Some(ball) = state.ball.as_mut() {
        integrator.sync_history(ball, dt);
    }
    for particle in state.particles.iter_mut() {
        integrator.sync_history(particle, dt);
    }

    // Rate-limited spawning at the cursor
    state.elapsed += dt;
    if input.spawn {
        let interval = state
            .settings
            .particles
            .as_ref()
            .map(|cfg| cfg.spawn_interval);
        if let Some(interval) = interval {
            if state.elapsed - state.last_spawn >= interval {
                let at = state.cursor;
                state.spawn_particle(at);
                state.last_spawn = state.elapsed;
                log::debug!(
                    "Spawned particle #{} at ({:.3}, {:.3})",
                    state.particles.len(),
                    at.x,
                    at.y
                );
            }
        }
    }
}
