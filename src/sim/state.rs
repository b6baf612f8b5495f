//! Simulation state and core body type
//!
//! Everything the physics step mutates lives in [`SimState`], owned by the
//! frame driver and passed by reference into [`super::tick`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::settings::SimSettings;

/// A circular point mass (the draggable ball or a particle)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    /// Explicit velocity (integrated for Euler, reconstructed for Verlet)
    pub vel: Vec2,
    /// Position at the previous step (Verlet history)
    pub prev_pos: Vec2,
    pub radius: f32,
}

impl Body {
    /// A motionless body at `pos`
    pub fn at_rest(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            prev_pos: pos,
            radius,
        }
    }

    /// Check if a world point lies strictly inside the body
    #[inline]
    pub fn contains_point(&self, point: Vec2) -> bool {
        (point - self.pos).length() < self.radius
    }

    #[inline]
    pub fn kinetic_energy(&self, mass: f32) -> f32 {
        0.5 * mass * self.vel.length_squared()
    }
}

/// What a button press has to hit to start dragging the ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DragStart {
    /// Any press grabs the ball
    Anywhere,
    /// The press must land inside the ball
    #[default]
    OnBody,
}

/// Complete physics state for one demo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimState {
    pub settings: SimSettings,
    /// Spring-anchored ball, if the variant has one
    pub ball: Option<Body>,
    /// Spawned particles in creation order
    pub particles: Vec<Body>,
    /// Last known cursor position (world coordinates)
    pub cursor: Vec2,
    /// Ball is following the cursor
    pub dragging: bool,
    /// Simulated seconds since start
    pub elapsed: f32,
    /// `elapsed` at the last particle spawn
    pub last_spawn: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Contacts resolved during the latest tick (walls and pairs)
    #[serde(skip)]
    pub contacts: usize,
}

impl SimState {
    pub fn new(settings: SimSettings) -> Result<Self, ConfigError> {
        settings.validate()?;
        let ball = settings
            .ball
            .as_ref()
            .map(|ball| Body::at_rest(ball.start, ball.radius));

        Ok(Self {
            settings,
            ball,
            particles: Vec::new(),
            cursor: Vec2::ZERO,
            dragging: false,
            elapsed: 0.0,
            last_spawn: 0.0,
            time_ticks: 0,
            contacts: 0,
        })
    }

    /// Start dragging if the press qualifies under the ball's drag rule
    pub fn press(&mut self, cursor: Vec2) {
        self.cursor = cursor;
        let (Some(ball), Some(cfg)) = (&self.ball, &self.settings.ball) else {
            return;
        };
        self.dragging = match cfg.drag {
            DragStart::Anywhere => true,
            DragStart::OnBody => ball.contains_point(cursor),
        };
        if self.dragging {
            log::debug!("Drag started at ({:.3}, {:.3})", cursor.x, cursor.y);
        }
    }

    pub fn release(&mut self) {
        if self.dragging {
            log::debug!("Drag released");
        }
        self.dragging = false;
    }

    /// Add a particle at rest at `pos`. Returns false if the variant has
    /// no particle system.
    pub fn spawn_particle(&mut self, pos: Vec2) -> bool {
        let Some(cfg) = &self.settings.particles else {
            return false;
        };
        self.particles.push(Body::at_rest(pos, cfg.radius));
        true
    }

    /// Total kinetic energy of the ball and particles
    pub fn kinetic_energy(&self) -> f32 {
        let ball = match (&self.ball, &self.settings.ball) {
            (Some(b), Some(cfg)) => b.kinetic_energy(cfg.forces.mass),
            _ => 0.0,
        };
        let particles = match &self.settings.particles {
            Some(cfg) => self
                .particles
                .iter()
                .map(|p| p.kinetic_energy(cfg.forces.mass))
                .sum(),
            None => 0.0,
        };
        ball + particles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Preset;

    #[test]
    fn test_new_places_ball_at_start() {
        let state = SimState::new(Preset::SpringMass.sim_settings().unwrap()).unwrap();
        let ball = state.ball.unwrap();
        assert_eq!(ball.pos, Vec2::new(0.5, 0.0));
        assert_eq!(ball.prev_pos, ball.pos);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_drag_on_body_requires_hit() {
        let mut state = SimState::new(Preset::BowlWithBall.sim_settings().unwrap()).unwrap();
        state.press(Vec2::new(0.5, 0.5));
        assert!(!state.dragging);

        state.press(Vec2::new(0.01, 0.0));
        assert!(state.dragging);
        state.release();
        assert!(!state.dragging);
    }

    #[test]
    fn test_drag_anywhere() {
        let mut state = SimState::new(Preset::SpringMass.sim_settings().unwrap()).unwrap();
        state.press(Vec2::new(0.9, 0.9));
        assert!(state.dragging);
    }

    #[test]
    fn test_spawn_without_particle_system() {
        let mut state = SimState::new(Preset::SpringMass.sim_settings().unwrap()).unwrap();
        assert!(!state.spawn_particle(Vec2::ZERO));

        let mut state = SimState::new(Preset::Bowl.sim_settings().unwrap()).unwrap();
        assert!(state.spawn_particle(Vec2::new(0.1, 0.2)));
        assert_eq!(state.particles.len(), 1);
        assert_eq!(state.particles[0].vel, Vec2::ZERO);
    }
}
