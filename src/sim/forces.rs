//! Force model for point masses
//!
//! Net force = anchor spring + mouse spring (while dragging) + gravity + damping.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Linear spring pulling a body toward a fixed rest point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spring {
    /// Spring constant k
    pub stiffness: f32,
    /// Rest point in world coordinates
    pub rest: Vec2,
}

impl Spring {
    #[inline]
    pub fn force(&self, pos: Vec2) -> Vec2 {
        -self.stiffness * (pos - self.rest)
    }
}

/// Forces acting on one kind of body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForceModel {
    /// Body mass (must be > 0)
    pub mass: f32,
    /// Gravitational acceleration (world units/s²)
    pub gravity: Vec2,
    /// Velocity-proportional damping coefficient
    pub damping: f32,
    /// Spring toward a rest point, if any
    #[serde(default)]
    pub anchor: Option<Spring>,
    /// Stiffness of the spring toward the cursor while dragging
    #[serde(default)]
    pub mouse_stiffness: f32,
}

impl ForceModel {
    pub fn new(mass: f32, gravity: Vec2, damping: f32) -> Result<Self, ConfigError> {
        let model = Self {
            mass,
            gravity,
            damping,
            anchor: None,
            mouse_stiffness: 0.0,
        };
        model.validate()?;
        Ok(model)
    }

    pub fn with_anchor(mut self, stiffness: f32, rest: Vec2) -> Self {
        self.anchor = Some(Spring { stiffness, rest });
        self
    }

    pub fn with_mouse_spring(mut self, stiffness: f32) -> Self {
        self.mouse_stiffness = stiffness;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(ConfigError::invalid(
                "mass",
                format!("must be positive, got {}", self.mass),
            ));
        }
        if !self.damping.is_finite() || self.damping < 0.0 {
            return Err(ConfigError::invalid(
                "damping",
                format!("must be non-negative, got {}", self.damping),
            ));
        }
        Ok(())
    }

    /// Net force on a body at `pos` moving with `vel`.
    ///
    /// `mouse` is the cursor position while the body is being dragged.
    pub fn net_force(&self, pos: Vec2, vel: Vec2, mouse: Option<Vec2>) -> Vec2 {
        let mut force = self.gravity * self.mass - self.damping * vel;
        if let Some(spring) = &self.anchor {
            force += spring.force(pos);
        }
        if let Some(mouse) = mouse {
            force += self.mouse_stiffness * (mouse - pos);
        }
        force
    }

    /// Acceleration = force / mass
    pub fn acceleration(&self, pos: Vec2, vel: Vec2, mouse: Option<Vec2>) -> Vec2 {
        self.net_force(pos, vel, mouse) / self.mass
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_mass() {
        assert!(ForceModel::new(0.0, Vec2::ZERO, 0.1).is_err());
        assert!(ForceModel::new(-1.0, Vec2::ZERO, 0.1).is_err());
        assert!(ForceModel::new(f32::NAN, Vec2::ZERO, 0.1).is_err());
        assert!(ForceModel::new(1.0, Vec2::ZERO, -0.1).is_err());
    }

    #[test]
    fn test_gravity_and_damping() {
        let model = ForceModel::new(2.0, Vec2::new(0.0, -9.8), 0.2).unwrap();
        let a = model.acceleration(Vec2::ZERO, Vec2::new(1.0, 0.0), None);
        assert!((a.x - (-0.1)).abs() < 1e-6);
        assert!((a.y - (-9.8)).abs() < 1e-5);
    }

    #[test]
    fn test_anchor_spring_restores() {
        let model = ForceModel::new(1.0, Vec2::ZERO, 0.0)
            .unwrap()
            .with_anchor(10.0, Vec2::ZERO);
        let f = model.net_force(Vec2::new(0.5, 0.0), Vec2::ZERO, None);
        assert!((f.x - (-5.0)).abs() < 1e-6);
        assert_eq!(f.y, 0.0);
    }

    #[test]
    fn test_mouse_spring_only_while_dragging() {
        let model = ForceModel::new(1.0, Vec2::ZERO, 0.0)
            .unwrap()
            .with_mouse_spring(10.5);
        let pos = Vec2::new(0.2, 0.2);
        assert_eq!(model.net_force(pos, Vec2::ZERO, None), Vec2::ZERO);

        let f = model.net_force(pos, Vec2::ZERO, Some(Vec2::new(0.4, 0.2)));
        assert!((f.x - 2.1).abs() < 1e-5);
        assert!(f.y.abs() < 1e-6);
    }
}
