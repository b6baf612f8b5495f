//! Demo presets and configuration
//!
//! Every toy is one [`Preset`] expanded into a full [`Settings`] document.
//! Settings round-trip through JSON so a variant can be tweaked without
//! recompiling.

use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::input::{Mapping, Viewport};
use crate::life::RuleSet;
use crate::sim::{Boundary, DragStart, ForceModel, Integrator};

/// Built-in demo variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    /// Mass on a spring, dragged by the mouse
    SpringMass,
    /// Spring ball plus particles in a circular bowl
    #[default]
    BowlWithBall,
    /// Particles in a circular bowl
    Bowl,
    /// Particles in a square box with elastic walls
    Box,
    /// Game of Life, standard rules
    Life,
    /// Game of Life, overcrowding above five neighbors
    LifeAboveFive,
}

impl Preset {
    pub const ALL: [Preset; 6] = [
        Preset::SpringMass,
        Preset::BowlWithBall,
        Preset::Bowl,
        Preset::Box,
        Preset::Life,
        Preset::LifeAboveFive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::SpringMass => "spring-mass",
            Preset::BowlWithBall => "bowl-with-ball",
            Preset::Bowl => "bowl",
            Preset::Box => "box",
            Preset::Life => "life",
            Preset::LifeAboveFive => "life-above-five",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.to_lowercase().replace('_', "-");
        Self::ALL.into_iter().find(|p| p.as_str() == s)
    }

    pub fn is_life(&self) -> bool {
        matches!(self, Preset::Life | Preset::LifeAboveFive)
    }

    /// Physics parameters for this preset (None for Life presets)
    pub fn sim_settings(&self) -> Option<SimSettings> {
        let gravity = Vec2::new(0.0, -GRAVITY);
        let particles = || ParticleSettings {
            radius: BALL_RADIUS,
            forces: ForceModel {
                mass: 1.0,
                gravity,
                damping: 0.2,
                anchor: None,
                mouse_stiffness: 0.0,
            },
            spawn_interval: PARTICLE_SPAWN_INTERVAL,
        };

        let sim = match self {
            Preset::SpringMass => SimSettings {
                integrator: Integrator::SemiImplicitEuler,
                ball: Some(BallSettings {
                    start: Vec2::new(0.5, 0.0),
                    radius: BALL_RADIUS,
                    forces: ForceModel {
                        mass: 1.0,
                        gravity: Vec2::ZERO,
                        damping: 0.1,
                        anchor: None,
                        mouse_stiffness: 0.0,
                    }
                    .with_anchor(10.0, Vec2::ZERO)
                    .with_mouse_spring(10.5),
                    drag: DragStart::Anywhere,
                }),
                particles: None,
                boundary: None,
            },
            Preset::BowlWithBall => SimSettings {
                integrator: Integrator::Verlet,
                ball: Some(BallSettings {
                    start: Vec2::ZERO,
                    radius: BALL_RADIUS,
                    forces: ForceModel {
                        mass: 1.0,
                        gravity,
                        damping: 0.2,
                        anchor: None,
                        mouse_stiffness: 0.0,
                    }
                    .with_anchor(60.0, Vec2::ZERO)
                    .with_mouse_spring(60.0),
                    drag: DragStart::OnBody,
                }),
                particles: Some(particles()),
                boundary: Some(Boundary::bowl(BOWL_RADIUS, BOWL_RESTITUTION)),
            },
            Preset::Bowl => SimSettings {
                integrator: Integrator::Verlet,
                ball: None,
                particles: Some(particles()),
                boundary: Some(Boundary::bowl(BOWL_RADIUS, BOWL_RESTITUTION)),
            },
            Preset::Box => SimSettings {
                integrator: Integrator::Verlet,
                ball: None,
                particles: Some(particles()),
                boundary: Some(Boundary::unit_box()),
            },
            Preset::Life | Preset::LifeAboveFive => return None,
        };
        Some(sim)
    }

    /// Automaton parameters for this preset (None for physics presets)
    pub fn life_settings(&self) -> Option<LifeSettings> {
        let rules = match self {
            Preset::Life => RuleSet::Conway,
            Preset::LifeAboveFive => RuleSet::AboveFive,
            _ => return None,
        };
        Some(LifeSettings {
            rules,
            ..Default::default()
        })
    }

    pub fn viewport(&self) -> Viewport {
        match self {
            Preset::SpringMass => Viewport::new(640.0, 480.0, Mapping::UnitSquare),
            Preset::Life | Preset::LifeAboveFive => Viewport::new(
                LIFE_WIDTH as f32 * LIFE_CELL_SIZE,
                LIFE_HEIGHT as f32 * LIFE_CELL_SIZE,
                Mapping::Centered { flip_y: false },
            ),
            _ => Viewport::new(640.0, 640.0, Mapping::Centered { flip_y: true }),
        }
    }

    pub fn timestep(&self) -> f32 {
        match self {
            Preset::SpringMass => 0.01,
            _ => SIM_DT,
        }
    }
}

/// The spring-anchored, draggable ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallSettings {
    pub start: Vec2,
    pub radius: f32,
    pub forces: ForceModel,
    #[serde(default)]
    pub drag: DragStart,
}

/// Spawned particles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleSettings {
    pub radius: f32,
    pub forces: ForceModel,
    /// Seconds between spawns while the spawn key is held
    pub spawn_interval: f32,
}

/// Physics parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimSettings {
    #[serde(default)]
    pub integrator: Integrator,
    #[serde(default)]
    pub ball: Option<BallSettings>,
    #[serde(default)]
    pub particles: Option<ParticleSettings>,
    #[serde(default)]
    pub boundary: Option<Boundary>,
}

impl SimSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut radii = Vec::new();
        if let Some(ball) = &self.ball {
            ball.forces.validate()?;
            check_positive("ball.radius", ball.radius)?;
            radii.push(ball.radius);
        }
        if let Some(particles) = &self.particles {
            particles.forces.validate()?;
            check_positive("particles.radius", particles.radius)?;
            check_positive("particles.spawn_interval", particles.spawn_interval)?;
            radii.push(particles.radius);
        }

        let largest = radii.into_iter().fold(0.0_f32, f32::max);
        match self.boundary {
            Some(Boundary::Circle {
                radius,
                restitution,
                ..
            }) => {
                check_positive("boundary.radius", radius)?;
                if !(0.0..=1.0).contains(&restitution) {
                    return Err(ConfigError::invalid(
                        "boundary.restitution",
                        format!("must be within [0, 1], got {restitution}"),
                    ));
                }
                if largest >= radius {
                    return Err(ConfigError::invalid(
                        "boundary.radius",
                        format!("bowl radius {radius} must exceed body radius {largest}"),
                    ));
                }
            }
            Some(Boundary::Box { half_extents }) => {
                if half_extents.min_element() <= largest {
                    return Err(ConfigError::invalid(
                        "boundary.half_extents",
                        format!("box {half_extents} too small for body radius {largest}"),
                    ));
                }
            }
            None => {}
        }
        Ok(())
    }
}

/// Automaton parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifeSettings {
    pub width: usize,
    pub height: usize,
    /// Cell edge in screen pixels
    pub cell_size: f32,
    /// Seconds between generations once started
    pub generation_interval: f32,
    #[serde(default)]
    pub rules: RuleSet,
}

impl Default for LifeSettings {
    fn default() -> Self {
        Self {
            width: LIFE_WIDTH,
            height: LIFE_HEIGHT,
            cell_size: LIFE_CELL_SIZE,
            generation_interval: LIFE_GENERATION_INTERVAL,
            rules: RuleSet::Conway,
        }
    }
}

impl LifeSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::invalid(
                "life.size",
                format!("grid must be non-empty, got {}x{}", self.width, self.height),
            ));
        }
        match self.width.checked_mul(self.height) {
            Some(cells) if cells <= MAX_LIFE_CELLS => {}
            _ => {
                return Err(ConfigError::invalid(
                    "life.size",
                    format!(
                        "grid {}x{} exceeds {MAX_LIFE_CELLS} cells",
                        self.width, self.height
                    ),
                ));
            }
        }
        check_positive("life.cell_size", self.cell_size)?;
        check_positive("life.generation_interval", self.generation_interval)
    }
}

/// Which simulation a settings document drives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum DemoSettings {
    Physics(SimSettings),
    Life(LifeSettings),
}

/// Complete settings for one demo run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Preset these settings were derived from
    pub preset: Preset,
    pub viewport: Viewport,
    /// Fixed simulation timestep (seconds)
    pub timestep: f32,
    pub demo: DemoSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self::for_preset(Preset::default())
    }
}

impl Settings {
    /// Create settings from a preset (applies preset defaults)
    pub fn for_preset(preset: Preset) -> Self {
        let demo = match preset.sim_settings() {
            Some(sim) => DemoSettings::Physics(sim),
            None => DemoSettings::Life(preset.life_settings().unwrap_or_default()),
        };
        Self {
            preset,
            viewport: preset.viewport(),
            timestep: preset.timestep(),
            demo,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.preset.is_life() != matches!(self.demo, DemoSettings::Life(_)) {
            return Err(ConfigError::invalid(
                "demo",
                format!("does not match preset '{}'", self.preset.as_str()),
            ));
        }
        check_positive("timestep", self.timestep)?;
        check_positive("viewport.width", self.viewport.width)?;
        check_positive("viewport.height", self.viewport.height)?;
        match &self.demo {
            DemoSettings::Physics(sim) => sim.validate(),
            DemoSettings::Life(life) => life.validate(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load and validate settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

fn check_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            field,
            format!("must be positive, got {value}"),
        ))
    }
}
