//! Particle Toys - small real-time 2D simulations
//!
//! Core modules:
//! - `sim`: Point-mass physics (integrators, forces, boundaries, collisions)
//! - `life`: Game of Life grid and generation stepping
//! - `input`: Input snapshot and screen-to-world mapping
//! - `settings`: Variant presets and JSON configuration
//! - `app`: Fixed timestep frame driver tying input, simulation and snapshots together

pub mod app;
pub mod error;
pub mod input;
pub mod life;
pub mod settings;
pub mod sim;

pub use app::{App, Demo, Snapshot};
pub use error::ConfigError;
pub use settings::{Preset, Settings};

/// Simulation configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Standard gravity (world units/s², downward)
    pub const GRAVITY: f32 = 9.8;
    /// Particle and ball radius in the bowl variants
    pub const BALL_RADIUS: f32 = 0.05;
    /// Bowl radius (the window spans [-1, 1])
    pub const BOWL_RADIUS: f32 = 1.0;
    /// Velocity retained after bouncing off the bowl
    pub const BOWL_RESTITUTION: f32 = 0.8;
    /// Seconds between spawned particles while the spawn key is held
    pub const PARTICLE_SPAWN_INTERVAL: f32 = 0.1;

    /// Game of Life grid defaults
    pub const LIFE_WIDTH: usize = 100;
    pub const LIFE_HEIGHT: usize = 100;
    /// Cell edge in screen pixels
    pub const LIFE_CELL_SIZE: f32 = 10.0;
    /// Seconds between generations (70 ms)
    pub const LIFE_GENERATION_INTERVAL: f32 = 0.07;
    /// Largest grid a settings file may ask for
    pub const MAX_LIFE_CELLS: usize = 1 << 24;
    /// Maximum generations computed in one tick
    pub const MAX_GENERATIONS_PER_TICK: u32 = 4;
}

/// Tolerance below which a distance is treated as zero
pub const DISTANCE_EPSILON: f32 = 1e-6;
