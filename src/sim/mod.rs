//! Point-mass physics
//!
//! Pure and deterministic given the same inputs and timesteps:
//! - No rendering or platform dependencies
//! - Stable iteration order (particle creation order)

pub mod boundary;
pub mod collision;
pub mod forces;
pub mod integrator;
pub mod state;
pub mod tick;

pub use boundary::Boundary;
pub use collision::{CollisionResult, resolve_against_all, resolve_pair, resolve_pairs};
pub use forces::{ForceModel, Spring};
pub use integrator::Integrator;
pub use state::{Body, DragStart, SimState};
pub use tick::{TickInput, tick};
