//! Game of Life
//!
//! Independent of the physics toys. Generations are computed into a back
//! buffer and swapped, so no cell reads a partially updated generation.

pub mod grid;
pub mod tick;

pub use grid::{Grid, RuleSet};
pub use tick::{LifeInput, LifeState, tick};
