//! Game of Life editor/runner state
//!
//! Cells are painted alive while the button is held. The start key latches
//! stepping on; generations are then throttled to one per
//! `generation_interval` of accumulated time.

use serde::{Deserialize, Serialize};

use super::grid::{Grid, RuleSet};
use crate::consts::MAX_GENERATIONS_PER_TICK;
use crate::error::ConfigError;
use crate::settings::LifeSettings;

/// Input commands for a single Life tick
#[derive(Debug, Clone, Default)]
pub struct LifeInput {
    /// Cursor in screen pixels, if known
    pub cursor: Option<(f32, f32)>,
    /// Mouse button is held
    pub painting: bool,
    /// Start key pressed
    pub start: bool,
}

/// Double-buffered automaton state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LifeState {
    pub settings: LifeSettings,
    /// Current generation
    front: Grid,
    /// Scratch buffer for the next generation
    #[serde(skip)]
    back: Option<Grid>,
    /// Stepping has been started
    pub running: bool,
    /// Generations computed so far
    pub generation: u64,
    /// Time banked toward the next generation
    accumulator: f32,
}

impl LifeState {
    pub fn new(settings: LifeSettings) -> Result<Self, ConfigError> {
        settings.validate()?;
        let front = Grid::new(settings.width, settings.height);
        Ok(Self {
            settings,
            back: Some(front.clone()),
            front,
            running: false,
            generation: 0,
            accumulator: 0.0,
        })
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.front
    }

    #[inline]
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.front
    }

    #[inline]
    pub fn rules(&self) -> RuleSet {
        self.settings.rules
    }

    /// Set the cell under a screen position alive
    pub fn paint(&mut self, sx: f32, sy: f32) -> bool {
        match self.front.cell_at_screen(sx, sy, self.settings.cell_size) {
            Some((x, y)) => self.front.set(x, y, true),
            None => false,
        }
    }

    pub fn start(&mut self) {
        if !self.running {
            log::info!(
                "Life started with {} live cells ({:?} rules)",
                self.front.live_count(),
                self.rules()
            );
        }
        self.running = true;
    }

    /// Compute one generation and swap buffers
    pub fn step(&mut self) {
        let mut back = self
            .back
            .take()
            .unwrap_or_else(|| Grid::new(self.front.width(), self.front.height()));
        self.front.step_into(self.rules(), &mut back);
        std::mem::swap(&mut self.front, &mut back);
        self.back = Some(back);
        self.generation += 1;
    }
}

/// Advance the automaton by `dt` seconds. Returns generations computed.
pub fn tick(state: &mut LifeState, input: &LifeInput, dt: f32) -> u32 {
    if input.painting {
        if let Some((sx, sy)) = input.cursor {
            state.paint(sx, sy);
        }
    }
    if input.start {
        state.start();
    }
    if !state.running || !(dt.is_finite() && dt > 0.0) {
        return 0;
    }

    state.accumulator += dt;
    let interval = state.settings.generation_interval;
    let mut generations = 0;
    while state.accumulator >= interval && generations < MAX_GENERATIONS_PER_TICK {
        state.step();
        state.accumulator -= interval;
        generations += 1;
    }
    if state.accumulator >= interval {
        // Drop the backlog instead of catching up later
        state.accumulator = 0.0;
    }
    generations
}
