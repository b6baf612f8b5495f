//! Frame driver
//!
//! Owns the active demo and the input snapshot. Each frame: clamp the frame
//! time, bank it, run fixed-timestep ticks, and clear one-shot inputs once
//! a tick has consumed them.

use glam::Vec2;
use serde::Serialize;

use crate::consts::MAX_SUBSTEPS;
use crate::error::ConfigError;
use crate::input::{InputState, Viewport};
use crate::life::{self, LifeInput, LifeState};
use crate::settings::{DemoSettings, Settings};
use crate::sim::{self, Boundary, SimState, TickInput};

/// The simulation being driven
#[derive(Debug, Clone)]
pub enum Demo {
    Physics(SimState),
    Life(LifeState),
}

/// A circle to draw
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

/// Read-only view of the current frame for a renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Snapshot {
    Physics {
        ball: Option<Circle>,
        /// Rest point the ball's spring is drawn to
        anchor: Option<Vec2>,
        particles: Vec<Circle>,
        boundary: Option<Boundary>,
        time_ticks: u64,
    },
    Life {
        width: usize,
        height: usize,
        cell_size: f32,
        live_cells: Vec<(usize, usize)>,
        generation: u64,
    },
}

/// Demo instance holding all state
#[derive(Debug, Clone)]
pub struct App {
    pub demo: Demo,
    pub viewport: Viewport,
    pub input: InputState,
    timestep: f32,
    accumulator: f32,
}

impl App {
    pub fn new(settings: &Settings) -> Result<Self, ConfigError> {
        settings.validate()?;
        let demo = match &settings.demo {
            DemoSettings::Physics(sim) => Demo::Physics(SimState::new(sim.clone())?),
            DemoSettings::Life(life) => Demo::Life(LifeState::new(life.clone())?),
        };
        log::info!(
            "Demo '{}' ready ({}x{} viewport, dt {:.4}s)",
            settings.preset.as_str(),
            settings.viewport.width,
            settings.viewport.height,
            settings.timestep
        );
        Ok(Self {
            demo,
            viewport: settings.viewport,
            input: InputState::default(),
            timestep: settings.timestep,
            accumulator: 0.0,
        })
    }

    /// Longest frame time the substep cap can absorb
    #[inline]
    fn max_frame_dt(&self) -> f32 {
        self.timestep * MAX_SUBSTEPS as f32
    }

    /// Run simulation ticks for one frame. Returns the number of ticks run.
    pub fn update(&mut self, frame_dt: f32) -> u32 {
        if !frame_dt.is_finite() || frame_dt <= 0.0 {
            return 0;
        }
        let max_frame_dt = self.max_frame_dt();
        if frame_dt > max_frame_dt {
            log::warn!("Frame took {frame_dt:.3}s, clamping to {max_frame_dt:.3}s");
        }
        self.accumulator += frame_dt.min(max_frame_dt);

        let mut substeps = 0;
        while self.accumulator >= self.timestep && substeps < MAX_SUBSTEPS {
            self.run_tick(self.timestep);
            self.accumulator -= self.timestep;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.clear_edges();
        }
        if substeps == MAX_SUBSTEPS && self.accumulator >= self.timestep {
            log::warn!("Substep cap hit, dropping {:.3}s", self.accumulator);
            self.accumulator = 0.0;
        }
        substeps
    }

    fn run_tick(&mut self, dt: f32) {
        match &mut self.demo {
            Demo::Physics(state) => {
                let input = TickInput {
                    cursor: self.input.cursor.map(|c| self.viewport.screen_to_world(c)),
                    press: self.input.pressed,
                    release: self.input.released,
                    spawn: self.input.spawn_held,
                };
                sim::tick(state, &input, dt);
            }
            Demo::Life(state) => {
                let input = LifeInput {
                    cursor: self.input.cursor.map(|c| (c.x, c.y)),
                    painting: self.input.button_down,
                    start: self.input.start_pressed,
                };
                life::tick(state, &input, dt);
            }
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        match &self.demo {
            Demo::Physics(state) => Snapshot::Physics {
                ball: state.ball.map(|b| Circle {
                    center: b.pos,
                    radius: b.radius,
                }),
                anchor: state
                    .settings
                    .ball
                    .as_ref()
                    .and_then(|cfg| cfg.forces.anchor)
                    .map(|spring| spring.rest),
                particles: state
                    .particles
                    .iter()
                    .map(|p| Circle {
                        center: p.pos,
                        radius: p.radius,
                    })
                    .collect(),
                boundary: state.settings.boundary,
                time_ticks: state.time_ticks,
            },
            Demo::Life(state) => Snapshot::Life {
                width: state.grid().width(),
                height: state.grid().height(),
                cell_size: state.settings.cell_size,
                live_cells: state.grid().live_cells().collect(),
                generation: state.generation,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Preset;

    fn app(preset: Preset) -> App {
        App::new(&Settings::for_preset(preset)).unwrap()
    }

    #[test]
    fn test_fixed_substeps() {
        let mut app = app(Preset::Bowl);
        // 1/60 s frame at 120 Hz = 2 ticks
        assert_eq!(app.update(1.0 / 60.0 + 1e-4), 2);
        assert_eq!(app.update(0.0), 0);
        assert_eq!(app.update(f32::NAN), 0);
    }

    #[test]
    fn test_long_frame_is_clamped() {
        let mut app = app(Preset::Bowl);
        let ticks = app.update(5.0);
        assert!((MAX_SUBSTEPS - 1..=MAX_SUBSTEPS).contains(&ticks));
        // Clamped time fits the substep cap, nothing left to drop
        assert!(app.accumulator < app.timestep);
        assert!(app.update(1e-4) <= 1);
    }

    #[test]
    fn test_clamped_frames_keep_pace() {
        for preset in [Preset::Bowl, Preset::SpringMass, Preset::Life] {
            let mut app = app(preset);
            assert!(app.max_frame_dt() / app.timestep <= MAX_SUBSTEPS as f32 + 1e-3);
            let ticks: u32 = (0..10).map(|_| app.update(1.0)).sum();
            // Each clamped frame banks about one substep budget
            assert!(ticks >= 10 * (MAX_SUBSTEPS - 1), "{}: {ticks}", preset.as_str());
        }
    }

    #[test]
    fn test_press_edge_consumed_once() {
        let mut app = app(Preset::BowlWithBall);
        // Press on the ball at the center of a 640x640 window
        app.input.cursor_moved(320.0, 320.0);
        app.input.button(true);
        app.update(1.0 / 60.0 + 1e-4);

        let Demo::Physics(state) = &app.demo else {
            panic!("expected physics demo");
        };
        assert!(state.dragging);
        assert!(!app.input.pressed);
        assert!(app.input.button_down);
    }

    #[test]
    fn test_spawn_through_input() {
        let mut app = app(Preset::Bowl);
        app.input.cursor_moved(320.0, 100.0);
        app.input.spawn_key(true);
        for _ in 0..60 {
            app.update(1.0 / 60.0);
        }
        let Snapshot::Physics { particles, .. } = app.snapshot() else {
            panic!("expected physics snapshot");
        };
        assert!(particles.len() >= 8);
    }

    #[test]
    fn test_life_paint_and_start() {
        let mut app = app(Preset::Life);
        app.input.cursor_moved(55.0, 55.0);
        app.input.button(true);
        app.update(1.0 / 60.0);
        app.input.button(false);

        let Snapshot::Life { live_cells, .. } = app.snapshot() else {
            panic!("expected life snapshot");
        };
        assert_eq!(live_cells, vec![(5, 5)]);

        app.input.start_key();
        for _ in 0..10 {
            app.update(1.0 / 60.0);
        }
        let Snapshot::Life {
            live_cells,
            generation,
            ..
        } = app.snapshot()
        else {
            panic!("expected life snapshot");
        };
        assert!(generation >= 1);
        assert!(live_cells.is_empty());
    }

    #[test]
    fn test_life_soup_steps() {
        let mut app = app(Preset::Life);
        let Demo::Life(state) = &mut app.demo else {
            panic!("expected life demo");
        };
        state.grid_mut().randomize(11, 0.35);
        let seeded = state.grid().live_count();
        assert!(seeded > 0);

        app.input.start_key();
        for _ in 0..30 {
            app.update(1.0 / 60.0);
        }
        let Snapshot::Life { generation, .. } = app.snapshot() else {
            panic!("expected life snapshot");
        };
        assert!(generation >= 5);
    }

    #[test]
    fn test_snapshot_serializes() {
        let app = app(Preset::SpringMass);
        let json = serde_json::to_string(&app.snapshot()).unwrap();
        assert!(json.contains("\"type\":\"physics\""));
    }
}
