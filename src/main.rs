//! Particle Toys entry point
//!
//! Runs a demo headless: builds the settings, drives the frame loop with a
//! scripted input sequence, logs progress and optionally dumps the final
//! snapshot as JSON. A windowed front end would feed real events into the
//! same `App`.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use particle_toys::app::{App, Demo};
use particle_toys::{Preset, Settings};

#[derive(Parser, Debug)]
#[command(version, about = "Spring-mass, particle bowl and Game of Life toys")]
struct Args {
    /// Demo preset (spring-mass, bowl-with-ball, bowl, box, life, life-above-five)
    #[arg(short, long, default_value = "bowl-with-ball")]
    preset: String,

    /// JSON settings file (overrides --preset)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Frames to simulate
    #[arg(short, long, default_value_t = 600)]
    frames: u32,

    /// Simulated frame rate
    #[arg(long, default_value_t = 60.0)]
    fps: f32,

    /// Seed for the scripted input and the Life soup
    #[arg(short, long, default_value_t = 1)]
    seed: u64,

    /// Fill the Life grid with a random soup of this density (0-1) and
    /// start it right away instead of scribbling
    #[arg(short, long)]
    density: Option<f64>,

    /// Write the final snapshot to this file
    #[arg(long)]
    dump: Option<PathBuf>,
}

/// Scripted stand-in for a user at the mouse and keyboard
struct Script {
    rng: Pcg32,
    frames: u32,
    /// Life grid was pre-filled; start on the first frame
    soup: bool,
}

impl Script {
    fn new(seed: u64, frames: u32, soup: bool) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            frames,
            soup,
        }
    }

    /// Feed this frame's input events into the app
    fn drive(&mut self, app: &mut App, frame: u32) {
        let vp = app.viewport;
        let (ball_pos, has_particles, is_life) = match &app.demo {
            Demo::Physics(state) => (
                state.ball.map(|b| b.pos),
                state.settings.particles.is_some(),
                false,
            ),
            Demo::Life(_) => (None, false, true),
        };

        if is_life {
            if self.soup {
                if frame == 0 {
                    app.input.start_key();
                }
                return;
            }
            // Scribble a few strokes, then start
            if frame < self.frames / 4 {
                let x = self.rng.random_range(0.0..vp.width);
                let y = self.rng.random_range(0.0..vp.height);
                app.input.cursor_moved(x, y);
                app.input.button(true);
            } else if frame == self.frames / 4 {
                app.input.button(false);
                app.input.start_key();
            }
            return;
        }

        // Grab the ball early, drag it around, let go halfway through
        if let Some(pos) = ball_pos {
            if frame == 10 {
                let screen = vp.world_to_screen(pos);
                app.input.cursor_moved(screen.x, screen.y);
                app.input.button(true);
            } else if frame > 10 && frame < self.frames / 2 && frame % 30 == 0 {
                let target = Vec2::new(
                    self.rng.random_range(-0.6..0.6),
                    self.rng.random_range(-0.6..0.6),
                );
                let screen = vp.world_to_screen(target);
                app.input.cursor_moved(screen.x, screen.y);
            } else if frame == self.frames / 2 {
                app.input.button(false);
            }
        }

        // Hold spawn over random points in the upper half
        if has_particles {
            if frame % 45 == 0 {
                let target = Vec2::new(
                    self.rng.random_range(-0.7..0.7),
                    self.rng.random_range(0.1..0.7),
                );
                let screen = vp.world_to_screen(target);
                app.input.cursor_moved(screen.x, screen.y);
            }
            app.input.spawn_key(frame < self.frames * 3 / 4);
        }
    }
}

fn load_settings(args: &Args) -> Result<Settings> {
    if let Some(path) = &args.config {
        return Settings::load(path)
            .with_context(|| format!("failed to load settings from {}", path.display()));
    }
    let Some(preset) = Preset::from_str(&args.preset) else {
        let names: Vec<_> = Preset::ALL.iter().map(|p| p.as_str()).collect();
        bail!("unknown preset '{}' (expected one of {})", args.preset, names.join(", "));
    };
    Ok(Settings::for_preset(preset))
}

fn log_progress(app: &App, frame: u32) {
    match &app.demo {
        Demo::Physics(state) => log::info!(
            "frame {frame}: {} particles, {} contacts, kinetic energy {:.4}",
            state.particles.len(),
            state.contacts,
            state.kinetic_energy()
        ),
        Demo::Life(state) => log::info!(
            "frame {frame}: generation {}, {} live cells",
            state.generation,
            state.grid().live_count()
        ),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if !(args.fps.is_finite() && args.fps > 0.0) {
        bail!("--fps must be positive, got {}", args.fps);
    }

    if let Some(density) = args.density {
        if !(0.0..=1.0).contains(&density) {
            bail!("--density must be within [0, 1], got {density}");
        }
    }

    let settings = load_settings(&args)?;
    let mut app = App::new(&settings).context("failed to initialize demo")?;
    let soup = match (&mut app.demo, args.density) {
        (Demo::Life(state), Some(density)) => {
            state.grid_mut().randomize(args.seed, density);
            log::info!(
                "Seeded Life soup: {} live cells (density {density}, seed {})",
                state.grid().live_count(),
                args.seed
            );
            true
        }
        (Demo::Physics(_), Some(_)) => {
            log::warn!("--density only applies to Life presets, ignoring");
            false
        }
        _ => false,
    };
    log::info!("Particle Toys starting ({} frames)", args.frames);

    let frame_dt = 1.0 / args.fps;
    let log_every = (args.fps.round() as u32).max(1);
    let mut script = Script::new(args.seed, args.frames, soup);

    for frame in 0..args.frames {
        script.drive(&mut app, frame);
        app.update(frame_dt);
        if frame % log_every == 0 {
            log_progress(&app, frame);
        }
    }
    log_progress(&app, args.frames);

    if let Some(path) = &args.dump {
        let json = serde_json::to_string_pretty(&app.snapshot())?;
        fs::write(path, json)
            .with_context(|| format!("failed to write snapshot to {}", path.display()))?;
        log::info!("Snapshot written to {}", path.display());
    }

    Ok(())
}
