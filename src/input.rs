//! Input snapshot and coordinate mapping
//!
//! The windowing layer writes events into an [`InputState`] as they arrive;
//! the frame driver reads it once per frame. Nothing here registers
//! callbacks.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Screen → world mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Mapping {
    /// `world = (screen / size) * 2 - 1`, optionally flipping y so up is positive
    Centered { flip_y: bool },
    /// `world = screen / size`, origin at the top-left corner
    UnitSquare,
}

impl Default for Mapping {
    fn default() -> Self {
        Mapping::Centered { flip_y: true }
    }
}

/// Window size plus the mapping from its pixels to world coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub mapping: Mapping,
}

impl Viewport {
    pub fn new(width: f32, height: f32, mapping: Mapping) -> Self {
        Self {
            width,
            height,
            mapping,
        }
    }

    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        let size = Vec2::new(self.width.max(1.0), self.height.max(1.0));
        let unit = screen / size;
        match self.mapping {
            Mapping::Centered { flip_y } => {
                let mut world = unit * 2.0 - Vec2::ONE;
                if flip_y {
                    world.y = -world.y;
                }
                world
            }
            Mapping::UnitSquare => unit,
        }
    }

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        let size = Vec2::new(self.width.max(1.0), self.height.max(1.0));
        let unit = match self.mapping {
            Mapping::Centered { flip_y } => {
                let mut w = world;
                if flip_y {
                    w.y = -w.y;
                }
                (w + Vec2::ONE) / 2.0
            }
            Mapping::UnitSquare => world,
        };
        unit * size
    }
}

/// Latest input state, updated by window events
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Cursor in screen pixels
    pub cursor: Option<Vec2>,
    /// Primary button currently held
    pub button_down: bool,
    /// Button went down since the last consume
    pub pressed: bool,
    /// Button went up since the last consume
    pub released: bool,
    /// Spawn key (space) held
    pub spawn_held: bool,
    /// Start key (enter) pressed since the last consume
    pub start_pressed: bool,
}

impl InputState {
    pub fn cursor_moved(&mut self, x: f32, y: f32) {
        self.cursor = Some(Vec2::new(x, y));
    }

    pub fn button(&mut self, down: bool) {
        if down && !self.button_down {
            self.pressed = true;
        } else if !down && self.button_down {
            self.released = true;
        }
        self.button_down = down;
    }

    pub fn spawn_key(&mut self, down: bool) {
        self.spawn_held = down;
    }

    pub fn start_key(&mut self) {
        self.start_pressed = true;
    }

    /// Clear one-shot edges after a tick has processed them
    pub fn clear_edges(&mut self) {
        self.pressed = false;
        self.released = false;
        self.start_pressed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_mapping_flips_y() {
        let vp = Viewport::new(640.0, 640.0, Mapping::Centered { flip_y: true });
        assert_eq!(vp.screen_to_world(Vec2::new(320.0, 320.0)), Vec2::ZERO);
        assert_eq!(vp.screen_to_world(Vec2::new(0.0, 0.0)), Vec2::new(-1.0, 1.0));
        assert_eq!(vp.screen_to_world(Vec2::new(640.0, 640.0)), Vec2::new(1.0, -1.0));
    }

    #[test]
    fn test_centered_without_flip() {
        let vp = Viewport::new(200.0, 100.0, Mapping::Centered { flip_y: false });
        assert_eq!(vp.screen_to_world(Vec2::new(0.0, 0.0)), Vec2::new(-1.0, -1.0));
    }

    #[test]
    fn test_unit_square_mapping() {
        let vp = Viewport::new(640.0, 480.0, Mapping::UnitSquare);
        assert_eq!(vp.screen_to_world(Vec2::new(320.0, 240.0)), Vec2::new(0.5, 0.5));
    }

    #[test]
    fn test_world_to_screen_inverts() {
        let vp = Viewport::new(640.0, 480.0, Mapping::default());
        let world = Vec2::new(0.25, -0.5);
        let back = vp.screen_to_world(vp.world_to_screen(world));
        assert!((back - world).length() < 1e-5);
    }

    #[test]
    fn test_button_edges() {
        let mut input = InputState::default();
        input.button(true);
        assert!(input.pressed && input.button_down);
        // Repeat press while held is not a new edge
        input.clear_edges();
        input.button(true);
        assert!(!input.pressed);
        input.button(false);
        assert!(input.released && !input.button_down);
        input.clear_edges();
        assert!(!input.released);
    }
}
