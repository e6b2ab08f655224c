//! Renderer that draws nothing
//!
//! Builds the scene like the GPU path would, then just records what it saw.
//! Used by the native binary and by tests.

use super::{RenderError, Renderer, build_scene};
use crate::settings::Settings;
use crate::sim::GameState;

#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    pub size: (u32, u32),
    /// Frames rendered so far
    pub frames: u64,
    /// Vertex count of the last frame
    pub last_vertex_count: usize,
    /// Score shown on the last frame's HUD
    pub last_score: u64,
    /// Errors to return from upcoming `render` calls, in order
    pub pending_errors: Vec<RenderError>,
    /// Number of `resize` calls seen
    pub resizes: u32,
}

impl HeadlessRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            ..Default::default()
        }
    }
}

impl Renderer for HeadlessRenderer {
    fn render(&mut self, state: &GameState, settings: &Settings) -> Result<(), RenderError> {
        if !self.pending_errors.is_empty() {
            return Err(self.pending_errors.remove(0));
        }

        self.last_vertex_count = build_scene(state, settings).len();
        self.last_score = state.score;
        self.frames += 1;
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
        self.resizes += 1;
    }

    fn size(&self) -> (u32, u32) {
        self.size
    }
}
