//! Rendering module
//!
//! The game core only talks to a [`Renderer`]. On the web that is the WebGPU
//! [`RenderState`]; natively and in tests it is the [`HeadlessRenderer`].

pub mod headless;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

use std::fmt;

pub use headless::HeadlessRenderer;
pub use pipeline::RenderState;
pub use scene::build_scene;

use crate::settings::Settings;
use crate::sim::GameState;

/// Something that can draw a frame of the game
pub trait Renderer {
    /// Draw the current state
    fn render(&mut self, state: &GameState, settings: &Settings) -> Result<(), RenderError>;

    /// Output surface changed size (pixels)
    fn resize(&mut self, width: u32, height: u32);

    /// Current output size (pixels)
    fn size(&self) -> (u32, u32);
}

/// Frame rendering failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// Surface must be reconfigured before the next frame
    SurfaceLost,
    /// GPU ran out of memory; rendering cannot continue
    OutOfMemory,
    /// Any other surface error (usually transient)
    Surface(String),
    /// Device or surface setup failed
    Init(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::SurfaceLost => write!(f, "render surface lost"),
            RenderError::OutOfMemory => write!(f, "GPU out of memory"),
            RenderError::Surface(msg) => write!(f, "surface error: {msg}"),
            RenderError::Init(msg) => write!(f, "renderer init failed: {msg}"),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<wgpu::SurfaceError> for RenderError {
    fn from(err: wgpu::SurfaceError) -> Self {
        match err {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => RenderError::SurfaceLost,
            wgpu::SurfaceError::OutOfMemory => RenderError::OutOfMemory,
            other => RenderError::Surface(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_error_mapping() {
        assert_eq!(
            RenderError::from(wgpu::SurfaceError::Lost),
            RenderError::SurfaceLost
        );
        assert_eq!(
            RenderError::from(wgpu::SurfaceError::OutOfMemory),
            RenderError::OutOfMemory
        );
        assert!(matches!(
            RenderError::from(wgpu::SurfaceError::Timeout),
            RenderError::Surface(_)
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(RenderError::SurfaceLost.to_string(), "render surface lost");
        assert_eq!(
            RenderError::Surface("timeout".into()).to_string(),
            "surface error: timeout"
        );
    }
}
