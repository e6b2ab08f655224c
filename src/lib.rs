//! Laser Bricks - shoot lasers up at a wall of bricks
//!
//! Core modules:
//! - `sim`: Deterministic simulation (projectiles, collisions, particles, levels)
//! - `game`: Frame driver tying simulation, input, sound and rendering together
//! - `renderer`: WebGPU rendering pipeline
//! - `audio`: Sound effects for game events
//! - `platform`: Browser input and frame timing helpers
//! - `settings`: Player-facing configuration

pub mod audio;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use settings::{QualityPreset, Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one display refresh at 60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Largest frame delta accepted before clamping (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Default play field, used until the canvas reports its size
    pub const DEFAULT_FIELD_WIDTH: f32 = 480.0;
    pub const DEFAULT_FIELD_HEIGHT: f32 = 320.0;

    /// Ship (the player's circle)
    pub const SHIP_RADIUS: f32 = 10.0;

    /// Projectile speed, pixels/s (5 px per frame)
    pub const PROJECTILE_SPEED: f32 = 300.0;
    /// Projectile visual size
    pub const PROJECTILE_WIDTH: f32 = 2.0;
    pub const PROJECTILE_HEIGHT: f32 = 10.0;

    /// Brick grid layout
    pub const BRICK_ROWS: usize = 4;
    pub const BRICK_COLS: usize = 8;
    pub const BRICK_WIDTH: f32 = 40.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_PADDING: f32 = 10.0;
    pub const BRICK_OFFSET_TOP: f32 = 30.0;
    pub const BRICK_OFFSET_LEFT: f32 = 30.0;

    /// Points awarded per destroyed brick
    pub const BRICK_POINTS: u64 = 10;

    /// Particles per brick burst
    pub const BURST_PARTICLES: usize = 5;
    /// Burst particle radius range (pixels)
    pub const PARTICLE_MIN_RADIUS: f32 = 2.0;
    pub const PARTICLE_MAX_RADIUS: f32 = 5.0;
    /// Max horizontal burst speed either way, pixels/s (1.5 px per frame)
    pub const PARTICLE_MAX_VX: f32 = 90.0;
    /// Max upward burst speed, pixels/s (3 px per frame)
    pub const PARTICLE_MAX_RISE: f32 = 180.0;
    /// Radius lost per second (0.1 px per frame)
    pub const PARTICLE_DECAY: f32 = 6.0;
    /// Burst color (yellow)
    pub const PARTICLE_COLOR: [f32; 4] = [1.0, 0.9, 0.1, 1.0];
}
