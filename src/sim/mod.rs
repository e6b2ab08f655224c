//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (row-major bricks, insertion-ordered projectiles)
//! - No rendering or platform dependencies

pub mod collision;
pub mod grid;
pub mod particles;
pub mod state;
pub mod tick;

pub use collision::{Rect, find_hit};
pub use grid::{Brick, BrickGrid, GridLayout};
pub use particles::{spawn_burst, step_particles};
pub use state::{GameEvent, GamePhase, GameState, Particle, Projectile, Ship};
pub use tick::{TickInput, tick};
