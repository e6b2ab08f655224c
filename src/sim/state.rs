//! Game state and core simulation types
//!
//! Everything the frame loop mutates lives here: the ship, the entity stores
//! for projectiles and particles, and the brick grid.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::grid::{BrickGrid, GridLayout};
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Game is paused; nothing moves
    Paused,
}

/// Something that happened during a tick that the outside world may care about
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A projectile left the ship
    ProjectileFired,
    /// A projectile destroyed the brick at (row, col)
    BrickDestroyed { row: usize, col: usize, pos: Vec2 },
    /// Every brick was destroyed; the grid was rebuilt for `level`
    LevelCleared { level: u32 },
}

/// The player's ship, a circle resting on the bottom edge of the field
#[derive(Debug, Clone)]
pub struct Ship {
    /// Horizontal center
    pub x: f32,
    pub radius: f32,
}

impl Ship {
    pub fn new(x: f32) -> Self {
        Self {
            x,
            radius: SHIP_RADIUS,
        }
    }

    /// Center of the ship for a field of the given height
    pub fn center(&self, field: Vec2) -> Vec2 {
        Vec2::new(self.x, field.y - self.radius)
    }

    /// Follow the pointer, staying inside the field
    pub fn move_to(&mut self, target_x: f32, field_width: f32) {
        self.x = target_x.clamp(0.0, field_width.max(0.0));
    }
}

/// A laser bolt travelling straight up
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    /// Tip of the bolt; this is the point tested against bricks
    pub pos: Vec2,
}

impl Projectile {
    pub fn new(pos: Vec2) -> Self {
        Self { pos }
    }

    /// Move up by `speed * dt`
    pub fn advance(&mut self, speed: f32, dt: f32) {
        self.pos.y -= speed * dt;
    }

    /// Past the top edge of the field
    pub fn is_off_screen(&self) -> bool {
        self.pos.y < 0.0
    }
}

/// A decorative spark from a brick burst
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Shrinks every step; the particle is gone once it hits zero
    pub radius: f32,
    pub color: [f32; 4],
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Play field size in pixels (origin top-left, y down)
    pub field: Vec2,
    pub ship: Ship,
    pub projectiles: Vec<Projectile>,
    pub grid: BrickGrid,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub score: u64,
    /// Number of grids cleared so far
    pub level: u32,
    pub shots_fired: u64,
    pub bricks_destroyed: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a new game with the default brick layout
    pub fn new(seed: u64, width: f32, height: f32) -> Self {
        Self::with_layout(seed, width, height, GridLayout::default())
    }

    /// Create a new game with a custom brick layout
    pub fn with_layout(seed: u64, width: f32, height: f32, layout: GridLayout) -> Self {
        Self {
            seed,
            field: Vec2::new(width, height),
            ship: Ship::new(width / 2.0),
            projectiles: Vec::new(),
            grid: BrickGrid::generate(layout),
            particles: Vec::new(),
            score: 0,
            level: 0,
            shots_fired: 0,
            bricks_destroyed: 0,
            time_ticks: 0,
            phase: GamePhase::Playing,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Canvas changed size: keep the ship on the field
    pub fn resize(&mut self, width: f32, height: f32) {
        self.field = Vec2::new(width, height);
        self.ship.move_to(self.ship.x, width);
    }

    /// Where a new projectile starts (the ship's center)
    pub fn muzzle(&self) -> Vec2 {
        self.ship.center(self.field)
    }

    /// Launch a projectile from the ship
    pub fn fire(&mut self) {
        let pos = self.muzzle();
        self.projectiles.push(Projectile::new(pos));
        self.shots_fired += 1;
    }

    /// Fraction of shots that destroyed a brick
    pub fn accuracy(&self) -> f32 {
        if self.shots_fired == 0 {
            0.0
        } else {
            self.bricks_destroyed as f32 / self.shots_fired as f32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_state_centers_ship() {
        let state = GameState::new(1, 400.0, 300.0);
        assert_eq!(state.ship.x, 200.0);
        assert_eq!(state.muzzle(), Vec2::new(200.0, 290.0));
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.grid.alive_count(), BRICK_ROWS * BRICK_COLS);
    }

    #[test]
    fn test_fire_spawns_at_muzzle() {
        let mut state = GameState::new(1, 400.0, 300.0);
        state.ship.move_to(50.0, state.field.x);
        state.fire();
        assert_eq!(state.projectiles, vec![Projectile::new(Vec2::new(50.0, 290.0))]);
        assert_eq!(state.shots_fired, 1);
    }

    #[test]
    fn test_resize_reclamps_ship() {
        let mut state = GameState::new(1, 800.0, 600.0);
        state.ship.move_to(700.0, state.field.x);
        state.resize(300.0, 200.0);
        assert_eq!(state.ship.x, 300.0);
        assert_eq!(state.muzzle().y, 190.0);
    }

    #[test]
    fn test_projectile_off_screen() {
        let mut p = Projectile::new(Vec2::new(10.0, 2.0));
        p.advance(PROJECTILE_SPEED, SIM_DT);
        assert!(p.is_off_screen());
    }

    #[test]
    fn test_accuracy() {
        let mut state = GameState::new(1, 400.0, 300.0);
        assert_eq!(state.accuracy(), 0.0);
        state.shots_fired = 4;
        state.bricks_destroyed = 1;
        assert!((state.accuracy() - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn test_ship_clamped_at_edges() {
        let mut ship = Ship::new(100.0);
        ship.move_to(-50.0, 480.0);
        assert_eq!(ship.x, 0.0);
        ship.move_to(900.0, 480.0);
        assert_eq!(ship.x, 480.0);
        ship.move_to(900.0, 0.0);
        assert_eq!(ship.x, 0.0);
    }

    proptest! {
        #[test]
        fn prop_ship_stays_in_field(
            start in -100.0f32..600.0,
            target in -1000.0f32..1000.0,
            width in prop_oneof![Just(0.0f32), 0.0f32..800.0],
        ) {
            let mut ship = Ship::new(start);
            ship.move_to(target, width);
            prop_assert!(ship.x >= 0.0 && ship.x <= width);
            if (0.0..=width).contains(&target) {
                prop_assert_eq!(ship.x, target);
            }
        }
    }
}
