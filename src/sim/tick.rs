//! Fixed timestep simulation tick
//!
//! One tick runs the whole per-frame core in order:
//! update step (ship, firing, projectiles vs bricks) -> particle step ->
//! level-completion check.

use glam::Vec2;

use super::collision::find_hit;
use super::particles::{spawn_burst, step_particles};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Autopilot fires once every this many ticks
const IDLE_FIRE_INTERVAL: u64 = 12;
/// Autopilot ship speed (pixels/s)
const IDLE_SHIP_SPEED: f32 = 240.0;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Ship target x (from mouse/touch position)
    pub target_x: Option<f32>,
    /// Fire a projectile (click/tap/space)
    pub fire: bool,
    /// Pause toggle
    pub pause: bool,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

/// Advance the game state by one fixed timestep.
///
/// `max_particles` caps the particle store (0 disables bursts).
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    dt: f32,
    max_particles: usize,
) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.pause {
        state.phase = match state.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
        };
        log::debug!("Phase -> {:?}", state.phase);
    }
    if state.phase == GamePhase::Paused {
        return events;
    }

    let mut input = input.clone();
    if input.idle_mode {
        autopilot(state, &mut input, dt);
    }
    let input = &input;

    state.time_ticks += 1;

    if let Some(x) = input.target_x {
        state.ship.move_to(x, state.field.x);
    }

    if input.fire {
        state.fire();
        events.push(GameEvent::ProjectileFired);
    }

    let bursts = update_projectiles(state, dt, &mut events);

    // Particle step: bursts queued by this tick's hits, then motion and fade
    for origin in bursts {
        spawn_burst(
            &mut state.particles,
            &mut state.rng,
            origin,
            BURST_PARTICLES,
            max_particles,
        );
    }
    step_particles(&mut state.particles, dt);

    check_level_complete(state, &mut events);

    events
}

/// Move projectiles and resolve brick hits.
///
/// Returns the burst origins for destroyed bricks.
fn update_projectiles(state: &mut GameState, dt: f32, events: &mut Vec<GameEvent>) -> Vec<Vec2> {
    let grid = &mut state.grid;
    let mut hits = Vec::new();

    state.projectiles.retain_mut(|projectile| {
        projectile.advance(PROJECTILE_SPEED, dt);

        if let Some((row, col)) = find_hit(grid, projectile.pos) {
            if grid.destroy(row, col) {
                let origin = grid.layout().brick_origin(row, col);
                hits.push((row, col, origin));
                return false;
            }
        }

        !projectile.is_off_screen()
    });

    let mut bursts = Vec::with_capacity(hits.len());
    for (row, col, pos) in hits {
        state.score += BRICK_POINTS;
        state.bricks_destroyed += 1;
        events.push(GameEvent::BrickDestroyed { row, col, pos });
        bursts.push(pos);
    }
    bursts
}

/// Rebuild the grid once every brick is gone. An empty layout has no level to clear.
fn check_level_complete(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.grid.is_empty() || !state.grid.is_cleared() {
        return;
    }

    state.grid.regenerate();
    state.level += 1;
    log::info!(
        "Level {} cleared (score {}, accuracy {:.0}%)",
        state.level,
        state.score,
        state.accuracy() * 100.0
    );
    events.push(GameEvent::LevelCleared { level: state.level });
}

/// Steer toward the lowest surviving brick and fire on a fixed cadence
fn autopilot(state: &GameState, input: &mut TickInput, dt: f32) {
    let ship_x = state.ship.x;
    let brick_w = state.grid.layout().brick_size.x;

    // Lowest row first, then closest column to the ship
    let target = state
        .grid
        .alive()
        .map(|(row, _, brick)| (row, brick.pos.x + brick_w / 2.0))
        .max_by(|a, b| {
            a.0.cmp(&b.0).then_with(|| {
                (b.1 - ship_x)
                    .abs()
                    .partial_cmp(&(a.1 - ship_x).abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
        })
        .map(|(_, x)| x);

    let Some(target) = target else { return };

    let max_step = IDLE_SHIP_SPEED * dt;
    let delta = (target - ship_x).clamp(-max_step, max_step);
    input.target_x = Some(ship_x + delta);

    let aligned = (target - (ship_x + delta)).abs() < brick_w / 2.0 - 2.0;
    if aligned && state.time_ticks % IDLE_FIRE_INTERVAL == 0 {
        input.fire = true;
    }
}
