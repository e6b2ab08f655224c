//! Scene assembly: game state -> triangle list
//!
//! Draw order is background, ship, projectiles, bricks, particles. Output is in
//! field coordinates (origin top-left, y down); the pipeline maps it to NDC.

use glam::Vec2;

use super::shapes::{circle, circle_segments, rect};
use super::vertex::{Vertex, colors};
use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{GameState, Rect};

/// Segments used for the ship circle
const SHIP_SEGMENTS: u32 = 24;

/// Build every vertex for one frame
pub fn build_scene(state: &GameState, settings: &Settings) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(
        6 + SHIP_SEGMENTS as usize * 3
            + (state.projectiles.len() + state.grid.len()) * 6
            + state.particles.len() * 18,
    );

    // Background
    vertices.extend(rect(
        &Rect::new(Vec2::ZERO, state.field),
        colors::BACKGROUND,
    ));

    // Ship
    vertices.extend(circle(
        state.ship.center(state.field),
        state.ship.radius,
        colors::SHIP,
        SHIP_SEGMENTS,
    ));

    // Projectiles
    let bolt = Vec2::new(PROJECTILE_WIDTH, PROJECTILE_HEIGHT);
    for projectile in &state.projectiles {
        vertices.extend(rect(&Rect::new(projectile.pos, bolt), colors::PROJECTILE));
    }

    // Bricks
    for (_, _, brick) in state.grid.alive() {
        vertices.extend(rect(&state.grid.rect(brick), colors::BRICK));
    }

    // Particles
    if settings.particles {
        for particle in &state.particles {
            vertices.extend(circle(
                particle.pos,
                particle.radius,
                particle.color,
                circle_segments(particle.radius),
            ));
        }
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Projectile;

    #[test]
    fn test_fresh_scene_counts() {
        let state = GameState::new(1, 480.0, 320.0);
        let verts = build_scene(&state, &Settings::default());
        let expected = 6 + SHIP_SEGMENTS as usize * 3 + BRICK_ROWS * BRICK_COLS * 6;
        assert_eq!(verts.len(), expected);
        // Background first
        assert_eq!(verts[0].color, colors::BACKGROUND);
    }

    #[test]
    fn test_dead_bricks_not_drawn() {
        let mut state = GameState::new(1, 480.0, 320.0);
        let before = build_scene(&state, &Settings::default()).len();
        state.grid.destroy(0, 0);
        let after = build_scene(&state, &Settings::default()).len();
        assert_eq!(before - after, 6);
    }

    #[test]
    fn test_projectiles_drawn_red() {
        let mut state = GameState::new(1, 480.0, 320.0);
        state.projectiles.push(Projectile::new(Vec2::new(100.0, 200.0)));
        let verts = build_scene(&state, &Settings::default());
        let red: Vec<_> = verts
            .iter()
            .filter(|v| v.color == colors::PROJECTILE)
            .collect();
        assert_eq!(red.len(), 6);
        assert!(red.iter().any(|v| v.position == [102.0, 210.0]));
    }

    #[test]
    fn test_particles_hidden_when_disabled() {
        let mut state = GameState::new(1, 480.0, 320.0);
        crate::sim::spawn_burst(
            &mut state.particles,
            &mut rand_pcg::Pcg32::new(1, 1),
            Vec2::new(50.0, 50.0),
            5,
            64,
        );
        let on = build_scene(&state, &Settings::default());
        let settings = Settings {
            particles: false,
            ..Default::default()
        };
        let off = build_scene(&state, &settings);
        assert!(on.len() > off.len());
        assert!(off.iter().all(|v| v.color != colors::PARTICLE));
    }
}
