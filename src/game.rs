//! Frame driver
//!
//! Glues the fixed-step simulation to whatever renderer and sound sink the
//! platform provides. The browser entry point and the native headless session
//! both drive the game through [`Game::frame`].

use crate::audio::{SoundEffect, SoundSink};
use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::platform::{FrameClock, InputState};
use crate::renderer::{RenderError, Renderer};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, tick};

/// Game instance holding all state
pub struct Game<R: Renderer, S: SoundSink> {
    state: GameState,
    settings: Settings,
    renderer: R,
    sound: S,
    input: InputState,
    clock: FrameClock,
    accumulator: f32,
}

impl<R: Renderer, S: SoundSink> Game<R, S> {
    /// New game on a `width` x `height` field (CSS pixels)
    pub fn new(
        seed: u64,
        width: f32,
        height: f32,
        settings: Settings,
        renderer: R,
        mut sound: S,
    ) -> Self {
        sound.set_muted(settings.muted);
        log::info!("Game initialized with seed: {}", seed);
        Self {
            state: GameState::new(seed, width, height),
            settings,
            renderer,
            sound,
            input: InputState::new(),
            clock: FrameClock::new(),
            accumulator: 0.0,
        }
    }

    /// Run one animation frame at `timestamp_ms`.
    ///
    /// Returns the simulation events produced this frame.
    pub fn frame(&mut self, timestamp_ms: f64) -> Vec<GameEvent> {
        let dt = self.clock.tick(timestamp_ms);
        let events = self.update(dt);

        for event in &events {
            self.sound.play(SoundEffect::for_event(event));
        }

        self.render();
        events
    }

    /// Run simulation ticks for `dt` seconds of wall time
    fn update(&mut self, dt: f32) -> Vec<GameEvent> {
        self.accumulator += dt;
        let max_particles = self.settings.max_particles();
        let mut events = Vec::new();

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = self.input.take_tick_input();
            events.extend(tick(&mut self.state, &input, SIM_DT, max_particles));
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        // Drop time we couldn't catch up on
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }

        events
    }

    fn render(&mut self) {
        match self.renderer.render(&self.state, &self.settings) {
            Ok(()) => {}
            Err(RenderError::SurfaceLost) => {
                let (w, h) = self.renderer.size();
                log::debug!("Surface lost, reconfiguring at {}x{}", w, h);
                self.renderer.resize(w, h);
            }
            Err(RenderError::OutOfMemory) => log::error!("Out of memory!"),
            Err(e) => log::warn!("Render error: {}", e),
        }
    }

    /// Playfield resized to `width` x `height` CSS pixels, drawn at
    /// `pixel_width` x `pixel_height` device pixels
    pub fn resize(&mut self, width: f32, height: f32, pixel_width: u32, pixel_height: u32) {
        self.state.resize(width, height);
        self.renderer.resize(pixel_width, pixel_height);
    }

    /// Reset game state for restart (settings and idle mode carry over)
    pub fn restart(&mut self, seed: u64) {
        let field = self.state.field;
        let idle = self.input.idle_mode();
        self.state = GameState::new(seed, field.x, field.y);
        self.accumulator = 0.0;
        self.clock.reset();
        self.input = InputState::new();
        if idle {
            self.input.toggle_idle();
        }
        log::info!("Game restarted with seed: {}", seed);
    }

    /// Request a pause unless already paused (tab hidden, window blur)
    pub fn auto_pause(&mut self) -> bool {
        if self.state.phase == GamePhase::Playing {
            self.input.toggle_pause();
            true
        } else {
            false
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn sound_mut(&mut self) -> &mut S {
        &mut self.sound
    }

    pub fn fps(&self) -> u32 {
        self.clock.fps()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SilentSink;
    use crate::renderer::HeadlessRenderer;

    #[derive(Default)]
    struct RecordingSink {
        played: Vec<SoundEffect>,
        muted: Option<bool>,
    }

    impl SoundSink for RecordingSink {
        fn play(&mut self, effect: SoundEffect) {
            self.played.push(effect);
        }

        fn set_muted(&mut self, muted: bool) {
            self.muted = Some(muted);
        }
    }

    fn game() -> Game<HeadlessRenderer, RecordingSink> {
        Game::new(
            7,
            480.0,
            320.0,
            Settings::default(),
            HeadlessRenderer::new(480, 320),
            RecordingSink::default(),
        )
    }

    const FRAME_MS: f64 = 17.0;

    #[test]
    fn test_frame_renders_once() {
        let mut g = game();
        g.frame(0.0);
        g.frame(FRAME_MS);
        assert_eq!(g.renderer().frames, 2);
        assert!(g.renderer().last_vertex_count > 0);
        assert_eq!(g.state().time_ticks, 2);
    }

    #[test]
    fn test_substeps_capped() {
        let mut g = game();
        g.frame(0.0);
        let before = g.state().time_ticks;
        // Long stall: dt clamps to 0.1s, at most MAX_SUBSTEPS ticks run
        g.frame(10_000.0);
        assert_eq!(g.state().time_ticks - before, MAX_SUBSTEPS as u64);
        assert_eq!(g.renderer().frames, 2);
    }

    #[test]
    fn test_fire_plays_sound_once() {
        let mut g = game();
        g.frame(0.0);
        g.input_mut().fire();
        // Several substeps this frame; the click must only fire once
        let events = g.frame(4.0 * FRAME_MS);
        let fired = events
            .iter()
            .filter(|e| matches!(e, GameEvent::ProjectileFired))
            .count();
        assert_eq!(fired, 1);
        assert_eq!(g.state().projectiles.len(), 1);
        assert_eq!(g.sound.played, vec![SoundEffect::LaserFire]);
    }

    #[test]
    fn test_surface_lost_triggers_resize() {
        let mut g = game();
        g.renderer_mut()
            .pending_errors
            .push(RenderError::SurfaceLost);
        g.frame(0.0);
        assert_eq!(g.renderer().resizes, 1);
        assert_eq!(g.renderer().size, (480, 320));
        assert_eq!(g.renderer().frames, 0);

        g.frame(FRAME_MS);
        assert_eq!(g.renderer().frames, 1);
    }

    #[test]
    fn test_other_render_errors_skip_frame() {
        let mut g = game();
        g.renderer_mut()
            .pending_errors
            .push(RenderError::Surface("timeout".into()));
        g.frame(0.0);
        assert_eq!(g.renderer().resizes, 0);
        assert_eq!(g.renderer().frames, 0);
    }

    #[test]
    fn test_resize() {
        let mut g = game();
        g.resize(800.0, 600.0, 1600, 1200);
        assert_eq!(g.state().field.x, 800.0);
        assert_eq!(g.renderer().size, (1600, 1200));
    }

    #[test]
    fn test_auto_pause_and_resume() {
        let mut g = game();
        assert!(g.auto_pause());
        g.frame(0.0);
        assert_eq!(g.state().phase, GamePhase::Paused);
        // Already paused: no toggle back
        assert!(!g.auto_pause());
        g.frame(FRAME_MS);
        assert_eq!(g.state().phase, GamePhase::Paused);

        g.input_mut().toggle_pause();
        g.frame(2.0 * FRAME_MS);
        assert_eq!(g.state().phase, GamePhase::Playing);
    }

    #[test]
    fn test_restart_keeps_field_and_idle() {
        let mut g = game();
        g.input_mut().toggle_idle();
        g.input_mut().fire();
        g.frame(0.0);
        g.restart(99);
        assert_eq!(g.state().seed, 99);
        assert_eq!(g.state().score, 0);
        assert!(g.state().projectiles.is_empty());
        assert_eq!(g.state().field.x, 480.0);
        assert!(g.input_mut().idle_mode());
    }

    #[test]
    fn test_muted_setting_reaches_sink() {
        let settings = Settings {
            muted: true,
            ..Settings::default()
        };
        let g = Game::new(
            1,
            480.0,
            320.0,
            settings,
            HeadlessRenderer::new(480, 320),
            RecordingSink::default(),
        );
        assert_eq!(g.sound.muted, Some(true));
    }

    #[test]
    fn test_idle_session_scores() {
        let mut g = Game::new(
            3,
            480.0,
            320.0,
            Settings::default(),
            HeadlessRenderer::new(480, 320),
            SilentSink,
        );
        g.input_mut().toggle_idle();
        for i in 0..1800 {
            g.frame(i as f64 * FRAME_MS);
        }
        assert!(g.state().score > 0);
        assert_eq!(g.renderer().last_score, g.state().score);
    }
}
