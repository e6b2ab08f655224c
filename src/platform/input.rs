//! Input buffering between browser events and simulation ticks
//!
//! Event handlers run whenever the browser fires them; ticks run from the
//! animation frame. `InputState` sits in between: handlers record what they
//! saw, and each tick takes a [`TickInput`] snapshot.

use crate::sim::TickInput;

/// What a key press means to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Fire,
    Pause,
    ToggleIdle,
}

/// Map a `KeyboardEvent.key` value to an action
pub fn key_action(key: &str) -> Option<KeyAction> {
    match key {
        " " | "Enter" => Some(KeyAction::Fire),
        "Escape" | "p" | "P" => Some(KeyAction::Pause),
        "i" | "I" => Some(KeyAction::ToggleIdle),
        _ => None,
    }
}

/// Pending input for the next tick
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pending: TickInput,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer moved to `x` (field pixels)
    pub fn pointer_moved(&mut self, x: f32) {
        self.pending.target_x = Some(x);
    }

    pub fn fire(&mut self) {
        self.pending.fire = true;
    }

    pub fn toggle_pause(&mut self) {
        self.pending.pause = true;
    }

    pub fn toggle_idle(&mut self) -> bool {
        self.pending.idle_mode = !self.pending.idle_mode;
        self.pending.idle_mode
    }

    pub fn idle_mode(&self) -> bool {
        self.pending.idle_mode
    }

    /// Apply a key press; returns true if the key was recognized
    pub fn key_pressed(&mut self, key: &str) -> bool {
        match key_action(key) {
            Some(KeyAction::Fire) => self.fire(),
            Some(KeyAction::Pause) => self.toggle_pause(),
            Some(KeyAction::ToggleIdle) => {
                let on = self.toggle_idle();
                log::info!("Idle mode: {}", on);
            }
            None => return false,
        }
        true
    }

    /// Snapshot for one tick. One-shot requests (fire, pause) are cleared so a
    /// single click never fires twice when a frame runs several substeps.
    pub fn take_tick_input(&mut self) -> TickInput {
        let input = self.pending.clone();
        self.pending.fire = false;
        self.pending.pause = false;
        input
    }
}
