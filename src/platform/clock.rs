//! Frame timing from animation-frame timestamps

use crate::consts::{MAX_FRAME_DT, SIM_DT};

/// Frames averaged for the FPS readout
const FPS_WINDOW: usize = 60;

/// Turns `requestAnimationFrame` timestamps into frame deltas and tracks FPS
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_time: Option<f64>,
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    frames_seen: usize,
    fps: u32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_time: None,
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            frames_seen: 0,
            fps: 0,
        }
    }

    /// Record a frame at `time_ms` and return its delta in seconds.
    ///
    /// The first frame counts as one simulation step. Deltas are clamped to
    /// `[0, MAX_FRAME_DT]` so a backgrounded tab doesn't fast-forward the game.
    pub fn tick(&mut self, time_ms: f64) -> f32 {
        let dt = match self.last_time {
            Some(last) => (((time_ms - last) / 1000.0) as f32).clamp(0.0, MAX_FRAME_DT),
            None => SIM_DT,
        };
        self.last_time = Some(time_ms);

        // FPS over the last FPS_WINDOW frames
        let oldest = self.frame_times[self.frame_index];
        self.frame_times[self.frame_index] = time_ms;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;
        self.frames_seen += 1;
        if self.frames_seen > FPS_WINDOW {
            let elapsed = time_ms - oldest;
            if elapsed > 0.0 {
                self.fps = (FPS_WINDOW as f64 * 1000.0 / elapsed).round() as u32;
            }
        }

        dt
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Forget the previous timestamp (after a pause or restart)
    pub fn reset(&mut self) {
        self.last_time = None;
    }
}
