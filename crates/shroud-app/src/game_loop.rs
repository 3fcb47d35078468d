//! Fixed-timestep clock separating simulation ticks from render frames.
//!
//! The filter evaluates once per simulation tick but is queried on every
//! render frame, so the host needs both cadences. Frame times are fed in
//! explicitly, which keeps the headless host deterministic.

use tracing::warn;

/// Fixed simulation timestep: 50 Hz (20 ms per tick).
pub const FIXED_DT: f64 = 1.0 / 50.0;

/// Maximum frame time clamp to prevent spiral of death.
pub const MAX_FRAME_TIME: f64 = 0.25;

/// What one frame should do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSteps {
    /// Simulation ticks to run before rendering.
    pub ticks: u32,
    /// Interpolation alpha in `[0.0, 1.0)` for the render.
    pub alpha: f64,
}

/// Accumulator-based fixed-timestep clock.
#[derive(Debug, Default)]
pub struct GameLoop {
    accumulator: f64,
    frame_count: u64,
    update_count: u64,
}

impl GameLoop {
    /// Creates a clock with an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for `frame_time` seconds and report how many ticks are due.
    pub fn advance(&mut self, frame_time: f64) -> FrameSteps {
        let frame_time = if frame_time > MAX_FRAME_TIME {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                frame_time * 1000.0,
                MAX_FRAME_TIME * 1000.0
            );
            MAX_FRAME_TIME
        } else {
            frame_time.max(0.0)
        };

        self.accumulator += frame_time;

        let mut ticks = 0;
        while self.accumulator >= FIXED_DT {
            self.accumulator -= FIXED_DT;
            ticks += 1;
        }
        self.update_count += u64::from(ticks);
        self.frame_count += 1;

        FrameSteps {
            ticks,
            alpha: self.alpha(),
        }
    }

    /// Returns the current interpolation alpha.
    pub fn alpha(&self) -> f64 {
        if self.accumulator > 0.0 {
            self.accumulator / FIXED_DT
        } else {
            0.0
        }
    }

    /// Returns the total number of frames rendered.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Returns the total number of simulation ticks executed.
    pub fn update_count(&self) -> u64 {
        self.update_count
    }
}
