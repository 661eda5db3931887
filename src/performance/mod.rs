//! # Frame Timing
//!
//! A small frame counter behind the FPS readout in the lighting panel.
//! The viewer redraws continuously, so counting redraws over a one second
//! window is enough to report a stable rate without touching GPU timestamps.
//!
//! ## Usage
//!
//! ```rust
//! use cairn::performance::FrameTimer;
//!
//! let mut timer = FrameTimer::new();
//!
//! // In your render loop
//! timer.frame();
//! println!("FPS: {}", timer.fps());
//! ```

use std::time::{Duration, Instant};

/// Reporting window for the FPS counter.
const REPORT_INTERVAL: Duration = Duration::from_secs(1);

/// Counts redraws and publishes a rounded frames-per-second figure once
/// per second.
///
/// The published value stays at zero until the first full window has
/// elapsed, then holds the most recent measurement between updates.
#[derive(Debug)]
pub struct FrameTimer {
    /// Frames counted since the window started.
    frames: u32,
    /// Start of the current measurement window.
    window_start: Instant,
    /// Most recently published frames-per-second value.
    fps: usize,
}

impl FrameTimer {
    /// Create a timer whose first window starts now.
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    fn starting_at(window_start: Instant) -> Self {
        Self {
            frames: 0,
            window_start,
            fps: 0,
        }
    }

    /// Record one rendered frame.
    ///
    /// Call this once per redraw. When at least a second has passed since
    /// the window opened, the published rate updates and the window resets.
    pub fn frame(&mut self) {
        self.tick(Instant::now());
    }

    fn tick(&mut self, now: Instant) {
        self.frames += 1;
        let elapsed = now.duration_since(self.window_start);
        if elapsed >= REPORT_INTERVAL {
            self.fps = (self.frames as f32 / elapsed.as_secs_f32()).round() as usize;
            self.frames = 0;
            self.window_start = now;
        }
    }

    /// Most recently published frames-per-second value.
    pub fn fps(&self) -> usize {
        self.fps
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}
