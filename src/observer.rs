//! Frame observer trait for monitoring effect loops.

use crate::driver::Millis;

/// Trait for observing the frames an effect loop runs.
///
/// Implement this to count, profile or debug frame loops. All methods have
/// default no-op implementations.
pub trait FrameObserver {
    /// Called after the effect advanced its state.
    fn on_update(&mut self) {}

    /// Called after the effect drew into its target.
    fn on_render(&mut self) {}

    /// Called when a frame is fully complete, with the frame timestamp.
    fn on_frame_complete(&mut self, _now: Millis) {}
}

/// A no-op observer. Use as default when no observation is needed.
pub struct NoOpFrameObserver;

impl FrameObserver for NoOpFrameObserver {}

/// Counts update and render calls.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameCounter {
    pub updates: usize,
    pub renders: usize,
    pub frames: usize,
}

impl FrameObserver for FrameCounter {
    fn on_update(&mut self) {
        self.updates += 1;
    }

    fn on_render(&mut self) {
        self.renders += 1;
    }

    fn on_frame_complete(&mut self, _now: Millis) {
        self.frames += 1;
    }
}

/// Instantaneous frame rate and frame time, republished at a fixed interval
/// so a telemetry readout does not flicker every frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameRateMeter {
    refresh_interval: Millis,
    last_frame: Option<Millis>,
    last_refresh: Millis,
    frame_rate: f64,
    frame_time: Millis,
}

impl FrameRateMeter {
    /// Meter that republishes every 500 ms.
    pub fn new() -> Self {
        Self::with_refresh_interval(500.0)
    }

    pub fn with_refresh_interval(refresh_interval: Millis) -> Self {
        FrameRateMeter {
            refresh_interval,
            last_frame: None,
            last_refresh: 0.0,
            frame_rate: 0.0,
            frame_time: 0.0,
        }
    }

    /// Frames per second as of the last refresh.
    pub fn frame_rate(&self) -> f64 {
        self.frame_rate
    }

    /// Duration of the frame sampled at the last refresh.
    pub fn frame_time(&self) -> Millis {
        self.frame_time
    }
}

impl Default for FrameRateMeter {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameObserver for FrameRateMeter {
    fn on_frame_complete(&mut self, now: Millis) {
        let Some(last) = self.last_frame.replace(now) else {
            return;
        };
        let delta = now - last;
        if delta <= 0.0 {
            return;
        }
        if now - self.last_refresh > self.refresh_interval {
            self.frame_rate = 1000.0 / delta;
            self.frame_time = delta;
            self.last_refresh = now;
        }
    }
}
