//! Expanding click ripples.
//!
//! A trigger emits a primary ripple immediately and a fainter, thinner echo
//! a short delay later at the same origin. Each ripple ages independently:
//! its radius grows linearly to the configured size and its opacity fades
//! linearly to zero over the duration, after which it is dropped.

use alloc::vec::Vec as AllocVec;

use crate::color::Color;
use crate::config::{RippleConfig, RippleOptions};
use crate::driver::{Effect, Millis};
use crate::error::EffectError;
use crate::float::Float;
use crate::surface::{Paint, Surface};
use crate::vec::Vec2;

/// Opacity of the echo relative to the primary ripple.
pub const ECHO_OPACITY: f32 = 0.8;
/// Line width of the echo relative to the primary ripple.
pub const ECHO_LINE_WIDTH: f32 = 0.5;
/// Radius of the inner ring relative to the outer one.
pub const INNER_RING: f32 = 0.7;
/// Glow radius of every ring.
pub const RING_GLOW: f32 = 10.0;

/// One expanding ring. Captures its parameters at trigger time, so later
/// option updates leave it alone.
#[derive(Clone, Debug, PartialEq)]
pub struct RippleEvent<F: Float> {
    pub origin: Vec2<F>,
    pub radius: F,
    pub opacity: F,
    pub base_opacity: F,
    pub max_size: F,
    pub line_width: F,
    pub color: Color,
    pub start: Millis,
    pub duration: Millis,
}

impl<F: Float> RippleEvent<F> {
    /// Fraction of the lifetime elapsed at `now`, never negative.
    pub fn progress(&self, now: Millis) -> f64 {
        ((now - self.start) / self.duration).max(0.0)
    }

    fn age_to(&mut self, progress: f64) {
        let progress = F::from_f64(progress);
        self.radius = progress * self.max_size;
        self.opacity = self.base_opacity * (F::one() - progress);
    }
}

#[derive(Clone, Debug)]
struct PendingEcho<F: Float> {
    due: Millis,
    event: RippleEvent<F>,
}

/// Owns the live ripples and the echoes waiting to start.
pub struct RippleManager<F: Float> {
    config: RippleConfig,
    events: AllocVec<RippleEvent<F>>,
    pending: AllocVec<PendingEcho<F>>,
    accepting: bool,
}

impl<F: Float> RippleManager<F> {
    pub fn new(config: RippleConfig) -> Result<Self, EffectError> {
        config.validate()?;
        Ok(RippleManager {
            accepting: config.active,
            config,
            events: AllocVec::new(),
            pending: AllocVec::new(),
        })
    }

    /// Start a ripple pair at `(x, y)`. Ignored entirely while inactive;
    /// returns whether the trigger was accepted.
    pub fn trigger(&mut self, x: F, y: F, now: Millis) -> bool {
        if !self.accepting {
            log::trace!("ripple trigger ignored while inactive");
            return false;
        }
        let primary = self.spawn(Vec2::new(x, y), now, F::one(), F::one());
        let echo_start = now + f64::from(self.config.echo_delay);
        let echo = self.spawn(
            Vec2::new(x, y),
            echo_start,
            F::from_f32(ECHO_OPACITY),
            F::from_f32(ECHO_LINE_WIDTH),
        );
        self.events.push(primary);
        self.pending.push(PendingEcho { due: echo_start, event: echo });
        true
    }

    /// Start due echoes, then age every ripple and drop the finished ones.
    /// Events stay ordered by start time, oldest first.
    pub fn tick(&mut self, now: Millis) {
        let events = &mut self.events;
        self.pending.retain(|echo| {
            if echo.due <= now {
                // Keep draw order by start time even when frames were skipped.
                let at = events.partition_point(|e| e.start <= echo.event.start);
                events.insert(at, echo.event.clone());
                false
            } else {
                true
            }
        });

        let mut survivors = AllocVec::with_capacity(self.events.len());
        for mut event in self.events.drain(..) {
            let progress = event.progress(now);
            if progress >= 1.0 {
                continue;
            }
            event.age_to(progress);
            survivors.push(event);
        }
        self.events = survivors;
    }

    /// Two concentric glowing rings per ripple, oldest ripple first.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.clear();
        for event in &self.events {
            let center = Vec2::new(event.origin.x.to_f32(), event.origin.y.to_f32());
            let radius = event.radius.to_f32();
            let paint = Paint::stroke(event.color, event.opacity.to_f32(), event.line_width.to_f32())
                .with_glow(RING_GLOW);
            surface.stroke_circle(center, radius, &paint);
            surface.stroke_circle(center, radius * INNER_RING, &paint);
        }
    }

    /// Merge a partial update. Only ripples triggered afterwards see it.
    pub fn update_options(&mut self, options: &RippleOptions) -> Result<(), EffectError> {
        self.config = self.config.merged(options)?;
        Ok(())
    }

    /// Accept or ignore triggers. Going inactive also drops echoes that have
    /// not started yet, so nothing fires late.
    pub fn set_accepting(&mut self, accepting: bool) {
        self.accepting = accepting;
        self.config.active = accepting;
        if !accepting {
            self.pending.clear();
        }
    }

    pub fn is_accepting(&self) -> bool { self.accepting }
    pub fn events(&self) -> &[RippleEvent<F>] { &self.events }
    pub fn pending_echoes(&self) -> usize { self.pending.len() }
    pub fn config(&self) -> &RippleConfig { &self.config }

    fn spawn(&self, origin: Vec2<F>, start: Millis, opacity: F, line_width: F) -> RippleEvent<F> {
        let base_opacity = F::from_f32(self.config.opacity) * opacity;
        RippleEvent {
            origin,
            radius: F::zero(),
            opacity: base_opacity,
            base_opacity,
            max_size: F::from_f32(self.config.size),
            line_width: F::from_f32(self.config.line_width) * line_width,
            color: self.config.color,
            start,
            duration: f64::from(self.config.duration),
        }
    }
}

impl<F: Float, S: Surface + ?Sized> Effect<S> for RippleManager<F> {
    fn update(&mut self, now: Millis) {
        self.tick(now);
    }

    fn render(&self, target: &mut S) {
        Self::render(self, target);
    }

    fn on_active(&mut self, active: bool) {
        self.set_accepting(active);
    }

    fn teardown(&mut self) {
        self.accepting = false;
        self.events.clear();
        self.pending.clear();
    }
}
