//! A single floating particle of the field.

use crate::color::Color;
use crate::float::Float;
use crate::vec::Vec2;

/// A drifting particle. Velocity is in units per frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle<F: Float> {
    pub pos: Vec2<F>,
    pub velocity: Vec2<F>,
    /// Disc radius.
    pub size: F,
    pub opacity: F,
    pub color: Color,
    pub blinking: bool,
    /// Angular rate of the blink in radians per millisecond.
    pub blink_rate: F,
}

impl<F: Float> Particle<F> {
    pub fn new(pos: Vec2<F>, velocity: Vec2<F>, size: F, opacity: F, color: Color) -> Self {
        Particle {
            pos,
            velocity,
            size,
            opacity,
            color,
            blinking: false,
            blink_rate: F::zero(),
        }
    }

    pub fn with_blink(mut self, rate: F) -> Self {
        self.blinking = true;
        self.blink_rate = rate;
        self
    }

    /// Drift one frame, then wrap into `[0, width) x [0, height)`.
    pub fn advance(&mut self, width: F, height: F) {
        self.pos = self.pos + self.velocity;
        self.wrap(width, height);
    }

    /// Toroidal wrap: leaving one edge re-enters at the opposite one.
    pub fn wrap(&mut self, width: F, height: F) {
        self.pos.x = self.pos.x.rem_euclid(width);
        self.pos.y = self.pos.y.rem_euclid(height);
    }

    /// Opacity for a blinking particle at `now_ms`:
    /// `0.5 + amplitude * sin(now * rate)`, clamped to `[0.1, 1.0]`.
    pub fn blink(&mut self, now_ms: F, amplitude: F) {
        if !self.blinking {
            return;
        }
        let wave = (now_ms * self.blink_rate).sin();
        self.opacity = (F::half() + amplitude * wave).clamp(F::from_f32(0.1), F::one());
    }
}
