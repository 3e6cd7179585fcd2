//! Spring-driven cursor follower.
//!
//! The marker chases the pointer through independent spring channels:
//! position (x and y), rotation and scale, each on its own profile. Pointer
//! input only moves targets; [`CursorFollower::tick`] moves the values.
//!
//! Rotation follows the pointer's heading. Headings are unwrapped into a
//! running total instead of being folded into `[-180, 180]`, so a pointer
//! circling continuously spins the marker continuously.
//!
//! The short-lived scale changes (squash while moving, pop on press) are
//! deadlines kept inside the follower and checked on each tick. Tearing the
//! follower down clears them, so nothing can fire afterwards.

use crate::config::{CursorConfig, CursorOptions};
use crate::driver::{Effect, Millis};
use crate::error::EffectError;
use crate::float::Float;
use crate::spring::{ChannelState, PlanarChannel, ScalarChannel, SpringChannel, FRAME_DT};
use crate::surface::Marker;
use crate::vec::{Scalar, Vec, Vec2};

/// Pointer speed, in units per millisecond, above which movement counts.
pub const MOVE_SPEED_THRESHOLD: f32 = 0.1;
/// Scale target while the pointer is moving.
pub const MOVING_SCALE: f32 = 0.95;
/// Scale target right after a press.
pub const PRESSED_SCALE: f32 = 1.3;
/// Quiet time after the last move before the scale relaxes.
pub const MOVE_SETTLE_MS: Millis = 150.0;
/// How long a press holds the enlarged scale.
pub const PRESS_HOLD_MS: Millis = 200.0;
/// How long the marker reports itself as pressed.
pub const PRESS_FLASH_MS: Millis = 300.0;

/// The composed marker transform for one frame.
///
/// Applied as: translate by `(x, y)`, rotate by `rotation` degrees, scale.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MarkerTransform {
    pub x: f32,
    pub y: f32,
    /// Degrees, unwrapped (may exceed 360).
    pub rotation: f32,
    pub scale: f32,
    pub moving: bool,
    pub pressed: bool,
}

pub struct CursorFollower<F: Float> {
    config: CursorConfig,
    position: PlanarChannel<F>,
    rotation: ScalarChannel<F>,
    scale: ScalarChannel<F>,
    last_pointer: Vec2<F>,
    last_move_at: Option<Millis>,
    pointer_velocity: Vec2<F>,
    previous_heading: F,
    accumulated_rotation: F,
    moving: bool,
    settle_at: Option<Millis>,
    release_at: Option<Millis>,
    flash_until: Option<Millis>,
}

impl<F: Float> CursorFollower<F> {
    /// A follower resting at the origin with unit scale.
    pub fn new(config: CursorConfig) -> Result<Self, EffectError> {
        config.validate()?;
        Ok(CursorFollower {
            config,
            position: SpringChannel::new(Vec2::zero()),
            rotation: SpringChannel::new(Scalar(F::zero())),
            scale: SpringChannel::new(Scalar(F::one())),
            last_pointer: Vec2::zero(),
            last_move_at: None,
            pointer_velocity: Vec2::zero(),
            previous_heading: F::zero(),
            accumulated_rotation: F::zero(),
            moving: false,
            settle_at: None,
            release_at: None,
            flash_until: None,
        })
    }

    /// Pointer moved to `(x, y)` at `now`.
    pub fn on_pointer_move(&mut self, x: F, y: F, now: Millis) {
        let pointer = Vec2::new(x, y);
        if let Some(last) = self.last_move_at {
            let elapsed = now - last;
            if elapsed > 0.0 {
                self.pointer_velocity = (pointer - self.last_pointer).scale(F::one() / F::from_f64(elapsed));
            }
        }
        self.last_move_at = Some(now);
        self.last_pointer = pointer;
        self.position.set_target(pointer);

        if self.pointer_velocity.length() > F::from_f32(MOVE_SPEED_THRESHOLD) {
            let heading = self.pointer_velocity.angle().to_degrees() + F::from_f32(90.0);
            self.accumulated_rotation = self.accumulated_rotation + unwrap_degrees(heading - self.previous_heading);
            self.previous_heading = heading;
            self.rotation.set_target(Scalar(self.accumulated_rotation));

            self.scale.set_target(Scalar(F::from_f32(MOVING_SCALE)));
            self.moving = true;
            self.settle_at = Some(now + MOVE_SETTLE_MS);
        }
    }

    /// Pointer pressed at `now`: pop the marker briefly.
    pub fn on_trigger(&mut self, now: Millis) {
        self.scale.set_target(Scalar(F::from_f32(PRESSED_SCALE)));
        self.release_at = Some(now + PRESS_HOLD_MS);
        self.flash_until = Some(now + PRESS_FLASH_MS);
    }

    /// Fire due deadlines, then step every channel one nominal frame.
    pub fn tick(&mut self, now: Millis) {
        if self.settle_at.is_some_and(|due| due <= now) {
            self.settle_at = None;
            self.moving = false;
            self.scale.set_target(Scalar(F::one()));
        }
        if self.release_at.is_some_and(|due| due <= now) {
            self.release_at = None;
            self.scale.set_target(Scalar(F::one()));
        }
        if self.flash_until.is_some_and(|due| due <= now) {
            self.flash_until = None;
        }

        let dt = F::from_f32(FRAME_DT);
        self.position.update(&self.config.position_profile(), dt);
        self.rotation.update(&self.config.rotation_profile(), dt);
        self.scale.update(&self.config.scale_profile(), dt);
    }

    /// Current marker transform.
    pub fn transform(&self) -> MarkerTransform {
        let position = self.position.value();
        MarkerTransform {
            x: position.x.to_f32(),
            y: position.y.to_f32(),
            rotation: self.rotation.value().0.to_f32(),
            scale: self.scale.value().0.to_f32(),
            moving: self.moving,
            pressed: self.is_pressed(),
        }
    }

    /// Swap spring profiles. Channel values and velocities carry over.
    pub fn update_options(&mut self, options: &CursorOptions) -> Result<(), EffectError> {
        self.config = self.config.merged(options)?;
        Ok(())
    }

    pub fn position_state(&self) -> ChannelState {
        self.position.state(self.rest_delta())
    }

    pub fn rotation_state(&self) -> ChannelState {
        self.rotation.state(self.rest_delta())
    }

    pub fn scale_state(&self) -> ChannelState {
        self.scale.state(self.rest_delta())
    }

    /// Every channel at rest.
    pub fn is_at_rest(&self) -> bool {
        self.position_state() == ChannelState::AtRest
            && self.rotation_state() == ChannelState::AtRest
            && self.scale_state() == ChannelState::AtRest
    }

    pub fn position(&self) -> &PlanarChannel<F> { &self.position }
    pub fn rotation(&self) -> &ScalarChannel<F> { &self.rotation }
    pub fn scale(&self) -> &ScalarChannel<F> { &self.scale }
    pub fn is_moving(&self) -> bool { self.moving }
    pub fn is_pressed(&self) -> bool { self.flash_until.is_some() }
    pub fn config(&self) -> &CursorConfig { &self.config }

    fn rest_delta(&self) -> F {
        F::from_f32(self.config.spring_config.rest_delta)
    }
}

/// Fold a heading difference into `[-180, 180]`.
fn unwrap_degrees<F: Float>(mut diff: F) -> F {
    let half_turn = F::from_f32(180.0);
    let full_turn = F::from_f32(360.0);
    if diff > half_turn {
        diff = diff - full_turn;
    }
    if diff < -half_turn {
        diff = diff + full_turn;
    }
    diff
}

impl<F: Float, M: Marker + ?Sized> Effect<M> for CursorFollower<F> {
    fn update(&mut self, now: Millis) {
        self.tick(now);
    }

    fn render(&self, target: &mut M) {
        target.apply(&self.transform());
    }

    fn teardown(&mut self) {
        self.settle_at = None;
        self.release_at = None;
        self.flash_until = None;
        self.moving = false;
    }
}
