//! Spring-mass-damper integration for follow behavior.
//!
//! The integrator is semi-implicit Euler at a fixed nominal step
//! ([`FRAME_DT`]) instead of the measured frame delta: a hitch in the host's
//! frame timing slows the motion down for a frame rather than kicking the
//! spring with a huge step.

use crate::config::SpringConfig;
use crate::float::Float;
use crate::vec::{Scalar, Vec, Vec2};

/// Nominal frame interval in seconds.
pub const FRAME_DT: f32 = 1.0 / 60.0;

/// Advance one spring by `dt` seconds.
///
/// Returns `(new_current, new_velocity)`. Pure; callers guarantee
/// `stiffness`, `damping` and `mass` are positive (see
/// [`SpringConfig::validate`]).
pub fn step<V: Vec>(
    current: V,
    target: V,
    velocity: V,
    stiffness: V::Scalar,
    damping: V::Scalar,
    mass: V::Scalar,
    dt: V::Scalar,
) -> (V, V) {
    let force = (current - target).scale(-stiffness);
    let damping_force = velocity.scale(-damping);
    let acceleration = (force + damping_force).scale(V::Scalar::one() / mass);

    let new_velocity = velocity + acceleration.scale(dt);
    let new_current = current + new_velocity.scale(dt);
    (new_current, new_velocity)
}

/// Informal state of a channel relative to its target.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ChannelState {
    /// Still moving toward the target.
    Settling,
    /// Offset and velocity are both within `rest_delta`.
    AtRest,
}

/// One animated value chasing a target: current, target, velocity.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpringChannel<V: Vec> {
    current: V,
    target: V,
    velocity: V,
}

impl<V: Vec> SpringChannel<V> {
    /// A channel resting at `initial`.
    pub fn new(initial: V) -> Self {
        SpringChannel {
            current: initial,
            target: initial,
            velocity: V::zero(),
        }
    }

    /// Advance by `dt` seconds using `profile`.
    pub fn update(&mut self, profile: &SpringConfig, dt: V::Scalar) {
        let (current, velocity) = step(
            self.current,
            self.target,
            self.velocity,
            V::Scalar::from_f32(profile.stiffness),
            V::Scalar::from_f32(profile.damping),
            V::Scalar::from_f32(profile.mass),
            dt,
        );
        self.current = current;
        self.velocity = velocity;
    }

    pub fn set_target(&mut self, target: V) { self.target = target; }
    pub fn value(&self) -> V { self.current }
    pub fn target(&self) -> V { self.target }
    pub fn velocity(&self) -> V { self.velocity }

    pub fn state(&self, rest_delta: V::Scalar) -> ChannelState {
        let offset = (self.current - self.target).max_abs();
        if offset < rest_delta && self.velocity.max_abs() < rest_delta {
            ChannelState::AtRest
        } else {
            ChannelState::Settling
        }
    }

    pub fn is_at_rest(&self, rest_delta: V::Scalar) -> bool {
        self.state(rest_delta) == ChannelState::AtRest
    }
}

pub type ScalarChannel<F> = SpringChannel<Scalar<F>>;
pub type PlanarChannel<F> = SpringChannel<Vec2<F>>;
