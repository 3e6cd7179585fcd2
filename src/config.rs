//! Configuration records for each effect.
//!
//! Every config is a plain value with documented defaults, a builder, and a
//! `validate()` check. Runtime reconfiguration goes through a partial
//! `*Options` record: `merged()` shallow-merges it over the current config
//! and returns a new, validated value, so a bad update never reaches the
//! simulation.
//!
//! All configs (de)serialize with camelCase keys and `#[serde(default)]`, so
//! a host can hand over JSON such as `{"count": 40, "color": "#ff0040"}`.
//! Unknown keys are ignored.
//!
//! # Builder Pattern
//! ```
//! use neonfx::config::RippleConfig;
//!
//! let config = RippleConfig::new()
//!     .with_duration(1500.0)
//!     .with_size(250.0)
//!     .with_z_index(2);
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::EffectError;

fn finite(field: &'static str, value: f32) -> Result<f32, EffectError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EffectError::NonFinite { field })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<f32, EffectError> {
    if finite(field, value)? < 0.0 {
        Err(EffectError::NegativeValue { field })
    } else {
        Ok(value)
    }
}

fn unit_interval(field: &'static str, value: f32) -> Result<f32, EffectError> {
    if (0.0..=1.0).contains(&finite(field, value)?) {
        Ok(value)
    } else if field == "opacity" {
        Err(EffectError::InvalidOpacity)
    } else {
        Err(EffectError::InvalidProbability { field })
    }
}

// --------------------------------------------------------------------------
// Springs
// --------------------------------------------------------------------------

/// Parameters of one spring-mass-damper profile.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpringConfig {
    /// Hooke constant pulling toward the target. Default: 400.
    pub stiffness: f32,
    /// Velocity damping coefficient. Default: 45.
    pub damping: f32,
    /// Moving mass. Default: 1.
    pub mass: f32,
    /// A channel is at rest once both offset and velocity are under this.
    /// Default: 0.001.
    pub rest_delta: f32,
}

impl SpringConfig {
    pub fn new() -> Self {
        SpringConfig {
            stiffness: 400.0,
            damping: 45.0,
            mass: 1.0,
            rest_delta: 0.001,
        }
    }

    pub fn with_stiffness(mut self, stiffness: f32) -> Self {
        self.stiffness = stiffness;
        self
    }

    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_rest_delta(mut self, rest_delta: f32) -> Self {
        self.rest_delta = rest_delta;
        self
    }

    /// Reject profiles that would feed NaN or infinity into the integrator.
    pub fn validate(&self) -> Result<(), EffectError> {
        if !(self.stiffness.is_finite() && self.stiffness > 0.0) {
            return Err(EffectError::InvalidStiffness);
        }
        if !(self.damping.is_finite() && self.damping > 0.0) {
            return Err(EffectError::InvalidDamping);
        }
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(EffectError::InvalidMass);
        }
        if !(self.rest_delta.is_finite() && self.rest_delta > 0.0) {
            return Err(EffectError::InvalidRestDelta);
        }
        Ok(())
    }

    /// Field-wise merge of a partial spring record.
    pub fn merged(&self, options: &SpringOptions) -> Result<Self, EffectError> {
        let next = SpringConfig {
            stiffness: options.stiffness.unwrap_or(self.stiffness),
            damping: options.damping.unwrap_or(self.damping),
            mass: options.mass.unwrap_or(self.mass),
            rest_delta: options.rest_delta.unwrap_or(self.rest_delta),
        };
        next.validate()?;
        Ok(next)
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Partial update for a [`SpringConfig`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpringOptions {
    pub stiffness: Option<f32>,
    pub damping: Option<f32>,
    pub mass: Option<f32>,
    pub rest_delta: Option<f32>,
}

// --------------------------------------------------------------------------
// Particle field
// --------------------------------------------------------------------------

/// Configuration of the floating particle field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParticleConfig {
    /// Number of particles. Default: 50.
    pub count: usize,
    pub color: Color,
    /// Smallest disc radius. Default: 1.
    pub min_size: f32,
    /// Largest disc radius. Default: 4.
    pub max_size: f32,
    /// Velocity components are drawn from `[-speed, speed]` units per frame.
    /// Default: 1.
    pub speed: f32,
    /// Base opacity; each particle adds `random(0, 0.5)`. Default: 0.6.
    pub opacity: f32,
    /// Stacking order of the layer. Default: -1.
    pub z_index: i32,
    /// Whether the frame loop runs. Default: true.
    pub active: bool,
    /// Whether the pointer pushes particles away. Default: true.
    pub mouse_interactive: bool,
    /// Repulsion reach around the pointer. Default: 100.
    pub interaction_radius: f32,
    /// Pairs closer than this get a proximity link. Default: 100.
    pub link_distance: f32,
    /// Chance that a particle blinks. Default: 0.2.
    pub blink_probability: f32,
    /// Swing of the blink around 0.5. Default: 0.5.
    pub blink_amplitude: f32,
}

impl ParticleConfig {
    pub fn new() -> Self {
        ParticleConfig {
            count: 50,
            color: Color::NEON,
            min_size: 1.0,
            max_size: 4.0,
            speed: 1.0,
            opacity: 0.6,
            z_index: -1,
            active: true,
            mouse_interactive: true,
            interaction_radius: 100.0,
            link_distance: 100.0,
            blink_probability: 0.2,
            blink_amplitude: 0.5,
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_size_range(mut self, min_size: f32, max_size: f32) -> Self {
        self.min_size = min_size;
        self.max_size = max_size;
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn with_mouse_interactive(mut self, mouse_interactive: bool) -> Self {
        self.mouse_interactive = mouse_interactive;
        self
    }

    pub fn with_interaction_radius(mut self, radius: f32) -> Self {
        self.interaction_radius = radius;
        self
    }

    pub fn with_link_distance(mut self, distance: f32) -> Self {
        self.link_distance = distance;
        self
    }

    pub fn with_blink_probability(mut self, probability: f32) -> Self {
        self.blink_probability = probability;
        self
    }

    pub fn validate(&self) -> Result<(), EffectError> {
        non_negative("minSize", self.min_size)?;
        non_negative("maxSize", self.max_size)?;
        if self.min_size > self.max_size {
            return Err(EffectError::InvalidSizeRange { min: self.min_size, max: self.max_size });
        }
        non_negative("speed", self.speed)?;
        unit_interval("opacity", self.opacity)?;
        non_negative("interactionRadius", self.interaction_radius)?;
        non_negative("linkDistance", self.link_distance)?;
        unit_interval("blinkProbability", self.blink_probability)?;
        non_negative("blinkAmplitude", self.blink_amplitude)?;
        Ok(())
    }

    pub fn merged(&self, options: &ParticleOptions) -> Result<Self, EffectError> {
        let next = ParticleConfig {
            count: options.count.unwrap_or(self.count),
            color: options.color.unwrap_or(self.color),
            min_size: options.min_size.unwrap_or(self.min_size),
            max_size: options.max_size.unwrap_or(self.max_size),
            speed: options.speed.unwrap_or(self.speed),
            opacity: options.opacity.unwrap_or(self.opacity),
            z_index: options.z_index.unwrap_or(self.z_index),
            active: options.active.unwrap_or(self.active),
            mouse_interactive: options.mouse_interactive.unwrap_or(self.mouse_interactive),
            interaction_radius: options.interaction_radius.unwrap_or(self.interaction_radius),
            link_distance: options.link_distance.unwrap_or(self.link_distance),
            blink_probability: options.blink_probability.unwrap_or(self.blink_probability),
            blink_amplitude: options.blink_amplitude.unwrap_or(self.blink_amplitude),
        };
        next.validate()?;
        Ok(next)
    }
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Partial update for a [`ParticleConfig`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParticleOptions {
    pub count: Option<usize>,
    pub color: Option<Color>,
    pub min_size: Option<f32>,
    pub max_size: Option<f32>,
    pub speed: Option<f32>,
    pub opacity: Option<f32>,
    pub z_index: Option<i32>,
    pub active: Option<bool>,
    pub mouse_interactive: Option<bool>,
    pub interaction_radius: Option<f32>,
    pub link_distance: Option<f32>,
    pub blink_probability: Option<f32>,
    pub blink_amplitude: Option<f32>,
}

// --------------------------------------------------------------------------
// Ripples
// --------------------------------------------------------------------------

/// Configuration of the click ripple effect.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RippleConfig {
    pub color: Color,
    /// Lifetime of one ripple in milliseconds. Default: 1000.
    pub duration: f32,
    /// Radius reached at the end of the lifetime. Default: 300.
    pub size: f32,
    /// Starting opacity of the primary ripple. Default: 0.5.
    pub opacity: f32,
    /// Stroke width of the primary ripple. Default: 2.
    pub line_width: f32,
    /// Stacking order of the layer. Default: 1.
    pub z_index: i32,
    /// Whether triggers are accepted and the loop runs. Default: true.
    pub active: bool,
    /// Delay of the companion ripple in milliseconds. Default: 100.
    pub echo_delay: f32,
}

impl RippleConfig {
    pub fn new() -> Self {
        RippleConfig {
            color: Color::NEON,
            duration: 1000.0,
            size: 300.0,
            opacity: 0.5,
            line_width: 2.0,
            z_index: 1,
            active: true,
            echo_delay: 100.0,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_duration(mut self, duration_ms: f32) -> Self {
        self.duration = duration_ms;
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_line_width(mut self, line_width: f32) -> Self {
        self.line_width = line_width;
        self
    }

    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn validate(&self) -> Result<(), EffectError> {
        if !(finite("duration", self.duration)? > 0.0) {
            return Err(EffectError::InvalidDuration);
        }
        non_negative("size", self.size)?;
        unit_interval("opacity", self.opacity)?;
        non_negative("lineWidth", self.line_width)?;
        non_negative("echoDelay", self.echo_delay)?;
        Ok(())
    }

    pub fn merged(&self, options: &RippleOptions) -> Result<Self, EffectError> {
        let next = RippleConfig {
            color: options.color.unwrap_or(self.color),
            duration: options.duration.unwrap_or(self.duration),
            size: options.size.unwrap_or(self.size),
            opacity: options.opacity.unwrap_or(self.opacity),
            line_width: options.line_width.unwrap_or(self.line_width),
            z_index: options.z_index.unwrap_or(self.z_index),
            active: options.active.unwrap_or(self.active),
            echo_delay: options.echo_delay.unwrap_or(self.echo_delay),
        };
        next.validate()?;
        Ok(next)
    }
}

impl Default for RippleConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Partial update for a [`RippleConfig`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RippleOptions {
    pub color: Option<Color>,
    pub duration: Option<f32>,
    pub size: Option<f32>,
    pub opacity: Option<f32>,
    pub line_width: Option<f32>,
    pub z_index: Option<i32>,
    pub active: Option<bool>,
    pub echo_delay: Option<f32>,
}

// --------------------------------------------------------------------------
// Cursor follower
// --------------------------------------------------------------------------

/// Configuration of the spring-driven cursor marker.
///
/// Position channels use `spring_config` as is. Rotation and scale reuse its
/// mass and rest delta but swap in their own stiffness and damping.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CursorConfig {
    pub spring_config: SpringConfig,
    /// Default: 300.
    pub rotation_stiffness: f32,
    /// Default: 60.
    pub rotation_damping: f32,
    /// Default: 500.
    pub scale_stiffness: f32,
    /// Default: 35.
    pub scale_damping: f32,
    /// Stacking order of the marker. Default: 10000.
    pub z_index: i32,
    pub active: bool,
}

impl CursorConfig {
    pub fn new() -> Self {
        CursorConfig {
            spring_config: SpringConfig::new(),
            rotation_stiffness: 300.0,
            rotation_damping: 60.0,
            scale_stiffness: 500.0,
            scale_damping: 35.0,
            z_index: 10_000,
            active: true,
        }
    }

    pub fn with_spring_config(mut self, spring_config: SpringConfig) -> Self {
        self.spring_config = spring_config;
        self
    }

    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Profile of the x and y channels.
    pub fn position_profile(&self) -> SpringConfig {
        self.spring_config
    }

    /// Slower, heavier-damped profile for heading changes.
    pub fn rotation_profile(&self) -> SpringConfig {
        self.spring_config
            .with_stiffness(self.rotation_stiffness)
            .with_damping(self.rotation_damping)
    }

    /// Snappier profile for the press and movement squash.
    pub fn scale_profile(&self) -> SpringConfig {
        self.spring_config
            .with_stiffness(self.scale_stiffness)
            .with_damping(self.scale_damping)
    }

    pub fn validate(&self) -> Result<(), EffectError> {
        self.position_profile().validate()?;
        self.rotation_profile().validate()?;
        self.scale_profile().validate()
    }

    pub fn merged(&self, options: &CursorOptions) -> Result<Self, EffectError> {
        let spring_config = match &options.spring_config {
            Some(spring) => self.spring_config.merged(spring)?,
            None => self.spring_config,
        };
        let next = CursorConfig {
            spring_config,
            rotation_stiffness: options.rotation_stiffness.unwrap_or(self.rotation_stiffness),
            rotation_damping: options.rotation_damping.unwrap_or(self.rotation_damping),
            scale_stiffness: options.scale_stiffness.unwrap_or(self.scale_stiffness),
            scale_damping: options.scale_damping.unwrap_or(self.scale_damping),
            z_index: options.z_index.unwrap_or(self.z_index),
            active: options.active.unwrap_or(self.active),
        };
        next.validate()?;
        Ok(next)
    }
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Partial update for a [`CursorConfig`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CursorOptions {
    pub spring_config: Option<SpringOptions>,
    pub rotation_stiffness: Option<f32>,
    pub rotation_damping: Option<f32>,
    pub scale_stiffness: Option<f32>,
    pub scale_damping: Option<f32>,
    pub z_index: Option<i32>,
    pub active: Option<bool>,
}
