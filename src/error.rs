//! Error types for effect configuration and mounting.

use core::fmt;

/// Errors that can occur while configuring or mounting an effect.
#[derive(Debug, Clone, PartialEq)]
pub enum EffectError {
    /// Spring mass must be positive and finite.
    InvalidMass,
    /// Spring stiffness must be positive and finite.
    InvalidStiffness,
    /// Spring damping must be positive and finite.
    InvalidDamping,
    /// Rest threshold must be positive and finite.
    InvalidRestDelta,
    /// Minimum size is larger than maximum size.
    InvalidSizeRange { min: f32, max: f32 },
    /// Durations and delays must be positive.
    InvalidDuration,
    /// Opacity must be in [0, 1].
    InvalidOpacity,
    /// A probability must be in [0, 1].
    InvalidProbability { field: &'static str },
    /// A field that must not be negative was.
    NegativeValue { field: &'static str },
    /// A numeric field was NaN or infinite.
    NonFinite { field: &'static str },
    /// Color string is not `#rgb` or `#rrggbb`.
    InvalidColor,
    /// The host could not provide a drawing surface or marker for a layer.
    SurfaceUnavailable { layer: &'static str },
}

impl fmt::Display for EffectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EffectError::InvalidMass => write!(f, "spring mass must be positive and finite"),
            EffectError::InvalidStiffness => write!(f, "spring stiffness must be positive and finite"),
            EffectError::InvalidDamping => write!(f, "spring damping must be positive and finite"),
            EffectError::InvalidRestDelta => write!(f, "rest delta must be positive and finite"),
            EffectError::InvalidSizeRange { min, max } => {
                write!(f, "minimum size {} exceeds maximum size {}", min, max)
            }
            EffectError::InvalidDuration => write!(f, "durations must be positive"),
            EffectError::InvalidOpacity => write!(f, "opacity must be in [0, 1]"),
            EffectError::InvalidProbability { field } => write!(f, "{} must be in [0, 1]", field),
            EffectError::NegativeValue { field } => write!(f, "{} must not be negative", field),
            EffectError::NonFinite { field } => write!(f, "{} must be a finite number", field),
            EffectError::InvalidColor => write!(f, "color must be #rgb or #rrggbb"),
            EffectError::SurfaceUnavailable { layer } => {
                write!(f, "no drawing surface available for the {} layer", layer)
            }
        }
    }
}

impl core::error::Error for EffectError {}
