//! Real-time visual effects for page overlays.
//!
//! `neonfx` is the simulation core behind a set of decorative overlay
//! effects: a drifting particle field with pointer repulsion and proximity
//! links, expanding click ripples with a delayed echo, and a spring-driven
//! cursor follower. Everything is host-agnostic: effects draw through the
//! [`Surface`] and [`Marker`] traits and are clocked by a [`FrameScheduler`],
//! so the same code runs in a browser, in a native window, or headless in
//! tests.
//!
//! # Features
//!
//! - **Spring channels**: Semi-implicit Euler spring-damper with rest detection
//! - **Particle field**: Toroidal wrap, pointer repulsion, blinking, link mesh
//! - **Ripples**: Primary plus echo rings, captured per trigger
//! - **Cursor follower**: Position, unwrapped rotation and scale springs
//! - **Frame drivers**: Self-rescheduling loops with at most one pending frame
//! - **Observable**: Count frames or meter frame rate via `FrameObserver`
//! - **`no_std` compatible**: Works in embedded and WASM environments
//!
//! # Example
//!
//! ```
//! use neonfx::{Overlay, ParticleConfig, RecordingMarker, RecordingSurface};
//!
//! let mut overlay: Overlay<f32, RecordingSurface, RecordingMarker> = Overlay::new(800.0, 600.0);
//! overlay
//!     .mount_particles(ParticleConfig::new().with_count(20), Some(RecordingSurface::new(800.0, 600.0)), 7)
//!     .unwrap();
//!
//! let mut now = 0.0;
//! for _ in 0..10 {
//!     now += 16.0;
//!     overlay.frame(now);
//! }
//! assert_eq!(overlay.particles().unwrap().effect().particles().len(), 20);
//! ```

#![no_std]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod color;
pub mod spring;
pub mod particle;
pub mod field;
pub mod ripple;
pub mod cursor;
pub mod surface;
pub mod driver;
pub mod observer;
pub mod compositor;
pub mod config;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::{Vec, Scalar, Vec2};
pub use color::Color;
pub use spring::{ChannelState, SpringChannel, ScalarChannel, PlanarChannel, FRAME_DT};
pub use particle::Particle;
pub use field::{ParticleField, Pointer};
pub use ripple::{RippleEvent, RippleManager};
pub use cursor::{CursorFollower, MarkerTransform};
pub use surface::{DrawCommand, Layer, Marker, Paint, RecordingMarker, RecordingSurface, Surface};
pub use driver::{Effect, FrameDriver, FrameQueue, FrameRequest, FrameScheduler, Millis};
pub use observer::{FrameCounter, FrameObserver, FrameRateMeter, NoOpFrameObserver};
pub use compositor::{LayerId, Overlay};
pub use config::{
    CursorConfig, CursorOptions, ParticleConfig, ParticleOptions, RippleConfig, RippleOptions,
    SpringConfig, SpringOptions,
};
pub use error::EffectError;
