//! Composition root for a page overlay.
//!
//! [`Overlay`] owns one driver per effect plus the shared [`FrameQueue`].
//! Host input lands here and only touches pointer and target state; drawing
//! happens exclusively inside [`Overlay::frame`]. A layer whose surface the
//! host could not provide stays empty and the rest keep running.

use alloc::vec::Vec as AllocVec;

use crate::config::{CursorConfig, CursorOptions, ParticleConfig, ParticleOptions, RippleConfig, RippleOptions};
use crate::cursor::CursorFollower;
use crate::driver::{FrameDriver, FrameQueue, Millis};
use crate::error::EffectError;
use crate::field::ParticleField;
use crate::float::Float;
use crate::observer::{FrameObserver, FrameRateMeter, NoOpFrameObserver};
use crate::ripple::RippleManager;
use crate::surface::{Layer, Marker, Surface};
use crate::vec::Vec2;

/// Which effect a layer belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LayerId {
    Particles,
    Ripples,
    Cursor,
}

impl LayerId {
    pub fn name(self) -> &'static str {
        match self {
            LayerId::Particles => "particles",
            LayerId::Ripples => "ripples",
            LayerId::Cursor => "cursor",
        }
    }
}

pub type ParticleDriver<F, S> = FrameDriver<ParticleField<F>, S>;
pub type RippleDriver<F, S> = FrameDriver<RippleManager<F>, S>;
pub type CursorDriver<F, M> = FrameDriver<CursorFollower<F>, M>;

/// All effects of one page, wired to one frame queue.
pub struct Overlay<F: Float, S: Surface, M: Marker> {
    queue: FrameQueue,
    particles: Option<ParticleDriver<F, S>>,
    ripples: Option<RippleDriver<F, S>>,
    cursor: Option<CursorDriver<F, M>>,
    viewport: (f32, f32),
    meter: FrameRateMeter,
    destroyed: bool,
}

impl<F: Float, S: Surface, M: Marker> Overlay<F, S, M> {
    /// An empty overlay for a `width` x `height` viewport.
    pub fn new(width: f32, height: f32) -> Self {
        Overlay {
            queue: FrameQueue::new(),
            particles: None,
            ripples: None,
            cursor: None,
            viewport: (width, height),
            meter: FrameRateMeter::new(),
            destroyed: false,
        }
    }

    /// Mount the particle field on `surface`, replacing any previous one.
    ///
    /// An invalid config is rejected before anything changes, and the
    /// surface handed over is detached again. A missing surface is logged
    /// and leaves the layer inert.
    pub fn mount_particles(&mut self, config: ParticleConfig, surface: Option<S>, seed: u64) -> Result<(), EffectError> {
        let (width, height) = self.viewport;
        let z_index = config.z_index;
        let active = config.active;
        let field = match ParticleField::new(config, width, height, seed) {
            Ok(field) => field,
            Err(err) => return Err(reject(LayerId::Particles, surface, err)),
        };
        let surface = self.prepare_surface(LayerId::Particles, surface, z_index)?;

        if let Some(mut old) = self.particles.take() {
            old.destroy(&mut self.queue);
        }
        let mut driver = FrameDriver::new(field, surface);
        driver.set_active(active, &mut self.queue);
        self.particles = Some(driver);
        Ok(())
    }

    /// Mount the ripple effect on `surface`, replacing any previous one.
    pub fn mount_ripples(&mut self, config: RippleConfig, surface: Option<S>) -> Result<(), EffectError> {
        let z_index = config.z_index;
        let active = config.active;
        let manager = match RippleManager::new(config) {
            Ok(manager) => manager,
            Err(err) => return Err(reject(LayerId::Ripples, surface, err)),
        };
        let surface = self.prepare_surface(LayerId::Ripples, surface, z_index)?;

        if let Some(mut old) = self.ripples.take() {
            old.destroy(&mut self.queue);
        }
        let mut driver = FrameDriver::new(manager, surface);
        driver.set_active(active, &mut self.queue);
        self.ripples = Some(driver);
        Ok(())
    }

    /// Mount the cursor follower on `marker`, replacing any previous one.
    pub fn mount_cursor(&mut self, config: CursorConfig, marker: Option<M>) -> Result<(), EffectError> {
        let z_index = config.z_index;
        let active = config.active;
        let follower = match CursorFollower::new(config) {
            Ok(follower) => follower,
            Err(err) => return Err(reject(LayerId::Cursor, marker, err)),
        };
        let mut marker = self.require(LayerId::Cursor, marker)?;
        marker.set_z_index(z_index);

        if let Some(mut old) = self.cursor.take() {
            old.destroy(&mut self.queue);
        }
        let mut driver = FrameDriver::new(follower, marker);
        driver.set_active(active, &mut self.queue);
        self.cursor = Some(driver);
        Ok(())
    }

    /// Pointer moved to viewport coordinates `(x, y)`.
    pub fn pointer_move(&mut self, x: f32, y: f32, now: Millis) {
        if let Some(driver) = self.particles.as_mut() {
            driver.effect_mut().set_pointer(Some(Vec2::from_f32(x, y)));
        }
        if let Some(driver) = self.cursor.as_mut() {
            driver.effect_mut().on_pointer_move(F::from_f32(x), F::from_f32(y), now);
        }
    }

    /// Pointer left the page: particles stop being repelled.
    pub fn pointer_leave(&mut self) {
        if let Some(driver) = self.particles.as_mut() {
            driver.effect_mut().set_pointer(None);
        }
    }

    /// Pointer pressed at `(x, y)`.
    pub fn pointer_down(&mut self, x: f32, y: f32, now: Millis) {
        if let Some(driver) = self.ripples.as_mut() {
            driver.effect_mut().trigger(F::from_f32(x), F::from_f32(y), now);
        }
        if let Some(driver) = self.cursor.as_mut() {
            driver.effect_mut().on_trigger(now);
        }
    }

    /// Viewport changed: surfaces follow, and the particle field repopulates.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = (width, height);
        if let Some(driver) = self.particles.as_mut() {
            let (field, surface) = driver.parts_mut();
            surface.resize(width, height);
            field.resize(width, height);
        }
        if let Some(driver) = self.ripples.as_mut() {
            driver.target_mut().resize(width, height);
        }
        log::debug!("overlay resized to {}x{}", width, height);
    }

    /// Run one host frame. Returns how many effect frames ran.
    pub fn frame(&mut self, now: Millis) -> usize {
        self.frame_with(now, &mut NoOpFrameObserver)
    }

    /// [`frame`](Self::frame), reporting every effect step to `observer`.
    pub fn frame_with<O: FrameObserver + ?Sized>(&mut self, now: Millis, observer: &mut O) -> usize {
        let particles = &mut self.particles;
        let ripples = &mut self.ripples;
        let cursor = &mut self.cursor;
        let mut ran = 0;
        self.queue.pump(|queue, request| {
            let handled = particles.as_mut().is_some_and(|d| d.frame(request, now, queue, observer))
                || ripples.as_mut().is_some_and(|d| d.frame(request, now, queue, observer))
                || cursor.as_mut().is_some_and(|d| d.frame(request, now, queue, observer));
            if handled {
                ran += 1;
            } else {
                log::trace!("frame request {:?} has no live owner", request);
            }
        });
        if ran > 0 {
            self.meter.on_frame_complete(now);
        }
        ran
    }

    pub fn set_particles_active(&mut self, active: bool) {
        if let Some(driver) = self.particles.as_mut() {
            driver.set_active(active, &mut self.queue);
        }
    }

    pub fn set_ripples_active(&mut self, active: bool) {
        if let Some(driver) = self.ripples.as_mut() {
            driver.set_active(active, &mut self.queue);
        }
    }

    pub fn set_cursor_active(&mut self, active: bool) {
        if let Some(driver) = self.cursor.as_mut() {
            driver.set_active(active, &mut self.queue);
        }
    }

    /// Reconfigure the particle field. The population restarts.
    pub fn update_particle_options(&mut self, options: &ParticleOptions) -> Result<(), EffectError> {
        let Some(driver) = self.particles.as_mut() else {
            return Ok(());
        };
        driver.effect_mut().update_options(options).inspect_err(|err| {
            log::warn!("particle options rejected: {}", err);
        })?;
        if let Some(z_index) = options.z_index {
            driver.target_mut().set_z_index(z_index);
        }
        if let Some(active) = options.active {
            driver.set_active(active, &mut self.queue);
        }
        Ok(())
    }

    /// Reconfigure ripples. Ripples already on screen keep their settings.
    pub fn update_ripple_options(&mut self, options: &RippleOptions) -> Result<(), EffectError> {
        let Some(driver) = self.ripples.as_mut() else {
            return Ok(());
        };
        driver.effect_mut().update_options(options).inspect_err(|err| {
            log::warn!("ripple options rejected: {}", err);
        })?;
        if let Some(z_index) = options.z_index {
            driver.target_mut().set_z_index(z_index);
        }
        if let Some(active) = options.active {
            driver.set_active(active, &mut self.queue);
        }
        Ok(())
    }

    /// Reconfigure the cursor springs. The marker keeps its motion.
    pub fn update_cursor_options(&mut self, options: &CursorOptions) -> Result<(), EffectError> {
        let Some(driver) = self.cursor.as_mut() else {
            return Ok(());
        };
        driver.effect_mut().update_options(options).inspect_err(|err| {
            log::warn!("cursor options rejected: {}", err);
        })?;
        if let Some(z_index) = options.z_index {
            driver.target_mut().set_z_index(z_index);
        }
        if let Some(active) = options.active {
            driver.set_active(active, &mut self.queue);
        }
        Ok(())
    }

    /// Mounted layers, bottom to top.
    pub fn layers(&self) -> AllocVec<(LayerId, i32)> {
        let mut layers = AllocVec::with_capacity(3);
        if let Some(driver) = self.particles.as_ref().filter(|d| !d.is_destroyed()) {
            layers.push((LayerId::Particles, driver.effect().config().z_index));
        }
        if let Some(driver) = self.ripples.as_ref().filter(|d| !d.is_destroyed()) {
            layers.push((LayerId::Ripples, driver.effect().config().z_index));
        }
        if let Some(driver) = self.cursor.as_ref().filter(|d| !d.is_destroyed()) {
            layers.push((LayerId::Cursor, driver.effect().config().z_index));
        }
        layers.sort_by_key(|&(_, z_index)| z_index);
        layers
    }

    /// Stop every loop, drop timers and detach every layer. Idempotent.
    pub fn destroy(&mut self) {
        if self.destroyed {
            log::debug!("overlay destroyed twice; ignored");
            return;
        }
        if let Some(driver) = self.particles.as_mut() {
            driver.destroy(&mut self.queue);
        }
        if let Some(driver) = self.ripples.as_mut() {
            driver.destroy(&mut self.queue);
        }
        if let Some(driver) = self.cursor.as_mut() {
            driver.destroy(&mut self.queue);
        }
        self.destroyed = true;
    }

    pub fn particles(&self) -> Option<&ParticleDriver<F, S>> { self.particles.as_ref() }
    pub fn ripples(&self) -> Option<&RippleDriver<F, S>> { self.ripples.as_ref() }
    pub fn cursor(&self) -> Option<&CursorDriver<F, M>> { self.cursor.as_ref() }
    pub fn queue(&self) -> &FrameQueue { &self.queue }
    pub fn telemetry(&self) -> &FrameRateMeter { &self.meter }
    pub fn viewport(&self) -> (f32, f32) { self.viewport }
    pub fn is_destroyed(&self) -> bool { self.destroyed }

    fn prepare_surface(&self, layer: LayerId, surface: Option<S>, z_index: i32) -> Result<S, EffectError> {
        let mut surface = self.require(layer, surface)?;
        let (width, height) = self.viewport;
        surface.resize(width, height);
        surface.set_z_index(z_index);
        Ok(surface)
    }

    fn require<L: Layer>(&self, layer: LayerId, target: Option<L>) -> Result<L, EffectError> {
        let err = EffectError::SurfaceUnavailable { layer: layer.name() };
        if self.destroyed {
            log::debug!("mounting {} on a destroyed overlay ignored", layer.name());
            if let Some(mut target) = target {
                target.detach();
            }
            return Err(err);
        }
        target.ok_or_else(|| {
            log::error!("{}", err);
            err
        })
    }
}

/// A config was rejected at mount: log it and hand the target back to the
/// host detached.
fn reject<L: Layer>(layer: LayerId, target: Option<L>, err: EffectError) -> EffectError {
    log::warn!("{} config rejected: {}", layer.name(), err);
    if let Some(mut target) = target {
        target.detach();
    }
    err
}
