//! Floating particle field with pointer repulsion and proximity links.
//!
//! Every frame each particle drifts by its velocity, wraps toroidally at
//! the surface edges, gets pushed out of the pointer's interaction radius,
//! and (for blinking particles) has its opacity modulated. Rendering draws
//! the discs and then a link between every pair closer than the link
//! distance. The link pass is `O(n^2)`, which is fine for the tens of
//! particles a page overlay carries; a field of thousands would want a
//! spatial grid here.

use alloc::vec::Vec as AllocVec;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::config::{ParticleConfig, ParticleOptions};
use crate::driver::{Effect, Millis};
use crate::error::EffectError;
use crate::float::Float;
use crate::particle::Particle;
use crate::surface::{Paint, Surface};
use crate::vec::{Vec, Vec2};

/// Pointer as seen by the field: a position, or unset when the pointer left
/// the page.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pointer<F: Float> {
    pub position: Option<Vec2<F>>,
    pub radius: F,
}

/// The particle population and the rules that move it.
pub struct ParticleField<F: Float> {
    config: ParticleConfig,
    particles: AllocVec<Particle<F>>,
    width: F,
    height: F,
    pointer: Pointer<F>,
    rng: Pcg32,
    epoch: Option<Millis>,
}

impl<F: Float> ParticleField<F> {
    /// Validate `config` and populate a `width` x `height` area.
    pub fn new(config: ParticleConfig, width: f32, height: f32, seed: u64) -> Result<Self, EffectError> {
        config.validate()?;
        let mut field = ParticleField {
            pointer: Pointer { position: None, radius: F::from_f32(config.interaction_radius) },
            config,
            particles: AllocVec::new(),
            width: F::from_f32(width),
            height: F::from_f32(height),
            rng: Pcg32::seed_from_u64(seed),
            epoch: None,
        };
        field.populate();
        Ok(field)
    }

    /// Replace the configuration and rebuild the whole population.
    pub fn initialize(&mut self, config: ParticleConfig) -> Result<(), EffectError> {
        config.validate()?;
        self.pointer.radius = F::from_f32(config.interaction_radius);
        if !config.mouse_interactive {
            self.pointer.position = None;
        }
        self.config = config;
        self.populate();
        Ok(())
    }

    /// Merge a partial update and rebuild. The population always restarts;
    /// a rejected update leaves the field untouched.
    pub fn update_options(&mut self, options: &ParticleOptions) -> Result<(), EffectError> {
        let next = self.config.merged(options)?;
        self.initialize(next)
    }

    /// New surface dimensions: reallocate rather than rescale, so no
    /// particle is left outside the new bounds.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = F::from_f32(width);
        self.height = F::from_f32(height);
        self.populate();
    }

    /// Move the pointer, or unset it to disable repulsion.
    pub fn set_pointer(&mut self, position: Option<Vec2<F>>) {
        if self.config.mouse_interactive {
            self.pointer.position = position;
        }
    }

    /// Advance every particle one frame.
    pub fn tick(&mut self, now: Millis) {
        let elapsed = now - *self.epoch.get_or_insert(now);
        let clock = F::from_f64(elapsed);
        let amplitude = F::from_f32(self.config.blink_amplitude);
        let (width, height) = (self.width, self.height);
        let pointer = self.pointer;

        for p in self.particles.iter_mut() {
            p.advance(width, height);
            if let Some(origin) = pointer.position {
                if repel(p, origin, pointer.radius) {
                    p.wrap(width, height);
                }
            }
            p.blink(clock, amplitude);
        }
    }

    /// Draw discs, then proximity links, into `surface`.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.clear();

        for p in &self.particles {
            let size = p.size.to_f32();
            let paint = Paint::fill(p.color, p.opacity.to_f32()).with_glow(size * 2.0);
            surface.fill_disc(to_surface(p.pos), size, &paint);
        }

        let link = F::from_f32(self.config.link_distance);
        let fade = link * F::from_f32(5.0);
        let tenth = F::from_f32(0.1);
        for (i, a) in self.particles.iter().enumerate() {
            for b in &self.particles[i + 1..] {
                let distance = a.pos.distance(b.pos);
                if distance < link {
                    let alpha = (link - distance) / fade * a.opacity;
                    let width = (a.size + b.size) * tenth;
                    let paint = Paint::stroke(a.color, alpha.to_f32(), width.to_f32());
                    surface.draw_line(to_surface(a.pos), to_surface(b.pos), &paint);
                }
            }
        }
    }

    pub fn particles(&self) -> &[Particle<F>] { &self.particles }
    pub fn particles_mut(&mut self) -> &mut [Particle<F>] { &mut self.particles }
    pub fn config(&self) -> &ParticleConfig { &self.config }
    pub fn pointer(&self) -> &Pointer<F> { &self.pointer }
    pub fn bounds(&self) -> (F, F) { (self.width, self.height) }

    fn populate(&mut self) {
        self.particles.clear();
        self.epoch = None;
        let (width, height) = (self.width, self.height);
        if !(width.is_finite() && height.is_finite() && width > F::zero() && height > F::zero()) {
            log::debug!("particle field has no area; population deferred until resize");
            return;
        }

        let config = &self.config;
        let min_size = F::from_f32(config.min_size);
        let size_span = F::from_f32(config.max_size - config.min_size);
        let speed = F::from_f32(config.speed);
        let base_opacity = F::from_f32(config.opacity);
        let blink_probability = f64::from(config.blink_probability);

        self.particles.reserve(config.count);
        for _ in 0..config.count {
            let mut unit = || F::from_f32(self.rng.random::<f32>());
            let size = unit() * size_span + min_size;
            let pos = Vec2::new(unit() * width, unit() * height);
            let velocity = Vec2::new(
                unit() * speed * F::two() - speed,
                unit() * speed * F::two() - speed,
            );
            let opacity = unit() * F::half() + base_opacity;
            let blink_rate = unit() * F::from_f32(0.02) + F::from_f32(0.01);

            let mut particle = Particle::new(pos, velocity, size, opacity, config.color);
            particle.wrap(width, height);
            if self.rng.random_bool(blink_probability) {
                particle = particle.with_blink(blink_rate);
            }
            self.particles.push(particle);
        }
        log::debug!("particle field populated: {} particles", self.particles.len());
    }
}

/// Push `p` straight away from `origin`, by `(radius - d) / radius` units.
/// Returns whether the particle was inside the radius.
fn repel<F: Float>(p: &mut Particle<F>, origin: Vec2<F>, radius: F) -> bool {
    let offset = p.pos - origin;
    let distance = offset.length();
    if !(distance < radius) {
        return false;
    }
    let force = (radius - distance) / radius;
    let direction = if distance > F::zero() {
        offset.scale(F::one() / distance)
    } else {
        Vec2::new(F::one(), F::zero())
    };
    p.pos = p.pos + direction.scale(force);
    true
}

fn to_surface<F: Float>(v: Vec2<F>) -> Vec2<f32> {
    Vec2::new(v.x.to_f32(), v.y.to_f32())
}

impl<F: Float, S: Surface + ?Sized> Effect<S> for ParticleField<F> {
    fn update(&mut self, now: Millis) {
        self.tick(now);
    }

    fn render(&self, target: &mut S) {
        Self::render(self, target);
    }
}
