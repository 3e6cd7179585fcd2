//! Self-rescheduling frame loops.
//!
//! Each effect runs under its own [`FrameDriver`]: one host frame callback
//! runs `update` then `render`, then asks the [`FrameScheduler`] for the
//! next frame. The driver holds at most one pending request, which is what
//! keeps `set_active(true)` idempotent and makes stale callbacks harmless.

use alloc::vec::Vec as AllocVec;
use core::mem;

use crate::observer::FrameObserver;
use crate::surface::Layer;

/// Host timestamps, in milliseconds on a monotonic clock.
pub type Millis = f64;

/// Handle of one "call me before the next frame" request.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameRequest(pub u64);

/// The host's per-frame timing service.
pub trait FrameScheduler {
    /// Ask for one callback before the next frame.
    fn request_frame(&mut self) -> FrameRequest;

    /// Withdraw a request. Cancelling an unknown or already-fired request
    /// does nothing.
    fn cancel_frame(&mut self, request: FrameRequest);
}

/// A simulation that can be stepped and drawn into a target of type `T`.
pub trait Effect<T: ?Sized> {
    /// Advance the simulation to `now`.
    fn update(&mut self, now: Millis);

    /// Draw the current state. Must not mutate simulation state.
    fn render(&self, target: &mut T);

    /// The loop was switched on or off.
    fn on_active(&mut self, _active: bool) {}

    /// Drop transient state (pending timers, in-flight events) for good.
    fn teardown(&mut self) {}
}

/// Owns an effect, its render target, and its place in the frame loop.
pub struct FrameDriver<E, T> {
    effect: E,
    target: T,
    active: bool,
    pending: Option<FrameRequest>,
    destroyed: bool,
}

impl<E: Effect<T>, T: Layer> FrameDriver<E, T> {
    /// A stopped driver. Call [`set_active`](Self::set_active) to start it.
    pub fn new(effect: E, target: T) -> Self {
        FrameDriver {
            effect,
            target,
            active: false,
            pending: None,
            destroyed: false,
        }
    }

    /// Start or stop the loop.
    ///
    /// Starting requests exactly one frame unless one is already pending;
    /// stopping cancels the pending request. State is never discarded.
    pub fn set_active<S: FrameScheduler + ?Sized>(&mut self, active: bool, scheduler: &mut S) {
        if self.destroyed {
            log::debug!("set_active({}) on a destroyed effect ignored", active);
            return;
        }
        if active {
            if self.pending.is_none() {
                self.pending = Some(scheduler.request_frame());
            }
        } else if let Some(request) = self.pending.take() {
            scheduler.cancel_frame(request);
        }
        if self.active != active {
            self.active = active;
            self.effect.on_active(active);
            log::debug!("frame loop {}", if active { "started" } else { "stopped" });
        }
    }

    /// Host callback for `request`.
    ///
    /// Runs one update/render step and schedules the next frame. Returns
    /// `false` without doing anything when `request` is not the driver's
    /// pending request (cancelled, stale, or addressed to another driver).
    pub fn frame<S, O>(
        &mut self,
        request: FrameRequest,
        now: Millis,
        scheduler: &mut S,
        observer: &mut O,
    ) -> bool
    where
        S: FrameScheduler + ?Sized,
        O: FrameObserver + ?Sized,
    {
        if self.destroyed || !self.active || self.pending != Some(request) {
            return false;
        }
        self.pending = None;

        self.effect.update(now);
        observer.on_update();
        self.effect.render(&mut self.target);
        observer.on_render();
        observer.on_frame_complete(now);

        self.pending = Some(scheduler.request_frame());
        true
    }

    /// Stop the loop, drop transient effect state and detach the target.
    /// Idempotent.
    pub fn destroy<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if self.destroyed {
            log::debug!("destroy called twice; ignored");
            return;
        }
        if let Some(request) = self.pending.take() {
            scheduler.cancel_frame(request);
        }
        self.active = false;
        self.effect.teardown();
        self.target.detach();
        self.destroyed = true;
        log::debug!("effect destroyed");
    }

    pub fn is_active(&self) -> bool { self.active }
    pub fn is_destroyed(&self) -> bool { self.destroyed }
    pub fn pending(&self) -> Option<FrameRequest> { self.pending }
    pub fn effect(&self) -> &E { &self.effect }
    pub fn effect_mut(&mut self) -> &mut E { &mut self.effect }
    pub fn target(&self) -> &T { &self.target }
    pub fn target_mut(&mut self) -> &mut T { &mut self.target }

    /// Mutable access to both halves at once.
    pub fn parts_mut(&mut self) -> (&mut E, &mut T) {
        (&mut self.effect, &mut self.target)
    }
}

/// A scheduler that only queues requests; whoever owns it pumps the queue
/// once per frame.
///
/// In a browser the pump sits behind a single `requestAnimationFrame`
/// callback. In tests it is a fixed-timestep harness: pump with `now`
/// advanced by whatever step the test wants.
#[derive(Clone, Debug, Default)]
pub struct FrameQueue {
    next_id: u64,
    pending: AllocVec<FrameRequest>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests that will fire on the next pump, oldest first.
    pub fn pending(&self) -> &[FrameRequest] {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Take every request due this frame. Requests made while handling them
    /// land in the queue for the next frame.
    pub fn take_pending(&mut self) -> AllocVec<FrameRequest> {
        mem::take(&mut self.pending)
    }

    /// Fire one frame: hand each due request to `dispatch`. Returns how many
    /// requests fired.
    pub fn pump<D>(&mut self, mut dispatch: D) -> usize
    where
        D: FnMut(&mut Self, FrameRequest),
    {
        let due = self.take_pending();
        for request in &due {
            dispatch(self, *request);
        }
        due.len()
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self) -> FrameRequest {
        let request = FrameRequest(self.next_id);
        self.next_id += 1;
        self.pending.push(request);
        request
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        self.pending.retain(|r| *r != request);
    }
}
