//! Full-viewport falling-drop overlay gated by the mode flag.
//!
//! Two states. Inactive: no particles, no frame loop, surface hidden.
//! Active: particles allocated, one tick per display refresh. Everything
//! acquired on activation (frame request, resize observer, particle field)
//! is owned by `ActiveOverlay` and released together on deactivation, on
//! unmount, or when the last overlay handle is dropped.
//!
//! ```ignore
//! let overlay = ParticleOverlay::new(Some(surface), scheduler, viewport, OverlayConfig::default());
//! let _mount = overlay.mount(&use_mode());
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::api::types::{FrameHandle, ViewportSize};
use crate::assets::config::OverlayConfig;
use crate::components::particle::Particle;
use crate::core::frames::FrameScheduler;
use crate::core::mode::{ModeStore, Subscription};
use crate::core::viewport::{ResizeGuard, Viewport};
use crate::renderer::traits::Surface;
use crate::systems::effects::{ParticleField, Rng};

/// Resources held only while Active.
struct ActiveOverlay {
    session: u64,
    field: ParticleField,
    frame: Option<FrameHandle>,
    _resize: ResizeGuard,
}

struct OverlayState<S: Surface> {
    surface: Option<S>,
    scheduler: Rc<dyn FrameScheduler>,
    viewport: Rc<dyn Viewport>,
    config: OverlayConfig,
    rng: Rng,
    active: Option<ActiveOverlay>,
    sessions: u64,
    ticks: u64,
}

impl<S: Surface> OverlayState<S> {
    /// One frame: clear, draw, advance. Returns false if `session` is stale.
    fn tick(&mut self, session: u64) -> bool {
        let (Some(surface), Some(active)) = (self.surface.as_mut(), self.active.as_mut()) else {
            return false;
        };
        if active.session != session {
            return false;
        }
        surface.clear();
        active.field.draw(surface);
        let bounds = surface.size();
        active.field.advance(bounds, &mut self.rng);
        self.ticks += 1;
        true
    }

    fn apply_resize(&mut self, size: ViewportSize) {
        if self.active.is_none() {
            return;
        }
        if let Some(surface) = self.surface.as_mut() {
            log::debug!("overlay: resize to {}x{}", size.width, size.height);
            surface.resize(size);
        }
    }

    /// Tear down the Active state. Returns false if already Inactive.
    fn release(&mut self) -> bool {
        let Some(active) = self.active.take() else {
            return false;
        };
        if let Some(handle) = active.frame {
            self.scheduler.cancel_frame(handle);
        }
        let released = active.field.len();
        drop(active);

        if let Some(surface) = self.surface.as_mut() {
            surface.clear();
            surface.set_visible(false);
        }
        log::info!("overlay: deactivated, released {} particles", released);
        true
    }
}

impl<S: Surface> Drop for OverlayState<S> {
    fn drop(&mut self) {
        self.release();
    }
}

/// Shared handle to the overlay. Clones refer to the same overlay.
pub struct ParticleOverlay<S: Surface + 'static> {
    inner: Rc<RefCell<OverlayState<S>>>,
}

impl<S: Surface + 'static> Clone for ParticleOverlay<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S: Surface + 'static> ParticleOverlay<S> {
    /// `surface` is `None` when the host could not provide a 2D drawing
    /// context; the overlay then stays a permanent no-op.
    pub fn new(
        surface: Option<S>,
        scheduler: Rc<dyn FrameScheduler>,
        viewport: Rc<dyn Viewport>,
        config: OverlayConfig,
    ) -> Self {
        let mut surface = surface;
        if let Some(surface) = surface.as_mut() {
            surface.set_visible(false);
        }
        let rng = Rng::new(config.effective_seed());
        Self {
            inner: Rc::new(RefCell::new(OverlayState {
                surface,
                scheduler,
                viewport,
                config,
                rng,
                active: None,
                sessions: 0,
                ticks: 0,
            })),
        }
    }

    pub fn is_active(&self) -> bool {
        self.inner.borrow().active.is_some()
    }

    /// Whether a drawing surface was acquired.
    pub fn has_surface(&self) -> bool {
        self.inner.borrow().surface.is_some()
    }

    /// Inactive → Active. No-op if already Active or without a surface.
    pub fn activate(&self) {
        let session = {
            let mut guard = self.inner.borrow_mut();
            let state = &mut *guard;
            if state.active.is_some() {
                return;
            }
            let Some(surface) = state.surface.as_mut() else {
                log::warn!("overlay: no drawing surface, effect disabled");
                return;
            };

            let viewport = state.viewport.size();
            surface.resize(viewport);
            surface.set_visible(true);

            let weak = Rc::downgrade(&self.inner);
            let resize = state.viewport.observe_resize(Box::new(move |size| {
                if let Some(inner) = weak.upgrade() {
                    inner.borrow_mut().apply_resize(size);
                }
            }));

            state.sessions += 1;
            let session = state.sessions;
            let field = ParticleField::generate(viewport, &state.config, &mut state.rng);
            log::info!(
                "overlay: activated at {}x{} with {} particles",
                viewport.width,
                viewport.height,
                field.len()
            );
            state.active = Some(ActiveOverlay {
                session,
                field,
                frame: None,
                _resize: resize,
            });
            session
        };
        Self::schedule(&self.inner, session);
    }

    /// Active → Inactive. Idempotent.
    pub fn deactivate(&self) {
        self.inner.borrow_mut().release();
    }

    /// Follow `store`: activate now if it is already active, then track
    /// every change until the returned subscription is dropped.
    pub fn attach(&self, store: &ModeStore) -> Subscription {
        let weak = Rc::downgrade(&self.inner);
        let subscription = store.subscribe(move |active| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let overlay = ParticleOverlay { inner };
            if active {
                overlay.activate();
            } else {
                overlay.deactivate();
            }
        });
        if store.get_active() {
            self.activate();
        }
        subscription
    }

    /// Attach to `store` for the lifetime of the returned mount.
    /// Dropping the mount detaches and deactivates.
    pub fn mount(&self, store: &ModeStore) -> OverlayMount<S> {
        let subscription = self.attach(store);
        OverlayMount {
            overlay: self.clone(),
            subscription: Some(subscription),
        }
    }

    /// Snapshot of the live particles; empty while Inactive.
    pub fn particles(&self) -> Vec<Particle> {
        self.inner
            .borrow()
            .active
            .as_ref()
            .map(|a| a.field.particles().to_vec())
            .unwrap_or_default()
    }

    pub fn particle_count(&self) -> usize {
        self.inner
            .borrow()
            .active
            .as_ref()
            .map_or(0, |a| a.field.len())
    }

    /// Mutate live particles in place. Returns `None` while Inactive.
    pub fn with_particles_mut<R>(&self, f: impl FnOnce(&mut [Particle]) -> R) -> Option<R> {
        let mut state = self.inner.borrow_mut();
        state.active.as_mut().map(|a| f(a.field.particles_mut()))
    }

    /// Borrow the surface. Returns `None` when no surface was acquired.
    pub fn with_surface<R>(&self, f: impl FnOnce(&mut S) -> R) -> Option<R> {
        let mut state = self.inner.borrow_mut();
        state.surface.as_mut().map(f)
    }

    /// Clear `target` and paint the live particles into it without advancing
    /// them. Returns the number of drops painted; zero while Inactive.
    pub fn paint_into(&self, target: &mut dyn Surface) -> usize {
        let state = self.inner.borrow();
        target.clear();
        match state.active.as_ref() {
            Some(active) => {
                active.field.draw(target);
                active.field.len()
            }
            None => 0,
        }
    }

    /// Number of activations so far; each one generates a fresh particle set.
    pub fn generation(&self) -> u64 {
        self.inner.borrow().sessions
    }

    /// Total ticks run across all activations.
    pub fn ticks(&self) -> u64 {
        self.inner.borrow().ticks
    }

    fn schedule(inner: &Rc<RefCell<OverlayState<S>>>, session: u64) {
        let scheduler = Rc::clone(&inner.borrow().scheduler);
        let weak = Rc::downgrade(inner);
        let handle = scheduler.request_frame(Box::new(move || Self::run_frame(weak, session)));

        let mut state = inner.borrow_mut();
        match state.active.as_mut() {
            Some(active) if active.session == session => active.frame = Some(handle),
            _ => scheduler.cancel_frame(handle),
        }
    }

    fn run_frame(inner: Weak<RefCell<OverlayState<S>>>, session: u64) {
        let Some(inner) = inner.upgrade() else {
            return;
        };
        {
            let mut state = inner.borrow_mut();
            if let Some(active) = state.active.as_mut() {
                if active.session == session {
                    active.frame = None;
                }
            }
            if !state.tick(session) {
                return;
            }
        }
        Self::schedule(&inner, session);
    }
}

/// Overlay attached to a store. Dropping it is the unmount path.
#[must_use = "dropping the mount tears the overlay down"]
pub struct OverlayMount<S: Surface + 'static> {
    overlay: ParticleOverlay<S>,
    subscription: Option<Subscription>,
}

impl<S: Surface + 'static> OverlayMount<S> {
    pub fn overlay(&self) -> &ParticleOverlay<S> {
        &self.overlay
    }
}

impl<S: Surface + 'static> Drop for OverlayMount<S> {
    fn drop(&mut self) {
        self.subscription.take();
        self.overlay.deactivate();
    }
}
