//! Falling-drop field: one generation of particles for one activation.
//!
//! The field never grows or shrinks while it lives. Drops that leave the
//! bottom edge are respawned in place above the top edge.

mod rng;

pub use rng::Rng;

use crate::api::types::ViewportSize;
use crate::assets::config::OverlayConfig;
use crate::components::particle::Particle;
use crate::renderer::traits::{Color, Surface};

pub struct ParticleField {
    particles: Vec<Particle>,
    color: Color,
    respawn_band: f32,
}

impl ParticleField {
    /// Generate `floor(viewport.width / pixels_per_particle)` drops.
    pub fn generate(viewport: ViewportSize, config: &OverlayConfig, rng: &mut Rng) -> Self {
        let count = config.particle_count(viewport.width);
        let particles = (0..count)
            .map(|_| Particle::spawn(viewport, config, rng))
            .collect();
        ParticleField {
            particles,
            color: config.color,
            respawn_band: config.respawn_band,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable access for hosts that tweak drops in place (e.g. tests pinning speeds).
    /// The count cannot change through this view.
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Paint every drop at its current position.
    pub fn draw(&self, surface: &mut dyn Surface) {
        for p in &self.particles {
            surface.fill_teardrop(&p.teardrop(self.color));
        }
    }

    /// Move every drop down by its fall speed; respawn those past the
    /// bottom of `bounds`. Returns how many were respawned.
    pub fn advance(&mut self, bounds: ViewportSize, rng: &mut Rng) -> usize {
        let mut respawned = 0;
        for p in &mut self.particles {
            if p.fall(bounds.height) {
                p.respawn(bounds.width, self.respawn_band, rng);
                respawned += 1;
            }
        }
        respawned
    }
}
