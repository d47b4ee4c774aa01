use glam::Vec2;

use crate::api::types::ViewportSize;
use crate::assets::config::OverlayConfig;
use crate::renderer::traits::Color;
use crate::systems::effects::Rng;
use crate::systems::teardrop::Teardrop;

/// One falling drop.
///
/// `size`, `fall_speed`, and `opacity` are fixed for the drop's life;
/// only `position` changes, including on respawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub size: f32,
    pub fall_speed: f32,
    pub opacity: f32,
}

impl Particle {
    /// A new drop somewhere in the screen-height band above the viewport.
    pub fn spawn(bounds: ViewportSize, config: &OverlayConfig, rng: &mut Rng) -> Self {
        let x = rng.next_f32() * bounds.width.max(0.0);
        let y = -rng.next_f32() * bounds.height.max(0.0);
        Particle {
            position: Vec2::new(x, y),
            size: rng.range(config.size_range.0, config.size_range.1),
            fall_speed: rng.range(config.fall_speed_range.0, config.fall_speed_range.1),
            opacity: rng.range(config.opacity_range.0, config.opacity_range.1),
        }
    }

    /// Advance one tick. Returns true when the drop fell past `floor`.
    pub fn fall(&mut self, floor: f32) -> bool {
        self.position.y += self.fall_speed;
        self.position.y > floor
    }

    /// Move back above the top edge at a new column.
    pub fn respawn(&mut self, width: f32, band: f32, rng: &mut Rng) {
        self.position.y = -rng.next_f32() * band.max(0.0);
        self.position.x = rng.next_f32() * width.max(0.0);
    }

    pub fn teardrop(&self, color: Color) -> Teardrop {
        Teardrop::new(self.position, self.size, color.with_alpha(self.opacity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawned_particles_satisfy_invariants() {
        let config = OverlayConfig::default();
        let mut rng = Rng::new(3);
        let bounds = ViewportSize::new(640.0, 480.0);
        for _ in 0..500 {
            let p = Particle::spawn(bounds, &config, &mut rng);
            assert!(p.size > 0.0);
            assert!(p.fall_speed > 0.0);
            assert!(p.opacity > 0.0 && p.opacity <= 1.0);
            assert!(p.position.y <= 0.0);
            assert!(p.position.x >= 0.0 && p.position.x <= 640.0);
        }
    }

    #[test]
    fn fall_reports_crossing_floor() {
        let mut p = Particle {
            position: Vec2::new(10.0, 95.0),
            size: 3.0,
            fall_speed: 4.0,
            opacity: 0.8,
        };
        assert!(!p.fall(100.0));
        assert_eq!(p.position.y, 99.0);
        assert!(p.fall(100.0));
    }

    #[test]
    fn respawn_keeps_appearance() {
        let mut rng = Rng::new(11);
        let mut p = Particle {
            position: Vec2::new(10.0, 500.0),
            size: 3.0,
            fall_speed: 2.5,
            opacity: 0.9,
        };
        p.respawn(200.0, 100.0, &mut rng);
        assert!(p.position.y <= 0.0 && p.position.y > -100.0);
        assert!(p.position.x >= 0.0 && p.position.x < 200.0);
        assert_eq!((p.size, p.fall_speed, p.opacity), (3.0, 2.5, 0.9));
    }

    #[test]
    fn teardrop_uses_particle_opacity() {
        let p = Particle {
            position: Vec2::new(1.0, 2.0),
            size: 4.0,
            fall_speed: 1.0,
            opacity: 0.75,
        };
        let drop = p.teardrop(Color::RED);
        assert_eq!(drop.color, Color::RED.with_alpha(0.75));
        assert_eq!(drop.tip, Vec2::new(1.0, 2.0));
        assert_eq!(drop.size, 4.0);
    }
}
