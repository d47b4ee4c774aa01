//! Teardrop silhouette used for every falling drop.
//!
//! One closed cubic Bézier: starts and ends at the tip `(x, y)`, with
//! control points `size` to either side and `2 * size` above. The tip is
//! the lowest point on screen (y grows downward).

use glam::Vec2;

use crate::renderer::traits::Color;

/// A single drop ready to be painted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Teardrop {
    pub tip: Vec2,
    pub size: f32,
    pub color: Color,
}

impl Teardrop {
    pub fn new(tip: Vec2, size: f32, color: Color) -> Self {
        Self { tip, size, color }
    }

    /// The two cubic control points, left then right.
    pub fn control_points(&self) -> (Vec2, Vec2) {
        let lift = 2.0 * self.size;
        (
            Vec2::new(self.tip.x - self.size, self.tip.y - lift),
            Vec2::new(self.tip.x + self.size, self.tip.y - lift),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Outline at `t` in [0, 1].
    fn point_at(drop: &Teardrop, t: f32) -> Vec2 {
        let (c1, c2) = drop.control_points();
        let u = 1.0 - t;
        drop.tip * (u * u * u) + c1 * (3.0 * u * u * t) + c2 * (3.0 * u * t * t) + drop.tip * (t * t * t)
    }

    #[test]
    fn control_points_flank_and_lift() {
        let drop = Teardrop::new(Vec2::new(50.0, 80.0), 4.0, Color::RED);
        let (left, right) = drop.control_points();
        assert_eq!(left, Vec2::new(46.0, 72.0));
        assert_eq!(right, Vec2::new(54.0, 72.0));
    }

    #[test]
    fn curve_is_closed_at_tip() {
        let drop = Teardrop::new(Vec2::new(50.0, 80.0), 4.0, Color::RED);
        assert_eq!(point_at(&drop, 0.0), drop.tip);
        assert_eq!(point_at(&drop, 1.0), drop.tip);
    }

    #[test]
    fn tip_is_lowest_point() {
        let drop = Teardrop::new(Vec2::new(10.0, 100.0), 5.0, Color::RED);
        for i in 1..20 {
            let p = point_at(&drop, i as f32 / 20.0);
            assert!(p.y < drop.tip.y, "point {:?} is below the tip", p);
        }
        // peak height is 1.5 * size above the tip
        assert!((point_at(&drop, 0.5).y - (100.0 - 7.5)).abs() < 1e-4);
    }
}
