//! Technology carousel: an endless horizontal strip.
//!
//! The item list is rendered twice back to back. The offset advances a
//! fixed amount per step and wraps after one copy's width, so the seam
//! between the two copies is never visible.

use serde::{Deserialize, Serialize};

use crate::assets::config::CarouselConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Technology {
    pub name: String,
    /// Icon key understood by the front end (e.g. "si-react").
    #[serde(default = "default_icon")]
    pub icon: String,
}

fn default_icon() -> String {
    "package".to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScrollDirection {
    /// Content moves toward the left edge.
    #[default]
    RightToLeft,
    /// Content moves toward the right edge.
    LeftToRight,
}

pub struct Carousel {
    items: Vec<Technology>,
    config: CarouselConfig,
    offset: f32,
}

impl Carousel {
    pub fn new(items: Vec<Technology>, config: CarouselConfig) -> Self {
        Self {
            items,
            config,
            offset: 0.0,
        }
    }

    /// Width of one copy of the strip.
    pub fn strip_width(&self) -> f32 {
        self.items.len() as f32 * self.config.item_pitch
    }

    /// Items in render order: the list followed by its duplicate.
    pub fn rendered_items(&self) -> impl Iterator<Item = &Technology> {
        self.items.iter().chain(self.items.iter())
    }

    /// Distance scrolled within the current copy, in `[0, strip_width)`.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Advance one step.
    pub fn tick(&mut self) {
        let width = self.strip_width();
        if width <= 0.0 {
            return;
        }
        self.offset = (self.offset + self.config.speed.abs()).rem_euclid(width);
    }

    /// Horizontal translation to apply to the strip, in pixels.
    pub fn translate_x(&self) -> f32 {
        match self.config.direction {
            ScrollDirection::RightToLeft => -self.offset,
            ScrollDirection::LeftToRight => self.offset - self.strip_width(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn techs(n: usize) -> Vec<Technology> {
        (0..n)
            .map(|i| Technology {
                name: format!("tech-{}", i),
                icon: default_icon(),
            })
            .collect()
    }

    fn config(speed: f32, direction: ScrollDirection) -> CarouselConfig {
        CarouselConfig {
            speed,
            direction,
            item_pitch: 100.0,
        }
    }

    #[test]
    fn renders_list_twice() {
        let carousel = Carousel::new(techs(3), CarouselConfig::default());
        let names: Vec<_> = carousel.rendered_items().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["tech-0", "tech-1", "tech-2", "tech-0", "tech-1", "tech-2"]);
    }

    #[test]
    fn offset_wraps_after_one_copy() {
        let mut carousel = Carousel::new(techs(2), config(50.0, ScrollDirection::RightToLeft));
        assert_eq!(carousel.strip_width(), 200.0);
        for _ in 0..3 {
            carousel.tick();
        }
        assert_eq!(carousel.offset(), 150.0);
        carousel.tick();
        assert_eq!(carousel.offset(), 0.0);
    }

    #[test]
    fn right_to_left_translates_negative() {
        let mut carousel = Carousel::new(techs(2), config(10.0, ScrollDirection::RightToLeft));
        carousel.tick();
        assert_eq!(carousel.translate_x(), -10.0);
    }

    #[test]
    fn left_to_right_starts_one_copy_back() {
        let mut carousel = Carousel::new(techs(2), config(10.0, ScrollDirection::LeftToRight));
        assert_eq!(carousel.translate_x(), -200.0);
        carousel.tick();
        assert_eq!(carousel.translate_x(), -190.0);
    }

    #[test]
    fn empty_carousel_does_not_move() {
        let mut carousel = Carousel::new(Vec::new(), CarouselConfig::default());
        carousel.tick();
        assert_eq!(carousel.offset(), 0.0);
        assert_eq!(carousel.rendered_items().count(), 0);
    }
}
