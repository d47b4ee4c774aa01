use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::renderer::traits::Color;
use crate::site::about::About;
use crate::site::carousel::{ScrollDirection, Technology};

/// Seed used when the config does not pin one and the host supplies none.
pub const DEFAULT_SEED: u64 = 42;

/// Densest allowed particle spacing: one drop per pixel column.
pub const MIN_PIXELS_PER_PARTICLE: f32 = 1.0;

/// Tuning for the falling-drop overlay.
/// Loaded from JSON at runtime; every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OverlayConfig {
    /// Viewport pixels per particle: count = floor(width / this).
    pub pixels_per_particle: f32,
    /// Drop footprint range `[min, max)`.
    pub size_range: (f32, f32),
    /// Pixels advanced per tick, range `[min, max)`.
    pub fall_speed_range: (f32, f32),
    /// Alpha range `[min, max)`.
    pub opacity_range: (f32, f32),
    /// Depth above the top edge that respawned drops start from.
    pub respawn_band: f32,
    /// Drop fill color; alpha is replaced by each drop's opacity.
    pub color: Color,
    /// RNG seed for the first activation. Hosts fill in their own
    /// entropy when this is unset; see `or_seed`.
    pub seed: Option<u64>,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            pixels_per_particle: 20.0,
            size_range: (2.0, 7.0),
            fall_speed_range: (1.0, 4.0),
            opacity_range: (0.7, 1.0),
            respawn_band: 100.0,
            color: Color::RED,
            seed: None,
        }
    }
}

impl OverlayConfig {
    /// Parse and validate a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Keep a pinned seed, otherwise use `seed`.
    pub fn or_seed(mut self, seed: u64) -> Self {
        self.seed.get_or_insert(seed);
        self
    }

    /// Seed the overlay's RNG starts from.
    pub fn effective_seed(&self) -> u64 {
        self.seed.unwrap_or(DEFAULT_SEED)
    }

    /// Check that every generated particle will satisfy
    /// `size > 0`, `fall_speed > 0`, `0 < opacity <= 1`, and that the
    /// particle count stays bounded by the viewport width.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.pixels_per_particle >= MIN_PIXELS_PER_PARTICLE) {
            return Err(ConfigError::Density(self.pixels_per_particle));
        }
        check_range("sizeRange", self.size_range, f32::INFINITY)?;
        check_range("fallSpeedRange", self.fall_speed_range, f32::INFINITY)?;
        check_range("opacityRange", self.opacity_range, 1.0)?;
        if !(self.respawn_band >= 0.0) {
            return Err(ConfigError::Range {
                field: "respawnBand",
                min: self.respawn_band,
                max: self.respawn_band,
            });
        }
        Ok(())
    }

    /// Number of particles for a viewport of the given width.
    pub fn particle_count(&self, viewport_width: f32) -> usize {
        if !(viewport_width > 0.0) {
            return 0;
        }
        let spacing = self.pixels_per_particle.max(MIN_PIXELS_PER_PARTICLE);
        (viewport_width / spacing).floor() as usize
    }
}

fn check_range(field: &'static str, (min, max): (f32, f32), ceiling: f32) -> Result<(), ConfigError> {
    if min > 0.0 && min <= max && max <= ceiling {
        Ok(())
    } else {
        Err(ConfigError::Range { field, min, max })
    }
}

/// Content and behavior of the portfolio page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    /// GitHub account whose public repositories are listed.
    pub github_user: String,
    /// Repository names never shown in the project grid.
    pub excluded_repos: Vec<String>,
    /// Technologies shown in the carousel, in display order.
    pub technologies: Vec<Technology>,
    pub carousel: CarouselConfig,
    /// Header card: name, avatar, blurb, profile link.
    pub about: About,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CarouselConfig {
    /// Pixels scrolled per carousel step.
    pub speed: f32,
    pub direction: ScrollDirection,
    /// Horizontal distance between item origins (item width + gap).
    pub item_pitch: f32,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            speed: 1.0,
            direction: ScrollDirection::RightToLeft,
            item_pitch: 112.0, // 96px item + 16px gap
        }
    }
}

impl CarouselConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.item_pitch > 0.0 && self.item_pitch.is_finite()) {
            return Err(ConfigError::Pitch(self.item_pitch));
        }
        if !self.speed.is_finite() {
            return Err(ConfigError::Speed(self.speed));
        }
        Ok(())
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        let tech = |name: &str, icon: &str| Technology {
            name: name.to_string(),
            icon: icon.to_string(),
        };
        Self {
            github_user: "wagner840".to_string(),
            excluded_repos: [
                "wagner840",
                "Wagner-portfolio",
                "stable-diffusion-webui",
                "GeminiBotWagner840",
                "Eva-Flutter-A.I",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            technologies: vec![
                tech("Next.js", "si-nextdotjs"),
                tech("React", "si-react"),
                tech("Tailwind CSS", "si-tailwindcss"),
                tech("TypeScript", "si-typescript"),
                tech("Node.js", "si-nodedotjs"),
                tech("JavaScript", "si-javascript"),
                tech("HTML", "si-html5"),
                tech("CSS", "si-css3"),
                tech("Shadcn UI", "package"),
                tech("Gemini", "fa-gem"),
                tech("Claude 3.5", "tb-robot"),
                tech("GPT", "tb-robot"),
            ],
            carousel: CarouselConfig::default(),
            about: About::default(),
        }
    }
}

impl SiteConfig {
    /// Parse and validate a site config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.carousel.validate()?;
        Ok(config)
    }
}
