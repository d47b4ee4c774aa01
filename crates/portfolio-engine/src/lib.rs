pub mod api;
pub mod assets;
pub mod components;
pub mod core;
pub mod error;
pub mod renderer;
pub mod site;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::types::{FrameHandle, ObserverId, ViewportSize};
pub use assets::config::{CarouselConfig, OverlayConfig, SiteConfig, DEFAULT_SEED};
pub use components::particle::Particle;
pub use crate::core::frames::{FrameCallback, FrameScheduler, ManualFrames};
pub use crate::core::mode::{ModeStore, Subscription};
pub use crate::core::provider::{try_use_mode, use_mode, ModeProvider};
pub use crate::core::viewport::{ManualViewport, ResizeCallback, ResizeGuard, Viewport};
pub use error::{ConfigError, FetchError, ModeError};
pub use renderer::{Color, OverlayStyle, RecordingSurface, Surface, SurfaceCommand};
pub use systems::effects::{ParticleField, Rng};
pub use systems::overlay::{OverlayMount, ParticleOverlay};
pub use systems::teardrop::Teardrop;

#[cfg(feature = "vectors")]
pub use systems::vector::{MeshSurface, TeardropMesh, VectorVertex};

// Page content around the mode core
pub use site::{
    About, Carousel, ScrollDirection, Technology,
    Project, ProjectList, ProjectsView, parse_repositories, repos_url,
    Theme, ThemeSlot, ToggleLabel, ButtonVariant,
};
