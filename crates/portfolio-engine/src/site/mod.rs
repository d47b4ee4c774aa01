// site/mod.rs
//
// Page content around the mode core: header card, project list,
// technology carousel, and the theme palette the flag selects.

pub mod about;
pub mod carousel;
pub mod projects;
pub mod theme;

pub use about::About;
pub use carousel::{Carousel, ScrollDirection, Technology};
pub use projects::{parse_repositories, repos_url, Project, ProjectList, ProjectsView};
pub use theme::{ButtonVariant, Theme, ThemeSlot, ToggleLabel};
