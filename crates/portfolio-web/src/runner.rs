use std::collections::HashMap;
use std::rc::Rc;

use serde::Serialize;
use wasm_bindgen::JsValue;

#[cfg(feature = "vectors")]
use portfolio_engine::{MeshSurface, Surface};
use portfolio_engine::{
    About, Carousel, FetchError, ModeProvider, OverlayConfig, OverlayMount, OverlayStyle,
    ParticleOverlay, Project, ProjectList, ProjectsView, SiteConfig, Subscription,
};

use crate::canvas::CanvasSurface;
use crate::frames::AnimationFrames;
use crate::viewport::WindowViewport;

/// Page runtime: the provided mode store, the overlay mounted on it, and
/// the page content that reads it.
///
/// `lib.rs` keeps one of these in a `thread_local!` and exports free
/// functions, because wasm-bindgen cannot export the engine's generic types.
pub struct PortfolioRunner {
    // Field order is drop order: listeners and the overlay detach before
    // the provider scope closes.
    listeners: HashMap<u32, Subscription>,
    next_listener: u32,
    overlay: Option<OverlayMount<CanvasSurface>>,
    projects: ProjectList,
    carousel: Carousel,
    #[cfg(feature = "vectors")]
    mesh: MeshSurface,
    site: SiteConfig,
    provider: ModeProvider,
}

impl PortfolioRunner {
    pub fn new(overlay_config: OverlayConfig, site: SiteConfig) -> Self {
        let provider = ModeProvider::new();

        let overlay = web_sys::window().map(|window| {
            let surface = window
                .document()
                .and_then(|doc| CanvasSurface::acquire(&doc, OverlayStyle::TOPMOST));
            if surface.is_none() {
                log::warn!("overlay: no 2D canvas context, particles disabled");
            }
            let overlay = ParticleOverlay::new(
                surface,
                Rc::new(AnimationFrames::new(window.clone())),
                Rc::new(WindowViewport::new(window)),
                overlay_config,
            );
            overlay.mount(provider.store())
        });

        Self {
            listeners: HashMap::new(),
            next_listener: 1,
            overlay,
            projects: ProjectList::new(site.excluded_repos.iter().cloned()),
            carousel: Carousel::new(site.technologies.clone(), site.carousel),
            #[cfg(feature = "vectors")]
            mesh: MeshSurface::new(),
            site,
            provider,
        }
    }

    pub fn site(&self) -> &SiteConfig {
        &self.site
    }

    pub fn overlay_active(&self) -> bool {
        self.overlay
            .as_ref()
            .map(|mount| mount.overlay().is_active())
            .unwrap_or(false)
    }

    pub fn particle_count(&self) -> usize {
        self.overlay
            .as_ref()
            .map(|mount| mount.overlay().particle_count())
            .unwrap_or(0)
    }

    /// Tessellate the live drops for a WebGL host: triangle list, six floats
    /// per vertex. Empty while the overlay is inactive.
    #[cfg(feature = "vectors")]
    pub fn overlay_mesh(&mut self) -> &[f32] {
        match self.overlay.as_ref() {
            Some(mount) => {
                mount.overlay().paint_into(&mut self.mesh);
            }
            None => self.mesh.clear(),
        }
        self.mesh.mesh().vertices()
    }

    /// Forward mode changes to a JS function. Returns a handle for
    /// `remove_listener`.
    pub fn add_listener(&mut self, callback: js_sys::Function) -> u32 {
        let subscription = self.provider.store().subscribe(move |active| {
            if let Err(err) = callback.call1(&JsValue::NULL, &JsValue::from_bool(active)) {
                log::error!("mode listener threw: {:?}", err);
            }
        });
        let handle = self.next_listener;
        self.next_listener += 1;
        self.listeners.insert(handle, subscription);
        handle
    }

    pub fn remove_listener(&mut self, handle: u32) -> bool {
        self.listeners.remove(&handle).is_some()
    }

    pub fn finish_projects(&mut self, result: Result<Vec<Project>, FetchError>) {
        self.projects.finish(result);
    }

    pub fn projects_json(&self) -> Result<String, serde_json::Error> {
        projects_payload(&self.projects)
    }

    /// Advance the carousel one step and return the strip translation.
    pub fn carousel_tick(&mut self) -> f32 {
        self.carousel.tick();
        self.carousel.translate_x()
    }

    pub fn about_json(&self) -> Result<String, serde_json::Error> {
        about_payload(&self.site.about)
    }

    pub fn carousel_items_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.carousel.rendered_items().collect::<Vec<_>>())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AboutCard<'a> {
    name: &'a str,
    avatar_url: &'a str,
    initials: String,
    blurb: &'a str,
    profile_url: &'a str,
}

/// JSON handed to the page for the header card.
pub fn about_payload(about: &About) -> Result<String, serde_json::Error> {
    serde_json::to_string(&AboutCard {
        name: &about.name,
        avatar_url: &about.avatar_url,
        initials: about.initials(),
        blurb: &about.blurb,
        profile_url: &about.profile_url,
    })
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectCard<'a> {
    id: u64,
    name: &'a str,
    html_url: &'a str,
    description: &'a str,
}

#[derive(Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
enum ProjectsPayload<'a> {
    Loading,
    Failed,
    Empty,
    Loaded { projects: Vec<ProjectCard<'a>> },
}

/// JSON handed to the page for the projects section.
pub fn projects_payload(list: &ProjectList) -> Result<String, serde_json::Error> {
    let payload = match list.view() {
        ProjectsView::Loading => ProjectsPayload::Loading,
        ProjectsView::Failed => ProjectsPayload::Failed,
        ProjectsView::Empty => ProjectsPayload::Empty,
        ProjectsView::Projects(projects) => ProjectsPayload::Loaded {
            projects: projects
                .into_iter()
                .map(|p| ProjectCard {
                    id: p.id,
                    name: &p.name,
                    html_url: &p.html_url,
                    description: p.description_or_default(),
                })
                .collect(),
        },
    };
    serde_json::to_string(&payload)
}
