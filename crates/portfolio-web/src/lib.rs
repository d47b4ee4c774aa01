pub mod canvas;
pub mod frames;
pub mod github;
pub mod runner;
pub mod viewport;

pub use canvas::CanvasSurface;
pub use frames::AnimationFrames;
pub use runner::PortfolioRunner;
pub use viewport::WindowViewport;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use portfolio_engine::{use_mode, OverlayConfig, SiteConfig, Theme, ThemeSlot, ToggleLabel};

thread_local! {
    static RUNNER: RefCell<Option<PortfolioRunner>> = const { RefCell::new(None) };
}

fn with_runner<R>(f: impl FnOnce(&mut PortfolioRunner) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow
            .as_mut()
            .expect("Portfolio not initialized. Call portfolio_init() first.");
        f(runner)
    })
}

fn random_seed() -> u64 {
    (js_sys::Math::random() * u32::MAX as f64) as u64 | 1
}

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Install the mode provider and mount the overlay.
///
/// Both arguments are optional JSON documents; missing fields take defaults.
/// The overlay seed is drawn from `Math.random` unless the JSON pins one
/// with `"seed"`.
#[wasm_bindgen]
pub fn portfolio_init(overlay_json: Option<String>, site_json: Option<String>) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let overlay_config = match overlay_json.as_deref() {
        Some(json) => OverlayConfig::from_json(json).map_err(js_error)?,
        None => OverlayConfig::default(),
    }
    .or_seed(random_seed());
    let site = match site_json.as_deref() {
        Some(json) => SiteConfig::from_json(json).map_err(js_error)?,
        None => SiteConfig::default(),
    };

    // Tear down a previous runner before its replacement installs a provider.
    RUNNER.with(|cell| cell.borrow_mut().take());
    let runner = PortfolioRunner::new(overlay_config, site);
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });

    log::info!("portfolio: initialized");
    Ok(())
}

/// Unmount the overlay and close the provider scope.
#[wasm_bindgen]
pub fn portfolio_teardown() {
    let runner = RUNNER.with(|cell| cell.borrow_mut().take());
    if runner.is_some() {
        drop(runner);
        log::info!("portfolio: torn down");
    }
}

// Mode exports resolve the store through the provider rather than the
// runner, so JS listeners may call back into them while a change is
// being delivered.

#[wasm_bindgen]
pub fn mode_is_active() -> bool {
    use_mode().get_active()
}

#[wasm_bindgen]
pub fn mode_set_active(value: bool) {
    use_mode().set_active(value);
}

#[wasm_bindgen]
pub fn mode_toggle() {
    use_mode().toggle();
}

/// Call `callback(active)` on every change. Returns a handle for `mode_unsubscribe`.
#[wasm_bindgen]
pub fn mode_subscribe(callback: js_sys::Function) -> u32 {
    with_runner(|r| r.add_listener(callback))
}

#[wasm_bindgen]
pub fn mode_unsubscribe(handle: u32) -> bool {
    with_runner(|r| r.remove_listener(handle))
}

/// Toggle button text for the current mode ("EMO" or "NORMAL").
#[wasm_bindgen]
pub fn toggle_label() -> String {
    ToggleLabel::for_mode(use_mode().get_active()).text.to_string()
}

/// Toggle button variant for the current mode ("secondary" or "destructive").
#[wasm_bindgen]
pub fn toggle_variant() -> String {
    ToggleLabel::for_mode(use_mode().get_active())
        .variant
        .as_str()
        .to_string()
}

/// CSS classes for a named page slot under the current mode.
#[wasm_bindgen]
pub fn theme_class(slot: &str) -> Result<String, JsValue> {
    let slot = ThemeSlot::parse(slot)
        .ok_or_else(|| JsValue::from_str(&format!("unknown theme slot: {}", slot)))?;
    Ok(Theme::for_mode(use_mode().get_active()).class(slot).to_string())
}

#[wasm_bindgen]
pub fn overlay_is_active() -> bool {
    with_runner(|r| r.overlay_active())
}

#[wasm_bindgen]
pub fn overlay_particle_count() -> u32 {
    with_runner(|r| r.particle_count() as u32)
}

/// Tessellated drops for WebGL hosts: a triangle list of `x, y, r, g, b, a`
/// vertices. Empty while the overlay is inactive.
#[cfg(feature = "vectors")]
#[wasm_bindgen]
pub fn overlay_mesh() -> js_sys::Float32Array {
    with_runner(|r| js_sys::Float32Array::from(r.overlay_mesh()))
}

/// Header card as JSON: name, avatarUrl, initials, blurb, profileUrl.
#[wasm_bindgen]
pub fn about() -> Result<String, JsValue> {
    with_runner(|r| r.about_json().map_err(js_error))
}

/// Fetch the repository list and return the projects section as JSON:
/// `{"state":"loaded","projects":[...]}`, `{"state":"empty"}` or
/// `{"state":"failed"}`.
#[wasm_bindgen]
pub async fn load_projects() -> Result<String, JsValue> {
    let user = with_runner(|r| r.site().github_user.clone());
    let result = github::fetch_repositories(&user).await;
    with_runner(|r| {
        r.finish_projects(result);
        r.projects_json().map_err(js_error)
    })
}

/// Current projects section as JSON, without fetching.
#[wasm_bindgen]
pub fn projects_json() -> Result<String, JsValue> {
    with_runner(|r| r.projects_json().map_err(js_error))
}

/// Carousel items in render order (the list twice) as JSON.
#[wasm_bindgen]
pub fn carousel_items() -> Result<String, JsValue> {
    with_runner(|r| r.carousel_items_json().map_err(js_error))
}

/// Advance the carousel one step. Returns the strip's `translateX` in pixels.
#[wasm_bindgen]
pub fn carousel_tick() -> f32 {
    with_runner(|r| r.carousel_tick())
}
