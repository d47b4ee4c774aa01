use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use portfolio_engine::{parse_repositories, repos_url, FetchError, Project};

fn network(err: JsValue) -> FetchError {
    FetchError::Network(format!("{:?}", err))
}

/// `GET /users/{user}/repos` through the browser's fetch.
pub async fn fetch_repositories(user: &str) -> Result<Vec<Project>, FetchError> {
    let window = web_sys::window().ok_or_else(|| FetchError::Network("no window".into()))?;

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);

    let url = repos_url(user);
    let request = Request::new_with_str_and_init(&url, &opts).map_err(network)?;
    request
        .headers()
        .set("Accept", "application/vnd.github+json")
        .map_err(network)?;

    log::debug!("fetching {}", url);
    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(network)?
        .dyn_into()
        .map_err(network)?;

    if !response.ok() {
        return Err(FetchError::Status(response.status()));
    }

    let body = JsFuture::from(response.text().map_err(network)?)
        .await
        .map_err(network)?
        .as_string()
        .ok_or_else(|| FetchError::Network("response body is not text".into()))?;

    parse_repositories(&body)
}
