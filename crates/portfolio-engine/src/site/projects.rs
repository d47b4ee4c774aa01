//! Repository list shown in the projects grid.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::FetchError;

pub const GITHUB_API: &str = "https://api.github.com";

/// Shown in place of a missing repository description.
pub const NO_DESCRIPTION: &str = "Sem descrição disponível.";

/// A public repository, reduced to the fields the page renders.
/// Unknown fields in the API payload are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub name: String,
    pub html_url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub fork: bool,
}

impl Project {
    pub fn description_or_default(&self) -> &str {
        match self.description.as_deref() {
            Some(text) if !text.trim().is_empty() => text,
            _ => NO_DESCRIPTION,
        }
    }
}

/// Endpoint listing a user's public repositories.
pub fn repos_url(user: &str) -> String {
    format!("{}/users/{}/repos", GITHUB_API, user)
}

/// Decode the body of `GET /users/{user}/repos`.
pub fn parse_repositories(json: &str) -> Result<Vec<Project>, FetchError> {
    Ok(serde_json::from_str(json)?)
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum LoadState {
    #[default]
    Loading,
    Loaded(Vec<Project>),
    Failed,
}

/// What the projects section should render right now.
#[derive(Debug, PartialEq, Eq)]
pub enum ProjectsView<'a> {
    Loading,
    /// The fetch failed; show the "could not load" message.
    Failed,
    /// Loaded, but everything was filtered out.
    Empty,
    Projects(Vec<&'a Project>),
}

/// Load state plus the exclusion set applied before display.
pub struct ProjectList {
    state: LoadState,
    excluded: HashSet<String>,
}

impl ProjectList {
    pub fn new<I, S>(excluded: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            state: LoadState::Loading,
            excluded: excluded.into_iter().map(Into::into).collect(),
        }
    }

    /// Record the outcome of a fetch. Errors are logged and collapse to `Failed`.
    pub fn finish(&mut self, result: Result<Vec<Project>, FetchError>) {
        self.state = match result {
            Ok(projects) => {
                log::info!("projects: loaded {} repositories", projects.len());
                LoadState::Loaded(projects)
            }
            Err(err) => {
                log::error!("projects: {}", err);
                LoadState::Failed
            }
        };
    }

    /// Projects whose name is not in the exclusion set, in fetch order.
    pub fn visible(&self) -> Vec<&Project> {
        match &self.state {
            LoadState::Loaded(projects) => projects
                .iter()
                .filter(|p| !self.excluded.contains(&p.name))
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn view(&self) -> ProjectsView<'_> {
        match &self.state {
            LoadState::Loading => ProjectsView::Loading,
            LoadState::Failed => ProjectsView::Failed,
            LoadState::Loaded(_) => {
                let visible = self.visible();
                if visible.is_empty() {
                    ProjectsView::Empty
                } else {
                    ProjectsView::Projects(visible)
                }
            }
        }
    }
}
