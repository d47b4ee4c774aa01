use thiserror::Error;

/// Wiring errors around the mode provider scope.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModeError {
    /// `use_mode` was reached from code that is not inside a `ModeProvider`.
    #[error("use_mode must be called within a ModeProvider scope")]
    OutsideProvider,
}

/// Failure loading the repository list from GitHub.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The API answered with a non-success HTTP status.
    #[error("GitHub responded with status {0}")]
    Status(u16),
    /// The body was not the expected repository array.
    #[error("could not decode repository list: {0}")]
    Decode(#[from] serde_json::Error),
    /// The request never produced a response (offline, CORS, aborted).
    #[error("network error: {0}")]
    Network(String),
}

/// Invalid overlay or site configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{field}: range [{min}, {max}] is invalid")]
    Range { field: &'static str, min: f32, max: f32 },
    #[error("pixelsPerParticle must be at least 1, got {0}")]
    Density(f32),
    #[error("carousel itemPitch must be a positive number, got {0}")]
    Pitch(f32),
    #[error("carousel speed must be finite, got {0}")]
    Speed(f32),
}
