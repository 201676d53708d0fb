use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the shiproute library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// A required dataset file could not be located at the resolved path.
    #[error("dataset file not found at {path}")]
    DatasetNotFound { path: PathBuf },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for the route dataset")]
    ProjectDirsUnavailable,

    /// Raised when a route row is malformed or carries an unusable distance.
    #[error("invalid route data: {message}")]
    InvalidRouteData { message: String },

    /// Raised when a fuel or port halt profile file fails validation.
    #[error("invalid profile data: {message}")]
    ProfileData { message: String },

    /// Raised when a port name could not be found in the route graph.
    #[error("unknown port name: {name}{}", format_suggestions(.suggestions))]
    UnknownPort {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when no route could be found between two ports.
    #[error("no route found between {start} and {goal}")]
    RouteNotFound { start: String, goal: String },

    /// Raised when a route estimate ends up without any candidate options.
    #[error("route plan was empty")]
    EmptyRoutePlan,

    /// An external data provider failed, timed out or returned an unusable payload.
    ///
    /// The estimation pipeline recovers from this locally with a documented
    /// default; it never aborts a query.
    #[error("{provider} provider unavailable: {message}")]
    ProviderUnavailable {
        provider: &'static str,
        message: String,
    },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for CSV parsing errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Wrapper for HTTP client errors.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Wrapper for JSON serialization errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Build a [`Error::ProviderUnavailable`] from any displayable cause.
    pub fn provider(provider: &'static str, cause: impl std::fmt::Display) -> Self {
        Error::ProviderUnavailable {
            provider,
            message: cause.to_string(),
        }
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
