use crate::pipeline::Category;

#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error("{0} is not set, aborting API call")]
    MissingCredentials(&'static str),
    #[error("Request to {service} failed: {source}")]
    Fetch {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("Failed to parse language registry: {0}")]
    Registry(#[from] serde_yaml::Error),
    /// The stats response had no list for a category. Points at a caller bug rather than bad
    /// user input.
    #[error("Stats response carries no {0} data")]
    ContractViolation(Category),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = ChartError> = std::result::Result<T, E>;
