use tanaka_core::QueryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContourError {
    #[error("invalid level specification: {0}")]
    InvalidLevelSpec(String),
    #[error("surface query failed at level {height}: {source}")]
    SurfaceQuery {
        height: f64,
        #[source]
        source: QueryError,
    },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
