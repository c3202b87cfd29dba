//! Error types for the document model

/// Preview rendering errors
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Document could not be converted to JSON
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Document could not be converted to YAML
    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
