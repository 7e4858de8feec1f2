use thiserror::Error;

/// Template registry and hierarchy errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Template not found: {0}")]
    NotFound(String),
    #[error("Broken template chain: {template} references missing parent {missing}")]
    BrokenChain { template: String, missing: String },
    #[error("Cycle detected in template chain at {0}")]
    CycleDetected(String),
    #[error("Template chain of {template} exceeds {limit} levels")]
    DepthExceeded { template: String, limit: usize },
    #[error("Path escapes the template directory: {0}")]
    PathTraversal(String),
    #[error("Invalid template: {0}")]
    InvalidTemplate(String),
}
