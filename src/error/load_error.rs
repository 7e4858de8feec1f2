use thiserror::Error;

use graphetl_rdf::QueryError;

/// Errors raised while reading graph data into typed values.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Query failed")]
    Resolution(#[from] QueryError),
    #[error("Invalid value for <{property}>: '{value}' ({message})")]
    InvalidValue {
        property: String,
        value: String,
        message: String,
    },
    #[error("Expected at most one resource of type <{rdf_type}>, found {count}")]
    AmbiguousResource { rdf_type: String, count: usize },
    #[error("No resource to load from")]
    ResourceNotFound,
    #[error("Missing required property <{property}> on <{resource}>")]
    MissingProperty { resource: String, property: String },
}

impl LoadError {
    pub fn invalid_value(
        property: impl Into<String>,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        LoadError::InvalidValue {
            property: property.into(),
            value: value.into(),
            message: message.into(),
        }
    }
}
