//! Error types for the execution core.
//!
//! - [`ComponentError`]: lifecycle failures surfaced to the scheduler.
//! - [`LoadError`]: failures reading graph data into typed values.
//! - [`TemplateError`]: template registry and hierarchy failures.
//! - [`DataUnitError`]: failures of file and graph data unit operations.
//! - [`ConfigError`]: failures reading [`CoreConfig`](crate::config::CoreConfig).

pub mod component_error;
pub mod config_error;
pub mod data_unit_error;
pub mod load_error;
pub mod template_error;

pub use component_error::{ComponentError, ConfigurationLayer};
pub use config_error::ConfigError;
pub use data_unit_error::DataUnitError;
pub use load_error::LoadError;
pub use template_error::TemplateError;

pub use graphetl_rdf::QueryError;

/// Boxed cause carried inside [`ComponentError`] variants.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Convenience alias for lifecycle-level results.
pub type ComponentResult<T> = Result<T, ComponentError>;
/// Convenience alias for template-level results.
pub type TemplateResult<T> = Result<T, TemplateError>;

/// Render an error and its `source()` chain as `outer: inner: root`.
pub fn error_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_chain_includes_causes() {
        let err = ComponentError::ConfigurationLoad {
            layer: ConfigurationLayer::Runtime,
            cause: LoadError::Resolution(QueryError::Backend("offline".into())),
        };
        let chain = error_chain(&err);
        assert!(chain.starts_with("Can't load configuration from runtime layer"));
        assert!(chain.ends_with("Query backend error: offline"));
    }
}
