use std::fmt;
use thiserror::Error;

use super::{BoxError, LoadError};
use graphetl_rdf::QueryError;

/// Which configuration layer failed to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationLayer {
    /// A layer listed on the component descriptor, by position.
    Static {
        index: usize,
        graph: String,
        resource: Option<String>,
    },
    /// The runtime configuration channel.
    Runtime,
}

impl fmt::Display for ConfigurationLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationLayer::Static {
                index,
                graph,
                resource: Some(resource),
            } => write!(f, "static layer #{} (<{}> in <{}>)", index, resource, graph),
            ConfigurationLayer::Static { index, graph, .. } => {
                write!(f, "static layer #{} (<{}>)", index, graph)
            }
            ConfigurationLayer::Runtime => f.write_str("runtime layer"),
        }
    }
}

/// Component lifecycle errors
#[derive(Debug, Error)]
pub enum ComponentError {
    #[error("Missing data unit, expected: {binding}")]
    MissingChannel { binding: String },
    #[error("Not assignable data unit ({binding}): {found} -> {expected}")]
    TypeMismatch {
        binding: String,
        found: String,
        expected: String,
    },
    #[error("Initialization failed: {message}")]
    Initialization {
        message: String,
        #[source]
        cause: Option<BoxError>,
    },
    #[error("Can't load configuration from {layer}")]
    ConfigurationLoad {
        layer: ConfigurationLayer,
        #[source]
        cause: LoadError,
    },
    #[error("Execution failed: {message}")]
    Execution {
        component: Option<String>,
        message: String,
        #[source]
        cause: Option<BoxError>,
    },
    #[error("Resolution failed")]
    Resolution(#[from] QueryError),
}

impl ComponentError {
    pub fn initialization(message: impl Into<String>) -> Self {
        ComponentError::Initialization {
            message: message.into(),
            cause: None,
        }
    }

    pub fn execution(component: Option<&str>, message: impl Into<String>) -> Self {
        ComponentError::Execution {
            component: component.map(str::to_string),
            message: message.into(),
            cause: None,
        }
    }

    /// Component the error is attributed to, when known.
    pub fn component(&self) -> Option<&str> {
        match self {
            ComponentError::Execution { component, .. } => component.as_deref(),
            _ => None,
        }
    }
}
