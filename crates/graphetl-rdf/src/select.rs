use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

use crate::query::SelectQuery;

/// One solution: column name → lexical value.
pub type Row = HashMap<String, String>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Variable ?{0} is projected but never bound by a pattern")]
    UnknownVariable(String),
    #[error("Query backend error: {0}")]
    Backend(String),
}

/// Executes SELECT queries. Implemented by the in-memory store, by graph data
/// units, and by adapters over external engines.
pub trait SparqlSelect: Send + Sync {
    fn select(&self, query: &SelectQuery) -> Result<Vec<Row>, QueryError>;
}

impl<T: SparqlSelect + ?Sized> SparqlSelect for Arc<T> {
    fn select(&self, query: &SelectQuery) -> Result<Vec<Row>, QueryError> {
        (**self).select(query)
    }
}

impl<T: SparqlSelect + ?Sized> SparqlSelect for &T {
    fn select(&self, query: &SelectQuery) -> Result<Vec<Row>, QueryError> {
        (**self).select(query)
    }
}
