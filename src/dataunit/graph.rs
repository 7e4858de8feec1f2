use std::sync::Arc;

use parking_lot::RwLock;

use crate::component::DataUnit;
use crate::rdf::{MemoryStore, Quad, QueryError, Row, SelectQuery, SparqlSelect};

/// A channel carrying RDF data, held in memory and queryable.
pub struct GraphDataUnit {
    iri: String,
    binding: String,
    store: RwLock<MemoryStore>,
}

impl GraphDataUnit {
    pub fn new(iri: impl Into<String>, binding: impl Into<String>) -> Self {
        Self {
            iri: iri.into(),
            binding: binding.into(),
            store: RwLock::new(MemoryStore::new()),
        }
    }

    pub fn with_quads(mut self, quads: impl IntoIterator<Item = Quad>) -> Self {
        self.store.get_mut().extend(quads);
        self
    }

    pub fn insert(&self, quad: Quad) {
        self.store.write().insert(quad);
    }

    pub fn extend(&self, quads: impl IntoIterator<Item = Quad>) {
        self.store.write().extend(quads);
    }

    /// Snapshot of the stored quads.
    pub fn quads(&self) -> Vec<Quad> {
        self.store.read().quads().to_vec()
    }

    pub fn len(&self) -> usize {
        self.store.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.read().is_empty()
    }
}

impl SparqlSelect for GraphDataUnit {
    fn select(&self, query: &SelectQuery) -> Result<Vec<Row>, QueryError> {
        self.store.read().select(query)
    }
}

impl DataUnit for GraphDataUnit {
    fn iri(&self) -> &str {
        &self.iri
    }

    fn binding(&self) -> &str {
        &self.binding
    }

    fn kind(&self) -> &'static str {
        "graph"
    }

    fn as_sparql_select(self: Arc<Self>) -> Option<Arc<dyn SparqlSelect>> {
        Some(self)
    }
}
