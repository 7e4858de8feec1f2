//! Graph-data plumbing used by the core: the shared substrate re-exported from
//! `graphetl-rdf`, the vocabulary the engine understands, and the structured
//! loader that reads a resource's assertions into typed values.

pub mod loader;
pub mod vocabulary;

pub use graphetl_rdf::{
    GraphPattern, MemoryStore, Quad, QuadPattern, QueryError, Row, SelectQuery, SparqlSelect,
    Term, TermPattern, RDF_TYPE,
};
pub use loader::{populate, resolve_resource, IntoAny, RdfLoadable};

/// Query all `?property ?value` pairs asserted on `resource`.
pub(crate) fn resource_properties(
    source: &dyn SparqlSelect,
    graph: Option<&str>,
    resource: &str,
) -> Result<Vec<(String, String)>, QueryError> {
    let query = SelectQuery::new(["property", "value"]).triple(
        GraphPattern::scoped(graph),
        TermPattern::iri(resource),
        TermPattern::var("property"),
        TermPattern::var("value"),
    );
    Ok(source
        .select(&query)?
        .into_iter()
        .filter_map(|mut row| Some((row.remove("property")?, row.remove("value")?)))
        .collect())
}

/// Query all values of `predicate` on `resource`.
pub(crate) fn property_values(
    source: &dyn SparqlSelect,
    graph: Option<&str>,
    resource: &str,
    predicate: &str,
) -> Result<Vec<String>, QueryError> {
    let query = SelectQuery::new(["value"]).triple(
        GraphPattern::scoped(graph),
        TermPattern::iri(resource),
        TermPattern::iri(predicate),
        TermPattern::var("value"),
    );
    Ok(source
        .select(&query)?
        .into_iter()
        .filter_map(|mut row| row.remove("value"))
        .collect())
}
