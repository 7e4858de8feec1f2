//! Graph-data substrate shared by the graphetl crates.
//!
//! - [`Term`] / [`Quad`]: the data model for RDF assertions.
//! - [`SelectQuery`]: a conjunctive SELECT query over named graphs, renderable
//!   as SPARQL text for external engines.
//! - [`SparqlSelect`]: the boundary trait every query backend implements.
//! - [`MemoryStore`]: an in-memory backend evaluating basic graph patterns.

pub mod query;
pub mod select;
pub mod store;
pub mod term;

pub use query::{GraphPattern, QuadPattern, SelectQuery, TermPattern};
pub use select::{QueryError, Row, SparqlSelect};
pub use store::MemoryStore;
pub use term::{Quad, Term};

/// `rdf:type`
pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
