//! Structured loader: reads the property/value assertions of one resource
//! into a value implementing [`RdfLoadable`], gated by a [`MergePolicy`].

use std::any::Any;

use graphetl_rdf::{GraphPattern, SelectQuery, SparqlSelect, TermPattern, RDF_TYPE};

use crate::configuration::MergePolicy;
use crate::error::LoadError;

/// Conversion to `Box<dyn Any>` so erased values can be downcast back.
pub trait IntoAny {
    fn into_any(self: Box<Self>) -> Box<dyn Any + Send>;
}

impl<T: Any + Send> IntoAny for T {
    fn into_any(self: Box<Self>) -> Box<dyn Any + Send> {
        self
    }
}

/// A value that can be filled from graph assertions, one property at a time.
pub trait RdfLoadable: IntoAny + Send {
    /// RDF type used to locate the resource when none is named explicitly.
    fn rdf_type(&self) -> Option<&str> {
        None
    }

    /// Apply one asserted value. Unknown predicates should be ignored.
    fn load(&mut self, predicate: &str, value: &str) -> Result<(), LoadError>;
}

/// Find the single resource typed with the target's [`RdfLoadable::rdf_type`].
///
/// Returns `Ok(None)` when the target declares no type or no resource of that
/// type exists.
pub fn resolve_resource(
    target: &dyn RdfLoadable,
    source: &dyn SparqlSelect,
    graph: Option<&str>,
) -> Result<Option<String>, LoadError> {
    let Some(rdf_type) = target.rdf_type() else {
        return Ok(None);
    };
    let query = SelectQuery::new(["resource"]).triple(
        GraphPattern::scoped(graph),
        TermPattern::var("resource"),
        TermPattern::iri(RDF_TYPE),
        TermPattern::iri(rdf_type),
    );
    let mut resources: Vec<String> = source
        .select(&query)?
        .into_iter()
        .filter_map(|mut row| row.remove("resource"))
        .collect();
    resources.sort_unstable();
    resources.dedup();
    match resources.len() {
        0 => Ok(None),
        1 => Ok(resources.pop()),
        count => Err(LoadError::AmbiguousResource {
            rdf_type: rdf_type.to_string(),
            count,
        }),
    }
}

/// Load `resource` (or the typed resource, when `None`) from `graph` into
/// `target`, skipping properties the policy suppresses.
///
/// Returns the number of values applied.
pub fn populate(
    target: &mut dyn RdfLoadable,
    source: &dyn SparqlSelect,
    graph: Option<&str>,
    resource: Option<&str>,
    policy: &MergePolicy,
) -> Result<usize, LoadError> {
    let resource = match resource {
        Some(resource) => resource.to_string(),
        None => resolve_resource(target, source, graph)?.ok_or(LoadError::ResourceNotFound)?,
    };
    let mut applied = 0;
    for (property, value) in crate::rdf::resource_properties(source, graph, &resource)? {
        if property == RDF_TYPE || !policy.should_load(&property) {
            continue;
        }
        target.load(&property, &value)?;
        applied += 1;
    }
    tracing::trace!(resource = %resource, applied, "Loaded resource properties");
    Ok(applied)
}
