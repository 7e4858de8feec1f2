use std::any::Any;
use std::sync::Arc;

use graphetl_rdf::SparqlSelect;

/// Conversion to `Arc<dyn Any>` so shared data units can be downcast to their
/// concrete type.
pub trait IntoAnyArc {
    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<T: Any + Send + Sync> IntoAnyArc for T {
    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// A data channel handed to a component by the scheduler.
///
/// Direction is not part of the unit; it follows from the port that binds it.
pub trait DataUnit: IntoAnyArc + Send + Sync {
    /// Resource identifying this unit within the execution.
    fn iri(&self) -> &str;

    /// Logical binding identifier matched against port declarations.
    fn binding(&self) -> &str;

    /// Human readable kind, used in type mismatch reports.
    fn kind(&self) -> &'static str;

    /// Query access to the unit's content, for units that hold graph data.
    fn as_sparql_select(self: Arc<Self>) -> Option<Arc<dyn SparqlSelect>> {
        None
    }
}

/// Downcast a shared unit to its concrete type.
pub fn downcast_unit<T: DataUnit + 'static>(unit: Arc<dyn DataUnit>) -> Option<Arc<T>> {
    unit.into_any_arc().downcast::<T>().ok()
}
