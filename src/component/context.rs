use std::sync::Arc;

use crate::event_bus::EventSender;
use crate::pipeline::ComponentDescriptor;
use crate::rdf::SparqlSelect;

/// Static metadata of the bundle a component type ships in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BundleInformation {
    /// Code modules whose log output belongs to the component.
    pub packages: Vec<String>,
}

/// Everything a lifecycle needs beyond the component itself.
#[derive(Clone)]
pub struct ComponentContext {
    pub descriptor: ComponentDescriptor,
    /// Source holding the pipeline definition.
    pub definition: Arc<dyn SparqlSelect>,
    pub definition_graph: String,
    pub bundle: BundleInformation,
    pub events: Option<EventSender>,
}

impl ComponentContext {
    pub fn new(
        descriptor: ComponentDescriptor,
        definition: Arc<dyn SparqlSelect>,
        definition_graph: impl Into<String>,
    ) -> Self {
        Self {
            descriptor,
            definition,
            definition_graph: definition_graph.into(),
            bundle: BundleInformation::default(),
            events: None,
        }
    }

    pub fn with_bundle(mut self, bundle: BundleInformation) -> Self {
        self.bundle = bundle;
        self
    }

    pub fn with_events(mut self, events: EventSender) -> Self {
        self.events = Some(events);
        self
    }

    pub fn component(&self) -> &str {
        &self.descriptor.iri
    }
}
