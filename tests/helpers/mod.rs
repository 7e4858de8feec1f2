#![allow(dead_code)]

use std::sync::Arc;

use graphetl::component::{ComponentContext, DataUnit};
use graphetl::configuration::ConfigurationDescription;
use graphetl::dataunit::GraphDataUnit;
use graphetl::error::LoadError;
use graphetl::pipeline::{ComponentDescriptor, ConfigurationReference, ExecutionType};
use graphetl::rdf::{MemoryStore, Quad, RdfLoadable, Term, RDF_TYPE};

pub const COMPONENT: &str = "http://localhost/pipeline/1/component/1";
pub const DEFINITION_GRAPH: &str = "http://localhost/pipeline/1/graph";
pub const DESCRIPTION_GRAPH: &str = "http://localhost/descriptions";
pub const CONFIG_TYPE: &str = "http://localhost/ontology/TransformerConfiguration";
pub const SIZE: &str = "http://localhost/ontology/size";
pub const NAME: &str = "http://localhost/ontology/name";

/// Configuration used by the test components.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TransformerConfiguration {
    pub size: Option<i64>,
    pub name: Option<String>,
}

impl RdfLoadable for TransformerConfiguration {
    fn rdf_type(&self) -> Option<&str> {
        Some(CONFIG_TYPE)
    }

    fn load(&mut self, predicate: &str, value: &str) -> Result<(), LoadError> {
        match predicate {
            SIZE => {
                self.size = Some(
                    value
                        .parse()
                        .map_err(|_| LoadError::invalid_value(predicate, value, "expected integer"))?,
                )
            }
            NAME => self.name = Some(value.to_string()),
            _ => {}
        }
        Ok(())
    }
}

/// Typed configuration resource asserting `values`.
pub fn config_resource(resource: &str, graph: Option<&str>, values: &[(&str, &str)]) -> Vec<Quad> {
    let mut quads = vec![Quad::new(
        Term::iri(resource),
        RDF_TYPE,
        Term::iri(CONFIG_TYPE),
        graph,
    )];
    quads.extend(values.iter().map(|(property, value)| {
        Quad::new(Term::iri(resource), *property, Term::literal(*value), graph)
    }));
    quads
}

/// Definition store holding the configuration description with `members`.
pub fn definition_with(members: &[(&str, &str)]) -> MemoryStore {
    let mut description =
        ConfigurationDescription::new("http://localhost/descriptions/transformer", CONFIG_TYPE);
    for (property, control) in members {
        description = description.member(*property, *control);
    }
    MemoryStore::from_quads(description.to_quads(Some(DESCRIPTION_GRAPH)))
}

pub fn layer(graph: &str) -> ConfigurationReference {
    ConfigurationReference {
        resource: None,
        graph: Some(graph.to_string()),
    }
}

pub fn context(definition: MemoryStore, layers: Vec<ConfigurationReference>) -> ComponentContext {
    let mut descriptor = ComponentDescriptor::new(COMPONENT, ExecutionType::Execute);
    descriptor.configurations = layers;
    ComponentContext::new(descriptor, Arc::new(definition), DEFINITION_GRAPH)
}

pub fn graph_unit(iri: &str, binding: &str) -> Arc<GraphDataUnit> {
    Arc::new(GraphDataUnit::new(iri, binding))
}

pub fn shared(unit: Arc<GraphDataUnit>) -> Arc<dyn DataUnit> {
    unit
}
