use std::collections::HashMap;
use std::path::{Path, PathBuf};

use graphetl_rdf::SparqlSelect;

use crate::error::LoadError;
use crate::rdf::vocabulary::{execution_type, lp};
use crate::rdf::{property_values, resource_properties};

/// How the scheduler should treat a component in this run.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExecutionType {
    /// Run the component's logic.
    Execute,
    /// Reuse outputs of a previous execution.
    Map,
    /// Do not run; mark as skipped.
    Skip,
    /// An execution type IRI the engine does not know.
    Unrecognized(String),
}

impl ExecutionType {
    pub fn from_iri(iri: &str) -> Self {
        match iri {
            execution_type::EXECUTE => ExecutionType::Execute,
            execution_type::MAP => ExecutionType::Map,
            execution_type::SKIP => ExecutionType::Skip,
            other => ExecutionType::Unrecognized(other.to_string()),
        }
    }
}

/// Where one configuration layer lives. `None` fields default to the
/// component's own resource and the definition graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigurationReference {
    pub resource: Option<String>,
    pub graph: Option<String>,
}

/// A component node of the pipeline graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentDescriptor {
    pub iri: String,
    pub execution_type: ExecutionType,
    pub configurations: Vec<ConfigurationReference>,
    pub working_directory: Option<PathBuf>,
}

impl ComponentDescriptor {
    pub fn new(iri: impl Into<String>, execution_type: ExecutionType) -> Self {
        Self {
            iri: iri.into(),
            execution_type,
            configurations: Vec::new(),
            working_directory: None,
        }
    }

    pub fn with_configuration(mut self, reference: ConfigurationReference) -> Self {
        self.configurations.push(reference);
        self
    }

    pub fn with_working_directory(mut self, path: impl Into<PathBuf>) -> Self {
        self.working_directory = Some(path.into());
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct PipelineDefinition {
    pub iri: String,
    /// Graph holding the pipeline definition.
    pub graph: String,
    components: HashMap<String, ComponentDescriptor>,
}

impl PipelineDefinition {
    pub fn new(iri: impl Into<String>, graph: impl Into<String>) -> Self {
        Self {
            iri: iri.into(),
            graph: graph.into(),
            components: HashMap::new(),
        }
    }

    pub fn add_component(&mut self, descriptor: ComponentDescriptor) {
        self.components.insert(descriptor.iri.clone(), descriptor);
    }

    pub fn component(&self, iri: &str) -> Option<&ComponentDescriptor> {
        self.components.get(iri)
    }

    pub fn components(&self) -> impl Iterator<Item = &ComponentDescriptor> {
        self.components.values()
    }

    /// Read the pipeline `iri` from `graph` of `source`.
    ///
    /// Components without an execution type are executed. Configuration
    /// references are ordered by `lp:order`. A component without an explicit
    /// working directory gets one under `working_root`, when given.
    pub fn load(
        source: &dyn SparqlSelect,
        iri: &str,
        graph: &str,
        working_root: Option<&Path>,
    ) -> Result<Self, LoadError> {
        let mut definition = PipelineDefinition::new(iri, graph);
        for component in property_values(source, Some(graph), iri, lp::HAS_COMPONENT)? {
            let execution_type = property_values(source, Some(graph), &component, lp::EXECUTION_TYPE)?
                .first()
                .map(|value| ExecutionType::from_iri(value))
                .unwrap_or(ExecutionType::Execute);
            let mut descriptor = ComponentDescriptor::new(component.as_str(), execution_type);
            descriptor.configurations = load_references(source, graph, &component)?;
            descriptor.working_directory =
                property_values(source, Some(graph), &component, lp::WORKING_DIRECTORY)?
                    .first()
                    .map(PathBuf::from)
                    .or_else(|| working_root.map(|root| root.join(directory_name(&component))));
            definition.add_component(descriptor);
        }
        tracing::debug!(
            pipeline = %iri,
            components = definition.components.len(),
            "Loaded pipeline definition"
        );
        Ok(definition)
    }
}

fn load_references(
    source: &dyn SparqlSelect,
    graph: &str,
    component: &str,
) -> Result<Vec<ConfigurationReference>, LoadError> {
    let mut ordered = Vec::new();
    for node in property_values(source, Some(graph), component, lp::CONFIGURATION)? {
        let mut order = None;
        let mut reference = ConfigurationReference::default();
        for (property, value) in resource_properties(source, Some(graph), &node)? {
            match property.as_str() {
                lp::ORDER => {
                    order = Some(value.parse::<i64>().map_err(|_| {
                        LoadError::invalid_value(lp::ORDER, value.as_str(), "expected integer")
                    })?)
                }
                lp::CONFIGURATION_GRAPH => reference.graph = Some(value),
                lp::CONFIGURATION_RESOURCE => reference.resource = Some(value),
                _ => {}
            }
        }
        let order = order.ok_or_else(|| LoadError::MissingProperty {
            resource: node.clone(),
            property: lp::ORDER.to_string(),
        })?;
        ordered.push((order, reference));
    }
    ordered.sort_by_key(|(order, _)| *order);
    Ok(ordered.into_iter().map(|(_, reference)| reference).collect())
}

/// File-system safe directory name for a component IRI.
fn directory_name(iri: &str) -> String {
    iri.chars()
        .map(|ch| if ch.is_ascii_alphanumeric() { ch } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::{MemoryStore, Quad, Term};

    const PIPELINE: &str = "http://ex/pipeline/1";
    const GRAPH: &str = "http://ex/pipeline/1/graph";

    fn quad(s: &str, p: &str, o: Term) -> Quad {
        Quad::new(Term::iri(s), p, o, Some(GRAPH))
    }

    fn store() -> MemoryStore {
        MemoryStore::from_quads([
            quad(PIPELINE, lp::HAS_COMPONENT, Term::iri("http://ex/c/1")),
            quad(PIPELINE, lp::HAS_COMPONENT, Term::iri("http://ex/c/2")),
            quad("http://ex/c/1", lp::EXECUTION_TYPE, Term::iri(execution_type::SKIP)),
            quad("http://ex/c/1", lp::CONFIGURATION, Term::iri("http://ex/c/1/cfg/b")),
            quad("http://ex/c/1", lp::CONFIGURATION, Term::iri("http://ex/c/1/cfg/a")),
            quad("http://ex/c/1/cfg/a", lp::ORDER, Term::literal("1")),
            quad("http://ex/c/1/cfg/a", lp::CONFIGURATION_GRAPH, Term::iri("http://ex/g/a")),
            quad("http://ex/c/1/cfg/b", lp::ORDER, Term::literal("2")),
            quad("http://ex/c/1/cfg/b", lp::CONFIGURATION_GRAPH, Term::iri("http://ex/g/b")),
            quad("http://ex/c/1/cfg/b", lp::CONFIGURATION_RESOURCE, Term::iri("http://ex/cfg")),
            quad("http://ex/c/2", lp::WORKING_DIRECTORY, Term::literal("/tmp/work/c2")),
        ])
    }

    #[test]
    fn test_execution_type_from_iri() {
        assert_eq!(ExecutionType::from_iri(execution_type::EXECUTE), ExecutionType::Execute);
        assert_eq!(ExecutionType::from_iri(execution_type::MAP), ExecutionType::Map);
        assert_eq!(ExecutionType::from_iri(execution_type::SKIP), ExecutionType::Skip);
        assert_eq!(
            ExecutionType::from_iri("http://ex/other"),
            ExecutionType::Unrecognized("http://ex/other".into())
        );
    }

    #[test]
    fn test_load_pipeline() {
        let definition =
            PipelineDefinition::load(&store(), PIPELINE, GRAPH, Some(Path::new("/work"))).unwrap();
        assert_eq!(definition.components().count(), 2);

        let first = definition.component("http://ex/c/1").unwrap();
        assert_eq!(first.execution_type, ExecutionType::Skip);
        assert_eq!(
            first.configurations,
            vec![
                ConfigurationReference {
                    resource: None,
                    graph: Some("http://ex/g/a".into()),
                },
                ConfigurationReference {
                    resource: Some("http://ex/cfg".into()),
                    graph: Some("http://ex/g/b".into()),
                },
            ]
        );
        assert_eq!(
            first.working_directory,
            Some(PathBuf::from("/work/http___ex_c_1"))
        );

        let second = definition.component("http://ex/c/2").unwrap();
        assert_eq!(second.execution_type, ExecutionType::Execute);
        assert!(second.configurations.is_empty());
        assert_eq!(second.working_directory, Some(PathBuf::from("/tmp/work/c2")));
    }

    #[test]
    fn test_reference_without_order_fails() {
        let mut store = store();
        store.insert(quad("http://ex/c/2", lp::CONFIGURATION, Term::iri("http://ex/c/2/cfg")));
        let err = PipelineDefinition::load(&store, PIPELINE, GRAPH, None).unwrap_err();
        assert!(matches!(err, LoadError::MissingProperty { .. }));
    }

    #[test]
    fn test_unknown_component_lookup() {
        let definition = PipelineDefinition::load(&store(), PIPELINE, GRAPH, None).unwrap();
        assert!(definition.component("http://ex/c/404").is_none());
    }
}
