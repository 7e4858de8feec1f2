use graphetl_rdf::SparqlSelect;

use super::merge::MergeResolver;
use crate::component::slots::ConfigurationSlot;
use crate::error::{ComponentError, ComponentResult, ConfigurationLayer, LoadError};
use crate::pipeline::ConfigurationReference;
use crate::rdf::{populate, resolve_resource, RdfLoadable};

/// Builds the configuration of one component instance from its layers.
pub struct ConfigurationLoader<'a> {
    definition: &'a dyn SparqlSelect,
    definition_graph: &'a str,
    component: &'a str,
}

impl<'a> ConfigurationLoader<'a> {
    pub fn new(
        definition: &'a dyn SparqlSelect,
        definition_graph: &'a str,
        component: &'a str,
    ) -> Self {
        Self {
            definition,
            definition_graph,
            component,
        }
    }

    /// Create a fresh value for `slot`, load every layer into it and assign
    /// it to the component.
    pub fn load_slot<C: 'static>(
        &self,
        component: &mut C,
        slot: &ConfigurationSlot<C>,
        layers: &[ConfigurationReference],
        runtime: Option<&dyn SparqlSelect>,
    ) -> ComponentResult<()> {
        let mut value = slot.create()?;
        self.load(value.as_mut(), layers, runtime)?;
        slot.assign(component, value)
    }

    /// Apply the static layers in order, then the runtime layer. A later layer
    /// overwrites what an earlier one set, unless its policy suppresses the
    /// property.
    pub fn load(
        &self,
        target: &mut dyn RdfLoadable,
        layers: &[ConfigurationReference],
        runtime: Option<&dyn SparqlSelect>,
    ) -> ComponentResult<()> {
        let resolver = MergeResolver::new(self.definition);
        for (index, layer) in layers.iter().enumerate() {
            let graph = layer.graph.as_deref().unwrap_or(self.definition_graph);
            self.apply(
                &resolver,
                target,
                self.definition,
                Some(graph),
                layer.resource.as_deref(),
            )
            .map_err(|cause| ComponentError::ConfigurationLoad {
                layer: ConfigurationLayer::Static {
                    index,
                    graph: graph.to_string(),
                    resource: layer.resource.clone(),
                },
                cause,
            })?;
        }
        if let Some(runtime) = runtime {
            // Runtime configuration lives in its own graph; no scoping.
            self.apply(&resolver, target, runtime, None, None)
                .map_err(|cause| ComponentError::ConfigurationLoad {
                    layer: ConfigurationLayer::Runtime,
                    cause,
                })?;
        }
        Ok(())
    }

    fn apply(
        &self,
        resolver: &MergeResolver<'_>,
        target: &mut dyn RdfLoadable,
        source: &dyn SparqlSelect,
        graph: Option<&str>,
        resource: Option<&str>,
    ) -> Result<usize, LoadError> {
        let resource = match resource {
            Some(resource) => resource.to_string(),
            None => resolve_resource(target, source, graph)?
                .unwrap_or_else(|| self.component.to_string()),
        };
        let policy = resolver.resolve_in(source, &resource, graph)?;
        let applied = populate(target, source, graph, Some(&resource), &policy)?;
        tracing::debug!(
            component = %self.component,
            resource = %resource,
            applied,
            "Applied configuration layer"
        );
        Ok(applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::ConfigurationDescription;
    use crate::rdf::vocabulary::config;
    use crate::rdf::{MemoryStore, Quad, QueryError, Row, SelectQuery, Term, RDF_TYPE};

    const COMPONENT: &str = "http://ex/pipeline/component/1";
    const DEFINITION: &str = "http://ex/pipeline";
    const CONFIG_TYPE: &str = "http://ex/Config";
    const SIZE: &str = "http://ex/size";
    const NAME: &str = "http://ex/name";

    #[derive(Debug, Default)]
    struct Sample {
        size: Option<i64>,
        name: Option<String>,
    }

    impl RdfLoadable for Sample {
        fn rdf_type(&self) -> Option<&str> {
            Some(CONFIG_TYPE)
        }

        fn load(&mut self, predicate: &str, value: &str) -> Result<(), LoadError> {
            match predicate {
                SIZE => {
                    self.size = Some(value.parse().map_err(|_| {
                        LoadError::invalid_value(predicate, value, "expected integer")
                    })?)
                }
                NAME => self.name = Some(value.to_string()),
                _ => {}
            }
            Ok(())
        }
    }

    fn config_quads(resource: &str, graph: Option<&str>, values: &[(&str, &str)]) -> Vec<Quad> {
        let mut quads = vec![Quad::new(
            Term::iri(resource),
            RDF_TYPE,
            Term::iri(CONFIG_TYPE),
            graph,
        )];
        for (property, value) in values {
            quads.push(Quad::new(Term::iri(resource), *property, Term::literal(*value), graph));
        }
        quads
    }

    fn definition(members: &[(&str, &str)]) -> MemoryStore {
        let mut description = ConfigurationDescription::new("http://ex/desc", CONFIG_TYPE);
        for (property, control) in members {
            description = description.member(*property, *control);
        }
        MemoryStore::from_quads(description.to_quads(Some("http://ex/descriptions")))
    }

    fn layer(graph: &str) -> ConfigurationReference {
        ConfigurationReference {
            resource: None,
            graph: Some(graph.to_string()),
        }
    }

    #[test]
    fn test_later_static_layer_wins() {
        let mut store = definition(&[]);
        store.extend(config_quads("http://ex/a", Some("http://ex/g1"), &[(SIZE, "1"), (NAME, "first")]));
        store.extend(config_quads("http://ex/b", Some("http://ex/g2"), &[(SIZE, "2")]));
        let loader = ConfigurationLoader::new(&store, DEFINITION, COMPONENT);
        let mut sample = Sample::default();
        loader
            .load(&mut sample, &[layer("http://ex/g1"), layer("http://ex/g2")], None)
            .unwrap();
        assert_eq!(sample.size, Some(2));
        assert_eq!(sample.name.as_deref(), Some("first"));
    }

    #[test]
    fn test_runtime_layer_applies_last() {
        let mut store = definition(&[]);
        store.extend(config_quads("http://ex/a", Some("http://ex/g1"), &[(SIZE, "1")]));
        let runtime = MemoryStore::from_quads(config_quads("http://ex/rt", Some("http://ex/rt-graph"), &[(SIZE, "9")]));
        let loader = ConfigurationLoader::new(&store, DEFINITION, COMPONENT);
        let mut sample = Sample::default();
        loader
            .load(&mut sample, &[layer("http://ex/g1")], Some(&runtime))
            .unwrap();
        assert_eq!(sample.size, Some(9));
    }

    #[test]
    fn test_forced_marker_suppresses_static_and_runtime() {
        let mut store = definition(&[(SIZE, config::FORCED)]);
        store.extend(config_quads("http://ex/a", Some("http://ex/g1"), &[(SIZE, "5"), (NAME, "kept")]));
        let runtime = MemoryStore::from_quads(config_quads("http://ex/rt", None, &[(SIZE, "7")]));
        let loader = ConfigurationLoader::new(&store, DEFINITION, COMPONENT);
        let mut sample = Sample::default();
        loader
            .load(&mut sample, &[layer("http://ex/g1")], Some(&runtime))
            .unwrap();
        assert_eq!(sample.size, None);
        assert_eq!(sample.name.as_deref(), Some("kept"));
    }

    #[test]
    fn test_missing_graph_defaults_to_definition_graph() {
        let mut store = definition(&[]);
        store.extend(config_quads("http://ex/a", Some(DEFINITION), &[(SIZE, "3")]));
        let loader = ConfigurationLoader::new(&store, DEFINITION, COMPONENT);
        let mut sample = Sample::default();
        loader
            .load(&mut sample, &[ConfigurationReference::default()], None)
            .unwrap();
        assert_eq!(sample.size, Some(3));
    }

    #[test]
    fn test_untyped_layer_falls_back_to_component_resource() {
        let mut store = definition(&[]);
        store.insert(Quad::new(Term::iri(COMPONENT), NAME, Term::literal("own"), Some("http://ex/g1")));
        let loader = ConfigurationLoader::new(&store, DEFINITION, COMPONENT);
        let mut sample = Sample::default();
        loader.load(&mut sample, &[layer("http://ex/g1")], None).unwrap();
        assert_eq!(sample.name.as_deref(), Some("own"));
    }

    #[test]
    fn test_explicit_resource() {
        let mut store = definition(&[]);
        store.extend(config_quads("http://ex/a", Some("http://ex/g1"), &[(SIZE, "1")]));
        store.extend(config_quads("http://ex/b", Some("http://ex/g1"), &[(SIZE, "2")]));
        let loader = ConfigurationLoader::new(&store, DEFINITION, COMPONENT);
        let mut sample = Sample::default();
        let reference = ConfigurationReference {
            resource: Some("http://ex/b".into()),
            graph: Some("http://ex/g1".into()),
        };
        loader.load(&mut sample, &[reference], None).unwrap();
        assert_eq!(sample.size, Some(2));
    }

    #[test]
    fn test_failing_layer_is_identified() {
        let mut store = definition(&[]);
        store.extend(config_quads("http://ex/a", Some("http://ex/g1"), &[(SIZE, "1")]));
        store.extend(config_quads("http://ex/b", Some("http://ex/g2"), &[(SIZE, "two")]));
        let loader = ConfigurationLoader::new(&store, DEFINITION, COMPONENT);
        let mut sample = Sample::default();
        let err = loader
            .load(&mut sample, &[layer("http://ex/g1"), layer("http://ex/g2")], None)
            .unwrap_err();
        match err {
            ComponentError::ConfigurationLoad {
                layer: ConfigurationLayer::Static { index, .. },
                cause: LoadError::InvalidValue { .. },
            } => assert_eq!(index, 1),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_runtime_query_failure_is_a_load_error() {
        struct Offline;
        impl SparqlSelect for Offline {
            fn select(&self, _: &SelectQuery) -> Result<Vec<Row>, QueryError> {
                Err(QueryError::Backend("offline".into()))
            }
        }
        let store = definition(&[]);
        let loader = ConfigurationLoader::new(&store, DEFINITION, COMPONENT);
        let mut sample = Sample::default();
        let err = loader.load(&mut sample, &[], Some(&Offline)).unwrap_err();
        assert!(matches!(
            err,
            ComponentError::ConfigurationLoad {
                layer: ConfigurationLayer::Runtime,
                cause: LoadError::Resolution(_),
            }
        ));
    }

    #[test]
    fn test_load_slot_assigns_loaded_value() {
        #[derive(Default)]
        struct Host {
            sample: Option<Sample>,
        }

        let mut store = definition(&[]);
        store.extend(config_quads("http://ex/a", Some("http://ex/g1"), &[(SIZE, "4")]));
        let loader = ConfigurationLoader::new(&store, DEFINITION, COMPONENT);
        let slot = ConfigurationSlot::<Host>::with_default("sample", |c, value: Sample| {
            c.sample = Some(value)
        });
        let mut host = Host::default();
        loader
            .load_slot(&mut host, &slot, &[layer("http://ex/g1")], None)
            .unwrap();
        assert_eq!(host.sample.and_then(|sample| sample.size), Some(4));
    }
}
