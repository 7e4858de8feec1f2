use std::collections::HashMap;

use graphetl_rdf::{QueryError, SparqlSelect, RDF_TYPE};

use super::description::ConfigurationDescription;
use crate::rdf::vocabulary::config;

/// Per-property load decision for one configuration layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergePolicy {
    controls: HashMap<String, String>,
}

impl MergePolicy {
    pub fn from_entries(controls: HashMap<String, String>) -> Self {
        Self { controls }
    }

    /// `false` only when the property is controlled by an Inherit or Forced
    /// marker.
    pub fn should_load(&self, property: &str) -> bool {
        match self.controls.get(property).map(String::as_str) {
            None => true,
            Some(config::INHERIT) | Some(config::FORCED) => false,
            Some(_) => true,
        }
    }

    pub fn control(&self, property: &str) -> Option<&str> {
        self.controls.get(property).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }
}

/// Computes [`MergePolicy`] values by joining a configuration resource's
/// assertions with the configuration descriptions held by the definition.
pub struct MergeResolver<'a> {
    definition: &'a dyn SparqlSelect,
}

impl<'a> MergeResolver<'a> {
    pub fn new(definition: &'a dyn SparqlSelect) -> Self {
        Self { definition }
    }

    /// Policy for `resource` as asserted in `graph` of the definition.
    pub fn resolve(&self, resource: &str, graph: Option<&str>) -> Result<MergePolicy, QueryError> {
        self.resolve_in(self.definition, resource, graph)
    }

    /// Policy for `resource` as asserted in `graph` of `source`; descriptions
    /// are always read from the definition.
    ///
    /// For every member whose property the resource asserts, the entry is the
    /// value the resource asserts for the member's control predicate, or the
    /// member's control itself when the resource asserts none.
    pub fn resolve_in(
        &self,
        source: &dyn SparqlSelect,
        resource: &str,
        graph: Option<&str>,
    ) -> Result<MergePolicy, QueryError> {
        let mut asserted: HashMap<String, Vec<String>> = HashMap::new();
        for (property, value) in crate::rdf::resource_properties(source, graph, resource)? {
            asserted.entry(property).or_default().push(value);
        }
        let types = asserted.get(RDF_TYPE).cloned().unwrap_or_default();

        let mut controls = HashMap::new();
        for config_type in &types {
            for description in ConfigurationDescription::load_for_type(self.definition, config_type)? {
                for member in description.members {
                    if !asserted.contains_key(&member.property) {
                        continue;
                    }
                    let control = asserted
                        .get(&member.control)
                        .and_then(|values| values.last())
                        .cloned()
                        .unwrap_or(member.control);
                    controls.insert(member.property, control);
                }
            }
        }
        tracing::debug!(
            resource = %resource,
            graph = graph.unwrap_or("*"),
            controlled = controls.len(),
            "Resolved merge policy"
        );
        Ok(MergePolicy { controls })
    }
}
