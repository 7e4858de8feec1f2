use std::collections::HashSet;
use std::sync::Arc;

use super::registry::TemplateRegistry;
use super::types::Template;
use crate::error::TemplateError;
use crate::rdf::Quad;

/// Chains longer than this are treated as broken.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Configuration fragment contributed by one template of a chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateConfig {
    pub template: String,
    pub quads: Vec<Quad>,
}

/// Walks template chains from a template towards its concrete root.
pub struct TemplateHierarchy<'a> {
    registry: &'a dyn TemplateRegistry,
    max_depth: usize,
}

impl<'a> TemplateHierarchy<'a> {
    pub fn new(registry: &'a dyn TemplateRegistry) -> Self {
        Self {
            registry,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Templates on the chain starting at `iri`, nearest first.
    ///
    /// Reference templates are always included; the concrete template ending
    /// the chain only with `include_terminal`. A missing parent or a revisited
    /// template ends the walk with a warning. An unknown `iri` yields nothing.
    pub fn ancestors(&self, iri: &str, include_terminal: bool) -> Vec<Arc<Template>> {
        let mut result = Vec::new();
        let mut visited = HashSet::new();
        let mut current = self.registry.template(iri);
        while let Some(template) = current {
            if !visited.insert(template.iri().to_string()) {
                tracing::warn!(template = %iri, at = %template.iri(), "Cycle in template chain");
                break;
            }
            if visited.len() > self.max_depth {
                tracing::warn!(template = %iri, limit = self.max_depth, "Template chain too deep");
                break;
            }
            let Some(parent) = template.parent().map(str::to_string) else {
                if include_terminal {
                    result.push(template);
                }
                break;
            };
            result.push(template);
            current = self.registry.template(&parent);
            if current.is_none() {
                tracing::warn!(template = %iri, missing = %parent, "Dangling template reference");
            }
        }
        result
    }

    /// The concrete template that ends the chain of `iri`.
    pub fn terminal(&self, iri: &str) -> Result<Arc<Template>, TemplateError> {
        self.chain(iri)?
            .pop()
            .ok_or_else(|| TemplateError::NotFound(iri.to_string()))
    }

    /// Configuration fragments in the order they apply as layers: the
    /// concrete template first, `iri` itself last.
    pub fn configuration_chain(&self, iri: &str) -> Result<Vec<TemplateConfig>, TemplateError> {
        Ok(self
            .chain(iri)?
            .into_iter()
            .rev()
            .map(|template| TemplateConfig {
                template: template.iri().to_string(),
                quads: template.graphs().config.clone(),
            })
            .collect())
    }

    /// Full chain from `iri` to the concrete template, failing on anything
    /// that does not end in one.
    fn chain(&self, iri: &str) -> Result<Vec<Arc<Template>>, TemplateError> {
        let mut chain: Vec<Arc<Template>> = Vec::new();
        let mut visited = HashSet::new();
        let mut current = self
            .registry
            .template(iri)
            .ok_or_else(|| TemplateError::NotFound(iri.to_string()))?;
        loop {
            if !visited.insert(current.iri().to_string()) {
                return Err(TemplateError::CycleDetected(current.iri().to_string()));
            }
            if visited.len() > self.max_depth {
                return Err(TemplateError::DepthExceeded {
                    template: iri.to_string(),
                    limit: self.max_depth,
                });
            }
            let parent = current.parent().map(str::to_string);
            chain.push(current);
            let Some(parent) = parent else {
                return Ok(chain);
            };
            current = self.registry.template(&parent).ok_or_else(|| {
                TemplateError::BrokenChain {
                    template: chain
                        .last()
                        .map(|template| template.iri().to_string())
                        .unwrap_or_default(),
                    missing: parent.clone(),
                }
            })?;
        }
    }
}
