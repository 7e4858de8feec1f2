use std::path::PathBuf;
use std::sync::Arc;

use super::hierarchy::{TemplateHierarchy, DEFAULT_MAX_DEPTH};
use super::registry::TemplateRegistry;
use super::types::Template;
use crate::error::{TemplateError, TemplateResult};
use crate::paths::guarded_join;
use crate::rdf::Quad;

/// Read-only view over a template registry.
pub struct TemplateFacade {
    registry: Arc<dyn TemplateRegistry>,
    max_depth: usize,
}

impl TemplateFacade {
    pub fn new(registry: Arc<dyn TemplateRegistry>) -> Self {
        Self {
            registry,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn hierarchy(&self) -> TemplateHierarchy<'_> {
        TemplateHierarchy::new(self.registry.as_ref()).with_max_depth(self.max_depth)
    }

    /// See [`TemplateHierarchy::ancestors`].
    pub fn template_hierarchy(&self, iri: &str, include_terminal: bool) -> Vec<Arc<Template>> {
        self.hierarchy().ancestors(iri, include_terminal)
    }

    pub fn templates(&self) -> Vec<Arc<Template>> {
        self.registry.templates()
    }

    pub fn template(&self, iri: &str) -> Option<Arc<Template>> {
        self.registry.template(iri)
    }

    /// Interfaces of all templates combined.
    pub fn interfaces(&self) -> Vec<Quad> {
        self.templates()
            .iter()
            .flat_map(|template| template.graphs().interface.iter().cloned())
            .collect()
    }

    pub fn interface(&self, template: &Template) -> Vec<Quad> {
        template.graphs().interface.clone()
    }

    pub fn definition(&self, template: &Template) -> Vec<Quad> {
        template.graphs().definition.clone()
    }

    pub fn config(&self, template: &Template) -> Vec<Quad> {
        template.graphs().config.clone()
    }

    pub fn config_for_instance(&self, template: &Template) -> Vec<Quad> {
        template.graphs().config_for_instance.clone()
    }

    /// Configuration description of `template`. Reference templates without
    /// their own description share the one of their concrete template.
    pub fn config_description(&self, template: &Template) -> TemplateResult<Vec<Quad>> {
        let own = &template.graphs().config_description;
        if !own.is_empty() || template.is_concrete() {
            return Ok(own.clone());
        }
        let terminal = self.hierarchy().terminal(template.iri())?;
        Ok(terminal.graphs().config_description.clone())
    }

    /// `<directory>/dialog/<dialog>/<path>` of a concrete template.
    pub fn dialog_resource(
        &self,
        template: &Template,
        dialog: &str,
        path: &str,
    ) -> TemplateResult<Option<PathBuf>> {
        let Some(directory) = template.directory() else {
            return Ok(None);
        };
        let base = guarded_join(directory, "dialog")
            .and_then(|base| guarded_join(&base, dialog))
            .ok_or_else(|| TemplateError::PathTraversal(dialog.to_string()))?;
        guarded_join(&base, path)
            .map(Some)
            .ok_or_else(|| TemplateError::PathTraversal(path.to_string()))
    }

    /// `<directory>/static/<path>` of a concrete template.
    pub fn static_resource(&self, template: &Template, path: &str) -> TemplateResult<Option<PathBuf>> {
        let Some(directory) = template.directory() else {
            return Ok(None);
        };
        guarded_join(&directory.join("static"), path)
            .map(Some)
            .ok_or_else(|| TemplateError::PathTraversal(path.to_string()))
    }

    pub fn create_template(
        &self,
        template: &[Quad],
        configuration: &[Quad],
    ) -> TemplateResult<Arc<Template>> {
        self.registry.create(template, configuration)
    }
}
