use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use uuid::Uuid;

use super::types::{ReferenceTemplate, Template, TemplateGraphs};
use crate::error::TemplateError;
use crate::rdf::vocabulary::lp;
use crate::rdf::{Quad, Term, RDF_TYPE};

/// Store that owns the authoritative set of templates.
pub trait TemplateRegistry: Send + Sync {
    fn template(&self, iri: &str) -> Option<Arc<Template>>;

    fn templates(&self) -> Vec<Arc<Template>>;

    /// Create a reference template from a component instance graph and the
    /// configuration it should carry.
    fn create(
        &self,
        template: &[Quad],
        configuration: &[Quad],
    ) -> Result<Arc<Template>, TemplateError>;
}

/// Registry held in memory; reads run concurrently, creation is serialized
/// by the write lock.
pub struct InMemoryTemplateRegistry {
    base_iri: String,
    templates: RwLock<HashMap<String, Arc<Template>>>,
}

impl InMemoryTemplateRegistry {
    /// `base_iri` prefixes the IRIs of created templates.
    pub fn new(base_iri: impl Into<String>) -> Self {
        Self {
            base_iri: base_iri.into(),
            templates: RwLock::new(HashMap::new()),
        }
    }

    pub fn insert(&self, template: Template) -> Arc<Template> {
        let template = Arc::new(template);
        self.templates
            .write()
            .insert(template.iri().to_string(), template.clone());
        template
    }

    pub fn len(&self) -> usize {
        self.templates.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.read().is_empty()
    }
}

impl TemplateRegistry for InMemoryTemplateRegistry {
    fn template(&self, iri: &str) -> Option<Arc<Template>> {
        self.templates.read().get(iri).cloned()
    }

    fn templates(&self) -> Vec<Arc<Template>> {
        let mut templates: Vec<_> = self.templates.read().values().cloned().collect();
        templates.sort_by(|left, right| left.iri().cmp(right.iri()));
        templates
    }

    fn create(
        &self,
        template: &[Quad],
        configuration: &[Quad],
    ) -> Result<Arc<Template>, TemplateError> {
        let mut links = template.iter().filter(|quad| quad.predicate == lp::HAS_TEMPLATE);
        let link = links
            .next()
            .ok_or_else(|| TemplateError::InvalidTemplate("no parent template reference".into()))?;
        if links.next().is_some() {
            return Err(TemplateError::InvalidTemplate(
                "more than one parent template reference".into(),
            ));
        }
        let parent = link.object.lexical().to_string();
        let instance = link.subject.clone();

        let mut templates = self.templates.write();
        if !templates.contains_key(&parent) {
            return Err(TemplateError::NotFound(parent));
        }
        let iri = format!("{}/{}", self.base_iri.trim_end_matches('/'), Uuid::new_v4());
        let subject = Term::iri(iri.as_str());
        let mut definition: Vec<Quad> = template
            .iter()
            .filter(|quad| quad.predicate != RDF_TYPE)
            .map(|quad| {
                let mut quad = quad.in_graph(Some(&iri));
                if quad.subject == instance {
                    quad.subject = subject.clone();
                }
                quad
            })
            .collect();
        definition.push(Quad::new(
            subject.clone(),
            RDF_TYPE,
            Term::iri(lp::TEMPLATE),
            Some(&iri),
        ));
        let config: Vec<Quad> = configuration
            .iter()
            .map(|quad| quad.in_graph(Some(&format!("{}/configuration", iri))))
            .collect();

        let created = Arc::new(Template::Reference(ReferenceTemplate {
            iri: iri.clone(),
            parent: parent.clone(),
            graphs: TemplateGraphs {
                interface: definition.clone(),
                definition,
                config_for_instance: config.clone(),
                config,
                config_description: Vec::new(),
            },
        }));
        templates.insert(iri.clone(), created.clone());
        tracing::info!(template = %iri, parent = %parent, "Template created");
        Ok(created)
    }
}
