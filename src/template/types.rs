use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::rdf::Quad;

/// Graph fragments a template carries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateGraphs {
    pub interface: Vec<Quad>,
    pub definition: Vec<Quad>,
    pub config: Vec<Quad>,
    pub config_for_instance: Vec<Quad>,
    pub config_description: Vec<Quad>,
}

/// A self-contained template with its own storage directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConcreteTemplate {
    pub iri: String,
    pub directory: PathBuf,
    #[serde(default)]
    pub graphs: TemplateGraphs,
}

/// A template that extends a parent, adding its own fragments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceTemplate {
    pub iri: String,
    pub parent: String,
    #[serde(default)]
    pub graphs: TemplateGraphs,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Template {
    Concrete(ConcreteTemplate),
    Reference(ReferenceTemplate),
}

impl Template {
    pub fn iri(&self) -> &str {
        match self {
            Template::Concrete(template) => &template.iri,
            Template::Reference(template) => &template.iri,
        }
    }

    pub fn graphs(&self) -> &TemplateGraphs {
        match self {
            Template::Concrete(template) => &template.graphs,
            Template::Reference(template) => &template.graphs,
        }
    }

    pub fn parent(&self) -> Option<&str> {
        match self {
            Template::Concrete(_) => None,
            Template::Reference(template) => Some(&template.parent),
        }
    }

    /// Storage directory; reference templates have none.
    pub fn directory(&self) -> Option<&Path> {
        match self {
            Template::Concrete(template) => Some(&template.directory),
            Template::Reference(_) => None,
        }
    }

    pub fn is_concrete(&self) -> bool {
        matches!(self, Template::Concrete(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_accessors() {
        let concrete = Template::Concrete(ConcreteTemplate {
            iri: "http://ex/t/c".into(),
            directory: PathBuf::from("/store/c"),
            graphs: TemplateGraphs::default(),
        });
        assert!(concrete.is_concrete());
        assert_eq!(concrete.parent(), None);
        assert_eq!(concrete.directory(), Some(Path::new("/store/c")));

        let reference = Template::Reference(ReferenceTemplate {
            iri: "http://ex/t/r".into(),
            parent: "http://ex/t/c".into(),
            graphs: TemplateGraphs::default(),
        });
        assert_eq!(reference.iri(), "http://ex/t/r");
        assert_eq!(reference.parent(), Some("http://ex/t/c"));
        assert_eq!(reference.directory(), None);
    }

    #[test]
    fn test_template_deserializes_from_json() {
        let template: Template = serde_json::from_str(
            r#"{"kind": "reference", "iri": "http://ex/t/r", "parent": "http://ex/t/c"}"#,
        )
        .unwrap();
        assert_eq!(template.parent(), Some("http://ex/t/c"));
        assert!(template.graphs().config.is_empty());
    }
}
