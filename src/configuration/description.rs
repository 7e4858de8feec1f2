use graphetl_rdf::{
    GraphPattern, Quad, QueryError, SelectQuery, SparqlSelect, Term, TermPattern, RDF_TYPE,
};

use crate::rdf::vocabulary::config;

/// One configurable property and the predicate (or marker) controlling it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub property: String,
    pub control: String,
}

/// Describes the first level of a configuration type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationDescription {
    pub iri: String,
    pub config_type: String,
    pub members: Vec<Member>,
}

impl ConfigurationDescription {
    /// Load every description of `config_type` found in any named graph of
    /// `source`. Description and members must share one graph.
    pub fn load_for_type(
        source: &dyn SparqlSelect,
        config_type: &str,
    ) -> Result<Vec<ConfigurationDescription>, QueryError> {
        let graph = || GraphPattern::Variable("g".into());
        let query = SelectQuery::new(["description", "property", "control"])
            .triple(
                graph(),
                TermPattern::var("description"),
                TermPattern::iri(RDF_TYPE),
                TermPattern::iri(config::CONFIGURATION_DESCRIPTION),
            )
            .triple(
                graph(),
                TermPattern::var("description"),
                TermPattern::iri(config::TYPE),
                TermPattern::iri(config_type),
            )
            .triple(
                graph(),
                TermPattern::var("description"),
                TermPattern::iri(config::MEMBER),
                TermPattern::var("member"),
            )
            .triple(
                graph(),
                TermPattern::var("member"),
                TermPattern::iri(RDF_TYPE),
                TermPattern::iri(config::MEMBER_TYPE),
            )
            .triple(
                graph(),
                TermPattern::var("member"),
                TermPattern::iri(config::PROPERTY),
                TermPattern::var("property"),
            )
            .triple(
                graph(),
                TermPattern::var("member"),
                TermPattern::iri(config::CONTROL),
                TermPattern::var("control"),
            );

        let mut descriptions: Vec<ConfigurationDescription> = Vec::new();
        for mut row in source.select(&query)? {
            let (Some(iri), Some(property), Some(control)) = (
                row.remove("description"),
                row.remove("property"),
                row.remove("control"),
            ) else {
                continue;
            };
            let member = Member { property, control };
            match descriptions.iter_mut().find(|d| d.iri == iri) {
                Some(description) => {
                    if !description.members.contains(&member) {
                        description.members.push(member);
                    }
                }
                None => descriptions.push(ConfigurationDescription {
                    iri,
                    config_type: config_type.to_string(),
                    members: vec![member],
                }),
            }
        }
        Ok(descriptions)
    }

    pub fn new(iri: impl Into<String>, config_type: impl Into<String>) -> Self {
        Self {
            iri: iri.into(),
            config_type: config_type.into(),
            members: Vec::new(),
        }
    }

    pub fn member(mut self, property: impl Into<String>, control: impl Into<String>) -> Self {
        self.members.push(Member {
            property: property.into(),
            control: control.into(),
        });
        self
    }

    /// Serialize into quads of `graph`; members get `<iri>/member/<n>` IRIs.
    pub fn to_quads(&self, graph: Option<&str>) -> Vec<Quad> {
        let description = Term::iri(self.iri.as_str());
        let mut quads = vec![
            Quad::new(
                description.clone(),
                RDF_TYPE,
                Term::iri(config::CONFIGURATION_DESCRIPTION),
                graph,
            ),
            Quad::new(
                description.clone(),
                config::TYPE,
                Term::iri(self.config_type.as_str()),
                graph,
            ),
        ];
        for (index, member) in self.members.iter().enumerate() {
            let node = Term::iri(format!("{}/member/{}", self.iri, index));
            quads.push(Quad::new(description.clone(), config::MEMBER, node.clone(), graph));
            quads.push(Quad::new(node.clone(), RDF_TYPE, Term::iri(config::MEMBER_TYPE), graph));
            quads.push(Quad::new(
                node.clone(),
                config::PROPERTY,
                Term::iri(member.property.as_str()),
                graph,
            ));
            quads.push(Quad::new(node, config::CONTROL, Term::iri(member.control.as_str()), graph));
        }
        quads
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::MemoryStore;

    fn sample() -> ConfigurationDescription {
        ConfigurationDescription::new("http://templates/t1/desc", "http://ex/Config")
            .member("http://ex/size", "http://ex/sizeControl")
            .member("http://ex/name", config::FORCED)
    }

    #[test]
    fn test_load_for_type() {
        let store = MemoryStore::from_quads(sample().to_quads(Some("http://templates/t1")));
        let descriptions =
            ConfigurationDescription::load_for_type(&store, "http://ex/Config").unwrap();
        assert_eq!(descriptions.len(), 1);
        assert_eq!(descriptions[0].config_type, "http://ex/Config");
        assert_eq!(descriptions[0].members.len(), 2);
        assert!(descriptions[0].members.contains(&Member {
            property: "http://ex/name".into(),
            control: config::FORCED.into(),
        }));
    }

    #[test]
    fn test_load_for_unknown_type_is_empty() {
        let store = MemoryStore::from_quads(sample().to_quads(Some("http://g")));
        assert!(ConfigurationDescription::load_for_type(&store, "http://ex/Other")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_default_graph_is_not_searched() {
        let store = MemoryStore::from_quads(sample().to_quads(None));
        assert!(ConfigurationDescription::load_for_type(&store, "http://ex/Config")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_members_must_share_graph() {
        let mut quads = sample().to_quads(Some("http://g1"));
        for quad in quads.iter_mut().skip(2) {
            *quad = quad.in_graph(Some("http://g2"));
        }
        let store = MemoryStore::from_quads(quads);
        assert!(ConfigurationDescription::load_for_type(&store, "http://ex/Config")
            .unwrap()
            .is_empty());
    }
}
