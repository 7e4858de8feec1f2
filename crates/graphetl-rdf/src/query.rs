//! Conjunctive SELECT queries over named graphs.

use std::fmt;

use crate::term::{escape_iri, Term};

/// A position in a quad pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermPattern {
    /// Named variable, projected or joined on by name.
    Variable(String),
    /// Fixed term.
    Term(Term),
    /// Anonymous variable (`[]`), never joined.
    Anonymous,
}

impl TermPattern {
    pub fn var(name: impl Into<String>) -> Self {
        TermPattern::Variable(name.into())
    }

    pub fn iri(value: impl Into<String>) -> Self {
        TermPattern::Term(Term::iri(value))
    }
}

impl fmt::Display for TermPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TermPattern::Variable(name) => write!(f, "?{}", name),
            TermPattern::Term(term) => write!(f, "{}", term),
            TermPattern::Anonymous => f.write_str("[]"),
        }
    }
}

/// Which graph(s) a quad pattern is matched against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphPattern {
    /// The default graph only.
    Default,
    /// One named graph.
    Named(String),
    /// Any named graph, binding its name.
    Variable(String),
    /// Every graph, default included, without binding a name.
    Any,
}

impl GraphPattern {
    /// `Some(graph)` scopes to that graph, `None` to every graph.
    pub fn scoped(graph: Option<&str>) -> Self {
        match graph {
            Some(graph) => GraphPattern::Named(graph.to_string()),
            None => GraphPattern::Any,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuadPattern {
    pub graph: GraphPattern,
    pub subject: TermPattern,
    pub predicate: TermPattern,
    pub object: TermPattern,
}

impl QuadPattern {
    pub fn new(
        graph: GraphPattern,
        subject: TermPattern,
        predicate: TermPattern,
        object: TermPattern,
    ) -> Self {
        Self {
            graph,
            subject,
            predicate,
            object,
        }
    }

    fn variables(&self) -> impl Iterator<Item = &str> {
        let graph = match &self.graph {
            GraphPattern::Variable(name) => Some(name.as_str()),
            _ => None,
        };
        [&self.subject, &self.predicate, &self.object]
            .into_iter()
            .filter_map(|pattern| match pattern {
                TermPattern::Variable(name) => Some(name.as_str()),
                _ => None,
            })
            .chain(graph)
    }
}

/// `SELECT ?v1 ?v2 WHERE { patterns }`, patterns joined conjunctively.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectQuery {
    pub variables: Vec<String>,
    pub patterns: Vec<QuadPattern>,
}

impl SelectQuery {
    pub fn new<I, S>(variables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            variables: variables.into_iter().map(Into::into).collect(),
            patterns: Vec::new(),
        }
    }

    pub fn pattern(mut self, pattern: QuadPattern) -> Self {
        self.patterns.push(pattern);
        self
    }

    /// Add `subject predicate object` scoped to `graph`.
    pub fn triple(
        self,
        graph: GraphPattern,
        subject: TermPattern,
        predicate: TermPattern,
        object: TermPattern,
    ) -> Self {
        self.pattern(QuadPattern::new(graph, subject, predicate, object))
    }

    /// Whether `name` occurs in at least one pattern.
    pub fn mentions(&self, name: &str) -> bool {
        self.patterns
            .iter()
            .any(|pattern| pattern.variables().any(|v| v == name))
    }
}

impl fmt::Display for SelectQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SELECT")?;
        for variable in &self.variables {
            write!(f, " ?{}", variable)?;
        }
        f.write_str(" WHERE {\n")?;
        let mut any_graph = 0usize;
        for pattern in &self.patterns {
            let triple = format!(
                "{} {} {} .",
                pattern.subject, pattern.predicate, pattern.object
            );
            match &pattern.graph {
                GraphPattern::Default => writeln!(f, "  {}", triple)?,
                GraphPattern::Named(graph) => {
                    writeln!(f, "  GRAPH <{}> {{ {} }}", escape_iri(graph), triple)?
                }
                GraphPattern::Variable(name) => writeln!(f, "  GRAPH ?{} {{ {} }}", name, triple)?,
                // Default graph plus every named graph.
                GraphPattern::Any => {
                    writeln!(
                        f,
                        "  {{ {} }} UNION {{ GRAPH ?_g{} {{ {} }} }}",
                        triple, any_graph, triple
                    )?;
                    any_graph += 1;
                }
            }
        }
        f.write_str("}")
    }
}
