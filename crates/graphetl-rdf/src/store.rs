//! In-memory quad store evaluating basic graph patterns.

use std::collections::HashMap;

use crate::query::{GraphPattern, QuadPattern, SelectQuery, TermPattern};
use crate::select::{QueryError, Row, SparqlSelect};
use crate::term::{Quad, Term};

type Bindings = HashMap<String, Term>;

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    quads: Vec<Quad>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_quads(quads: impl IntoIterator<Item = Quad>) -> Self {
        let mut store = Self::new();
        store.extend(quads);
        store
    }

    /// Insert a quad; duplicates are ignored.
    pub fn insert(&mut self, quad: Quad) {
        if !self.quads.contains(&quad) {
            self.quads.push(quad);
        }
    }

    pub fn extend(&mut self, quads: impl IntoIterator<Item = Quad>) {
        for quad in quads {
            self.insert(quad);
        }
    }

    pub fn quads(&self) -> &[Quad] {
        &self.quads
    }

    /// All quads of one graph (`None` = default graph).
    pub fn graph(&self, graph: Option<&str>) -> Vec<Quad> {
        self.quads
            .iter()
            .filter(|quad| quad.graph.as_deref() == graph)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.quads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }

    fn evaluate(&self, query: &SelectQuery) -> Vec<Bindings> {
        let mut solutions = vec![Bindings::new()];
        for pattern in &query.patterns {
            let mut next = Vec::new();
            for solution in &solutions {
                for quad in &self.quads {
                    if let Some(extended) = match_quad(pattern, quad, solution) {
                        next.push(extended);
                    }
                }
            }
            if next.is_empty() {
                return next;
            }
            solutions = next;
        }
        solutions
    }
}

fn match_quad(pattern: &QuadPattern, quad: &Quad, bindings: &Bindings) -> Option<Bindings> {
    let mut extended = bindings.clone();
    match &pattern.graph {
        GraphPattern::Default => {
            if quad.graph.is_some() {
                return None;
            }
        }
        GraphPattern::Named(graph) => {
            if quad.graph.as_deref() != Some(graph.as_str()) {
                return None;
            }
        }
        GraphPattern::Variable(name) => {
            let graph = quad.graph.as_ref()?;
            bind(&mut extended, name, &Term::iri(graph.as_str()))?;
        }
        GraphPattern::Any => {}
    }
    match_term(&pattern.subject, &quad.subject, &mut extended)?;
    match_term(
        &pattern.predicate,
        &Term::iri(quad.predicate.as_str()),
        &mut extended,
    )?;
    match_term(&pattern.object, &quad.object, &mut extended)?;
    Some(extended)
}

fn match_term(pattern: &TermPattern, term: &Term, bindings: &mut Bindings) -> Option<()> {
    match pattern {
        TermPattern::Anonymous => Some(()),
        TermPattern::Term(expected) => (expected == term).then_some(()),
        TermPattern::Variable(name) => bind(bindings, name, term),
    }
}

fn bind(bindings: &mut Bindings, name: &str, term: &Term) -> Option<()> {
    match bindings.get(name) {
        Some(bound) => (bound == term).then_some(()),
        None => {
            bindings.insert(name.to_string(), term.clone());
            Some(())
        }
    }
}

impl SparqlSelect for MemoryStore {
    fn select(&self, query: &SelectQuery) -> Result<Vec<Row>, QueryError> {
        if let Some(unknown) = query.variables.iter().find(|v| !query.mentions(v)) {
            return Err(QueryError::UnknownVariable(unknown.clone()));
        }
        let rows = self
            .evaluate(query)
            .into_iter()
            .map(|solution| {
                query
                    .variables
                    .iter()
                    .filter_map(|name| {
                        solution
                            .get(name)
                            .map(|term| (name.clone(), term.lexical().to_string()))
                    })
                    .collect::<Row>()
            })
            .collect();
        Ok(rows)
    }
}
