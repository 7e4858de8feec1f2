use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// An RDF term in subject or object position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Term {
    Iri { value: String },
    BlankNode { id: String },
    Literal {
        value: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        datatype: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        language: Option<String>,
    },
}

impl Term {
    pub fn iri(value: impl Into<String>) -> Self {
        Term::Iri { value: value.into() }
    }

    pub fn blank(id: impl Into<String>) -> Self {
        Term::BlankNode { id: id.into() }
    }

    pub fn literal(value: impl Into<String>) -> Self {
        Term::Literal {
            value: value.into(),
            datatype: None,
            language: None,
        }
    }

    pub fn typed_literal(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        Term::Literal {
            value: value.into(),
            datatype: Some(datatype.into()),
            language: None,
        }
    }

    /// Lexical form: the IRI, the blank node label or the literal value.
    pub fn lexical(&self) -> &str {
        match self {
            Term::Iri { value } => value,
            Term::BlankNode { id } => id,
            Term::Literal { value, .. } => value,
        }
    }

    pub fn is_iri(&self) -> bool {
        matches!(self, Term::Iri { .. })
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Iri { value } => write!(f, "<{}>", escape_iri(value)),
            Term::BlankNode { id } => write!(f, "_:{}", id),
            Term::Literal {
                value,
                datatype,
                language,
            } => {
                write!(f, "\"{}\"", escape_literal(value))?;
                if let Some(language) = language {
                    write!(f, "@{}", language)
                } else if let Some(datatype) = datatype {
                    write!(f, "^^<{}>", escape_iri(datatype))
                } else {
                    Ok(())
                }
            }
        }
    }
}

/// Percent-encode the characters an IRI reference may not contain, so the
/// rendered `<...>` can't be closed early.
pub(crate) fn escape_iri(value: &str) -> Cow<'_, str> {
    let forbidden =
        |ch: char| ch <= ' ' || matches!(ch, '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\');
    if !value.chars().any(forbidden) {
        return Cow::Borrowed(value);
    }
    let mut out = String::with_capacity(value.len() + 8);
    for ch in value.chars() {
        if forbidden(ch) {
            let mut buffer = [0u8; 4];
            for byte in ch.encode_utf8(&mut buffer).bytes() {
                out.push_str(&format!("%{:02X}", byte));
            }
        } else {
            out.push(ch);
        }
    }
    Cow::Owned(out)
}

fn escape_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(ch),
        }
    }
    out
}

/// A single assertion. `graph == None` is the default graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quad {
    pub subject: Term,
    pub predicate: String,
    pub object: Term,
    #[serde(default)]
    pub graph: Option<String>,
}

impl Quad {
    pub fn new(
        subject: Term,
        predicate: impl Into<String>,
        object: Term,
        graph: Option<&str>,
    ) -> Self {
        Self {
            subject,
            predicate: predicate.into(),
            object,
            graph: graph.map(str::to_string),
        }
    }

    /// Same assertion moved into another graph.
    pub fn in_graph(&self, graph: Option<&str>) -> Self {
        Self {
            graph: graph.map(str::to_string),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_display() {
        assert_eq!(Term::iri("http://a").to_string(), "<http://a>");
        assert_eq!(Term::blank("b0").to_string(), "_:b0");
        assert_eq!(Term::literal("say \"hi\"").to_string(), "\"say \\\"hi\\\"\"");
        assert_eq!(
            Term::typed_literal("5", "http://www.w3.org/2001/XMLSchema#int").to_string(),
            "\"5\"^^<http://www.w3.org/2001/XMLSchema#int>"
        );
    }

    #[test]
    fn test_term_lexical() {
        assert_eq!(Term::iri("http://a").lexical(), "http://a");
        assert_eq!(Term::literal("x").lexical(), "x");
        assert!(Term::iri("http://a").is_iri());
        assert!(!Term::literal("x").is_iri());
    }

    #[test]
    fn test_term_serde_tagged() {
        let json = serde_json::to_value(Term::iri("http://a")).unwrap();
        assert_eq!(json["type"], "iri");
        assert_eq!(json["value"], "http://a");
    }

    #[test]
    fn test_quad_in_graph() {
        let quad = Quad::new(Term::iri("s"), "p", Term::literal("o"), Some("g1"));
        let moved = quad.in_graph(None);
        assert_eq!(moved.graph, None);
        assert_eq!(moved.subject, quad.subject);
    }

    #[test]
    fn test_iri_cannot_close_its_brackets() {
        assert_eq!(
            Term::iri("http://a/x> } ?s").to_string(),
            "<http://a/x%3E%20%7D%20?s>"
        );
        assert_eq!(
            Term::typed_literal("1", "http://t/{x}").to_string(),
            "\"1\"^^<http://t/%7Bx%7D>"
        );
        assert_eq!(escape_iri("http://a/b#c"), "http://a/b#c");
    }
}
