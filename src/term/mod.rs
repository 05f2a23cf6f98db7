//! Term and pattern model
//!
//! This module defines the value types the engine works over:
//! - URIs (named resources)
//! - Literals (lexical form plus datatype)
//! - Blank nodes (anonymous, including skolem nodes)
//! - Variables (slots in a binding environment)
//! - Functors (not-yet-constructed composite nodes)
//!
//! A [`Triple`] doubles as a ground statement and as a pattern: pattern
//! positions may hold variables or functors.

use std::fmt;
use std::sync::Arc;

pub mod uri;
mod blank;
mod functor;
mod literal;
mod variable;

pub use blank::BlankNode;
pub use functor::Functor;
pub use literal::{Datatype, Literal};
pub use uri::Uri;
pub use variable::Variable;

/// A term: one position of a triple or triple pattern
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Term {
    /// A URI reference (named resource)
    Uri(Arc<Uri>),
    /// A literal value
    Literal(Arc<Literal>),
    /// A blank node (anonymous)
    BlankNode(BlankNode),
    /// A variable slot (only meaningful relative to an environment)
    Variable(Variable),
    /// A composite node to be synthesized from sub-bindings
    Functor(Arc<Functor>),
}

impl Term {
    /// Create a URI term
    pub fn uri(s: impl Into<String>) -> Self {
        Term::Uri(Arc::new(Uri::new(s.into())))
    }

    /// Create a plain literal
    pub fn literal(s: impl Into<String>) -> Self {
        Term::Literal(Arc::new(Literal::plain(s.into())))
    }

    /// Create a typed literal
    pub fn typed_literal(lexical: impl Into<String>, datatype: impl Into<String>) -> Self {
        Term::Literal(Arc::new(Literal::typed(lexical.into(), datatype.into())))
    }

    /// Create a language-tagged literal
    pub fn lang_literal(lexical: impl Into<String>, lang: impl Into<String>) -> Self {
        Term::Literal(Arc::new(Literal::with_language(lexical.into(), lang.into())))
    }

    /// Create a labeled blank node
    pub fn blank(label: impl Into<String>) -> Self {
        Term::BlankNode(BlankNode::labeled(label.into()))
    }

    /// Create a fresh blank node
    pub fn fresh_blank() -> Self {
        Term::BlankNode(BlankNode::fresh())
    }

    /// Create a variable
    pub fn var(slot: usize, name: impl Into<String>) -> Self {
        Term::Variable(Variable::new(slot, name))
    }

    /// Create a functor term
    pub fn functor(name: impl Into<String>, args: Vec<Term>) -> Self {
        Term::Functor(Arc::new(Functor::new(name, args)))
    }

    /// Check if this term is a variable
    pub fn is_variable(&self) -> bool {
        matches!(self, Term::Variable(_))
    }

    /// Check if this term is ground (contains no variables)
    pub fn is_ground(&self) -> bool {
        match self {
            Term::Uri(_) | Term::Literal(_) | Term::BlankNode(_) => true,
            Term::Variable(_) => false,
            Term::Functor(f) => f.is_ground(),
        }
    }

    /// Get the URI if this is a URI term
    pub fn as_uri(&self) -> Option<&Uri> {
        match self {
            Term::Uri(u) => Some(u),
            _ => None,
        }
    }

    /// Get the literal if this is a literal term
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Term::Literal(l) => Some(l),
            _ => None,
        }
    }
}

impl fmt::Debug for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Uri(u) => write!(f, "{:?}", u),
            Term::Literal(l) => write!(f, "{:?}", l),
            Term::BlankNode(b) => write!(f, "{:?}", b),
            Term::Variable(v) => write!(f, "{:?}", v),
            Term::Functor(c) => write!(f, "{:?}", c),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A triple: three terms, usable as a statement or as a pattern
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Triple {
    pub subject: Term,
    pub predicate: Term,
    pub object: Term,
}

impl Triple {
    pub fn new(subject: Term, predicate: Term, object: Term) -> Self {
        Triple {
            subject,
            predicate,
            object,
        }
    }

    /// Check if this triple contains any variables
    pub fn has_variables(&self) -> bool {
        self.subject.is_variable() || self.predicate.is_variable() || self.object.is_variable()
    }

    /// Check if this triple is ground (no variables, functors all ground)
    pub fn is_ground(&self) -> bool {
        self.subject.is_ground() && self.predicate.is_ground() && self.object.is_ground()
    }

    /// Iterate over the three positions
    pub fn terms(&self) -> impl Iterator<Item = &Term> {
        [&self.subject, &self.predicate, &self.object].into_iter()
    }
}

impl fmt::Debug for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {:?} {:?} .", self.subject, self.predicate, self.object)
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_creation() {
        assert!(matches!(Term::uri("http://example.org/foo"), Term::Uri(_)));
        assert!(matches!(Term::literal("hello"), Term::Literal(_)));
        assert!(matches!(Term::blank("b1"), Term::BlankNode(_)));
        assert!(Term::var(0, "x").is_variable());
    }

    #[test]
    fn test_ground_check() {
        assert!(Term::uri("http://example.org/").is_ground());
        assert!(Term::literal("hello").is_ground());
        assert!(!Term::var(0, "x").is_ground());
        assert!(Term::functor("f", vec![Term::literal("a")]).is_ground());
        assert!(!Term::functor("f", vec![Term::var(1, "y")]).is_ground());
    }

    #[test]
    fn test_triple() {
        let t = Triple::new(
            Term::uri("http://example.org/s"),
            Term::uri("http://example.org/p"),
            Term::literal("o"),
        );
        assert!(t.is_ground());
        assert!(!t.has_variables());
    }

    #[test]
    fn test_pattern_triple() {
        let p = Triple::new(
            Term::var(0, "s"),
            Term::uri("http://example.org/p"),
            Term::var(1, "o"),
        );
        assert!(p.has_variables());
        assert!(!p.is_ground());
    }
}
