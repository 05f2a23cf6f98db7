//! Quad store interface
//!
//! The engine consumes its backing store through the narrow [`QuadStore`]
//! trait: insert/remove, pattern scans with positional wildcards, and
//! per-graph bookkeeping. [`MemoryStore`] is the reference backend.

mod memory;

pub use memory::MemoryStore;

use std::fmt;
use std::sync::Arc;

use crate::term::{Term, Triple};

/// Identifier of a named graph (context)
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct GraphId(Arc<str>);

impl GraphId {
    /// Create a graph identifier
    pub fn new(name: impl AsRef<str>) -> Self {
        GraphId(Arc::from(name.as_ref()))
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for GraphId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.0)
    }
}

impl fmt::Display for GraphId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for GraphId {
    fn from(s: &str) -> Self {
        GraphId::new(s)
    }
}

/// A quad: a triple plus the named graph it belongs to
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Quad {
    pub subject: Term,
    pub predicate: Term,
    pub object: Term,
    pub graph: GraphId,
}

impl Quad {
    /// Create a new quad
    pub fn new(subject: Term, predicate: Term, object: Term, graph: GraphId) -> Self {
        Quad {
            subject,
            predicate,
            object,
            graph,
        }
    }

    /// Create a quad from a triple in a named graph
    pub fn from_triple(triple: Triple, graph: GraphId) -> Self {
        Quad {
            subject: triple.subject,
            predicate: triple.predicate,
            object: triple.object,
            graph,
        }
    }

    /// Convert to a triple (dropping graph information)
    pub fn to_triple(&self) -> Triple {
        Triple::new(
            self.subject.clone(),
            self.predicate.clone(),
            self.object.clone(),
        )
    }

    /// Check if this quad is ground (no variables)
    pub fn is_ground(&self) -> bool {
        self.to_triple().is_ground()
    }
}

impl fmt::Debug for Quad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} {:?} {:?} {:?} .",
            self.subject, self.predicate, self.object, self.graph
        )
    }
}

/// Narrow storage interface consumed by the engine
///
/// Positional arguments of `match_triples` are wildcards when `None`.
/// Duplicate insertion is a no-op (`insert` returns false); this idempotence
/// is what bounds the engine's fixpoint computation.
pub trait QuadStore {
    /// Insert a quad; returns true if it was not already present
    fn insert(&mut self, quad: Quad) -> bool;

    /// Remove a quad; returns true if it was present
    fn remove(&mut self, quad: &Quad) -> bool;

    /// Check if a quad is present
    fn contains(&self, quad: &Quad) -> bool;

    /// Scan a graph for triples matching the given positions
    fn match_triples(
        &self,
        subject: Option<&Term>,
        predicate: Option<&Term>,
        object: Option<&Term>,
        graph: &GraphId,
    ) -> Vec<Triple>;

    /// Number of triples in a graph (0 for an unknown graph)
    fn size(&self, graph: &GraphId) -> usize;

    /// Remove all triples from a graph, keeping the graph itself
    fn clear_graph(&mut self, graph: &GraphId);

    /// Drop a graph and its content; returns true if the graph existed
    fn drop_graph(&mut self, graph: &GraphId) -> bool;

    /// Check if a graph exists
    fn has_graph(&self, graph: &GraphId) -> bool;

    /// All known graph names
    fn graph_names(&self) -> Vec<GraphId>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_id() {
        let g = GraphId::from("http://example.org/g");
        assert_eq!(g.as_str(), "http://example.org/g");
        assert_eq!(g, GraphId::new("http://example.org/g"));
    }

    #[test]
    fn test_quad_round_trip() {
        let triple = Triple::new(
            Term::uri("http://example.org/s"),
            Term::uri("http://example.org/p"),
            Term::uri("http://example.org/o"),
        );
        let quad = Quad::from_triple(triple.clone(), GraphId::from("g"));
        assert_eq!(quad.to_triple(), triple);
        assert!(quad.is_ground());
    }
}
